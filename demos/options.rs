//! Tuning the output with DumpOptions.
//!
//! Run with: cargo run --example options

use std::error::Error;
use yaml_dump::{dump, yaml, DumpOptions, Mapping, Tagged, Value};

fn main() -> Result<(), Box<dyn Error>> {
    let description = concat!(
        "A fairly long description that will not fit on a single line ",
        "once the line width is reduced to forty characters."
    );
    let data = yaml!({
        "zone": "eu-west",
        "description": description,
        "nodes": [{ "id": 1, "role": "primary" }, { "id": 2, "role": "replica" }],
        "answer": "no"
    });

    println!("Defaults:\n{}", dump(&data, &DumpOptions::new())?);

    let options = DumpOptions::new()
        .with_indent(4)
        .with_line_width(40)
        .with_sort_keys(true);
    println!("indent 4, width 40, sorted:\n{}", dump(&data, &options)?);

    let options = DumpOptions::new().with_flow_level(1);
    println!("flow from level 1:\n{}", dump(&data, &options)?);

    let options = DumpOptions::new().with_flow_level(0).with_condense_flow(true);
    println!("condensed flow:\n{}", dump(&data, &options)?);

    let options = DumpOptions::new().with_no_compat_mode(true).with_no_array_indent(true);
    println!("no compat mode, no array indent:\n{}", dump(&data, &options)?);

    // Options can also be loaded from a value, e.g. parsed from a config file.
    let options = DumpOptions::try_from(&yaml!({
        "styles": { "!!int": "hex" },
        "sortKeys": true
    }))?;
    println!("loaded options:\n{}", dump(&yaml!({ "mask": 255, "bits": 8 }), &options)?);

    // Values nothing in the schema can represent are dropped on request.
    struct Handle;
    let mut mixed = Mapping::new();
    mixed.insert("kept".into(), Value::from(1));
    mixed.insert("handle".into(), Value::Tagged(Tagged::new(Handle)));
    let mixed = Value::Mapping(mixed);

    if let Err(e) = dump(&mixed, &DumpOptions::new()) {
        println!("without skipInvalid: {}", e);
    }
    println!(
        "with skipInvalid:\n{}",
        dump(&mixed, &DumpOptions::new().with_skip_invalid(true))?
    );

    Ok(())
}
