//! Anchors and aliases for nodes reachable from more than one place.
//!
//! Run with: cargo run --example shared_nodes

use std::error::Error;
use yaml_dump::{dump_document, yaml, Document, DumpOptions, Mapping, Value};

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = Document::default();

    // One defaults block shared by every environment.
    let defaults = doc.add(yaml!({
        "retries": 3,
        "timeout": "30s"
    }));

    let mut environments = Mapping::new();
    for name in ["dev", "staging", "prod"] {
        environments.insert(name.into(), defaults.into());
    }
    doc.set_root(Value::Mapping(environments));

    println!("With anchors:\n{}", dump_document(&doc, &DumpOptions::new())?);
    println!(
        "Inline (noRefs):\n{}",
        dump_document(&doc, &DumpOptions::new().with_no_refs(true))?
    );

    // A node that contains itself.
    let mut cyclic = Document::default();
    let id = cyclic.reserve();
    let mut node = Mapping::new();
    node.insert("name".into(), "root".into());
    node.insert("parent".into(), id.into());
    cyclic.replace(id, Value::Mapping(node))?;
    cyclic.set_root(id.into());

    println!("Cycle:\n{}", dump_document(&cyclic, &DumpOptions::new())?);

    match dump_document(&cyclic, &DumpOptions::new().with_no_refs(true)) {
        Ok(out) => println!("unexpected output:\n{}", out),
        Err(e) => println!("Cycle with noRefs: {}", e),
    }

    Ok(())
}
