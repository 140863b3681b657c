//! Registering your own types in a schema.
//!
//! Run with: cargo run --example custom_types

use std::error::Error;
use std::net::Ipv4Addr;
use yaml_dump::{dump, DumpOptions, Mapping, Schema, Tagged, Value, YamlType};

struct Color {
    r: u8,
    g: u8,
    b: u8,
}

fn color_type() -> YamlType {
    YamlType::new("!color")
        .instance_of::<Color>()
        .represent_style("hex", |value, _| {
            let c = color(value)?;
            Ok(Value::from(format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)))
        })
        .represent_style("rgb", |value, _| {
            let c = color(value)?;
            Ok(Value::Sequence(vec![c.r.into(), c.g.into(), c.b.into()]))
        })
        .default_style("hex")
}

fn color(value: &Value) -> yaml_dump::Result<&Color> {
    value
        .as_tagged()
        .and_then(|t| t.downcast_ref::<Color>())
        .ok_or_else(|| yaml_dump::Error::custom("not a color"))
}

fn address_type() -> YamlType {
    YamlType::new("!ipv4")
        .instance_of::<Ipv4Addr>()
        .resolve(|s| s.parse::<Ipv4Addr>().is_ok())
        .represent(|value, _| {
            let addr = value
                .as_tagged()
                .and_then(|t| t.downcast_ref::<Ipv4Addr>())
                .ok_or_else(|| yaml_dump::Error::custom("not an address"))?;
            Ok(Value::from(addr.to_string()))
        })
}

fn main() -> Result<(), Box<dyn Error>> {
    let schema = Schema::core()
        .with_implicit(address_type())
        .with_explicit(color_type());

    let mut theme = Mapping::new();
    theme.insert("accent".into(), Value::Tagged(Tagged::new(Color { r: 255, g: 128, b: 0 })));
    theme.insert("server".into(), Value::Tagged(Tagged::new(Ipv4Addr::new(10, 0, 0, 1))));
    // A string that looks like an address must stay a string.
    theme.insert("fallback".into(), "10.0.0.2".into());
    let theme = Value::Mapping(theme);

    let options = DumpOptions::new().with_schema(schema);
    println!("Default styles:\n{}", dump(&theme, &options)?);

    let rgb = options.clone().with_style("!color", "rgb").with_flow_level(1);
    println!("rgb style:\n{}", dump(&theme, &rgb)?);

    let broken = options.with_style("!color", "hsl");
    if let Err(e) = dump(&theme, &broken) {
        println!("Unsupported style: {}", e);
    }

    Ok(())
}
