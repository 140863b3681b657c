//! Dumping serde types and dynamic values.
//!
//! Run with: cargo run --example basic

use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use yaml_dump::{dump, to_string, to_value, yaml, DumpOptions};

#[derive(Debug, Serialize)]
struct Service {
    name: String,
    image: String,
    replicas: u32,
    ports: Vec<u16>,
    env: BTreeMap<String, String>,
    command: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut env = BTreeMap::new();
    env.insert("RUST_LOG".to_string(), "info".to_string());
    env.insert("FEATURE_FLAG".to_string(), "off".to_string());
    env.insert("PORT".to_string(), "8080".to_string());

    let service = Service {
        name: "api".to_string(),
        image: "registry.local/api:1.4".to_string(),
        replicas: 3,
        ports: vec![80, 443],
        env,
        command: "set -e\n./migrate\nexec ./api\n".to_string(),
    };

    // Strings that would read back as something else get quoted,
    // multi-line strings become literal blocks.
    println!("Service:\n{}", to_string(&service)?);

    let config = yaml!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true,
        "notes": null
    });
    println!("Config:\n{}", dump(&config, &DumpOptions::new())?);

    // Structs become mappings in declaration order.
    let value = to_value(&service)?;
    if let Some(ports) = value.as_mapping().and_then(|m| m.get_str("ports")) {
        println!("ports as flow:\n{}", dump(ports, &DumpOptions::new().with_flow_level(0))?);
    }

    Ok(())
}
