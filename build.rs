use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

fn main() -> Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").context("CARGO_MANIFEST_DIR not set")?;
    let out_dir = env::var("OUT_DIR").context("OUT_DIR not set")?;
    let messages_dir = Path::new(&manifest_dir).join("messages");
    let out_path = Path::new(&out_dir).join("all_messages.json");

    println!("cargo:rerun-if-changed=messages");

    // Always create the file, even if empty, so include_str! works
    if !messages_dir.exists() {
        println!("cargo:warning=no messages/ folder found, bundling empty catalogs");
        fs::write(out_path, "{}")?;
        return Ok(());
    }

    let bundle = bundle_catalogs(&messages_dir)?;
    report_key_drift(&bundle);
    fs::write(out_path, serde_json::to_string_pretty(&bundle)?)?;

    Ok(())
}

fn bundle_catalogs(messages_dir: &Path) -> Result<Value> {
    let mut locales = Map::new();

    for locale_entry in fs::read_dir(messages_dir)? {
        let locale_dir = locale_entry?;
        if !locale_dir.file_type()?.is_dir() {
            continue;
        }

        let locale = locale_dir.file_name().to_string_lossy().to_string();
        let mut catalog = Map::new();

        for file_entry in fs::read_dir(locale_dir.path())? {
            let path = file_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let json: Value = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;

            // Catalog files are flat key -> string maps
            let Value::Object(entries) = json else {
                bail!("{} must contain a JSON object", path.display());
            };
            for (key, value) in entries {
                if !value.is_string() {
                    bail!("{}: key '{key}' must map to a string", path.display());
                }
                catalog.insert(key, value);
            }
        }

        locales.insert(locale, Value::Object(catalog));
    }

    Ok(Value::Object(locales))
}

// Keys present in one locale but missing from another surface as build warnings
// so translation drift is caught before it ships.
fn report_key_drift(bundle: &Value) {
    let Some(locales) = bundle.as_object() else {
        return;
    };

    let mut all_keys: Vec<&String> = locales
        .values()
        .filter_map(Value::as_object)
        .flat_map(|catalog| catalog.keys())
        .collect();
    all_keys.sort();
    all_keys.dedup();

    for (locale, catalog) in locales {
        let Some(catalog) = catalog.as_object() else {
            continue;
        };
        for key in &all_keys {
            if !catalog.contains_key(*key) {
                println!("cargo:warning=locale '{locale}' is missing translation key '{key}'");
            }
        }
    }
}
