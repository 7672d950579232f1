use mahkrab_core::ExecutorMapping;
use serde_json::Value;

/// One line per mapping entry, marking the entry this tool owns
pub fn format_entry(key: &str, value: &Value, owned_key: &str) -> String {
    let marker = if key == owned_key { "🎯" } else { "  " };
    let command = match value {
        Value::String(command) => command.clone(),
        other => other.to_string(),
    };
    format!("   {marker} {key}: {command}")
}

pub fn print_mapping(mapping: &ExecutorMapping, owned_key: &str, location: &str) {
    println!("📄 Executor map in {location}");
    println!("{}", "=".repeat(80));

    if mapping.is_empty() {
        println!("   (empty)");
        return;
    }

    for (key, value) in mapping {
        println!("{}", format_entry(key, value, owned_key));
    }

    if !mapping.contains_key(owned_key) {
        println!("\n   ❌ No entry for '{owned_key}' yet");
    }
}
