use clap::Subcommand;
use fitquest_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting, e.g. "defaults.calories" or "alerts.vibration_ms"
    Get { key: String },
    /// Change one setting and write config.toml
    Set { key: String, value: String },
    /// Print every setting as `key = value`
    List,
    /// Restore the built-in defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if key.starts_with("defaults.") {
                println!("ok (used until targets are saved)");
            } else {
                println!("ok");
            }
        }
        ConfigAction::List => {
            let json = serde_json::to_value(Config::load()?)?;
            let mut lines = Vec::new();
            flatten("", &json, &mut lines);
            for (key, value) in lines {
                println!("{key} = {value}");
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

/// Dot-path keys in the same form `get` and `set` accept.
fn flatten(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
    match value {
        serde_json::Value::Object(map) => {
            for (name, child) in map {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten(&key, child, out);
            }
        }
        leaf => out.push((prefix.to_string(), leaf.to_string())),
    }
}
