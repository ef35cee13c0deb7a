//! Config command handlers.

use crate::config::Config;

use super::output::print_json;

/// Print the active configuration with secrets blanked out.
pub async fn cmd_config_show(config: &Config, json: bool) -> anyhow::Result<()> {
    let redacted = redact(config.clone());

    if json {
        return print_json(&redacted);
    }

    println!("{}", toml::to_string_pretty(&redacted)?);
    Ok(())
}

pub async fn cmd_config_validate(config: &Config) -> anyhow::Result<()> {
    match config.validate() {
        Ok(()) => {
            println!("Configuration is valid.");
            Ok(())
        }
        Err(e) => {
            println!("Configuration problem: {}", e);
            Err(e)
        }
    }
}

pub async fn cmd_config_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with defaults.");
        println!("Set API keys via OPENAI_API_KEY / HEYGEN_API_KEY or edit the file.");
    } else {
        println!("config.toml already exists, leaving it alone.");
    }
    Ok(())
}

fn redact(mut config: Config) -> Config {
    config.sora.api_key.clear();
    config.heygen.api_key.clear();
    config.llm.api_key.clear();
    config.storage.access_key_id.clear();
    config.storage.secret_access_key.clear();
    config
}
