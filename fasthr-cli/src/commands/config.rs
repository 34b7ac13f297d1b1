//! Config command - view and change client settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use fasthr_core::config::{Config, SETTINGS_FILE};

use super::{get_fasthr_dir, print_json};
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the FastHR API base URL
    SetUrl {
        /// e.g. https://hr.example.com
        url: String,
    },
    /// Set the request timeout in seconds
    SetTimeout {
        /// Seconds, at least 1
        secs: u64,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let fasthr_dir = get_fasthr_dir()?;
    let mut config = Config::load(&fasthr_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            if json {
                return print_json(&serde_json::json!({
                    "apiBaseUrl": config.api_base_url,
                    "requestTimeoutSecs": config.request_timeout_secs,
                    "settingsPath": fasthr_dir.join(SETTINGS_FILE),
                    "envOverrides": config.env_overrides(),
                }));
            }

            let mut table = output::create_table();
            table.add_row(vec!["API base URL".to_string(), config.api_base_url.clone()]);
            table.add_row(vec![
                "Request timeout".to_string(),
                format!("{}s", config.request_timeout_secs),
            ]);
            table.add_row(vec![
                "Settings file".to_string(),
                fasthr_dir.join(SETTINGS_FILE).display().to_string(),
            ]);
            println!("{}", "FastHR Settings".bold());
            println!("{}", table);

            for var in config.env_overrides() {
                output::warning(&format!("{} is set and overrides the settings file", var));
            }
        }
        ConfigCommands::SetUrl { url } => {
            config.set_api_base_url(&url)?;
            config.save(&fasthr_dir)?;
            output::success(&format!("API base URL set to {}", url.trim()));
            warn_if_overridden(&config);
        }
        ConfigCommands::SetTimeout { secs } => {
            config.set_request_timeout_secs(secs)?;
            config.save(&fasthr_dir)?;
            output::success(&format!("Request timeout set to {}s", secs));
            warn_if_overridden(&config);
        }
    }

    Ok(())
}

fn warn_if_overridden(config: &Config) {
    if !config.env_overrides().is_empty() {
        output::warning(&format!(
            "Saved, but {} still takes precedence in this shell",
            config.env_overrides().join(", ")
        ));
    }
}
