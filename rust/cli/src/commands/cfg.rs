//! `cfg`: the resolved configuration with the source of each value.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "players": {
//!     "value": 4,
//!     "source": "default"
//!   },
//!   "threshold": {
//!     "value": 30,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if the file or a variable is invalid.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    config::validate(&resolved.config)?;
    write_resolved(out, &resolved)
}

fn write_resolved(out: &mut dyn Write, resolved: &config::ConfigResolved) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "players": {
            "value": config.players,
            "source": sources.players,
        },
        "threshold": {
            "value": config.threshold,
            "source": sources.threshold,
        },
        "plugin_dir": {
            "value": config.plugin_dir,
            "source": sources.plugin_dir,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_value_and_source_per_key() {
        let resolved = config::load_from(|key| match key {
            config::THRESHOLD_VAR => Some("30".to_string()),
            _ => None,
        })
        .unwrap();
        let mut out = Vec::new();
        write_resolved(&mut out, &resolved).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["threshold"]["value"], 30);
        assert_eq!(json["threshold"]["source"], "env");
        assert_eq!(json["players"]["value"], 4);
        assert_eq!(json["players"]["source"], "default");
        assert!(json["seed"]["value"].is_null());
        assert_eq!(json["plugin_dir"]["value"], ".");
    }
}
