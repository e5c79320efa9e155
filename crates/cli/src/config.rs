//! Command line configuration.

use crate::commands::{Command, CommandResult};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Inspect tablet aliases, tablet types and tablet records.
#[derive(Debug, Parser)]
#[command(name = "topoctl", version)]
pub struct CliConfig {
    /// Log filter; falls back to RUST_LOG, then "warn".
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON instead of plain lines.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Installs the global tracing subscriber. Logs go to stderr so stdout
    /// stays parseable.
    pub fn init_tracing(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let result = self.command.execute()?;
        print!("{}", self.render(&result)?);
        Ok(())
    }

    /// Formats a command result for stdout.
    pub fn render(&self, result: &CommandResult) -> anyhow::Result<String> {
        if self.json {
            return Ok(format!("{}\n", serde_json::to_string_pretty(&result.to_json())?));
        }
        let mut out = String::new();
        for line in result.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags() {
        let config =
            CliConfig::try_parse_from(["topoctl", "--json", "parse-alias", "zone1-100"]).unwrap();
        assert!(config.json);
        assert!(config.log_level.is_none());
        assert!(matches!(config.command, Command::ParseAlias { .. }));
    }

    #[test]
    fn test_render_plain_and_json() {
        let config = CliConfig::try_parse_from(["topoctl", "tablet-types"]).unwrap();
        let result = config.command.execute().unwrap();
        let plain = config.render(&result).unwrap();
        assert!(plain.starts_with("primary\tserving\n"));

        let config = CliConfig::try_parse_from(["topoctl", "--json", "tablet-types"]).unwrap();
        let json = config.render(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "primary");
        assert_eq!(value[0]["serving"], true);
    }
}
