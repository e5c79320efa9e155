//! Subcommands and their results.

use anyhow::Context;
use clap::Subcommand;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use topoproto::{
    is_serving_type, make_string_type_list, make_unique_string_type_list, mysql_ip,
    parse_tablet_alias, parse_tablet_types, tablet_alias_string, tablet_type_lstring,
    TabletAlias, TabletAliasList, Tablet, ALL_TABLET_TYPES,
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a `<cell>-<uid>` alias and print its canonical form.
    ParseAlias { alias: String },

    /// Parse aliases and print them sorted by cell, then uid.
    SortAliases {
        #[arg(required = true)]
        aliases: Vec<String>,
    },

    /// Parse a comma separated tablet type list and print the sorted names.
    ParseTypes {
        list: String,
        /// Collapse types that share a name (e.g. batch and rdonly).
        #[arg(long)]
        unique: bool,
    },

    /// List every assignable tablet type and whether it serves traffic.
    TabletTypes,

    /// Inspect a tablet record stored as JSON.
    Tablet {
        #[arg(long)]
        file: PathBuf,
        /// Also resolve the MySQL hostname (blocks on DNS).
        #[arg(long)]
        resolve: bool,
    },
}

/// What a tablet record says about reaching its database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabletReport {
    pub alias: String,
    pub tablet_type: String,
    pub db_name: String,
    pub mysql_addr: String,
    pub assigned: bool,
    pub mysql_ip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Alias(TabletAlias),
    Aliases(Vec<TabletAlias>),
    TypeNames(Vec<String>),
    TabletTypes,
    Tablet(TabletReport),
}

impl Command {
    pub fn execute(&self) -> anyhow::Result<CommandResult> {
        match self {
            Command::ParseAlias { alias } => Ok(CommandResult::Alias(parse_tablet_alias(alias)?)),
            Command::SortAliases { aliases } => {
                let mut list = aliases
                    .iter()
                    .map(|a| parse_tablet_alias(a))
                    .collect::<topoproto::Result<TabletAliasList>>()?;
                list.sort();
                Ok(CommandResult::Aliases(list.into_inner()))
            }
            Command::ParseTypes { list, unique } => {
                let types = parse_tablet_types(list)?;
                let names = if *unique {
                    make_unique_string_type_list(&types)
                } else {
                    make_string_type_list(&types)
                };
                Ok(CommandResult::TypeNames(names))
            }
            Command::TabletTypes => Ok(CommandResult::TabletTypes),
            Command::Tablet { file, resolve } => {
                let raw = fs::read_to_string(file)
                    .with_context(|| format!("reading tablet record {}", file.display()))?;
                let tablet: Tablet = serde_json::from_str(&raw)
                    .with_context(|| format!("decoding tablet record {}", file.display()))?;
                tracing::debug!(alias = %tablet_alias_string(tablet.alias.as_ref()), "loaded tablet record");
                Ok(CommandResult::Tablet(inspect_tablet(&tablet, *resolve)?))
            }
        }
    }
}

pub fn inspect_tablet(tablet: &Tablet, resolve: bool) -> anyhow::Result<TabletReport> {
    let mysql_ip = if resolve {
        Some(mysql_ip(tablet).context("resolving mysql hostname")?)
    } else {
        None
    };
    Ok(TabletReport {
        alias: tablet_alias_string(tablet.alias.as_ref()),
        tablet_type: tablet_type_lstring(tablet.tablet_type).to_string(),
        db_name: tablet.db_name(),
        mysql_addr: tablet.mysql_addr(),
        assigned: tablet.is_assigned(),
        mysql_ip,
    })
}

fn serving_label(serving: bool) -> &'static str {
    if serving {
        "serving"
    } else {
        "not-serving"
    }
}

impl CommandResult {
    /// Plain text rendering, one record per line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            CommandResult::Alias(alias) => vec![alias.to_string()],
            CommandResult::Aliases(aliases) => aliases.iter().map(ToString::to_string).collect(),
            CommandResult::TypeNames(names) => names.clone(),
            CommandResult::TabletTypes => ALL_TABLET_TYPES
                .iter()
                .map(|t| format!("{}\t{}", tablet_type_lstring(*t), serving_label(is_serving_type(*t))))
                .collect(),
            CommandResult::Tablet(report) => {
                let mut lines = vec![
                    format!("alias\t{}", report.alias),
                    format!("type\t{}", report.tablet_type),
                    format!("db_name\t{}", report.db_name),
                    format!("mysql_addr\t{}", report.mysql_addr),
                    format!("assigned\t{}", report.assigned),
                ];
                if let Some(ip) = &report.mysql_ip {
                    lines.push(format!("mysql_ip\t{}", ip));
                }
                lines
            }
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            CommandResult::Alias(alias) => json!({
                "alias": alias.to_string(),
                "cell": alias.cell,
                "uid": alias.uid,
            }),
            CommandResult::Aliases(aliases) => {
                json!(aliases.iter().map(ToString::to_string).collect::<Vec<_>>())
            }
            CommandResult::TypeNames(names) => json!(names),
            CommandResult::TabletTypes => Value::Array(
                ALL_TABLET_TYPES
                    .iter()
                    .map(|t| {
                        json!({
                            "name": tablet_type_lstring(*t),
                            "value": t.value(),
                            "serving": is_serving_type(*t),
                        })
                    })
                    .collect(),
            ),
            CommandResult::Tablet(report) => json!({
                "alias": report.alias,
                "tablet_type": report.tablet_type,
                "db_name": report.db_name,
                "mysql_addr": report.mysql_addr,
                "assigned": report.assigned,
                "mysql_ip": report.mysql_ip,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topoproto::TabletType;

    #[test]
    fn test_parse_alias_command() {
        let cmd = Command::ParseAlias {
            alias: "zone1-100".to_string(),
        };
        let result = cmd.execute().unwrap();
        assert_eq!(result.lines(), vec!["zone1-0000000100"]);
        assert_eq!(result.to_json()["uid"], 100);

        let cmd = Command::ParseAlias {
            alias: "bad alias".to_string(),
        };
        assert!(cmd.execute().is_err());
    }

    #[test]
    fn test_sort_aliases_command() {
        let cmd = Command::SortAliases {
            aliases: vec!["b-1".to_string(), "a-5".to_string(), "a-2".to_string()],
        };
        assert_eq!(
            cmd.execute().unwrap().lines(),
            vec!["a-0000000002", "a-0000000005", "b-0000000001"]
        );
    }

    #[test]
    fn test_parse_types_command() {
        let cmd = Command::ParseTypes {
            list: "rdonly,batch,replica".to_string(),
            unique: false,
        };
        assert_eq!(cmd.execute().unwrap().lines(), vec!["rdonly", "rdonly", "replica"]);

        let cmd = Command::ParseTypes {
            list: "rdonly,batch,replica".to_string(),
            unique: true,
        };
        assert_eq!(cmd.execute().unwrap().lines(), vec!["rdonly", "replica"]);

        let cmd = Command::ParseTypes {
            list: "replica,bogus".to_string(),
            unique: false,
        };
        let err = cmd.execute().unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_tablet_types_command() {
        let lines = CommandResult::TabletTypes.lines();
        assert_eq!(lines.len(), ALL_TABLET_TYPES.len());
        assert_eq!(lines[0], "primary\tserving");
        assert_eq!(lines[8], "drained\tnot-serving");
    }

    #[test]
    fn test_inspect_tablet() {
        let tablet = Tablet::with_placement(TabletAlias::new("zone1", 7), TabletType::PRIMARY, "ks1", "0")
            .with_mysql("127.0.0.1", 3306);

        let report = inspect_tablet(&tablet, false).unwrap();
        assert_eq!(report.alias, "zone1-0000000007");
        assert_eq!(report.tablet_type, "primary");
        assert_eq!(report.db_name, "vt_ks1");
        assert_eq!(report.mysql_addr, "127.0.0.1:3306");
        assert!(report.assigned);
        assert_eq!(report.mysql_ip, None);

        let report = inspect_tablet(&tablet, true).unwrap();
        assert_eq!(report.mysql_ip.as_deref(), Some("127.0.0.1"));
        assert!(CommandResult::Tablet(report).lines().contains(&"mysql_ip\t127.0.0.1".to_string()));
    }

    #[test]
    fn test_tablet_command_missing_file() {
        let cmd = Command::Tablet {
            file: PathBuf::from("/nonexistent/tablet.json"),
            resolve: false,
        };
        let err = cmd.execute().unwrap_err();
        assert!(err.to_string().contains("reading tablet record"));
    }
}
