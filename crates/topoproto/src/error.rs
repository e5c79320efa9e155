//! Error types for the topology proto helpers.

use std::io;
use std::num::ParseIntError;

/// Result type alias for the topoproto library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or resolving topology values.
///
/// Every variant keeps the offending input so the message alone is enough to
/// find the bad value in a flag, a topo key or a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Alias string does not match `<cell>-<uid>`
    #[error("invalid tablet alias: '{alias}', expecting format: '{pattern}'")]
    InvalidFormat { alias: String, pattern: &'static str },

    /// Uid is not a plain run of decimal digits or does not fit in a u32.
    /// `alias` is set when the uid came out of an alias string.
    #[error("{}bad tablet uid '{value}': {source}", alias_context(.alias))]
    InvalidUid {
        alias: Option<String>,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Name is not part of the tablet type enum
    #[error("unknown TabletType {0}")]
    UnknownTabletType(String),

    /// Hostname lookup failed
    #[error("cannot resolve mysql host '{host}': {source}")]
    Resolution {
        host: String,
        #[source]
        source: io::Error,
    },
}

fn alias_context(alias: &Option<String>) -> String {
    match alias {
        Some(alias) => format!("invalid tablet uid in alias '{}': ", alias),
        None => String::new(),
    }
}
