//! Tablet types: the role a tablet plays in its shard.
//!
//! `TabletType` mirrors the topology schema's enum. It is a thin newtype over
//! the wire value rather than a Rust enum because the schema declares aliases
//! (BATCH shares its value with RDONLY) and because values written by newer
//! schema versions must survive a round trip through this crate.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Role of a tablet within its shard.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabletType(pub i32);

impl TabletType {
    pub const UNKNOWN: TabletType = TabletType(0);
    /// The single writable tablet of a shard.
    pub const PRIMARY: TabletType = TabletType(1);
    /// Replicates from the primary and is eligible for promotion.
    pub const REPLICA: TabletType = TabletType(2);
    /// Read-only replica for batch and analytics traffic.
    pub const RDONLY: TabletType = TabletType(3);
    /// Same wire value as RDONLY.
    pub const BATCH: TabletType = TabletType(3);
    pub const SPARE: TabletType = TabletType(4);
    pub const EXPERIMENTAL: TabletType = TabletType(5);
    pub const BACKUP: TabletType = TabletType(6);
    pub const RESTORE: TabletType = TabletType(7);
    pub const DRAINED: TabletType = TabletType(8);

    /// Wire value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Canonical upper-case schema name, `None` for values outside the schema.
    pub fn name(self) -> Option<&'static str> {
        TABLET_TYPE_NAMES
            .iter()
            .find(|(_, value)| *value == self.0)
            .map(|(name, _)| *name)
    }
}

/// Schema names and their values. The first entry for a value is its
/// canonical name; later entries are accepted aliases.
const TABLET_TYPE_NAMES: &[(&str, i32)] = &[
    ("UNKNOWN", 0),
    ("PRIMARY", 1),
    ("REPLICA", 2),
    ("RDONLY", 3),
    ("BATCH", 3),
    ("SPARE", 4),
    ("EXPERIMENTAL", 5),
    ("BACKUP", 6),
    ("RESTORE", 7),
    ("DRAINED", 8),
];

/// Every tablet type an operator can assign, in display order.
pub const ALL_TABLET_TYPES: [TabletType; 9] = [
    TabletType::PRIMARY,
    TabletType::REPLICA,
    TabletType::RDONLY,
    TabletType::BATCH,
    TabletType::SPARE,
    TabletType::EXPERIMENTAL,
    TabletType::BACKUP,
    TabletType::RESTORE,
    TabletType::DRAINED,
];

lazy_static! {
    static ref TABLET_TYPE_VALUES: HashMap<&'static str, i32> =
        TABLET_TYPE_NAMES.iter().copied().collect();

    /// Wire value to lower-case canonical name, built once on first use.
    static ref TABLET_TYPE_LOWER_NAME: HashMap<i32, String> = {
        let mut names = HashMap::with_capacity(TABLET_TYPE_NAMES.len());
        for (name, value) in TABLET_TYPE_NAMES {
            names.entry(*value).or_insert_with(|| name.to_lowercase());
        }
        names
    };
}

impl fmt::Display for TabletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl fmt::Debug for TabletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TabletType({})", self)
    }
}

impl FromStr for TabletType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_tablet_type(s)
    }
}

/// Parses a tablet type name, case-insensitively.
///
/// On failure the error carries the input; callers that only want a value
/// can fall back to `TabletType::UNKNOWN` themselves.
pub fn parse_tablet_type(param: &str) -> Result<TabletType> {
    match TABLET_TYPE_VALUES.get(param.to_uppercase().as_str()) {
        Some(value) => Ok(TabletType(*value)),
        None => {
            tracing::trace!(param, "unknown tablet type");
            Err(Error::UnknownTabletType(param.to_string()))
        }
    }
}

/// Parses a comma separated list of tablet types, stopping at the first bad
/// entry. Entries are not trimmed.
pub fn parse_tablet_types(param: &str) -> Result<Vec<TabletType>> {
    param.split(',').map(parse_tablet_type).collect()
}

/// Lower-case name of the tablet type, or `"unknown"` for values outside the
/// schema.
pub fn tablet_type_lstring(tablet_type: TabletType) -> &'static str {
    TABLET_TYPE_LOWER_NAME
        .get(&tablet_type.0)
        .map(String::as_str)
        .unwrap_or("unknown")
}

pub fn is_type_in_list(tablet_type: TabletType, types: &[TabletType]) -> bool {
    types.contains(&tablet_type)
}

/// Sorted lower-case names of `types`. Duplicates are kept.
pub fn make_string_type_list(types: &[TabletType]) -> Vec<String> {
    let mut strs: Vec<String> = types.iter().map(|t| t.to_string().to_lowercase()).collect();
    strs.sort();
    strs
}

/// Sorted lower-case names of `types` with duplicate names removed.
///
/// Aliased types such as BATCH and RDONLY share a name and so show up once.
pub fn make_unique_string_type_list(types: &[TabletType]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(types.len());
    let mut strs = Vec::with_capacity(types.len());
    for t in types {
        let name = t.to_string();
        let lower = name.to_lowercase();
        if seen.insert(name) {
            strs.push(lower);
        }
    }
    strs.sort();
    strs
}

/// True for types that are expected to serve queries when healthy.
pub fn is_serving_type(tablet_type: TabletType) -> bool {
    matches!(
        tablet_type,
        TabletType::PRIMARY | TabletType::REPLICA | TabletType::BATCH | TabletType::EXPERIMENTAL
    )
}
