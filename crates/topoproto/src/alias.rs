//! Tablet alias encoding and decoding.
//!
//! A tablet is addressed cluster-wide by its alias: the cell it lives in plus
//! a numeric uid that is unique within that cell. The canonical string form is
//! `<cell>-<uid>` with the uid zero-padded to ten digits, e.g.
//! `zone1-0000000100`. That string is used as the tablet's key in the topology
//! store, so parsing and formatting must agree exactly.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Pattern every alias string must match, anchored on both ends.
pub const TABLET_ALIAS_FORMAT: &str = r"^(?P<cell>[-_.a-zA-Z0-9]+)-(?P<uid>[0-9]+)$";

/// Rendering used for an absent alias.
pub const NIL_ALIAS: &str = "<nil>";

lazy_static! {
    static ref TABLET_ALIAS_REGEXP: Regex =
        Regex::new(TABLET_ALIAS_FORMAT).expect("tablet alias pattern is valid");
}

/// Identifier of a tablet: the cell plus a uid unique within that cell.
///
/// Ordering is by cell first, then uid, which is the order the topology
/// tooling displays aliases in.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TabletAlias {
    #[serde(default)]
    pub cell: String,
    #[serde(default)]
    pub uid: u32,
}

impl TabletAlias {
    pub fn new(cell: impl Into<String>, uid: u32) -> Self {
        Self {
            cell: cell.into(),
            uid,
        }
    }

    /// True for the "unassigned" sentinel: empty cell and uid 0.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.cell.is_empty() && self.uid == 0
    }

    /// The uid alone, zero-padded to ten digits.
    pub fn uid_str(&self) -> String {
        format!("{:010}", self.uid)
    }
}

impl fmt::Display for TabletAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:010}", self.cell, self.uid)
    }
}

impl FromStr for TabletAlias {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_tablet_alias(s)
    }
}

/// Parses a `<cell>-<uid>` string.
///
/// The cell may itself contain dashes; the uid is the trailing digit run.
pub fn parse_tablet_alias(alias: &str) -> Result<TabletAlias> {
    let caps = match TABLET_ALIAS_REGEXP.captures(alias) {
        Some(caps) => caps,
        None => {
            tracing::trace!(alias, "alias does not match format");
            return Err(Error::InvalidFormat {
                alias: alias.to_string(),
                pattern: TABLET_ALIAS_FORMAT,
            });
        }
    };

    let value = &caps["uid"];
    let uid = parse_uid_digits(value).map_err(|source| Error::InvalidUid {
        alias: Some(alias.to_string()),
        value: value.to_string(),
        source,
    })?;

    Ok(TabletAlias::new(&caps["cell"], uid))
}

/// Parses a bare uid: one or more ASCII digits, no sign.
pub fn parse_uid(value: &str) -> Result<u32> {
    parse_uid_digits(value).map_err(|source| Error::InvalidUid {
        alias: None,
        value: value.to_string(),
        source,
    })
}

/// `u32::from_str` also takes a leading `+`; uids are digits only.
fn parse_uid_digits(value: &str) -> std::result::Result<u32, ParseIntError> {
    if let Some(c) = value.chars().find(|c| !c.is_ascii_digit()) {
        // A lone non-digit character never parses, so this reports InvalidDigit
        return c.encode_utf8(&mut [0; 4]).parse::<u32>();
    }
    value.parse::<u32>()
}

/// Formats an alias, rendering an absent one as `<nil>`.
pub fn tablet_alias_string(alias: Option<&TabletAlias>) -> String {
    match alias {
        Some(alias) => alias.to_string(),
        None => NIL_ALIAS.to_string(),
    }
}

pub fn tablet_alias_uid_str(alias: &TabletAlias) -> String {
    alias.uid_str()
}

/// Structural equality; two absent aliases are equal.
#[inline]
pub fn tablet_alias_equal(left: Option<&TabletAlias>, right: Option<&TabletAlias>) -> bool {
    left == right
}

/// True when the alias is absent or is the zero sentinel.
#[inline]
pub fn tablet_alias_is_zero(alias: Option<&TabletAlias>) -> bool {
    alias.map_or(true, TabletAlias::is_zero)
}

/// Linear scan for an alias equal to `target`.
pub fn contains_alias(target: &TabletAlias, aliases: &[TabletAlias]) -> bool {
    aliases.iter().any(|alias| alias == target)
}

/// Splits a comma separated list of tablet names into a set.
///
/// An empty input yields an empty set rather than a set holding `""`.
pub fn parse_tablet_set(list: &str) -> HashSet<String> {
    if list.is_empty() {
        return HashSet::new();
    }
    list.split(',').map(str::to_string).collect()
}

/// Three-way comparison on cell, then uid.
#[inline]
pub fn compare_aliases(a: &TabletAlias, b: &TabletAlias) -> Ordering {
    a.cell.cmp(&b.cell).then(a.uid.cmp(&b.uid))
}

/// Stable in-place sort by cell, then uid.
pub fn sort_aliases(aliases: &mut [TabletAlias]) {
    aliases.sort_by(compare_aliases);
}

/// Formats each alias, keeping input order and length.
pub fn alias_strings<'a, I>(aliases: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a TabletAlias>>,
{
    aliases.into_iter().map(tablet_alias_string).collect()
}

/// An owned list of aliases, mostly used for sorting and display.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TabletAliasList(pub Vec<TabletAlias>);

impl TabletAliasList {
    pub fn new(aliases: Vec<TabletAlias>) -> Self {
        Self(aliases)
    }

    pub fn sort(&mut self) {
        sort_aliases(&mut self.0);
    }

    pub fn to_string_slice(&self) -> Vec<String> {
        alias_strings(self.0.iter().map(Some))
    }

    pub fn contains(&self, alias: &TabletAlias) -> bool {
        contains_alias(alias, &self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<TabletAlias> {
        self.0
    }
}

impl From<Vec<TabletAlias>> for TabletAliasList {
    fn from(aliases: Vec<TabletAlias>) -> Self {
        Self(aliases)
    }
}

impl FromIterator<TabletAlias> for TabletAliasList {
    fn from_iter<T: IntoIterator<Item = TabletAlias>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::IntErrorKind;

    #[test]
    fn test_parse_alias() {
        let alias = parse_tablet_alias("cell1-0000000123").unwrap();
        assert_eq!(alias, TabletAlias::new("cell1", 123));
    }

    #[test]
    fn test_parse_alias_dashed_cell() {
        // Cell takes everything up to the last dash before the digit run
        let alias: TabletAlias = "us-east-1a-42".parse().unwrap();
        assert_eq!(alias.cell, "us-east-1a");
        assert_eq!(alias.uid, 42);
    }

    #[test]
    fn test_parse_alias_bad_format() {
        for bad in ["bad alias", "", "cell1", "cell1-", "-123", "cell1-12a", "cell 1-12", "cell1-123 "] {
            match parse_tablet_alias(bad) {
                Err(Error::InvalidFormat { alias, pattern }) => {
                    assert_eq!(alias, bad);
                    assert_eq!(pattern, TABLET_ALIAS_FORMAT);
                }
                other => panic!("expected InvalidFormat for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_parse_alias_uid_overflow() {
        assert!(parse_tablet_alias("zone1-4294967295").is_ok());
        match parse_tablet_alias("zone1-4294967296") {
            Err(Error::InvalidUid { alias, value, .. }) => {
                assert_eq!(alias.as_deref(), Some("zone1-4294967296"));
                assert_eq!(value, "4294967296");
            }
            other => panic!("expected InvalidUid, got {:?}", other),
        }
    }

    #[test]
    fn test_format_alias() {
        assert_eq!(TabletAlias::new("zone1", 1).to_string(), "zone1-0000000001");
        assert_eq!(tablet_alias_string(None), "<nil>");
        assert_eq!(TabletAlias::new("zone1", 4294967295).to_string(), "zone1-4294967295");
    }

    #[test]
    fn test_uid_str() {
        assert_eq!(tablet_alias_uid_str(&TabletAlias::new("whatever", 77)), "0000000077");
        assert_eq!(TabletAlias::new("", 77).uid_str(), "0000000077");
    }

    #[test]
    fn test_parse_uid() {
        assert_eq!(parse_uid("0000000100").unwrap(), 100);
        assert_eq!(parse_uid("4294967295").unwrap(), u32::MAX);
        assert!(matches!(parse_uid("x"), Err(Error::InvalidUid { .. })));
        assert!(matches!(parse_uid("4294967296"), Err(Error::InvalidUid { .. })));
    }

    #[test]
    fn test_parse_uid_rejects_signs_and_junk() {
        for bad in ["+5", "-5", "", " 5", "5 ", "1_000", "\u{663}"] {
            match parse_uid(bad) {
                Err(Error::InvalidUid { alias, value, source }) => {
                    assert!(alias.is_none());
                    assert_eq!(value, bad);
                    let expected = if bad.is_empty() {
                        IntErrorKind::Empty
                    } else {
                        IntErrorKind::InvalidDigit
                    };
                    assert_eq!(source.kind(), &expected);
                }
                other => panic!("expected InvalidUid for {:?}, got {:?}", bad, other),
            }
        }

        let msg = parse_uid("+5").unwrap_err().to_string();
        assert!(msg.starts_with("bad tablet uid '+5'"), "{}", msg);
        assert!(!msg.contains("alias"), "{}", msg);
    }

    #[test]
    fn test_equal_and_zero() {
        let a = TabletAlias::new("zone1", 1);
        let b = TabletAlias::new("zone1", 1);
        let c = TabletAlias::new("zone2", 1);

        assert!(tablet_alias_equal(Some(&a), Some(&b)));
        assert!(!tablet_alias_equal(Some(&a), Some(&c)));
        assert!(tablet_alias_equal(None, None));
        assert!(!tablet_alias_equal(Some(&a), None));
        assert!(!tablet_alias_equal(None, Some(&a)));

        assert!(tablet_alias_is_zero(None));
        assert!(tablet_alias_is_zero(Some(&TabletAlias::default())));
        assert!(!tablet_alias_is_zero(Some(&TabletAlias::new("", 1))));
        assert!(!tablet_alias_is_zero(Some(&TabletAlias::new("zone1", 0))));
    }

    #[test]
    fn test_contains_alias() {
        let list = vec![TabletAlias::new("zone1", 1), TabletAlias::new("zone2", 2)];
        assert!(contains_alias(&TabletAlias::new("zone2", 2), &list));
        assert!(!contains_alias(&TabletAlias::new("zone2", 1), &list));
        assert!(!contains_alias(&TabletAlias::new("zone1", 1), &[]));
    }

    #[test]
    fn test_parse_tablet_set() {
        assert!(parse_tablet_set("").is_empty());

        let set = parse_tablet_set("a,b,a");
        assert_eq!(set.len(), 2);
        assert!(set.contains("a"));
        assert!(set.contains("b"));
    }

    #[test]
    fn test_sort_aliases() {
        let mut list = TabletAliasList::new(vec![
            TabletAlias::new("b", 1),
            TabletAlias::new("a", 5),
            TabletAlias::new("a", 2),
        ]);
        list.sort();
        assert_eq!(
            list.into_inner(),
            vec![
                TabletAlias::new("a", 2),
                TabletAlias::new("a", 5),
                TabletAlias::new("b", 1),
            ]
        );
    }

    #[test]
    fn test_to_string_slice() {
        let list: TabletAliasList = vec![TabletAlias::new("zone2", 3), TabletAlias::default()].into();
        assert_eq!(list.to_string_slice(), vec!["zone2-0000000003", "-0000000000"]);

        let b = TabletAlias::new("zone1", 9);
        assert_eq!(alias_strings(vec![Some(&b), None]), vec!["zone1-0000000009", "<nil>"]);
        assert!(TabletAliasList::default().to_string_slice().is_empty());
    }
}
