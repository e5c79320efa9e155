//! Tablet descriptor helpers.
//!
//! A `Tablet` is the topology record for one node: where it lives, which
//! keyspace/shard it serves and how to reach its MySQL instance. The helpers
//! here only read the record; the topology client owns writing it.

use crate::alias::TabletAlias;
use crate::error::{Error, Result};
use crate::net::{self, HostResolver, SystemResolver};
use crate::tablet_type::TabletType;
use serde::{Deserialize, Serialize};
use std::io;

/// Default database name prefix; the full name is the prefix plus keyspace.
pub const VT_DB_PREFIX: &str = "vt_";

/// Topology record of one tablet.
///
/// Keep this struct plain data; connection state belongs to the callers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tablet {
    pub alias: Option<TabletAlias>,
    /// Hostname of the tablet server itself.
    pub hostname: String,
    pub keyspace: String,
    pub shard: String,
    pub tablet_type: TabletType,
    /// Replaces the `vt_<keyspace>` database name when set.
    pub db_name_override: String,
    pub mysql_hostname: String,
    pub mysql_port: i32,
}

impl Tablet {
    pub fn new(alias: TabletAlias, tablet_type: TabletType) -> Self {
        Self {
            alias: Some(alias),
            tablet_type,
            ..Self::default()
        }
    }

    pub fn with_placement(
        alias: TabletAlias,
        tablet_type: TabletType,
        keyspace: impl Into<String>,
        shard: impl Into<String>,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            shard: shard.into(),
            ..Self::new(alias, tablet_type)
        }
    }

    pub fn with_mysql(mut self, hostname: impl Into<String>, port: i32) -> Self {
        self.mysql_hostname = hostname.into();
        self.mysql_port = port;
        self
    }

    pub fn db_name(&self) -> String {
        tablet_db_name(self)
    }

    pub fn mysql_addr(&self) -> String {
        mysql_addr(self)
    }

    /// True once a keyspace and shard are recorded.
    ///
    /// This says nothing about health: a tablet being scrapped still reports
    /// its old placement.
    pub fn is_assigned(&self) -> bool {
        !self.keyspace.is_empty() && !self.shard.is_empty()
    }
}

/// Database name of the tablet, usually derived from the keyspace.
///
/// Never includes the shard: source and destination shards of a resharding
/// replicate into the same database name.
pub fn tablet_db_name(tablet: &Tablet) -> String {
    if !tablet.db_name_override.is_empty() {
        return tablet.db_name_override.clone();
    }
    if tablet.keyspace.is_empty() {
        return String::new();
    }
    format!("{}{}", VT_DB_PREFIX, tablet.keyspace)
}

/// `host:port` of the tablet's MySQL server.
pub fn mysql_addr(tablet: &Tablet) -> String {
    net::join_host_port(&tablet.mysql_hostname, tablet.mysql_port)
}

/// Resolves the MySQL hostname with the system resolver and returns the first
/// address. Blocks on DNS.
pub fn mysql_ip(tablet: &Tablet) -> Result<String> {
    mysql_ip_with(tablet, &SystemResolver)
}

/// Like [`mysql_ip`], with an explicit resolver.
pub fn mysql_ip_with<R: HostResolver + ?Sized>(tablet: &Tablet, resolver: &R) -> Result<String> {
    let host = tablet.mysql_hostname.as_str();
    let resolution_error = |source| Error::Resolution {
        host: host.to_string(),
        source,
    };

    let addrs = resolver.lookup_host(host).map_err(resolution_error)?;
    tracing::debug!(host, count = addrs.len(), "resolved mysql hostname");

    match addrs.first() {
        Some(ip) => Ok(ip.clone()),
        None => Err(resolution_error(io::Error::new(
            io::ErrorKind::NotFound,
            "no addresses returned",
        ))),
    }
}

/// See [`Tablet::is_assigned`]; an absent tablet is never assigned.
pub fn tablet_is_assigned(tablet: Option<&Tablet>) -> bool {
    tablet.map_or(false, Tablet::is_assigned)
}

/// True if a tablet with the same alias is in `all_tablets`.
pub fn is_tablet_in_list(tablet: &Tablet, all_tablets: &[Tablet]) -> bool {
    all_tablets.iter().any(|t| t.alias == tablet.alias)
}
