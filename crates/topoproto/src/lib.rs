//! Topology proto helpers for a sharded database cluster.
//!
//! This crate provides the value-level building blocks the topology client,
//! health checks and routing share:
//! - Tablet alias parsing, formatting and ordering
//! - Tablet type names, parsing and the serving classification
//! - Tablet descriptor helpers (database name, MySQL address)
//! - Host/port joining and hostname resolution

pub mod alias;
pub mod error;
pub mod net;
pub mod tablet;
pub mod tablet_type;

pub use alias::{
    alias_strings, compare_aliases, contains_alias, parse_tablet_alias, parse_tablet_set,
    parse_uid, sort_aliases, tablet_alias_equal, tablet_alias_is_zero, tablet_alias_string,
    tablet_alias_uid_str, TabletAlias, TabletAliasList, TABLET_ALIAS_FORMAT,
};
pub use error::{Error, Result};
pub use net::{is_ip_literal, join_host_port, HostResolver, SystemResolver};
pub use tablet::{
    is_tablet_in_list, mysql_addr, mysql_ip, mysql_ip_with, tablet_db_name, tablet_is_assigned,
    Tablet, VT_DB_PREFIX,
};
pub use tablet_type::{
    is_serving_type, is_type_in_list, make_string_type_list, make_unique_string_type_list,
    parse_tablet_type, parse_tablet_types, tablet_type_lstring, TabletType, ALL_TABLET_TYPES,
};
