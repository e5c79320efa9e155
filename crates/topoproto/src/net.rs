//! Host/port helpers and the hostname resolution seam.

use std::io;
use std::net::{IpAddr, Ipv6Addr, ToSocketAddrs};

/// Joins a host and port into `host:port`.
///
/// A host containing a colon (a literal IPv6 address) is wrapped in brackets.
pub fn join_host_port(host: &str, port: i32) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Resolves hostnames to textual IP addresses.
///
/// Implementations return addresses in the order the underlying resolver
/// produced them; callers picking "the first" get no stronger guarantee.
/// Addresses are strings so an IPv6 zone (`fe80::1%eth0`) survives.
pub trait HostResolver: Send + Sync {
    fn lookup_host(&self, host: &str) -> io::Result<Vec<String>>;
}

/// True for an IP literal, including a zoned IPv6 literal like `fe80::1%eth0`.
pub fn is_ip_literal(host: &str) -> bool {
    if host.parse::<IpAddr>().is_ok() {
        return true;
    }
    match host.split_once('%') {
        Some((addr, zone)) => !zone.is_empty() && addr.parse::<Ipv6Addr>().is_ok(),
        None => false,
    }
}

/// Resolver backed by the platform's `getaddrinfo`.
///
/// IP literals are returned as given, without a lookup. Anything else blocks:
/// a slow or unreachable DNS server stalls the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn lookup_host(&self, host: &str) -> io::Result<Vec<String>> {
        if is_ip_literal(host) {
            return Ok(vec![host.to_string()]);
        }
        let addrs = (host, 0u16).to_socket_addrs()?;
        Ok(addrs.map(|addr| addr.ip().to_string()).collect())
    }
}
