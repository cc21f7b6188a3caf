//! Destination URI construction for legacy connection entries.
//!
//! # Design Decisions
//! - Scheme comes from the `protocol` option, else `remote+http`
//! - `ssl_enabled=true` without an explicit protocol selects `remote+https`
//! - IPv6 literals are bracketed before parsing
//! - The parsed host must be the configured host; normalizing parsers do not get to pick another one
//! - Any parse failure means "no URI"; callers decide what that costs

use std::net::{Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

use crate::legacy::model::{ConnectionEntry, ConnectionOptions};

pub const DEFAULT_SCHEME: &str = "remote+http";
pub const SECURE_SCHEME: &str = "remote+https";

/// Scheme selected by the connection options.
pub fn scheme_for(options: &ConnectionOptions) -> &str {
    match options.get(ConnectionOptions::PROTOCOL).map(str::trim) {
        Some(protocol) if !protocol.is_empty() => protocol,
        _ if options.get_bool(ConnectionOptions::SSL_ENABLED) => SECURE_SCHEME,
        _ => DEFAULT_SCHEME,
    }
}

/// Build the destination URI for a connection entry.
///
/// Returns `None` when the host or port is missing, or when the combination
/// does not form a valid URI.
pub fn destination_uri(entry: &ConnectionEntry) -> Option<Url> {
    let host = entry.host.as_deref()?;
    let port = entry.valid_port()?;
    build_uri(scheme_for(&entry.options), host, port)
}

/// Build `scheme://host:port` and validate it.
///
/// The parsed URI must name the same host and port that were configured;
/// inputs the parser would rewrite into another destination yield `None`.
pub fn build_uri(scheme: &str, host: &str, port: u16) -> Option<Url> {
    if host.is_empty() || host.contains(['@', '/', '?', '#']) {
        return None;
    }
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };

    let url = Url::parse(&format!("{}://{}:{}", scheme, host, port)).ok()?;
    if !host_matches(&url, &host)
        || url.port_or_known_default() != Some(port)
        || !matches!(url.path(), "" | "/")
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return None;
    }
    Some(url)
}

fn host_matches(url: &Url, expected: &str) -> bool {
    match url.host() {
        Some(Host::Ipv6(addr)) => expected
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<Ipv6Addr>()
            .is_ok_and(|configured| configured == addr),
        Some(Host::Ipv4(addr)) => expected
            .parse::<Ipv4Addr>()
            .is_ok_and(|configured| configured == addr),
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case(expected),
        None => false,
    }
}
