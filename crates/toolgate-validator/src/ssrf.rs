//! SSRF / dangerous-scheme predicate.
//!
//! CIDR matching is hand-rolled (prefix comparison over octets) rather than
//! pulled in from a dedicated crate, mirroring the corpus's webfetch client.

use std::net::IpAddr;

use toolgate_types::DenialReason;
use url::{Host, Url};

const DANGEROUS_SCHEMES: &[&str] = &[
    "file", "gopher", "dict", "ftp", "ldap", "jar", "netdoc", "tftp",
];

const DEFAULT_BLOCKED_CIDRS: &[&str] = &[
    "127.0.0.0/8",
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "169.254.0.0/16",
    "0.0.0.0/8",
    "100.64.0.0/10",
    "192.0.0.0/24",
    "192.0.2.0/24",
    "198.51.100.0/24",
    "203.0.113.0/24",
    "224.0.0.0/4",
    "240.0.0.0/4",
    "255.255.255.255/32",
    "::1/128",
    "::/128",
    "fc00::/7",
    "fe80::/10",
    "ff00::/8",
    "2001:db8::/32",
];

/// Resolved state of the four SSRF-related env var overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityOverrides {
    pub allow_local_ips: bool,
    pub allow_loopback_resources: bool,
    pub allow_private_network_resources: bool,
    pub webrtc_disable_stun: bool,
}

impl SecurityOverrides {
    /// Read the four `MCPANY_*` env vars once. Any non-empty, non-"0"/"false"
    /// value is treated as truthy.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            allow_local_ips: is_truthy("MCPANY_DANGEROUS_ALLOW_LOCAL_IPS"),
            allow_loopback_resources: is_truthy("MCPANY_ALLOW_LOOPBACK_RESOURCES"),
            allow_private_network_resources: is_truthy("MCPANY_ALLOW_PRIVATE_NETWORK_RESOURCES"),
            webrtc_disable_stun: is_truthy("MCPANY_WEBRTC_DISABLE_STUN"),
        }
    }
}

fn is_truthy(var: &str) -> bool {
    match std::env::var(var) {
        Ok(v) => !matches!(v.as_str(), "" | "0" | "false" | "FALSE"),
        Err(_) => false,
    }
}

/// Execution mode affecting which schemes and loopback addresses are
/// permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkMode {
    HostLocal,
    Docker,
}

/// If `value` parses as a URL, reject dangerous schemes and SSRF targets.
/// Values that do not parse as URLs are not SSRF candidates and pass
/// through untouched - the caller only invokes this on parameters known to
/// carry URLs.
pub fn check_ssrf(
    value: &str,
    mode: NetworkMode,
    resolved_ips: &[IpAddr],
    overrides: &SecurityOverrides,
) -> Result<(), DenialReason> {
    let Ok(url) = Url::parse(value) else {
        return Ok(());
    };

    let scheme = url.scheme();
    if DANGEROUS_SCHEMES.contains(&scheme) && !(scheme == "file" && mode == NetworkMode::Docker) {
        let scheme = format!("{scheme}:");
        tracing::debug!(%scheme, "ssrf check rejected dangerous scheme");
        return Err(DenialReason::DangerousScheme { scheme });
    }

    for ip in resolved_ips {
        if let Some(cidr) = blocked_cidr_for(*ip, overrides) {
            return Err(DenialReason::BlockedNetworkTarget {
                detail: format!("{ip} matches blocked range {cidr}"),
            });
        }
    }

    if let Some(Host::Ipv4(v4)) = url.host() {
        if let Some(cidr) = blocked_cidr_for(IpAddr::V4(v4), overrides) {
            return Err(DenialReason::BlockedNetworkTarget {
                detail: format!("{v4} matches blocked range {cidr}"),
            });
        }
    }
    if let Some(Host::Ipv6(v6)) = url.host() {
        if let Some(cidr) = blocked_cidr_for(IpAddr::V6(v6), overrides) {
            return Err(DenialReason::BlockedNetworkTarget {
                detail: format!("{v6} matches blocked range {cidr}"),
            });
        }
    }

    Ok(())
}

fn blocked_cidr_for(ip: IpAddr, overrides: &SecurityOverrides) -> Option<String> {
    if overrides.allow_local_ips {
        return None;
    }
    if is_loopback(ip) && overrides.allow_loopback_resources {
        return None;
    }
    if is_private(ip) && overrides.allow_private_network_resources {
        return None;
    }

    DEFAULT_BLOCKED_CIDRS
        .iter()
        .find(|entry| cidr_contains(entry, ip))
        .map(|s| (*s).to_string())
}

fn is_loopback(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback(),
        IpAddr::V6(v6) => v6.is_loopback(),
    }
}

fn is_private(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(_) => false,
    }
}

fn cidr_contains(cidr: &str, ip: IpAddr) -> bool {
    let Some((addr, prefix)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(network) = addr.parse::<IpAddr>() else {
        return false;
    };
    let Ok(prefix) = prefix.parse::<u8>() else {
        return false;
    };

    match (ip, network) {
        (IpAddr::V4(ip), IpAddr::V4(net)) => prefix_match(&ip.octets(), &net.octets(), prefix),
        (IpAddr::V6(ip), IpAddr::V6(net)) => prefix_match(&ip.octets(), &net.octets(), prefix),
        _ => false,
    }
}

fn prefix_match(ip: &[u8], net: &[u8], prefix: u8) -> bool {
    if prefix == 0 {
        return true;
    }
    let full = (prefix / 8) as usize;
    let rem = prefix % 8;
    if ip.len() < full || net.len() < full || ip[..full] != net[..full] {
        return false;
    }
    if rem == 0 {
        return true;
    }
    let mask = 0xFFu8 << (8 - rem);
    ip[full] & mask == net[full] & mask
}
