//! Tebex origin allowlist

use std::net::{IpAddr, Ipv4Addr};

/// Addresses Tebex delivers webhooks from
pub const ALLOWED_IPS: [&str; 2] = ["18.209.80.3", "54.87.231.232"];

const ALLOWED_ADDRS: [IpAddr; 2] = [
    IpAddr::V4(Ipv4Addr::new(18, 209, 80, 3)),
    IpAddr::V4(Ipv4Addr::new(54, 87, 231, 232)),
];

/// Check a request's source address against the allowlist.
///
/// The whole value must be a single address; a comma-separated
/// forwarded-for chain is rejected.
pub fn is_allowed(ip: &str) -> bool {
    ip.trim()
        .parse::<IpAddr>()
        .is_ok_and(|addr| ALLOWED_ADDRS.contains(&addr.to_canonical()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowlisted_addresses() {
        for ip in ALLOWED_IPS {
            assert!(is_allowed(ip));
        }
        assert!(is_allowed(" 18.209.80.3 "));
    }

    #[test]
    fn test_other_addresses_rejected() {
        assert!(!is_allowed("203.0.113.5"));
        assert!(!is_allowed("18.209.80.30"));
        assert!(!is_allowed(""));
        assert!(!is_allowed("localhost"));
        assert!(!is_allowed("18.209.80.3, 10.0.0.1"));
    }

    #[test]
    fn test_ipv4_mapped_ipv6() {
        assert!(is_allowed("::ffff:54.87.231.232"));
        assert!(!is_allowed("::1"));
    }

    #[test]
    fn test_string_and_parsed_lists_agree() {
        let parsed: Vec<IpAddr> = ALLOWED_IPS.iter().map(|ip| ip.parse().unwrap()).collect();
        assert_eq!(parsed, ALLOWED_ADDRS);
    }
}
