//! IPv4 address classification

use std::net::Ipv4Addr;

/// Whether an IPv4 address is publicly routable.
///
/// The RFC1918 private ranges 10.0.0.0/8, 172.16.0.0/12 and
/// 192.168.0.0/16 return `false`; everything else returns `true`.
pub fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    let [first, second, _, _] = ip.octets();

    if first == 10 {
        return false; // 10.0.0.0/8
    }
    if first == 172 && (16..=31).contains(&second) {
        return false; // 172.16.0.0/12
    }
    if first == 192 && second == 168 {
        return false; // 192.168.0.0/16
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc1918_ranges_are_private() {
        assert!(!is_public_ipv4(Ipv4Addr::new(10, 0, 0, 5)));
        assert!(!is_public_ipv4(Ipv4Addr::new(172, 20, 1, 1)));
        assert!(!is_public_ipv4(Ipv4Addr::new(192, 168, 1, 1)));
    }

    #[test]
    fn test_public_addresses() {
        assert!(is_public_ipv4(Ipv4Addr::new(172, 32, 1, 1)));
        assert!(is_public_ipv4(Ipv4Addr::new(172, 15, 255, 255)));
        assert!(is_public_ipv4(Ipv4Addr::new(8, 8, 8, 8)));
        assert!(is_public_ipv4(Ipv4Addr::new(11, 0, 0, 1)));
    }
}
