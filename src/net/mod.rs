//! Network identity types
//!
//! Interfaces and the local addresses bound to them. Interfaces are built
//! once during configuration and immutable afterwards; table entries refer to
//! them by id rather than owning them.

use ipnetwork::IpNetwork;
use std::net::IpAddr;

/// Opaque interface identifier
pub type InterfaceId = u64;

/// Named network attachment point
#[derive(Debug, Clone)]
pub struct Interface {
    pub id: InterfaceId,
    pub name: String,
    addrs: Vec<InterfaceAddress>,
}

impl Interface {
    pub fn new(id: InterfaceId, name: impl Into<String>, addrs: Vec<InterfaceAddress>) -> Self {
        Self {
            id,
            name: name.into(),
            addrs,
        }
    }

    /// Candidate local addresses, in configured order.
    ///
    /// The order is significant: it is the default selection order.
    pub fn addresses(&self) -> &[InterfaceAddress] {
        &self.addrs
    }
}

/// A single local address bound to an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceAddress {
    pub ip: IpAddr,
    pub netmask: IpAddr,
    pub broadcast: Option<IpAddr>,
    pub gateway: Option<IpAddr>,
}

impl InterfaceAddress {
    /// The network this address lives on, formed from (ip, netmask).
    ///
    /// `None` when ip and netmask disagree on family or the mask is not
    /// contiguous; such an address can never "fit" a target.
    pub fn network(&self) -> Option<IpNetwork> {
        IpNetwork::with_netmask(self.ip, self.netmask).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(ip: &str, netmask: &str) -> InterfaceAddress {
        InterfaceAddress {
            ip: ip.parse().unwrap(),
            netmask: netmask.parse().unwrap(),
            broadcast: None,
            gateway: None,
        }
    }

    #[test]
    fn test_network_from_ip_and_netmask() {
        let network = addr("192.168.1.2", "255.255.255.0").network().unwrap();
        assert_eq!(network.prefix(), 24);
        assert!(network.contains("192.168.1.200".parse().unwrap()));
        assert!(!network.contains("192.168.2.1".parse().unwrap()));
    }

    #[test]
    fn test_network_rejects_mixed_families() {
        assert!(addr("192.168.1.2", "ffff::").network().is_none());
    }

    #[test]
    fn test_addresses_keep_configured_order() {
        let iface = Interface::new(
            7,
            "eth0",
            vec![
                addr("192.168.1.2", "255.255.255.0"),
                addr("192.168.1.3", "255.255.255.0"),
            ],
        );
        assert_eq!(iface.addresses()[0].ip, "192.168.1.2".parse::<IpAddr>().unwrap());
        assert_eq!(iface.addresses()[1].ip, "192.168.1.3".parse::<IpAddr>().unwrap());
    }
}
