//! Local address selection strategies
//!
//! Strategies are pure functions of the candidate list and the query
//! addresses, dispatched through a tagged enum so table entries stay plain
//! data and new strategies can be added without touching the lookup logic.

use crate::net::InterfaceAddress;
use serde::Deserialize;
use std::net::IpAddr;

/// Strategy for picking the local address on a matched interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddressSelector {
    /// First address in the interface's configured order
    #[default]
    FirstAddress,
    /// First address whose own network contains the target IP
    FitAddress,
}

impl AddressSelector {
    /// Pick an address from `addrs`, or `None` when no candidate qualifies.
    pub fn select<'a>(
        &self,
        addrs: &'a [InterfaceAddress],
        _src: IpAddr,
        target: IpAddr,
    ) -> Option<&'a InterfaceAddress> {
        match self {
            AddressSelector::FirstAddress => addrs.first(),
            AddressSelector::FitAddress => addrs
                .iter()
                .find(|addr| addr.network().is_some_and(|net| net.contains(target))),
        }
    }
}
