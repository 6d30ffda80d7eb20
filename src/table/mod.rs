//! Longest-prefix-match routing table
//!
//! Routes are compiled into per-family entry lists, sorted most-specific
//! first with priority as the tie-break, and queried with a linear
//! first-match scan. Build and finalize the table once, then query; lookups
//! take `&self` and are safe for any number of concurrent readers.

use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

use ipnetwork::IpNetwork;
use tracing::warn;

use crate::error::{LookupError, RouteError};
use crate::net::{Interface, InterfaceAddress, InterfaceId};
use crate::table::selector::AddressSelector;

pub mod selector;

/// Declarative routing intent, consumed by [`Router::add_routes`]
#[derive(Debug, Clone)]
pub struct Route {
    /// Interface traffic matching this route leaves through
    pub iface: Interface,
    /// Source prefix in CIDR notation; `None` or unparsable means any source
    pub src: Option<String>,
    /// Destination prefix in CIDR notation; must parse
    pub dst: String,
    /// Lower value wins among equally specific routes
    pub priority: u32,
    /// Adjacent router to forward through, if any
    pub next_hop: Option<String>,
    /// Local address selection override; defaults to first-address
    pub selector: Option<AddressSelector>,
}

/// Compiled route, immutable once appended except for sort position
#[derive(Debug, Clone)]
struct TableEntry {
    src: Option<IpNetwork>,
    dst: IpNetwork,
    selector: AddressSelector,
    priority: u32,
    iface: InterfaceId,
    next_hop: Option<IpAddr>,
}

impl fmt::Display for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.src {
            Some(src) => write!(f, "dst={} src={} ", self.dst, src)?,
            None => write!(f, "dst={} src=any ", self.dst)?,
        }
        write!(
            f,
            "prio={} iface={} selector={:?}",
            self.priority, self.iface, self.selector
        )?;
        if let Some(hop) = self.next_hop {
            write!(f, " via={hop}")?;
        }
        Ok(())
    }
}

/// Result of a source-aware lookup
#[derive(Debug)]
pub struct SourceRoute<'a> {
    pub iface: &'a Interface,
    /// Local address picked by the route's selector; `None` when the
    /// interface has no qualifying address
    pub preferred_src: Option<&'a InterfaceAddress>,
}

/// Result of a next-hop-aware lookup
#[derive(Debug)]
pub struct NextHopRoute<'a> {
    pub iface: &'a Interface,
    pub preferred_src: &'a InterfaceAddress,
    /// Adjacent router to forward through; `None` for directly connected
    /// destinations
    pub next_hop: Option<IpAddr>,
}

/// Longest-prefix-match route table
///
/// Owns all known interfaces and one sorted entry list per address family.
#[derive(Debug, Default)]
pub struct Router {
    ifaces: HashMap<InterfaceId, Interface>,
    v4: Vec<TableEntry>,
    v6: Vec<TableEntry>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered interfaces, keyed by id.
    pub fn interfaces(&self) -> &HashMap<InterfaceId, Interface> {
        &self.ifaces
    }

    /// Compile a batch of routes into table entries.
    ///
    /// `priority_offset` is added to each route's own priority, so whole
    /// batches can be shifted relative to earlier ones. Entries are appended
    /// unsorted; call [`Router::update`] before querying.
    ///
    /// A destination that does not parse as CIDR rejects the call and names
    /// the offending route. A source that does not parse degrades to "match
    /// any source" and a next hop that does not parse degrades to "no next
    /// hop"; neither is an error.
    pub fn add_routes(
        &mut self,
        priority_offset: u32,
        routes: impl IntoIterator<Item = Route>,
    ) -> Result<(), RouteError> {
        for route in routes {
            let dst: IpNetwork =
                route
                    .dst
                    .parse()
                    .map_err(|e: ipnetwork::IpNetworkError| RouteError::InvalidDestination {
                        destination: route.dst.clone(),
                        interface: route.iface.id,
                        reason: e.to_string(),
                    })?;

            let src = route.src.as_deref().and_then(|s| match s.parse::<IpNetwork>() {
                Ok(net) => Some(net),
                Err(_) => {
                    warn!(src = s, dst = %dst, "unparsable source prefix, matching any source");
                    None
                }
            });

            let next_hop = route
                .next_hop
                .as_deref()
                .and_then(|s| s.parse::<IpAddr>().ok());

            let entry = TableEntry {
                src,
                dst,
                selector: route.selector.unwrap_or_default(),
                priority: route.priority.saturating_add(priority_offset),
                iface: route.iface.id,
                next_hop,
            };

            // Last write wins if the same interface id reappears.
            self.ifaces.insert(route.iface.id, route.iface);

            match dst {
                IpNetwork::V4(_) => self.v4.push(entry),
                IpNetwork::V6(_) => self.v6.push(entry),
            }
        }
        Ok(())
    }

    /// Sort each family's entries most-specific first, then by ascending
    /// effective priority.
    ///
    /// The sort is stable, so repeated calls on an unchanged table keep the
    /// relative order of ties. Lookups are only correct after this has been
    /// called on the current contents.
    pub fn update(&mut self) {
        let by_specificity = |a: &TableEntry, b: &TableEntry| {
            b.dst
                .prefix()
                .cmp(&a.dst.prefix())
                .then(a.priority.cmp(&b.priority))
        };
        self.v4.sort_by(by_specificity);
        self.v6.sort_by(by_specificity);
    }

    /// Resolve the outgoing interface and preferred local address for a
    /// (source, destination) pair.
    ///
    /// IPv4-mapped IPv6 addresses are canonicalized, so `::ffff:a.b.c.d`
    /// destinations are looked up in the IPv4 table.
    pub fn route_with_src(
        &self,
        src: IpAddr,
        dst: IpAddr,
    ) -> Result<SourceRoute<'_>, LookupError> {
        let (src, dst) = (src.to_canonical(), dst.to_canonical());
        let entry = self.route(src, dst)?;
        let iface = self.interface_of(entry);
        Ok(SourceRoute {
            iface,
            preferred_src: entry.selector.select(iface.addresses(), src, dst),
        })
    }

    /// Like [`Router::route_with_src`], but also resolves the next hop.
    ///
    /// When the winning entry carries a next hop, the local address is chosen
    /// to reach that hop rather than the final destination, and always with
    /// fit-address selection. A fit miss is an error of its own: the route is
    /// fine but the interface has no address on the hop's network.
    pub fn route_with_next_hop(
        &self,
        src: IpAddr,
        dst: IpAddr,
    ) -> Result<NextHopRoute<'_>, LookupError> {
        let (src, dst) = (src.to_canonical(), dst.to_canonical());
        let entry = self.route(src, dst)?;
        let iface = self.interface_of(entry);
        let target = entry.next_hop.unwrap_or(dst);
        let preferred_src = AddressSelector::FitAddress
            .select(iface.addresses(), src, target)
            .ok_or_else(|| LookupError::NoLocalAddress {
                interface: iface.name.clone(),
                target,
            })?;
        Ok(NextHopRoute {
            iface,
            preferred_src,
            next_hop: entry.next_hop,
        })
    }

    /// First matching entry in the destination family's sorted list.
    ///
    /// Because the list is sorted most-specific first, first match is
    /// longest-prefix match with priority as the secondary tie-break.
    fn route(&self, src: IpAddr, dst: IpAddr) -> Result<&TableEntry, LookupError> {
        let entries = match dst {
            IpAddr::V4(_) => &self.v4,
            IpAddr::V6(_) => &self.v6,
        };
        entries
            .iter()
            .find(|entry| {
                entry.src.map_or(true, |net| net.contains(src)) && entry.dst.contains(dst)
            })
            .ok_or(LookupError::NoRoute { destination: dst })
    }

    fn interface_of(&self, entry: &TableEntry) -> &Interface {
        // A dangling id is a construction bug, not a runtime condition.
        self.ifaces.get(&entry.iface).unwrap_or_else(|| {
            panic!("table entry references unknown interface id {}", entry.iface)
        })
    }
}

impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = vec!["ROUTER".to_string(), "--- V4 ---".to_string()];
        lines.extend(self.v4.iter().map(ToString::to_string));
        lines.push("--- V6 ---".to_string());
        lines.extend(self.v6.iter().map(ToString::to_string));
        write!(f, "{}", lines.join("\n"))
    }
}
