//! LPM Router - longest-prefix-match routing table
//!
//! This library resolves, for a (source IP, destination IP) pair, the
//! outgoing interface, a preferred local address and an optional next hop,
//! from a table of source/destination CIDR routes kept sorted most-specific
//! first per address family.

pub mod config;
pub mod error;
pub mod net;
pub mod table;

pub use error::AppError;
