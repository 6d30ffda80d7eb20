//! Centralized error types and handling

use std::net::IpAddr;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Route compilation error: {0}")]
    Route(#[from] RouteError),

    #[error("Route lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Route compilation errors
///
/// A route whose destination does not parse as CIDR cannot be placed in a
/// family bucket and is rejected outright. Malformed source prefixes and next
/// hops are not errors; they degrade to "match any source" and "no next hop".
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Malformed destination prefix '{destination}' on route via interface {interface}: {reason}")]
    InvalidDestination {
        destination: String,
        interface: u64,
        reason: String,
    },
}

/// Query-time lookup errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Address '{0}' is not valid as IPv4 or IPv6")]
    UnsupportedFamily(String),

    #[error("No route found for destination {destination}")]
    NoRoute { destination: IpAddr },

    /// A route matched, but no address on its interface can reach the
    /// selection target. Distinct from [`LookupError::NoRoute`]: the table is
    /// fine, the interface is misconfigured for the chosen next hop.
    #[error("No address on interface '{interface}' can reach {target}")]
    NoLocalAddress { interface: String, target: IpAddr },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),

    #[error("Invalid address in configuration: '{0}'")]
    InvalidAddress(String),

    #[error("Route references unknown interface id {interface}")]
    UnknownInterface { interface: u64 },
}
