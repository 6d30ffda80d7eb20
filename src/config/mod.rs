//! Configuration management module
//!
//! Loads interfaces and routes from multiple sources with proper precedence:
//! CLI arguments > environment variables > TOML file > built-in defaults.
//! The built-in default reproduces a small two-interface demo topology so the
//! binary is usable without any configuration file.

use std::collections::HashMap;
use std::net::IpAddr;

use crate::error::{AppError, ConfigError};
use crate::net::{Interface, InterfaceAddress, InterfaceId};
use crate::table::selector::AddressSelector;
use crate::table::{Route, Router};

pub mod cli;
pub mod env;
pub mod toml;

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub interfaces: Vec<InterfaceConfig>,
    pub routes: Vec<RouteConfig>,
    pub log_level: String,
}

/// Interface configuration record
#[derive(Debug, Clone)]
pub struct InterfaceConfig {
    pub id: InterfaceId,
    pub name: String,
    pub addresses: Vec<AddressConfig>,
}

/// Interface address configuration record
#[derive(Debug, Clone)]
pub struct AddressConfig {
    pub ip: String,
    pub netmask: String,
    pub broadcast: Option<String>,
    pub gateway: Option<String>,
}

/// Route configuration record
#[derive(Debug, Clone)]
pub struct RouteConfig {
    pub interface: InterfaceId,
    pub src: Option<String>,
    pub dst: String,
    pub priority: u32,
    pub next_hop: Option<String>,
    pub selector: Option<AddressSelector>,
}

impl AppConfig {
    /// Apply TOML file values over this configuration
    pub fn apply_toml(mut self, file: toml::TomlConfig) -> Self {
        if let Some(interfaces) = file.interfaces {
            self.interfaces = interfaces.into_iter().map(Into::into).collect();
        }
        if let Some(routes) = file.routes {
            self.routes = routes.into_iter().map(Into::into).collect();
        }
        if let Some(level) = file.logging.and_then(|logging| logging.level) {
            self.log_level = level;
        }
        self
    }

    /// Build and finalize a router from this configuration.
    ///
    /// Every route must reference a declared interface; addresses must parse.
    pub fn build_router(&self) -> Result<Router, AppError> {
        let mut interfaces = HashMap::new();
        for iface_cfg in &self.interfaces {
            let mut addrs = Vec::with_capacity(iface_cfg.addresses.len());
            for addr_cfg in &iface_cfg.addresses {
                addrs.push(InterfaceAddress {
                    ip: parse_addr(&addr_cfg.ip)?,
                    netmask: parse_addr(&addr_cfg.netmask)?,
                    broadcast: addr_cfg.broadcast.as_deref().map(parse_addr).transpose()?,
                    gateway: addr_cfg.gateway.as_deref().map(parse_addr).transpose()?,
                });
            }
            interfaces.insert(
                iface_cfg.id,
                Interface::new(iface_cfg.id, iface_cfg.name.as_str(), addrs),
            );
        }

        let mut routes = Vec::with_capacity(self.routes.len());
        for route_cfg in &self.routes {
            let iface = interfaces
                .get(&route_cfg.interface)
                .cloned()
                .ok_or(ConfigError::UnknownInterface {
                    interface: route_cfg.interface,
                })?;
            routes.push(Route {
                iface,
                src: route_cfg.src.clone(),
                dst: route_cfg.dst.clone(),
                priority: route_cfg.priority,
                next_hop: route_cfg.next_hop.clone(),
                selector: route_cfg.selector,
            });
        }

        let mut router = Router::new();
        router.add_routes(0, routes)?;
        router.update();
        Ok(router)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            interfaces: vec![
                InterfaceConfig {
                    id: 0,
                    name: "eth0".to_string(),
                    addresses: vec![
                        AddressConfig {
                            ip: "192.168.1.2".to_string(),
                            netmask: "255.255.255.0".to_string(),
                            broadcast: Some("192.168.1.255".to_string()),
                            gateway: Some("192.168.1.1".to_string()),
                        },
                        AddressConfig {
                            ip: "192.168.1.3".to_string(),
                            netmask: "255.255.255.0".to_string(),
                            broadcast: Some("192.168.1.255".to_string()),
                            gateway: Some("192.168.1.1".to_string()),
                        },
                    ],
                },
                InterfaceConfig {
                    id: 1,
                    name: "eth1".to_string(),
                    addresses: vec![AddressConfig {
                        ip: "10.0.0.2".to_string(),
                        netmask: "255.0.0.0".to_string(),
                        broadcast: Some("10.255.255.255".to_string()),
                        gateway: Some("10.0.0.1".to_string()),
                    }],
                },
            ],
            routes: vec![
                default_route(0, "0.0.0.0/0", "192.168.1.3"),
                default_route(0, "172.16.1.0/24", "192.168.1.2"),
                default_route(1, "172.16.1.0/26", "10.0.0.1"),
                default_route(1, "172.16.2.0/24", "10.0.0.10"),
                default_route(1, "172.16.3.0/24", "10.0.0.1"),
            ],
            log_level: "info".to_string(),
        }
    }
}

fn default_route(interface: InterfaceId, dst: &str, next_hop: &str) -> RouteConfig {
    RouteConfig {
        interface,
        src: Some("0.0.0.0/0".to_string()),
        dst: dst.to_string(),
        priority: 0,
        next_hop: Some(next_hop.to_string()),
        selector: None,
    }
}

impl From<toml::TomlInterface> for InterfaceConfig {
    fn from(iface: toml::TomlInterface) -> Self {
        Self {
            id: iface.id,
            name: iface.name,
            addresses: iface.addresses.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<toml::TomlInterfaceAddress> for AddressConfig {
    fn from(addr: toml::TomlInterfaceAddress) -> Self {
        Self {
            ip: addr.ip,
            netmask: addr.netmask,
            broadcast: addr.broadcast,
            gateway: addr.gateway,
        }
    }
}

impl From<toml::TomlRoute> for RouteConfig {
    fn from(route: toml::TomlRoute) -> Self {
        Self {
            interface: route.interface,
            src: route.src,
            dst: route.dst,
            priority: route.priority,
            next_hop: route.next_hop,
            selector: route.selector,
        }
    }
}

/// Load the effective configuration with the documented precedence
pub fn load_configuration(cli: &cli::CliArgs) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::default();

    let path = cli.config.clone().or_else(env::config_path_from_env);
    if let Some(path) = path {
        config = config.apply_toml(toml::load_toml_config(&path)?);
    }

    config = env::apply_env_config(config);
    Ok(cli.apply_to_config(config))
}

fn parse_addr(s: &str) -> Result<IpAddr, ConfigError> {
    s.parse()
        .map_err(|_| ConfigError::InvalidAddress(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_default_config_builds_working_router() {
        let router = AppConfig::default().build_router().unwrap();
        assert_eq!(router.interfaces().len(), 2);

        let found = router
            .route_with_src(ip("192.168.1.2"), ip("172.16.1.10"))
            .unwrap();
        assert_eq!(found.iface.name, "eth1");

        let found = router
            .route_with_next_hop(ip("192.168.1.2"), ip("223.5.5.5"))
            .unwrap();
        assert_eq!(found.iface.name, "eth0");
        assert_eq!(found.next_hop, Some(ip("192.168.1.3")));
    }

    #[test]
    fn test_build_router_rejects_unknown_interface() {
        let mut config = AppConfig::default();
        config.routes.push(default_route(9, "172.16.9.0/24", "10.0.0.1"));

        let result = config.build_router();
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::UnknownInterface { interface: 9 }))
        ));
    }

    #[test]
    fn test_build_router_rejects_bad_address() {
        let mut config = AppConfig::default();
        config.interfaces[0].addresses[0].ip = "not-an-ip".to_string();

        let result = config.build_router();
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidAddress(_)))
        ));
    }

    #[test]
    fn test_build_router_rejects_bad_destination() {
        let mut config = AppConfig::default();
        config.routes[0].dst = "not-a-cidr".to_string();

        let result = config.build_router();
        assert!(matches!(result, Err(AppError::Route(_))));
    }

    #[test]
    fn test_apply_toml_replaces_tables_and_level() {
        let file: toml::TomlConfig = ::toml::from_str(
            r#"
[logging]
level = "warn"

[[interfaces]]
id = 3
name = "wan0"

[[interfaces.addresses]]
ip = "203.0.113.2"
netmask = "255.255.255.0"

[[routes]]
interface = 3
dst = "0.0.0.0/0"
"#,
        )
        .unwrap();

        let config = AppConfig::default().apply_toml(file);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.interfaces.len(), 1);
        assert_eq!(config.interfaces[0].name, "wan0");
        assert_eq!(config.routes.len(), 1);
        assert_eq!(config.routes[0].interface, 3);

        let router = config.build_router().unwrap();
        let found = router
            .route_with_src(ip("203.0.113.2"), ip("8.8.8.8"))
            .unwrap();
        assert_eq!(found.iface.name, "wan0");
    }

    #[test]
    fn test_apply_toml_empty_file_keeps_defaults() {
        let file: toml::TomlConfig = ::toml::from_str("").unwrap();
        let config = AppConfig::default().apply_toml(file);
        assert_eq!(config.interfaces.len(), 2);
        assert_eq!(config.routes.len(), 5);
        assert_eq!(config.log_level, "info");
    }
}
