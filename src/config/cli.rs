//! Command-line argument parsing

use crate::config::AppConfig;
use clap::Parser;

/// Command-line arguments structure
#[derive(Parser, Debug)]
#[command(name = "lpm-router")]
#[command(about = "Longest-prefix-match routing table lookup")]
#[command(version)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, help = "Set the logging level")]
    pub log_level: Option<String>,

    /// Source IP address of a lookup
    #[arg(long, requires = "dst", help = "Source IP address of the query")]
    pub src: Option<String>,

    /// Destination IP address of a lookup
    #[arg(long, requires = "src", help = "Destination IP address of the query")]
    pub dst: Option<String>,

    /// Resolve the route's next hop as well
    #[arg(long, help = "Use next-hop resolution for the query")]
    pub via_next_hop: bool,

    /// Print the compiled routing table
    #[arg(long, help = "Print the compiled routing table")]
    pub dump: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration and exit without querying")]
    pub validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    pub print_default_config: bool,
}

impl CliArgs {
    /// Apply CLI arguments over base configuration
    pub fn apply_to_config(&self, mut base_config: AppConfig) -> AppConfig {
        if let Some(ref level) = self.log_level {
            base_config.log_level = level.clone();
        }

        base_config
    }
}

/// Print default configuration in TOML format
pub fn print_default_config() {
    let config = AppConfig::default();

    println!("# lpm-router configuration");
    println!("# The default reproduces the built-in demo topology");
    println!();
    println!("[logging]");
    println!("# Log level: trace, debug, info, warn, error");
    println!("level = \"{}\"", config.log_level);

    for iface in &config.interfaces {
        println!();
        println!("[[interfaces]]");
        println!("id = {}", iface.id);
        println!("name = \"{}\"", iface.name);
        for addr in &iface.addresses {
            println!();
            println!("[[interfaces.addresses]]");
            println!("ip = \"{}\"", addr.ip);
            println!("netmask = \"{}\"", addr.netmask);
            if let Some(ref broadcast) = addr.broadcast {
                println!("broadcast = \"{}\"", broadcast);
            }
            if let Some(ref gateway) = addr.gateway {
                println!("gateway = \"{}\"", gateway);
            }
        }
    }

    println!();
    println!("# Routes are matched longest destination prefix first,");
    println!("# then by ascending priority");
    for route in &config.routes {
        println!();
        println!("[[routes]]");
        println!("interface = {}", route.interface);
        if let Some(ref src) = route.src {
            println!("src = \"{}\"", src);
        }
        println!("dst = \"{}\"", route.dst);
        println!("priority = {}", route.priority);
        if let Some(ref hop) = route.next_hop {
            println!("next_hop = \"{}\"", hop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from([
            "lpm-router",
            "--config",
            "/etc/lpm-router.toml",
            "--log-level",
            "debug",
            "--src",
            "192.168.1.2",
            "--dst",
            "223.5.5.5",
            "--via-next-hop",
            "--dump",
        ])
        .unwrap();

        assert_eq!(args.config, Some("/etc/lpm-router.toml".to_string()));
        assert_eq!(args.log_level, Some("debug".to_string()));
        assert_eq!(args.src, Some("192.168.1.2".to_string()));
        assert_eq!(args.dst, Some("223.5.5.5".to_string()));
        assert!(args.via_next_hop);
        assert!(args.dump);
        assert!(!args.validate_config);
        assert!(!args.print_default_config);
    }

    #[test]
    fn test_cli_args_minimal() {
        let args = CliArgs::try_parse_from(["lpm-router"]).unwrap();

        assert_eq!(args.config, None);
        assert_eq!(args.log_level, None);
        assert_eq!(args.src, None);
        assert_eq!(args.dst, None);
        assert!(!args.via_next_hop);
        assert!(!args.dump);
        assert!(!args.validate_config);
        assert!(!args.print_default_config);
    }

    #[test]
    fn test_src_requires_dst() {
        let result = CliArgs::try_parse_from(["lpm-router", "--src", "192.168.1.2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_to_config() {
        let args = CliArgs::try_parse_from(["lpm-router", "--log-level", "trace"]).unwrap();

        let config = args.apply_to_config(AppConfig::default());
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn test_apply_cli_to_config_no_overrides() {
        let args = CliArgs::try_parse_from(["lpm-router"]).unwrap();

        let base_config = AppConfig::default();
        let original_level = base_config.log_level.clone();
        let config = args.apply_to_config(base_config);
        assert_eq!(config.log_level, original_level);
    }
}
