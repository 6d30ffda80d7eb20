use clap::Parser;
use tracing::info;

mod config;
mod error;
mod net;
mod table;

use crate::config::cli::{print_default_config, CliArgs};
use crate::error::{AppError, LookupError};

fn main() -> Result<(), AppError> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print_default_config();
        return Ok(());
    }

    let app_config = config::load_configuration(&cli)?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(app_config.log_level.as_str())
        .init();

    let router = app_config.build_router()?;
    info!(
        interfaces = router.interfaces().len(),
        "routing table ready"
    );

    if cli.validate_config {
        return Ok(());
    }

    if cli.dump {
        println!("{router}");
    }

    if let (Some(src), Some(dst)) = (cli.src.as_deref(), cli.dst.as_deref()) {
        let src = parse_query_addr(src)?;
        let dst = parse_query_addr(dst)?;
        if cli.via_next_hop {
            let found = router.route_with_next_hop(src, dst)?;
            match found.next_hop {
                Some(hop) => println!(
                    "to {dst} via {} using {} next hop {hop}",
                    found.iface.name, found.preferred_src.ip
                ),
                None => println!(
                    "to {dst} via {} using {}",
                    found.iface.name, found.preferred_src.ip
                ),
            }
        } else {
            let found = router.route_with_src(src, dst)?;
            match found.preferred_src {
                Some(addr) => println!("to {dst} via {} using {}", found.iface.name, addr.ip),
                None => println!("to {dst} via {} (no local address)", found.iface.name),
            }
        }
    }

    Ok(())
}

/// Parse a query address, reporting input that is neither IPv4 nor IPv6 as a
/// family error.
fn parse_query_addr(s: &str) -> Result<std::net::IpAddr, LookupError> {
    s.parse()
        .map_err(|_| LookupError::UnsupportedFamily(s.to_string()))
}
