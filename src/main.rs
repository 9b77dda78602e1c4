use homelab_net_tools::logging::{init_logging, LOG_CONFIG_FILE};
use homelab_net_tools::split_ipv6_range;
use log::LevelFilter;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    if let Err(e) = init_logging(Path::new(LOG_CONFIG_FILE), LevelFilter::Warn) {
        eprintln!("Error initializing logging: {e}");
    }
    log::info!("#Start main()");

    let Some(range) = std::env::args().nth(1) else {
        println!("Usage: ipv6-split <ipv6-range>   e.g. ipv6-split 2001:db8::/56");
        return ExitCode::FAILURE;
    };

    match split_ipv6_range(&range) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // the message goes to stdout, like the result
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}
