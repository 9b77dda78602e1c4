use homelab_net_tools::config::DomainCheckConfig;
use homelab_net_tools::logging::{init_logging, LOG_CONFIG_FILE};
use homelab_net_tools::{check_domains, output::render_expired_report};
use std::error::Error;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let mut config = DomainCheckConfig::from_env()?;
    init_logging(Path::new(LOG_CONFIG_FILE), config.log_level)?;
    log::info!("#Start main()");

    if let Some(file) = std::env::args().nth(1) {
        config.domains_file = PathBuf::from(file);
    }
    log::debug!("{config:?}");

    let expired = check_domains(&config).await?;
    println!("{}", render_expired_report(&expired));

    Ok(())
}
