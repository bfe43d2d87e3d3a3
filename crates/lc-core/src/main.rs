//! Loadcast - one-minute-ahead CPU utilization forecaster.
//!
//! Constructs all components explicitly, then runs two supervised
//! contexts: the scrape/health HTTP surface on a background thread and
//! the forecasting loop on the main thread.

use clap::Parser;
use tracing::{error, info};

use lc_core::config::Config;
use lc_core::daemon::run_loop;
use lc_core::exporter::ScrapeServer;
use lc_core::logging::init_logging;
use lc_core::publish::ForecastGauge;
use lc_prom::PromClient;

fn main() {
    let config = Config::parse();
    init_logging(config.log_level, config.log_format);

    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        std::process::exit(2);
    }

    info!(
        prom_url = %config.prom_url,
        namespace = %config.namespace,
        deployment = %config.deployment,
        "loadcast starting"
    );

    let gauge = match ForecastGauge::new() {
        Ok(g) => g,
        Err(e) => {
            error!(error = %e, "failed to build forecast gauge");
            std::process::exit(1);
        }
    };

    let _scrape = match ScrapeServer::start(&config.listen_addr, config.listen_port, gauge.clone())
    {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to start scrape server");
            std::process::exit(1);
        }
    };

    let client = PromClient::new(config.prom_url.clone());
    run_loop(&config, &client, &gauge);
}
