use anyhow::{Context, Result};
use dotenv::dotenv;
use news_ticker::{TickerError, config::TickerPaths, ticker};
use tracing::error;
use utils::tracing::setup_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_tracing();

    let paths = TickerPaths::from_env();
    match ticker::run(&paths).await {
        Ok(_) => Ok(()),
        Err(e @ TickerError::ConfigMissing { .. }) => {
            error!("{e}");
            Err(e).context("refusing to run without a config file")
        }
        Err(e) => {
            error!(error = %e, "Ticker run failed, state left unchanged");
            Err(e).context("ticker run failed")
        }
    }
}
