use anyhow::Result;
use panel_pricing::{config::load_config, server::start_server};

pub async fn execute() -> Result<()> {
    let config = load_config()?;
    start_server(config).await
}
