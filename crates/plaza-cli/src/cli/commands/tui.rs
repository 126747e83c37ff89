//! Interactive client launcher.

use anyhow::{Context, Result};
use plaza_core::api::ApiClient;

pub async fn run(base_url: &str) -> Result<()> {
    let api = ApiClient::new(base_url).context("create API client")?;
    plaza_tui::run(api).await
}
