//! Full-screen TUI client for Plaza.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use plaza_core::api::ApiClient;
pub use runtime::TuiRuntime;

/// Runs the interactive client against `api` until the user quits.
///
/// Must be called from inside a tokio runtime; API requests are spawned
/// onto it.
pub async fn run(api: ApiClient) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `plaza feed` or `plaza post` for non-interactive use."
        );
    }

    tracing::info!(api = %api.base_url(), "starting interactive session");
    let mut runtime = TuiRuntime::new(api)?;
    runtime.run()
}
