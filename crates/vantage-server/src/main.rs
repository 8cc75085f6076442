mod api;
mod config;
mod error;
mod state;

use api::build_router;
use config::AppConfig;
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use vantage_analysis::{RefactorRegistry, RuleRegistry};
use vantage_core::init_logging;
use vantage_storage::InMemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);
    error::set_dev_mode(config.engine.dev_mode);

    info!("starting vantage-server");

    let rule_registry = Arc::new(RuleRegistry::new());
    let refactor_registry = Arc::new(RefactorRegistry::new());
    vantage_rules::register_all(&rule_registry, &refactor_registry).await;
    info!(rules = rule_registry.len().await, "registered rules");

    let store = Arc::new(InMemoryStore::default());
    let state = Arc::new(AppState::new(
        config,
        rule_registry,
        refactor_registry,
        store,
    ));

    let addr = state.config.addr();
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
