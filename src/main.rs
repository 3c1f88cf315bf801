use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use herbarium::catalog::Catalog;
use herbarium::error::Result;
use herbarium::server;
use herbarium::settings::Settings;

async fn run() -> Result<()> {
    let settings = Settings::load()?;
    let catalog = Catalog::open(settings.persistence_mode())?;
    info!(
        plants = catalog.len()?,
        path = %settings.database.path,
        "catalog open"
    );
    server::serve(Arc::new(catalog), &settings.bind_address()).await
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Err(e) = run().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
