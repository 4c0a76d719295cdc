use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cat_voting_service::cat_api::{CatImageProvider, TheCatApiClient};
use cat_voting_service::config::{Config, LogFormat, StoreBackend, SERVICE_NAME};
use cat_voting_service::db::{self, CatStore, InMemoryCatStore, PgCatStore};
use cat_voting_service::names::NameGenerator;
use cat_voting_service::{configure, AppState};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn build_store(config: &Config) -> Result<Arc<dyn CatStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory store, data is lost on restart");
            Ok(Arc::new(InMemoryCatStore::new()))
        }
        StoreBackend::Postgres => {
            let db_config = config
                .store
                .database
                .clone()
                .context("Database configuration missing for postgres store")?;
            db_config.log_config();

            let pool = db_pool::create_pool(db_config)
                .await
                .context("Failed to connect to database")?;

            if config.store.ensure_schema {
                db::ensure_schema(&pool)
                    .await
                    .context("Failed to ensure database schema")?;
            }

            info!("✅ Database pool created and verified");
            Ok(Arc::new(PgCatStore::new(pool)))
        }
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.app.log_format);

    info!("🔧 Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    info!(
        "✅ Configuration loaded: env={}, host={}, port={}, store={:?}",
        config.app.env, config.app.host, config.app.port, config.store.backend
    );

    let store = build_store(&config).await?;

    let cat_api: Arc<dyn CatImageProvider> = Arc::new(
        TheCatApiClient::new(&config.cat_api).context("Failed to build image provider client")?,
    );

    let names = Arc::new(match config.app.name_seed {
        Some(seed) => NameGenerator::seeded(seed),
        None => NameGenerator::from_entropy(),
    });
    info!("✅ Name generator ready with {} names", names.len());

    let state = web::Data::new(AppState::new(store, cat_api, names));

    info!("🚀 HTTP server listening on {}:{}", config.app.host, config.app.port);
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.app.host.as_str(), config.app.port))
    .with_context(|| format!("Failed to bind {}:{}", config.app.host, config.app.port))?
    .run()
    .await
    .context("HTTP server error")?;

    info!("{} stopped", SERVICE_NAME);
    Ok(())
}
