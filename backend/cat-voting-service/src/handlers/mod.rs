/// HTTP handlers for cat-related endpoints
///
/// - Cats: register a cat from the image provider, list cats, rank cats
/// - Votes: record a 1-5 vote for a cat
pub mod cats;
pub mod votes;

pub use cats::{get_cats, register_cat, top_cats};
pub use votes::vote_cat;

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::error;

use crate::cat_api::CatImageProvider;
use crate::config::SERVICE_NAME;
use crate::db::CatStore;
use crate::error::AppError;
use crate::metrics::serve_metrics;
use crate::names::NameGenerator;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatStore>,
    pub cat_api: Arc<dyn CatImageProvider>,
    pub names: Arc<NameGenerator>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn CatStore>,
        cat_api: Arc<dyn CatImageProvider>,
        names: Arc<NameGenerator>,
    ) -> Self {
        Self {
            store,
            cat_api,
            names,
        }
    }
}

/// JSON extractor settings: body errors become `{"message": ...}` 400s.
/// The content type is not enforced.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| AppError::InvalidBody(err.to_string()).into())
}

/// Client-facing reason for a failed health check; details stay in the logs
pub const HEALTH_STORE_UNAVAILABLE: &str = "Store unavailable";

async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.store.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => {
            error!(error = %e, "Health check: store ping failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": HEALTH_STORE_UNAVAILABLE,
                "service": SERVICE_NAME
            }))
        }
    }
}

/// Register every route on an actix `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/register_cat", web::post().to(register_cat))
        .route("/vote_cat", web::post().to(vote_cat))
        .route("/top_cats", web::get().to(top_cats))
        .route("/get_cats", web::get().to(get_cats))
        .route("/health", web::get().to(health))
        .route("/metrics", web::get().to(serve_metrics));
}
