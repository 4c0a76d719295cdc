/// Cat handlers - registration and read endpoints
use actix_web::{web, HttpResponse};
use tracing::{debug, info};

use super::AppState;
use crate::error::{AppError, Result};
use crate::metrics::CAT_REGISTRATIONS_TOTAL;
use crate::models::{RegisterCatResponse, MSG_CAT_REGISTERED};

fn count_registration(outcome: &str) {
    CAT_REGISTRATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Fetch an image from the provider, name it, and store it once
pub async fn register_cat(state: web::Data<AppState>) -> Result<HttpResponse> {
    let image = match state.cat_api.fetch_cat().await {
        Ok(Some(image)) => image,
        Ok(None) => {
            count_registration("upstream_unavailable");
            return Err(AppError::UpstreamUnavailable);
        }
        Err(e) => {
            count_registration("upstream_invalid");
            return Err(e.into());
        }
    };

    let name = state.names.pick_name();
    let inserted = state.store.upsert_cat(&image.id, name, &image.url).await?;

    count_registration(if inserted { "inserted" } else { "existing" });
    info!(cat_id = %image.id, name, inserted, "Cat registered");

    Ok(HttpResponse::Created().json(RegisterCatResponse {
        message: MSG_CAT_REGISTERED.to_string(),
        cat_id: image.id,
        name: name.to_string(),
    }))
}

/// Cats with at least one vote, best average first
pub async fn top_cats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let cats = state.store.top_cats().await?;
    debug!(count = cats.len(), "Listed top cats");

    Ok(HttpResponse::Ok().json(cats))
}

/// All registered cats
pub async fn get_cats(state: web::Data<AppState>) -> Result<HttpResponse> {
    let cats = state.store.all_cats().await?;
    debug!(count = cats.len(), "Listed cats");

    Ok(HttpResponse::Ok().json(cats))
}
