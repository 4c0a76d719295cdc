/// Vote handler - HTTP endpoint for recording votes
use actix_web::{web, HttpResponse};
use tracing::info;

use super::AppState;
use crate::error::{AppError, Result};
use crate::metrics::CAT_VOTES_TOTAL;
use crate::models::{MessageResponse, VoteRequest, MSG_VOTE_OUT_OF_RANGE, MSG_VOTE_RECORDED};

/// Record a vote; the range is checked before anything is written
pub async fn vote_cat(
    state: web::Data<AppState>,
    req: web::Json<VoteRequest>,
) -> Result<HttpResponse> {
    let req = req.into_inner();

    let Some(vote) = req.checked_vote() else {
        CAT_VOTES_TOTAL.with_label_values(&["rejected"]).inc();
        return Err(AppError::Validation(MSG_VOTE_OUT_OF_RANGE.to_string()));
    };

    state.store.insert_vote(&req.cat_id, vote).await?;

    CAT_VOTES_TOTAL.with_label_values(&["recorded"]).inc();
    info!(cat_id = %req.cat_id, vote, "Vote recorded");

    Ok(HttpResponse::Created().json(MessageResponse::new(MSG_VOTE_RECORDED)))
}
