/// Data structures for cats, votes and API payloads
///
/// Field names on the wire follow the stored column names (`CatID`,
/// `ImageURL`, ...) for read endpoints and snake_case for write endpoints.
use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

pub const MSG_CAT_REGISTERED: &str = "Cat registered successfully!";
pub const MSG_VOTE_RECORDED: &str = "Vote recorded successfully!";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch cat information from The Cat API.";
pub const MSG_VOTE_OUT_OF_RANGE: &str = "Vote must be between 1 and 5.";
pub const MSG_INVALID_BODY: &str = "Invalid request body.";
pub const MSG_UPSTREAM_INVALID: &str = "Received an invalid response from The Cat API.";
pub const MSG_INTERNAL_ERROR: &str = "Internal server error.";

/// Lowest accepted vote
pub const MIN_VOTE: i64 = 1;
/// Highest accepted vote
pub const MAX_VOTE: i64 = 5;

/// A registered cat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cat {
    #[serde(rename = "CatID")]
    #[sqlx(rename = "CatID")]
    pub cat_id: String,
    #[serde(rename = "Name")]
    #[sqlx(rename = "CatName")]
    pub name: String,
    #[serde(rename = "ImageURL")]
    #[sqlx(rename = "ImageURL")]
    pub image_url: String,
}

/// A cat with at least one vote and its mean score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RankedCat {
    #[serde(rename = "CatID")]
    #[sqlx(rename = "CatID")]
    pub cat_id: String,
    #[serde(rename = "Name")]
    #[sqlx(rename = "CatName")]
    pub name: String,
    #[serde(rename = "ImageURL")]
    #[sqlx(rename = "ImageURL")]
    pub image_url: String,
    #[serde(rename = "AverageVote")]
    #[sqlx(rename = "AverageVote")]
    pub average_vote: f64,
}

/// Image returned by the external provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatImage {
    pub id: String,
    pub url: String,
}

/// Request body for `POST /vote_cat`
///
/// Any whole JSON number is accepted as `vote` so that out-of-range values
/// reach the range check instead of failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub cat_id: String,
    #[serde(deserialize_with = "deserialize_vote")]
    pub vote: i64,
}

/// Whole numbers beyond `i64` saturate. JSON integers wider than `u64`
/// arrive as floats, so integral floats count as whole numbers.
fn deserialize_vote<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(vote) = number.as_i64() {
        return Ok(vote);
    }
    if number.is_u64() {
        return Ok(i64::MAX);
    }
    match number.as_f64() {
        // `as` saturates at the i64 bounds
        Some(vote) if vote.is_finite() && vote.fract() == 0.0 => Ok(vote as i64),
        Some(vote) => Err(D::Error::invalid_value(
            Unexpected::Float(vote),
            &"a whole number",
        )),
        None => Err(D::Error::custom("vote is not a number")),
    }
}

impl VoteRequest {
    /// The vote as stored, if it lies in `MIN_VOTE..=MAX_VOTE`
    pub fn checked_vote(&self) -> Option<i32> {
        if (MIN_VOTE..=MAX_VOTE).contains(&self.vote) {
            i32::try_from(self.vote).ok()
        } else {
            None
        }
    }
}

/// Response body for `POST /register_cat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCatResponse {
    pub message: String,
    pub cat_id: String,
    pub name: String,
}

/// Plain `{"message": ...}` body used by writes and errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
