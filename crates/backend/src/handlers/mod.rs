pub mod a001_artist;
pub mod a002_space;
pub mod a003_user_profile;
pub mod dashboard;
pub mod locations;

use contracts::domain::common::AggregateId;
use contracts::shared::messages;
use serde::Deserialize;

use crate::shared::error::ApiError;

/// `?search=` on list endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub search: String,
}

/// `?confirm=true` is required on every delete; deletion cannot be undone
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteQuery {
    pub confirm: bool,
}

impl DeleteQuery {
    pub fn require_confirmed(&self) -> Result<(), ApiError> {
        if self.confirm {
            Ok(())
        } else {
            Err(ApiError::BadRequest(messages::DELETE_NOT_CONFIRMED))
        }
    }
}

pub fn parse_id<I: AggregateId>(raw: &str) -> Result<I, ApiError> {
    I::from_string(raw).map_err(|e| {
        tracing::debug!("Rejected identifier {:?}: {}", raw, e);
        ApiError::BadRequest(messages::INVALID_IDENTIFIER)
    })
}
