use serde::{Deserialize, Serialize};

use crate::domain::a001_artist::aggregate::Artist;
use crate::domain::a002_space::aggregate::{Space, SpaceStatus};
use crate::shared::messages::Notification;

/// Counters shown at the top of the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_artists: usize,
    pub total_spaces: usize,
    pub available_spaces: usize,
    pub rented_spaces: usize,
}

impl AdminStats {
    pub fn compute(artists: &[Artist], spaces: &[Space]) -> Self {
        let rented_spaces = spaces
            .iter()
            .filter(|s| s.status == SpaceStatus::Rented)
            .count();

        Self {
            total_artists: artists.len(),
            total_spaces: spaces.len(),
            available_spaces: spaces.len() - rented_spaces,
            rented_spaces,
        }
    }
}

/// Response of a forced reload of both collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResyncResponse {
    pub artists: usize,
    pub spaces: usize,
    pub notification: Notification,
}
