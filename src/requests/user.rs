//! User profile entities.

use serde::{Deserialize, Serialize};

/// Aggregate watch statistics, requested via the `anime_statistics` field
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnimeStatistics {
    pub num_items_watching: u64,
    pub num_items_completed: u64,
    pub num_items_on_hold: u64,
    pub num_items_dropped: u64,
    pub num_items_plan_to_watch: u64,
    pub num_items: u64,
    pub num_days_watched: f64,
    pub num_days_watching: f64,
    pub num_days_completed: f64,
    pub num_days_on_hold: f64,
    pub num_days_dropped: f64,
    pub num_days: f64,
    pub num_episodes: u64,
    pub num_times_rewatched: u64,
    pub mean_score: f64,
}

/// Profile of the authenticated user.
///
/// The server currently only serves this for `@me`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserInfo {
    pub id: u64,
    pub name: String,
    pub picture: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub location: Option<String>,
    pub joined_at: Option<String>,
    pub anime_statistics: Option<AnimeStatistics>,
    pub time_zone: Option<String>,
    pub is_supported: Option<bool>,
}
