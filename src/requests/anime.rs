//! Anime entities and the query structs of the anime endpoints.
//!
//! The meaning of most enums here is documented at
//! <https://myanimelist.net/apiconfig/references/api/v2>
//!
//! All queries encountered here can be constructed with the builder syntax
//! from the [bon] crate

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::manga::Manga;
use super::query_utils::{
    AlternativeTitles, Genre, Nsfw, Picture, Query, Recommendation, Related,
};
use crate::fields::{AnimeFields, UserAnimeListFields};

use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnimeMediaType {
    Unknown,
    Tv,
    Ova,
    Movie,
    Special,
    Ona,
    Music,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AiringStatus {
    FinishedAiring,
    CurrentlyAiring,
    NotYetAired,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnimeSource {
    Other,
    Original,
    Manga,
    #[serde(rename = "4_koma_manga")]
    FourKomaManga,
    WebManga,
    DigitalManga,
    Novel,
    LightNovel,
    VisualNovel,
    Game,
    CardGame,
    Book,
    PictureBook,
    Radio,
    Music,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    G,
    Pg,
    #[serde(rename = "pg_13")]
    Pg13,
    R,
    #[serde(rename = "r+")]
    RPlus,
    Rx,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SeasonName {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl fmt::Display for SeasonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeasonName::Winter => "winter",
            SeasonName::Spring => "spring",
            SeasonName::Summer => "summer",
            SeasonName::Fall => "fall",
        };

        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Season {
    pub year: u64,
    pub season: SeasonName,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Broadcast {
    pub day_of_the_week: String,
    pub start_time: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Studio {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    Watching,
    Completed,
    OnHold,
    Dropped,
    PlanToWatch,
}

/// The authenticated (or listed) user's list entry state for an anime
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AnimeListStatus {
    pub status: Option<WatchStatus>,
    pub score: Option<u8>,
    pub num_episodes_watched: Option<u64>,
    pub is_rewatching: Option<bool>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub priority: Option<u8>,
    pub num_times_rewatched: Option<u64>,
    pub rewatch_value: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub comments: Option<String>,
    pub updated_at: Option<String>,
}

/// Per-status watcher counts of [Statistics]
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StatusCounts {
    pub watching: u64,
    pub completed: u64,
    pub on_hold: u64,
    pub dropped: u64,
    pub plan_to_watch: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Statistics {
    pub num_list_users: u64,
    pub status: StatusCounts,
}

/// Anime entity as returned by the listing endpoints.
///
/// Everything except `id` and `title` is only present when requested via the
/// `fields` parameter
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Anime {
    pub id: u64,
    pub title: String,
    pub main_picture: Option<Picture>,
    pub alternative_titles: Option<AlternativeTitles>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub synopsis: Option<String>,
    pub mean: Option<f64>,
    pub rank: Option<u64>,
    pub popularity: Option<u64>,
    pub num_list_users: Option<u64>,
    pub num_scoring_users: Option<u64>,
    pub nsfw: Option<Nsfw>,
    pub genres: Option<Vec<Genre>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub media_type: Option<AnimeMediaType>,
    pub status: Option<AiringStatus>,
    pub my_list_status: Option<AnimeListStatus>,
    pub num_episodes: Option<u64>,
    pub start_season: Option<Season>,
    pub broadcast: Option<Broadcast>,
    pub source: Option<AnimeSource>,
    pub average_episode_duration: Option<u64>,
    pub rating: Option<Rating>,
    pub studios: Option<Vec<Studio>>,
}

/// [Anime] plus the fields only served by the details endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DetailedAnime {
    #[serde(flatten)]
    pub anime: Anime,
    pub pictures: Option<Vec<Picture>>,
    pub background: Option<String>,
    pub related_anime: Option<Vec<Related<Anime>>>,
    pub related_manga: Option<Vec<Related<Manga>>>,
    pub recommendations: Option<Vec<Recommendation<Anime>>>,
    pub statistics: Option<Statistics>,
}

/// Entry of a user's anime list: the anime plus its list state
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnimeListEntry {
    pub node: Anime,
    pub list_status: Option<AnimeListStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimeRankingType {
    #[default]
    All,
    Airing,
    Upcoming,
    Tv,
    Ova,
    Movie,
    Special,
    #[serde(rename = "bypopularity")]
    ByPopularity,
    Favorite,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalSort {
    AnimeScore,
    AnimeNumListUsers,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserAnimeListSort {
    ListScore,
    ListUpdatedAt,
    AnimeTitle,
    AnimeStartDate,
    AnimeId,
}

/// Query of [`search_anime`](crate::MalClient::search_anime)
#[derive(Serialize, Builder, Debug, Clone, Default)]
#[builder(on(String, into))]
pub struct AnimeListQuery {
    pub q: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Option<AnimeFields>,
    pub nsfw: Option<bool>,
}

impl Query for AnimeListQuery {}

/// Query of [`get_anime_ranking`](crate::MalClient::get_anime_ranking)
#[derive(Serialize, Builder, Debug, Clone, Default)]
pub struct AnimeRankingQuery {
    pub ranking_type: Option<AnimeRankingType>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Option<AnimeFields>,
    pub nsfw: Option<bool>,
}

impl Query for AnimeRankingQuery {}

/// Query of [`get_seasonal_anime`](crate::MalClient::get_seasonal_anime)
#[derive(Serialize, Builder, Debug, Clone, Default)]
pub struct SeasonalAnimeQuery {
    pub sort: Option<SeasonalSort>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Option<AnimeFields>,
    pub nsfw: Option<bool>,
}

impl Query for SeasonalAnimeQuery {}

/// Query of [`get_suggested_anime`](crate::MalClient::get_suggested_anime)
#[derive(Serialize, Builder, Debug, Clone, Default)]
pub struct SuggestedAnimeQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Option<AnimeFields>,
    pub nsfw: Option<bool>,
}

impl Query for SuggestedAnimeQuery {}

/// Query of [`get_user_anime_list`](crate::MalClient::get_user_anime_list)
#[derive(Serialize, Builder, Debug, Clone, Default)]
pub struct UserAnimeListQuery {
    pub status: Option<WatchStatus>,
    pub sort: Option<UserAnimeListSort>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Option<UserAnimeListFields>,
    pub nsfw: Option<bool>,
}

impl Query for UserAnimeListQuery {}
