//! Manga entities and the query structs of the manga endpoints.
//!
//! All queries encountered here can be constructed with the builder syntax
//! from the [bon] crate

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::anime::Anime;
use super::query_utils::{
    AlternativeTitles, Genre, Nsfw, Picture, Query, Recommendation, Related,
};
use crate::fields::{MangaFields, UserMangaListFields};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MangaMediaType {
    Unknown,
    Manga,
    Novel,
    OneShot,
    Doujinshi,
    Manhwa,
    Manhua,
    Oel,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PublishingStatus {
    Finished,
    CurrentlyPublishing,
    NotYetPublished,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    Reading,
    Completed,
    OnHold,
    Dropped,
    PlanToRead,
}

/// The authenticated (or listed) user's list entry state for a manga
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MangaListStatus {
    pub status: Option<ReadStatus>,
    pub score: Option<u8>,
    pub num_volumes_read: Option<u64>,
    pub num_chapters_read: Option<u64>,
    pub is_rereading: Option<bool>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub priority: Option<u8>,
    pub num_times_reread: Option<u64>,
    pub reread_value: Option<u8>,
    pub tags: Option<Vec<String>>,
    pub comments: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Author {
    pub id: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthorRole {
    pub node: Author,
    pub role: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Magazine {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MagazineRole {
    pub node: Magazine,
    pub role: String,
}

/// Manga entity as returned by the listing endpoints.
///
/// Everything except `id` and `title` is only present when requested via the
/// `fields` parameter
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Manga {
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
    pub media_type: Option<MangaMediaType>,
    pub status: Option<PublishingStatus>,
    pub my_list_status: Option<MangaListStatus>,
    pub num_volumes: Option<u64>,
    pub num_chapters: Option<u64>,
    pub authors: Option<Vec<AuthorRole>>,
}

/// [Manga] plus the fields only served by the details endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DetailedManga {
    #[serde(flatten)]
    pub manga: Manga,
    pub pictures: Option<Vec<Picture>>,
    pub background: Option<String>,
    pub related_anime: Option<Vec<Related<Anime>>>,
    pub related_manga: Option<Vec<Related<Manga>>>,
    pub recommendations: Option<Vec<Recommendation<Manga>>>,
    pub serialization: Option<Vec<MagazineRole>>,
}

/// Entry of a user's manga list: the manga plus its list state
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MangaListEntry {
    pub node: Manga,
    pub list_status: Option<MangaListStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MangaRankingType {
    #[default]
    All,
    Manga,
    Novels,
    Oneshots,
    Doujin,
    Manhwa,
    Manhua,
    #[serde(rename = "bypopularity")]
    ByPopularity,
    Favorite,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserMangaListSort {
    ListScore,
    ListUpdatedAt,
    MangaTitle,
    MangaStartDate,
    MangaId,
}

/// Query of [`search_manga`](crate::MalClient::search_manga)
#[derive(Serialize, Builder, Debug, Clone, Default)]
#[builder(on(String, into))]
pub struct MangaListQuery {
    pub q: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Option<MangaFields>,
    pub nsfw: Option<bool>,
}

impl Query for MangaListQuery {}

/// Query of [`get_manga_ranking`](crate::MalClient::get_manga_ranking)
#[derive(Serialize, Builder, Debug, Clone, Default)]
pub struct MangaRankingQuery {
    pub ranking_type: Option<MangaRankingType>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Option<MangaFields>,
    pub nsfw: Option<bool>,
}

impl Query for MangaRankingQuery {}

/// Query of [`get_user_manga_list`](crate::MalClient::get_user_manga_list)
#[derive(Serialize, Builder, Debug, Clone, Default)]
pub struct UserMangaListQuery {
    pub status: Option<ReadStatus>,
    pub sort: Option<UserMangaListSort>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub fields: Option<UserMangaListFields>,
    pub nsfw: Option<bool>,
}

impl Query for UserMangaListQuery {}
