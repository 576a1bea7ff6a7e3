//! Structs and utilities for making requests to the MyAnimeList servers

pub mod anime;
pub mod forum;
pub mod manga;
pub mod query_utils;
pub mod user;

use crate::auth::Auth;
use crate::fields::{DetailedAnimeFields, DetailedMangaFields, UserInfoFields};
use crate::pagination::{wrap_paged, Paged, PagedResponse};
use crate::MalClient;

use anime::{
    Anime, AnimeListEntry, AnimeListQuery, AnimeRankingQuery, DetailedAnime, SeasonName,
    SeasonalAnimeQuery, SuggestedAnimeQuery, UserAnimeListQuery,
};
use forum::{
    DetailedForumTopic, ForumBoards, ForumTopic, ForumTopicDetailQuery, ForumTopicsQuery,
};
use manga::{
    DetailedManga, Manga, MangaListEntry, MangaListQuery, MangaRankingQuery, UserMangaListQuery,
};
use query_utils::{EmptyQuery, Holder, Query, RankingEntry};
use user::UserInfo;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload the server attaches to non-success responses
#[derive(Deserialize, Debug, Default)]
struct ApiErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
}

/// Custom error type that contains all errors that can be emitted by this
/// crate's functions.
///
/// Failed requests never panic: both transport failures and non-success
/// responses come back through this type so that callers can discriminate
/// before use
#[derive(Error, Debug)]
pub enum Error {
    /// The server answered with a non-success status. `error` and `message`
    /// are taken verbatim from the response body.
    ///
    /// Transport failures with no response at all are collapsed into the
    /// fixed fallback value `Api { status: 500, error: "unknown", message:
    /// "error with no response" }`
    #[error("{status} server response: {error}: {message}")]
    Api {
        status: u16,
        error: String,
        message: String,
    },
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    QsError(#[from] serde_qs::Error),
    #[error("oauth flow requires a client id")]
    MissingClientId,
}

impl Error {
    /// Fallback for requests that failed without any server response
    pub(crate) fn no_response() -> Self {
        Error::Api {
            status: 500,
            error: "unknown".to_owned(),
            message: "error with no response".to_owned(),
        }
    }
}

/// Type alias for the [`Result`](std::result::Result) that is used in the crate's functions
pub type Result<T> = std::result::Result<T, Error>;

/// Wraps a typed field set into the `fields` query parameter
#[derive(Serialize, Debug)]
struct FieldsQuery<F: Serialize + std::fmt::Debug> {
    fields: F,
}

impl<F: Serialize + std::fmt::Debug> Query for FieldsQuery<F> {}

/// Strips the `{node: ...}` envelopes off a listing payload
fn unwrap_nodes<T>(data: Vec<Holder<T>>) -> Vec<T> {
    data.into_iter().map(|holder| holder.node).collect()
}

#[derive(Deserialize, Debug)]
struct ForumBoardsResponse {
    categories: Vec<ForumBoards>,
}

impl MalClient {
    /// Lowest level function that executes an arbitrary [Query] against
    /// `path` (relative to the configured base url) and decodes the response
    #[tracing::instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, path: &str, query: &impl Query) -> Result<T> {
        let query_data = serde_qs::to_string(query)?;

        let url = if query_data.is_empty() {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}{path}?{query_data}", self.base_url)
        };

        self.get_url(&url, &self.auth).await
    }

    /// Executes a GET against an absolute `url` with the given `auth` and
    /// decodes the response. Page cursors come through here with the url the
    /// server handed out, taken verbatim
    pub(crate) async fn get_url<T: DeserializeOwned>(&self, url: &str, auth: &Auth) -> Result<T> {
        let resp = match auth.apply(self.client.get(url)).send().await {
            Ok(resp) => resp,
            Err(_) => return Err(Error::no_response()),
        };

        Self::decode(resp).await
    }

    pub(crate) async fn post_form<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + std::fmt::Debug,
    {
        let resp = match self.client.post(url).form(body).send().await {
            Ok(resp) => resp,
            Err(_) => return Err(Error::no_response()),
        };

        Self::decode(resp).await
    }

    /// Decodes a success body as `T`, everything else as [`Error::Api`]
    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            let err: ApiErrorBody = serde_json::from_str(&body).unwrap_or_default();

            tracing::warn!("got {} from server: {}: {}", status, err.error, err.message);

            Err(Error::Api {
                status: status.as_u16(),
                error: err.error,
                message: err.message,
            })
        }
    }

    /// Searches for anime with the parameters specified by `query`
    #[tracing::instrument(skip(self))]
    pub async fn search_anime(&self, query: &AnimeListQuery) -> Result<Paged<Vec<Anime>>> {
        let raw: PagedResponse<Vec<Holder<Anime>>> = self.query("/anime", query).await?;

        Ok(wrap_paged(raw, unwrap_nodes, self.auth.clone()))
    }

    /// Shorthand for searching anime just by name
    pub async fn search_anime_by_name(&self, name: &str) -> Result<Paged<Vec<Anime>>> {
        self.search_anime(&AnimeListQuery {
            q: Some(name.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Queries for the full record of the anime with the given `id`
    #[tracing::instrument(skip(self))]
    pub async fn get_anime_details(
        &self,
        id: u64,
        fields: &DetailedAnimeFields,
    ) -> Result<DetailedAnime> {
        self.query(&format!("/anime/{id}"), &FieldsQuery { fields })
            .await
    }

    /// Queries for the anime ranking of the requested type
    #[tracing::instrument(skip(self))]
    pub async fn get_anime_ranking(
        &self,
        query: &AnimeRankingQuery,
    ) -> Result<Paged<Vec<RankingEntry<Anime>>>> {
        let raw = self.query("/anime/ranking", query).await?;

        Ok(wrap_paged(raw, |data| data, self.auth.clone()))
    }

    /// Queries for the anime of one broadcast season
    #[tracing::instrument(skip(self))]
    pub async fn get_seasonal_anime(
        &self,
        year: u64,
        season: SeasonName,
        query: &SeasonalAnimeQuery,
    ) -> Result<Paged<Vec<Anime>>> {
        let raw: PagedResponse<Vec<Holder<Anime>>> = self
            .query(&format!("/anime/season/{year}/{season}"), query)
            .await?;

        Ok(wrap_paged(raw, unwrap_nodes, self.auth.clone()))
    }

    /// Queries for anime suggested for the authenticated user. Requires
    /// bearer authentication
    #[tracing::instrument(skip(self))]
    pub async fn get_suggested_anime(
        &self,
        query: &SuggestedAnimeQuery,
    ) -> Result<Paged<Vec<Anime>>> {
        let raw: PagedResponse<Vec<Holder<Anime>>> =
            self.query("/anime/suggestions", query).await?;

        Ok(wrap_paged(raw, unwrap_nodes, self.auth.clone()))
    }

    /// Queries for the anime list of `user_name` (`@me` for the
    /// authenticated user). Entries keep their `list_status` when requested
    #[tracing::instrument(skip(self))]
    pub async fn get_user_anime_list(
        &self,
        user_name: &str,
        query: &UserAnimeListQuery,
    ) -> Result<Paged<Vec<AnimeListEntry>>> {
        let raw = self
            .query(&format!("/users/{user_name}/animelist"), query)
            .await?;

        Ok(wrap_paged(raw, |data| data, self.auth.clone()))
    }

    /// Searches for manga with the parameters specified by `query`
    #[tracing::instrument(skip(self))]
    pub async fn search_manga(&self, query: &MangaListQuery) -> Result<Paged<Vec<Manga>>> {
        let raw: PagedResponse<Vec<Holder<Manga>>> = self.query("/manga", query).await?;

        Ok(wrap_paged(raw, unwrap_nodes, self.auth.clone()))
    }

    /// Shorthand for searching manga just by name
    pub async fn search_manga_by_name(&self, name: &str) -> Result<Paged<Vec<Manga>>> {
        self.search_manga(&MangaListQuery {
            q: Some(name.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Queries for the full record of the manga with the given `id`
    #[tracing::instrument(skip(self))]
    pub async fn get_manga_details(
        &self,
        id: u64,
        fields: &DetailedMangaFields,
    ) -> Result<DetailedManga> {
        self.query(&format!("/manga/{id}"), &FieldsQuery { fields })
            .await
    }

    /// Queries for the manga ranking of the requested type
    #[tracing::instrument(skip(self))]
    pub async fn get_manga_ranking(
        &self,
        query: &MangaRankingQuery,
    ) -> Result<Paged<Vec<RankingEntry<Manga>>>> {
        let raw = self.query("/manga/ranking", query).await?;

        Ok(wrap_paged(raw, |data| data, self.auth.clone()))
    }

    /// Queries for the manga list of `user_name` (`@me` for the
    /// authenticated user)
    #[tracing::instrument(skip(self))]
    pub async fn get_user_manga_list(
        &self,
        user_name: &str,
        query: &UserMangaListQuery,
    ) -> Result<Paged<Vec<MangaListEntry>>> {
        let raw = self
            .query(&format!("/users/{user_name}/mangalist"), query)
            .await?;

        Ok(wrap_paged(raw, |data| data, self.auth.clone()))
    }

    /// Queries for the profile of the authenticated user. The server only
    /// supports `@me` here, so no user name parameter is taken
    #[tracing::instrument(skip(self))]
    pub async fn get_user_info(&self, fields: &UserInfoFields) -> Result<UserInfo> {
        self.query("/users/@me", &FieldsQuery { fields }).await
    }

    /// Queries for all forum board categories
    #[tracing::instrument(skip(self))]
    pub async fn get_forum_boards(&self) -> Result<Vec<ForumBoards>> {
        let resp: ForumBoardsResponse = self.query("/forum/boards", &EmptyQuery {}).await?;

        Ok(resp.categories)
    }

    /// Queries for the posts of the forum topic with the given `id`.
    ///
    /// The paged payload here is a single object whose `posts` window moves
    /// with the cursor, not an array
    #[tracing::instrument(skip(self))]
    pub async fn get_forum_topic_detail(
        &self,
        id: u64,
        query: &ForumTopicDetailQuery,
    ) -> Result<Paged<DetailedForumTopic>> {
        let raw = self.query(&format!("/forum/topic/{id}"), query).await?;

        Ok(wrap_paged(raw, |data| data, self.auth.clone()))
    }

    /// Searches forum topics with the parameters specified by `query`
    #[tracing::instrument(skip(self))]
    pub async fn get_forum_topics(
        &self,
        query: &ForumTopicsQuery,
    ) -> Result<Paged<Vec<ForumTopic>>> {
        let raw = self.query("/forum/topics", query).await?;

        Ok(wrap_paged(raw, |data| data, self.auth.clone()))
    }
}
