//! Shared pieces of the request/response vocabulary: the [Query] trait, the
//! `{node: ...}` envelopes and the small structs that appear on both anime
//! and manga entities.

use serde::{Deserialize, Serialize};

pub trait Query: Serialize + std::fmt::Debug {}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Copy)]
pub struct EmptyQuery {}
impl Query for EmptyQuery {}

/// Envelope the server puts around every entry of a paged listing
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Holder<T> {
    pub node: T,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Picture {
    pub medium: Option<String>,
    pub large: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AlternativeTitles {
    pub synonyms: Option<Vec<String>>,
    pub en: Option<String>,
    pub ja: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Nsfw {
    White,
    Gray,
    Black,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Ranking {
    pub rank: u64,
    pub previous_rank: Option<u64>,
}

/// Listing entry of the ranking endpoints: the entity plus its rank info
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RankingEntry<T> {
    pub node: T,
    pub ranking: Ranking,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Sequel,
    Prequel,
    AlternativeSetting,
    AlternativeVersion,
    SideStory,
    ParentStory,
    Summary,
    FullStory,
}

/// Entry of the `related_anime`/`related_manga` details fields
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Related<T> {
    pub node: T,
    pub relation_type: RelationType,
    pub relation_type_formatted: String,
}

/// Entry of the `recommendations` details field
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Recommendation<T> {
    pub node: T,
    pub num_recommendations: u64,
}
