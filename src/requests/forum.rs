//! Forum entities and the query structs of the forum endpoints.
//!
//! All queries encountered here can be constructed with the builder syntax
//! from the [bon] crate

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::query_utils::Query;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumSubboard {
    pub id: u64,
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumBoard {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub subboards: Vec<ForumSubboard>,
}

/// One board category: a title plus its boards
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumBoards {
    pub title: String,
    pub boards: Vec<ForumBoard>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumTopicAuthor {
    pub id: u64,
    pub name: Option<String>,
}

/// Topic summary as returned by the topic search endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumTopic {
    pub id: u64,
    pub title: String,
    pub created_at: String,
    pub created_by: ForumTopicAuthor,
    pub number_of_posts: u64,
    pub last_post_created_at: String,
    pub last_post_created_by: ForumTopicAuthor,
    pub is_locked: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumPostAuthor {
    pub id: u64,
    pub name: Option<String>,
    // sic: misspelled upstream, served exactly like this
    pub forum_avator: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumPost {
    pub id: u64,
    pub number: u64,
    pub created_at: String,
    pub created_by: ForumPostAuthor,
    pub body: String,
    pub signature: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumTopicPollOption {
    pub id: u64,
    pub text: String,
    pub votes: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForumTopicPoll {
    pub id: u64,
    pub question: String,
    pub close: bool,
    pub options: Vec<ForumTopicPollOption>,
}

/// Payload of the topic detail endpoint.
///
/// Unlike every other paged endpoint this one pages over a single object
/// whose `posts` window moves with `limit`/`offset`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DetailedForumTopic {
    pub title: String,
    pub posts: Vec<ForumPost>,
    pub poll: Option<Vec<ForumTopicPoll>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForumTopicsSort {
    Recent,
}

/// Query of [`get_forum_topics`](crate::MalClient::get_forum_topics)
#[derive(Serialize, Builder, Debug, Clone, Default)]
#[builder(on(String, into))]
pub struct ForumTopicsQuery {
    pub board_id: Option<u64>,
    pub subboard_id: Option<u64>,
    pub q: Option<String>,
    pub topic_user_name: Option<String>,
    pub user_name: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub sort: Option<ForumTopicsSort>,
}

impl Query for ForumTopicsQuery {}

/// Query of [`get_forum_topic_detail`](crate::MalClient::get_forum_topic_detail)
#[derive(Serialize, Builder, Debug, Clone, Default)]
pub struct ForumTopicDetailQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Query for ForumTopicDetailQuery {}
