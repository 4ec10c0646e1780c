use chrono::DateTime;
use serde::{Serialize, Serializer};

use crate::api::{CommentData, SubmissionData};

/// Placeholder rendered for a missing/deleted author. The model itself keeps
/// the author optional; substitution happens at serialization/export time.
pub const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(serialize_with = "ser_author")]
    pub author: Option<String>,
    pub score: i64,
    pub upvote_ratio: f64,
    pub num_comments: u64,
    pub created_utc: f64,
    pub created_datetime: String,
    pub url: String,
    pub selftext: String,
    pub permalink: String,
    pub subreddit: String,
    pub link_flair_text: Option<String>,
    pub over_18: bool,
    pub spoiler: bool,
    pub locked: bool,
    pub gilded: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: String,
    #[serde(serialize_with = "ser_author")]
    pub author: Option<String>,
    pub body: String,
    pub score: i64,
    pub created_utc: f64,
    pub created_datetime: String,
    pub permalink: String,
    pub parent_id: String,
    /// Assigned during flattening; top-level comments sit at 0.
    pub depth: u32,
    pub is_submitter: bool,
    pub distinguished: Option<String>,
    pub edited: bool,
    pub controversiality: u32,
    pub gilded: u32,
}

/// One fully scraped thread: the post, its comments in pre-order traversal
/// order, and the scrape timestamp.
#[derive(Debug, Serialize)]
pub struct ScrapeResult {
    pub post: Post,
    pub comments: Vec<Comment>,
    pub total_comments: usize,
    pub scraped_at: String,
}

impl Post {
    pub fn from_api(data: &SubmissionData) -> Self {
        Self {
            id: data.id.clone(),
            title: data.title.clone(),
            author: data.author.clone(),
            score: data.score,
            upvote_ratio: data.upvote_ratio,
            num_comments: data.num_comments,
            created_utc: data.created_utc,
            created_datetime: format_timestamp(data.created_utc),
            url: data.url.clone(),
            selftext: data.selftext.clone(),
            permalink: data.permalink.clone(),
            subreddit: data.subreddit.clone(),
            link_flair_text: data.link_flair_text.clone(),
            over_18: data.over_18,
            spoiler: data.spoiler,
            locked: data.locked,
            gilded: data.gilded,
        }
    }

    pub fn author_display(&self) -> &str {
        self.author.as_deref().unwrap_or(DELETED_AUTHOR)
    }
}

impl Comment {
    pub fn from_api(data: &CommentData, depth: u32) -> Self {
        Self {
            id: data.id.clone(),
            author: data.author.clone(),
            body: data.body.clone(),
            score: data.score,
            created_utc: data.created_utc,
            created_datetime: format_timestamp(data.created_utc),
            permalink: data.permalink.clone(),
            parent_id: data.parent_id.clone(),
            depth,
            is_submitter: data.is_submitter,
            distinguished: data.distinguished.clone(),
            edited: data.edited,
            controversiality: data.controversiality,
            gilded: data.gilded,
        }
    }

    pub fn author_display(&self) -> &str {
        self.author.as_deref().unwrap_or(DELETED_AUTHOR)
    }
}

fn ser_author<S>(author: &Option<String>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(author.as_deref().unwrap_or(DELETED_AUTHOR))
}

/// ISO-8601 rendering of a creation timestamp (seconds since the epoch).
pub fn format_timestamp(created_utc: f64) -> String {
    DateTime::from_timestamp(created_utc as i64, 0)
        .map(|dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}
