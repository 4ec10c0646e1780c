use serde::{Deserialize, Deserializer};

/// Kind-tagged wrapper used throughout the listing API.
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListingData<T> {
    #[serde(default)]
    pub children: Vec<T>,
}

/// `GET /comments/{id}.json` returns a two-element array: a listing holding the
/// submission itself, then the top-level comment forest.
pub type CommentsResponse = (Listing<Thing<SubmissionData>>, Listing<Node>);

/// One entry of a comment listing: a real comment or a "load more" placeholder.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Node {
    #[serde(rename = "t1")]
    Comment(Box<CommentData>),
    #[serde(rename = "more")]
    More(MoreData),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionData {
    pub id: String,
    /// Fullname (`t3_<id>`), required by the morechildren endpoint.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "author_opt")]
    pub author: Option<String>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub upvote_ratio: f64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub link_flair_text: Option<String>,
    #[serde(default)]
    pub over_18: bool,
    #[serde(default)]
    pub spoiler: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub gilded: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentData {
    pub id: String,
    /// Fullname (`t1_<id>`).
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "author_opt")]
    pub author: Option<String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub created_utc: f64,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub is_submitter: bool,
    #[serde(default)]
    pub distinguished: Option<String>,
    #[serde(default, deserialize_with = "edited_flag")]
    pub edited: bool,
    #[serde(default)]
    pub controversiality: u32,
    #[serde(default)]
    pub gilded: u32,
    #[serde(default, deserialize_with = "replies_listing")]
    pub replies: Vec<Node>,
}

/// Continuation placeholder standing in for children not yet fetched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoreData {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parent_id: String,
    /// Ids (without the `t1_` prefix) to pass to `/api/morechildren`.
    #[serde(default)]
    pub children: Vec<String>,
}

/// Envelope of `GET /api/morechildren.json?api_type=json`.
#[derive(Debug, Deserialize)]
pub struct MoreChildrenResponse {
    pub json: MoreChildrenBody,
}

#[derive(Debug, Deserialize)]
pub struct MoreChildrenBody {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    #[serde(default)]
    pub data: Option<MoreChildrenData>,
}

#[derive(Debug, Deserialize)]
pub struct MoreChildrenData {
    #[serde(default)]
    pub things: Vec<Node>,
}

/// A deleted author arrives as the literal `"[deleted]"`; keep it optional in
/// the data model and let exporters substitute the placeholder.
fn author_opt<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<String>::deserialize(d)?;
    Ok(v.filter(|a| !a.is_empty() && a != "[deleted]"))
}

/// `edited` is `false` or the edit timestamp.
fn edited_flag<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Edited {
        Flag(bool),
        Timestamp(f64),
    }
    Ok(match Edited::deserialize(d)? {
        Edited::Flag(b) => b,
        Edited::Timestamp(_) => true,
    })
}

/// `replies` is a nested listing, or the empty string when there are none.
fn replies_listing<'de, D>(d: D) -> Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Replies {
        Listing(Listing<Node>),
        Empty(Option<String>),
    }
    Ok(match Replies::deserialize(d)? {
        Replies::Listing(l) => l.data.children,
        Replies::Empty(_) => Vec::new(),
    })
}
