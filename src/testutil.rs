//! In-memory `ThreadApi` fixtures shared by the unit tests.

use std::collections::{HashMap, HashSet};

use crate::api::{CommentData, MoreData, Node, SubmissionData};
use crate::client::ThreadApi;
use crate::error::Error;

pub(crate) fn comment(id: &str, parent: &str, author: &str, score: i64, replies: Vec<Node>) -> Node {
    Node::Comment(Box::new(CommentData {
        id: id.to_string(),
        name: format!("t1_{id}"),
        author: Some(author.to_string()),
        body: format!("body of {id}"),
        score,
        created_utc: 1700000000.0,
        permalink: format!("/r/test/comments/link/thread/{id}/"),
        parent_id: parent.to_string(),
        replies,
        ..Default::default()
    }))
}

pub(crate) fn more(id: &str, parent: &str, children: &[&str]) -> Node {
    Node::More(MoreData {
        count: children.len() as u64,
        id: id.to_string(),
        name: format!("t1_{id}"),
        parent_id: parent.to_string(),
        children: children.iter().map(|s| s.to_string()).collect(),
    })
}

pub(crate) fn submission(id: &str, num_comments: u64) -> SubmissionData {
    SubmissionData {
        id: id.to_string(),
        name: format!("t3_{id}"),
        title: "Test thread".to_string(),
        author: Some("op".to_string()),
        score: 100,
        upvote_ratio: 0.97,
        num_comments,
        created_utc: 1700000000.0,
        url: format!("https://www.reddit.com/r/test/comments/{id}/test_thread/"),
        selftext: "the post body".to_string(),
        permalink: format!("/r/test/comments/{id}/test_thread/"),
        subreddit: "test".to_string(),
        ..Default::default()
    }
}

/// Serves canned listings; `fail` simulates a transient failure for the named
/// continuation ids.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub submission: Option<(SubmissionData, Vec<Node>)>,
    pub more: HashMap<String, Vec<Node>>,
    pub fail: HashSet<String>,
}

impl ThreadApi for FakeApi {
    fn submission(&self, id: &str) -> Result<(SubmissionData, Vec<Node>), Error> {
        match &self.submission {
            Some((s, forest)) if s.id == id => Ok((s.clone(), forest.clone())),
            _ => Err(Error::NotFound(id.to_string())),
        }
    }

    fn more_children(&self, _link_fullname: &str, more: &MoreData) -> Result<Vec<Node>, Error> {
        if self.fail.contains(&more.id) {
            return Err(Error::Transient("simulated rate limit".to_string()));
        }
        self.more
            .get(&more.id)
            .cloned()
            .ok_or_else(|| Error::InvalidResponse(format!("no fixture for more `{}`", more.id)))
    }
}
