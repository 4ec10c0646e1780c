use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::{CommentsResponse, MoreChildrenResponse, MoreData, Node, SubmissionData};
use crate::config::Credentials;
use crate::error::Error;

/// The narrow seam the scrape and flatten logic depends on: an opaque provider
/// of "submission by id" and continuation-expansion calls. Continuation
/// expansion may perform any number of further network calls.
pub trait ThreadApi {
    /// Fetch a submission and its top-level comment forest.
    fn submission(&self, id: &str) -> Result<(SubmissionData, Vec<Node>), Error>;

    /// Resolve one continuation placeholder into the forest it stood in for.
    fn more_children(&self, link_fullname: &str, more: &MoreData) -> Result<Vec<Node>, Error>;
}

/// The morechildren endpoint accepts at most this many ids per call.
const MORECHILDREN_BATCH: usize = 100;

/// Blocking client for Reddit's OAuth listing API. Fetches an app-only token
/// up front; every listing call carries it as a bearer credential.
pub struct RedditClient {
    http: reqwest::blocking::Client,
    api_url: Url,
    token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl RedditClient {
    pub fn new(creds: &Credentials, api_url: Url, auth_url: Url) -> Result<Self, Error> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(&creds.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| Error::Config(format!("build http client: {e}")))?;

        let token_url = auth_url
            .join("api/v1/access_token")
            .map_err(|e| Error::Config(format!("bad auth url: {e}")))?;
        debug!(%token_url, "requesting app-only token");
        let resp = http
            .post(token_url.clone())
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()?;
        let status = resp.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(Error::Config(format!(
                "reddit rejected the supplied credentials (status {status})"
            )));
        }
        if !status.is_success() {
            return Err(status_error(status.as_u16(), token_url.as_str()));
        }
        let token: TokenResponse = serde_json::from_str(&resp.text()?)?;

        Ok(Self {
            http,
            api_url,
            token: token.access_token,
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        mut url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        for (k, v) in query {
            url.query_pairs_mut().append_pair(k, v);
        }
        debug!(%url, "GET");
        let resp = self.http.get(url.clone()).bearer_auth(&self.token).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(status_error(status.as_u16(), url.as_str()));
        }
        Ok(serde_json::from_str(&resp.text()?)?)
    }
}

impl ThreadApi for RedditClient {
    fn submission(&self, id: &str) -> Result<(SubmissionData, Vec<Node>), Error> {
        let url = self
            .api_url
            .join(&format!("comments/{id}.json"))
            .map_err(|e| Error::InvalidResponse(format!("bad submission url: {e}")))?;
        let (post_listing, forest): CommentsResponse =
            match self.get_json(url, &[("raw_json", "1"), ("limit", "500")]) {
                Err(Error::Api { status: 404, .. }) => return Err(Error::NotFound(id.to_string())),
                other => other?,
            };
        let post = post_listing
            .data
            .children
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidResponse("submission listing was empty".into()))?
            .data;
        Ok((post, forest.data.children))
    }

    fn more_children(&self, link_fullname: &str, more: &MoreData) -> Result<Vec<Node>, Error> {
        let mut things = Vec::new();
        for chunk in more.children.chunks(MORECHILDREN_BATCH) {
            let url = self
                .api_url
                .join("api/morechildren.json")
                .map_err(|e| Error::InvalidResponse(format!("bad morechildren url: {e}")))?;
            let ids = chunk.join(",");
            let resp: MoreChildrenResponse = self.get_json(
                url,
                &[
                    ("api_type", "json"),
                    ("raw_json", "1"),
                    ("link_id", link_fullname),
                    ("children", &ids),
                ],
            )?;
            if !resp.json.errors.is_empty() {
                return Err(Error::InvalidResponse(format!(
                    "morechildren reported errors: {:?}",
                    resp.json.errors
                )));
            }
            things.extend(resp.json.data.map(|d| d.things).unwrap_or_default());
        }
        Ok(assemble_forest(things))
    }
}

fn status_error(status: u16, url: &str) -> Error {
    match status {
        429 | 500..=599 => Error::Transient(format!("status {status} for {url}")),
        _ => Error::Api {
            status,
            url: url.to_string(),
        },
    }
}

/// Re-thread the flat morechildren payload into a forest.
///
/// The endpoint returns resolved comments as a flat list in thread order
/// (parents before their children), each with empty `replies`. Walking the
/// list in reverse lets every comment collect its already-assembled replies
/// before it is attached to its own parent. Nodes whose parent is not part of
/// the batch become roots of the returned forest.
pub(crate) fn assemble_forest(things: Vec<Node>) -> Vec<Node> {
    use std::collections::{HashMap, HashSet};

    let present: HashSet<String> = things
        .iter()
        .filter_map(|n| match n {
            Node::Comment(c) => Some(c.name.clone()),
            Node::More(_) => None,
        })
        .collect();

    let mut pending: HashMap<String, Vec<Node>> = HashMap::new();
    let mut roots_rev: Vec<Node> = Vec::new();
    for node in things.into_iter().rev() {
        let parent = match &node {
            Node::Comment(c) => c.parent_id.clone(),
            Node::More(m) => m.parent_id.clone(),
        };
        let node = match node {
            Node::Comment(mut c) => {
                if let Some(mut kids) = pending.remove(&c.name) {
                    kids.reverse();
                    c.replies.extend(kids);
                }
                Node::Comment(c)
            }
            more => more,
        };
        if present.contains(&parent) {
            pending.entry(parent).or_default().push(node);
        } else {
            roots_rev.push(node);
        }
    }
    roots_rev.reverse();
    let mut roots = roots_rev;

    // A child can arrive before its parent on a malformed payload; promote
    // such leftovers instead of dropping them.
    for (parent, mut kids) in pending {
        debug!(%parent, n = kids.len(), "parent missing from resolved batch; promoting children");
        kids.reverse();
        roots.extend(kids);
    }
    roots
}
