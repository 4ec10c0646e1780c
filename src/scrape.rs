use chrono::Utc;
use tracing::info;

use crate::client::ThreadApi;
use crate::error::Error;
use crate::flatten::{expand_continuations, flatten_comment_tree};
use crate::progress::Progress;
use crate::thread::{Post, ScrapeResult};

/// Fetch one submission and materialize its complete comment tree.
///
/// Top-level continuations are expanded before any subtree is walked, then
/// each root is flattened in listing order. The processed count shown through
/// `progress` is advisory; the authoritative total is the sequence length.
pub fn scrape_thread(
    api: &dyn ThreadApi,
    submission_id: &str,
    progress: &Progress,
) -> Result<ScrapeResult, Error> {
    let (submission, forest) = api.submission(submission_id)?;
    let post = Post::from_api(&submission);
    info!(
        title = %post.title,
        author = %post.author_display(),
        num_comments = post.num_comments,
        "fetched submission"
    );
    progress.set_expected(post.num_comments);

    let roots = expand_continuations(api, &submission.name, forest);
    let mut comments = Vec::new();
    for root in roots {
        comments.extend(flatten_comment_tree(api, &submission.name, root, 0, progress));
    }

    let total_comments = comments.len();
    if (total_comments as u64) < post.num_comments {
        // Deleted/removed comments routinely make the server-side counter
        // disagree with what can still be fetched; informational only.
        info!(
            flattened = total_comments,
            reported = post.num_comments,
            "flattened count is below the reported comment count"
        );
    }

    Ok(ScrapeResult {
        post,
        comments,
        total_comments,
        scraped_at: Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S").to_string(),
    })
}
