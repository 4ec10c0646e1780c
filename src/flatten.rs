use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::api::{CommentData, Node};
use crate::client::ThreadApi;
use crate::progress::Progress;
use crate::thread::Comment;

/// Expand every continuation placeholder in one reply listing.
///
/// The listing is walked in order; resolved nodes are spliced into the
/// position the placeholder stood in, so the output keeps the API's listing
/// order. A resolution can itself return further placeholders; those are
/// expanded in turn. A placeholder that fails to resolve is dropped with a
/// warning and the listing keeps whatever was already fetched; partial data
/// is preferred over aborting the scrape.
pub fn expand_continuations(
    api: &dyn ThreadApi,
    link_fullname: &str,
    nodes: Vec<Node>,
) -> Vec<Box<CommentData>> {
    let mut queue: VecDeque<Node> = nodes.into();
    let mut out = Vec::new();
    while let Some(node) = queue.pop_front() {
        match node {
            Node::Comment(c) => out.push(c),
            Node::More(more) => {
                if more.children.is_empty() {
                    // "continue this thread" marker; there is nothing to ask
                    // the morechildren endpoint for.
                    debug!(parent = %more.parent_id, "skipping empty continuation");
                    continue;
                }
                match api.more_children(link_fullname, &more) {
                    Ok(resolved) => {
                        for n in resolved.into_iter().rev() {
                            queue.push_front(n);
                        }
                    }
                    Err(e) => {
                        warn!(
                            parent = %more.parent_id,
                            count = more.count,
                            error = %e,
                            "failed to resolve continuation; continuing with partial replies"
                        );
                    }
                }
            }
        }
    }
    out
}

/// Flatten one comment subtree into a pre-order, depth-annotated sequence.
///
/// Continuations in each node's reply listing are resolved before its
/// children are visited. Uses an explicit work stack rather than call
/// recursion: reply nesting has no upper bound and a deep thread must not
/// overflow the call stack.
pub fn flatten_comment_tree(
    api: &dyn ThreadApi,
    link_fullname: &str,
    root: Box<CommentData>,
    depth: u32,
    progress: &Progress,
) -> Vec<Comment> {
    let mut out = Vec::new();
    let mut stack: Vec<(Box<CommentData>, u32)> = vec![(root, depth)];
    while let Some((mut node, depth)) = stack.pop() {
        let replies = std::mem::take(&mut node.replies);
        out.push(Comment::from_api(&node, depth));
        progress.comment_done();
        let children = expand_continuations(api, link_fullname, replies);
        for child in children.into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    out
}
