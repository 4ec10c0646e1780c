use std::cmp::Reverse;
use std::path::PathBuf;

use anyhow::Context as _;

use crate::thread::{Comment, ScrapeResult};

const TOP_N: usize = 50;
const BODY_PREVIEW_CHARS: usize = 500;

/// Write all four exports for prefix `P`: `P.json`, `P.txt`, `P.csv`,
/// `P_top_comments.txt`. A failed write aborts the remaining exports.
pub fn write_all(result: &ScrapeResult, prefix: &str) -> anyhow::Result<Vec<PathBuf>> {
    Ok(vec![
        write_json(result, prefix)?,
        write_transcript(result, prefix)?,
        write_csv(result, prefix)?,
        write_top_comments(result, prefix)?,
    ])
}

pub fn write_json(result: &ScrapeResult, prefix: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(format!("{prefix}.json"));
    let json = serde_json::to_string_pretty(result).context("serialize scrape result")?;
    std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

pub fn write_transcript(result: &ScrapeResult, prefix: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(format!("{prefix}.txt"));
    std::fs::write(&path, render_transcript(result))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

pub fn write_csv(result: &ScrapeResult, prefix: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(format!("{prefix}.csv"));
    std::fs::write(&path, render_csv(result))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

pub fn write_top_comments(result: &ScrapeResult, prefix: &str) -> anyhow::Result<PathBuf> {
    let path = PathBuf::from(format!("{prefix}_top_comments.txt"));
    std::fs::write(&path, render_top_comments(result))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Readable transcript: post header block, then every comment indented two
/// spaces per depth level.
pub fn render_transcript(result: &ScrapeResult) -> String {
    let post = &result.post;
    let rule = "=".repeat(80);
    let thin = "-".repeat(80);

    let mut out = String::new();
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("TITLE: {}\n", post.title));
    out.push_str(&format!("AUTHOR: u/{}\n", post.author_display()));
    out.push_str(&format!("SUBREDDIT: r/{}\n", post.subreddit));
    out.push_str(&format!(
        "SCORE: {} ({:.1}% upvoted)\n",
        post.score,
        post.upvote_ratio * 100.0
    ));
    out.push_str(&format!("URL: {}\n", post.url));
    out.push_str(&format!("POSTED: {}\n", post.created_datetime));
    out.push_str(&format!("COMMENTS: {}\n", post.num_comments));
    out.push_str(&format!("PERMALINK: https://reddit.com{}\n", post.permalink));
    out.push_str(&format!("{rule}\n\n"));

    if !post.selftext.is_empty() {
        out.push_str(&format!("{}\n\n", post.selftext));
    }

    out.push_str(&format!("{thin}\n"));
    out.push_str(&format!("COMMENTS ({} total)\n", result.comments.len()));
    out.push_str(&format!("{thin}\n\n"));

    for c in &result.comments {
        let indent = "  ".repeat(c.depth as usize);

        out.push_str(&format!("{indent}┌─ [{}] u/{}", c.score, c.author_display()));
        if c.is_submitter {
            out.push_str(" [OP]");
        }
        if let Some(d) = &c.distinguished {
            out.push_str(&format!(" [{d}]"));
        }
        out.push_str(&format!(" (depth: {})\n", c.depth));

        for line in c.body.split('\n') {
            out.push_str(&format!("{indent}│  {line}\n"));
        }

        out.push_str(&format!("{indent}│  [ID: {}]\n", c.id));
        out.push_str(&format!("{indent}└─\n\n"));
    }

    out
}

/// One row per comment; body newlines collapsed to spaces, quotes doubled.
pub fn render_csv(result: &ScrapeResult) -> String {
    let mut out = String::from("id,author,score,depth,is_submitter,created_datetime,body\n");
    for c in &result.comments {
        let author = c.author_display().replace('"', "\"\"");
        let body = c.body.replace('"', "\"\"").replace(['\n', '\r'], " ");
        out.push_str(&format!(
            "\"{}\",\"{}\",{},{},{},\"{}\",\"{}\"\n",
            c.id, author, c.score, c.depth, c.is_submitter, c.created_datetime, body
        ));
    }
    out
}

/// Top comments by score: descending, ties keep their traversal order, at
/// most 50 entries, bodies previewed at 500 characters.
pub fn render_top_comments(result: &ScrapeResult) -> String {
    let mut ranked: Vec<&Comment> = result.comments.iter().collect();
    // sort_by_key is stable, so equal scores stay in traversal order
    ranked.sort_by_key(|c| Reverse(c.score));

    let rule = "=".repeat(80);
    let thin = "-".repeat(80);

    let mut out = String::new();
    out.push_str(&format!("TOP {TOP_N} COMMENTS BY SCORE\n"));
    out.push_str(&format!("{rule}\n\n"));

    for (i, c) in ranked.iter().take(TOP_N).enumerate() {
        out.push_str(&format!(
            "{}. u/{} (Score: {}, Depth: {})\n",
            i + 1,
            c.author_display(),
            c.score,
            c.depth
        ));
        out.push_str(&format!("   {}\n", truncate_chars(&c.body, BODY_PREVIEW_CHARS)));
        out.push_str(&format!("   https://reddit.com{}\n", c.permalink));
        out.push_str(&format!("{thin}\n\n"));
    }

    out
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
