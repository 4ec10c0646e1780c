mod api;
mod cli;
mod client;
mod config;
mod error;
mod export;
mod filter;
mod flatten;
mod progress;
mod scrape;
mod thread;

#[cfg(test)]
mod testutil;

use cli::Args;

pub use cli::{Args as CliArgs, ProgressMode};
pub use client::{RedditClient, ThreadApi};
pub use error::Error;
pub use filter::filter_by_author;
pub use scrape::scrape_thread;
pub use thread::{Comment, Post, ScrapeResult};

pub fn run(args: Args) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    let creds = config::Credentials::from_args(&args);
    creds.validate()?;

    let progress_enabled = match args.progress {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    let progress = progress::Progress::new(progress_enabled);

    progress.set_stage("authenticating");
    let client = RedditClient::new(&creds, args.api_url.clone(), args.auth_url.clone())?;

    progress.set_stage(format!("fetching submission {}", args.submission_id));
    let result = scrape::scrape_thread(&client, &args.submission_id, &progress)?;

    progress.set_stage("writing exports");
    let files = export::write_all(&result, &args.out_prefix)?;
    progress.finish();

    println!(
        "Scraped \"{}\" by u/{} in r/{}",
        result.post.title,
        result.post.author_display(),
        result.post.subreddit
    );
    println!(
        "{} comments extracted ({} reported by the api)",
        result.total_comments, result.post.num_comments
    );
    if (result.total_comments as u64) < result.post.num_comments {
        println!("note: some comments may have been deleted or removed");
    }
    for f in &files {
        println!("saved {}", f.display());
    }

    if let Some(name) = &args.search_user {
        let matches = filter::filter_by_author(&result, name);
        if matches.is_empty() {
            println!("\nno comments by u/{name} found");
        } else {
            println!("\nfound {} comment(s) by u/{name}:", matches.len());
            for c in matches {
                println!();
                println!("[{}] depth {} at {}", c.score, c.depth, c.created_datetime);
                println!("https://reddit.com{}", c.permalink);
                println!("{}", c.body);
            }
        }
    }

    Ok(())
}
