use clap::{Parser, ValueEnum};
use url::Url;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Submission id to scrape (the `abc123` in `reddit.com/comments/abc123/...`).
    #[arg(long)]
    pub submission_id: String,

    /// Output file prefix `P`; writes `P.json`, `P.txt`, `P.csv` and `P_top_comments.txt`.
    #[arg(long, default_value = "reddit_complete")]
    pub out_prefix: String,

    /// Reddit app client id (the string under "personal use script" at reddit.com/prefs/apps).
    #[arg(long, env = "REDDIT_CLIENT_ID", default_value = "")]
    pub client_id: String,

    /// Reddit app client secret.
    #[arg(long, env = "REDDIT_CLIENT_SECRET", default_value = "", hide_env_values = true)]
    pub client_secret: String,

    /// HTTP User-Agent sent with every API call.
    ///
    /// Reddit asks for a descriptive agent of the form `platform:app:version (by /u/name)`.
    #[arg(long, env = "REDDIT_USER_AGENT", default_value = "rust:reddit-thread-export:v0.1")]
    pub user_agent: String,

    /// After the scrape, print every comment written by this user (case-insensitive).
    #[arg(long)]
    pub search_user: Option<String>,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,

    /// OAuth API endpoint. Only useful to point the tool at a test server.
    #[arg(long, default_value = "https://oauth.reddit.com")]
    pub api_url: Url,

    /// Token endpoint base. Only useful to point the tool at a test server.
    #[arg(long, default_value = "https://www.reddit.com")]
    pub auth_url: Url,
}
