use crate::cli::Args;
use crate::error::Error;

pub const PLACEHOLDER_CLIENT_ID: &str = "YOUR_CLIENT_ID_HERE";
pub const PLACEHOLDER_CLIENT_SECRET: &str = "YOUR_CLIENT_SECRET_HERE";

const SETUP_HELP: &str = "\
reddit api credentials are missing or still set to placeholder values.

1. Go to https://www.reddit.com/prefs/apps
2. Click \"create another app...\" at the bottom and choose \"script\"
3. Set the redirect uri to http://localhost:8080
4. Pass the client id (the string under \"personal use script\") and the secret
   via --client-id/--client-secret or the REDDIT_CLIENT_ID/REDDIT_CLIENT_SECRET
   environment variables";

/// The three opaque strings a script app needs.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl Credentials {
    pub fn from_args(args: &Args) -> Self {
        Self {
            client_id: args.client_id.clone(),
            client_secret: args.client_secret.clone(),
            user_agent: args.user_agent.clone(),
        }
    }

    /// Checked before any network call; unset or placeholder credentials are a
    /// fatal configuration error.
    pub fn validate(&self) -> Result<(), Error> {
        if self.client_id.trim().is_empty()
            || self.client_id == PLACEHOLDER_CLIENT_ID
            || self.client_secret.trim().is_empty()
            || self.client_secret == PLACEHOLDER_CLIENT_SECRET
        {
            return Err(Error::Config(SETUP_HELP.to_string()));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::Config(
                "user agent must not be empty; reddit requires a descriptive User-Agent".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(id: &str, secret: &str, agent: &str) -> Credentials {
        Credentials {
            client_id: id.to_string(),
            client_secret: secret.to_string(),
            user_agent: agent.to_string(),
        }
    }

    #[test]
    fn placeholder_credentials_are_rejected() {
        assert!(creds(PLACEHOLDER_CLIENT_ID, "secret", "ua").validate().is_err());
        assert!(creds("id", PLACEHOLDER_CLIENT_SECRET, "ua").validate().is_err());
    }

    #[test]
    fn empty_credentials_are_rejected() {
        assert!(creds("", "secret", "ua").validate().is_err());
        assert!(creds("id", "", "ua").validate().is_err());
        assert!(creds("id", "secret", "  ").validate().is_err());
    }

    #[test]
    fn real_looking_credentials_pass() {
        assert!(creds("abc123", "s3cr3t", "rust:test:v0.1").validate().is_ok());
    }
}
