use log::{debug, warn};
use thiserror::Error;

use crate::config::{Config, STORAGE_SCOPE};

/// The key file shipped with the sample starts with this word.
/// Keys downloaded from the cloud console never do.
const KEY_FILE_SENTINEL: &str = "Please";

#[derive(Error, Debug)]
pub enum Error {
    #[error("read {path}: {err}")]
    ReadKeyFile { err: std::io::Error, path: String },

    #[error("{0}")]
    KeyFileNotReplaced(String),

    #[error("auth error: {0}")]
    AuthError(#[from] google_cloud_auth::error::Error),

    #[error("auth token error: {0}")]
    AuthTokenError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Exchange the service account key for an oauth2 bearer token
/// scoped to storage read/write.
pub async fn token(cfg: &Config) -> Result<String, Error> {
    use google_cloud_auth::credentials::CredentialsFile;
    use google_cloud_auth::{project::Config as AuthConfig, token::DefaultTokenSourceProvider};
    use google_cloud_token::TokenSourceProvider as _;

    let key = read_key_file(&cfg.key_file)?;

    debug!("Exchanging service account key for an oauth2 token");
    let credentials = CredentialsFile::new_from_str(&key)
        .await
        .map_err(Error::AuthError)?;
    if let Some(client_email) = &credentials.client_email {
        if client_email != &cfg.service_account {
            warn!(
                "Key file belongs to {client_email}, expected {}",
                cfg.service_account
            );
        }
    }

    let scopes = [STORAGE_SCOPE];
    let auth_config = AuthConfig::default().with_scopes(&scopes);
    let tsp = DefaultTokenSourceProvider::new_with_credentials(auth_config, Box::new(credentials))
        .await
        .map_err(Error::AuthError)?;
    let ts = tsp.token_source();
    let token = ts.token().await.map_err(Error::AuthTokenError)?;
    Ok(token.strip_prefix("Bearer ").unwrap_or(&token).to_string())
}

/// Read the key file, rejecting the placeholder file shipped with the sample.
/// The sentinel line itself becomes the error message.
fn read_key_file(path: &str) -> Result<String, Error> {
    let content = std::fs::read_to_string(path).map_err(|err| Error::ReadKeyFile {
        err,
        path: path.to_string(),
    })?;
    match content.lines().next() {
        Some(first) if first.starts_with(KEY_FILE_SENTINEL) => {
            Err(Error::KeyFileNotReplaced(first.to_string()))
        }
        _ => Ok(content),
    }
}
