use thiserror::Error;

/// E-mail address of the service account.
/// Replace before use, or pass `--service-account`.
pub const SERVICE_ACCOUNT_EMAIL: &str = "[[INSERT_SERVICE_ACCOUNT_EMAIL_HERE]]";

/// Bucket to list.
/// Replace before use, or pass `--bucket`.
pub const BUCKET_NAME: &str = "[[INSERT_YOUR_BUCKET_NAME_HERE]]";

/// Service account key file, downloaded from the cloud console.
/// Expected in the working directory unless `--key-file` says otherwise.
pub const KEY_FILE: &str = "key.json";

/// Google Cloud Storage OAuth 2.0 scope.
pub const STORAGE_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";

/// Google Cloud Storage XML API endpoint.
pub const STORAGE_ENDPOINT: &str = "https://storage.googleapis.com";

const PLACEHOLDER_PREFIX: &str = "[[";

#[derive(Error, Debug)]
pub enum Error {
    #[error("please set your service account e-mail in the SERVICE_ACCOUNT_EMAIL constant, or pass --service-account")]
    ServiceAccountNotSet,

    #[error("please set your bucket name in the BUCKET_NAME constant, or pass --bucket")]
    BucketNotSet,
}

/// Validated runtime configuration.
/// Values come from the constants above unless overridden on the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub service_account: String,
    pub bucket_name: String,
    pub key_file: String,
}

impl Config {
    /// Rejects values still carrying the placeholder markers.
    /// Runs before any file or network access.
    pub fn try_new(
        service_account: String,
        bucket_name: String,
        key_file: String,
    ) -> Result<Self, Error> {
        if service_account.starts_with(PLACEHOLDER_PREFIX) {
            return Err(Error::ServiceAccountNotSet);
        }
        if bucket_name.starts_with(PLACEHOLDER_PREFIX) {
            return Err(Error::BucketNotSet);
        }
        Ok(Self {
            service_account,
            bucket_name,
            key_file,
        })
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    pub fn placeholder_service_account_is_rejected() {
        let err = Config::try_new(
            SERVICE_ACCOUNT_EMAIL.into(),
            "my-bucket".into(),
            KEY_FILE.into(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ServiceAccountNotSet));
    }

    #[test]
    pub fn placeholder_bucket_is_rejected() {
        let err = Config::try_new(
            "sample@project.iam.gserviceaccount.com".into(),
            BUCKET_NAME.into(),
            KEY_FILE.into(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::BucketNotSet));
    }

    #[test]
    pub fn edited_values_pass_validation() {
        let cfg = Config::try_new(
            "sample@project.iam.gserviceaccount.com".into(),
            "my-bucket".into(),
            "key.json".into(),
        )
        .unwrap();
        assert_eq!(cfg.bucket_name, "my-bucket");
    }
}
