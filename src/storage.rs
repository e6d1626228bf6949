use log::debug;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reqwest: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("storage service returned {0}: {1}")]
    Status(u16, String),
}

/// Fetch the XML object listing for a bucket.
/// One GET, authorized with a bearer token, no retries.
pub async fn list_bucket(endpoint: &str, bucket: &str, token: &str) -> Result<String, Error> {
    debug!("GET {endpoint}/{bucket}");
    let client = reqwest::Client::builder().build()?;

    let resp = client
        .get(format!("{endpoint}/{bucket}"))
        .bearer_auth(token)
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(Error::Status(status.as_u16(), body));
    }
    Ok(body)
}

#[cfg(test)]
mod test {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    const LISTING: &str =
        "<ListBucketResult><Name>my-bucket</Name><Contents><Key>a.txt</Key></Contents></ListBucketResult>";

    #[tokio::test]
    async fn listing_is_returned_as_text() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/my-bucket"),
                request::headers(contains(("authorization", "Bearer some-token"))),
            ])
            .respond_with(status_code(200).body(LISTING)),
        );

        let endpoint = server.url_str("");
        let body = list_bucket(endpoint.trim_end_matches('/'), "my-bucket", "some-token")
            .await
            .unwrap();
        assert_eq!(body, LISTING);
    }

    #[tokio::test]
    async fn error_status_carries_code_and_body() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/my-bucket"))
                .respond_with(status_code(403).body("<Error><Code>AccessDenied</Code></Error>")),
        );

        let endpoint = server.url_str("");
        let err = list_bucket(endpoint.trim_end_matches('/'), "my-bucket", "some-token")
            .await
            .unwrap_err();
        match err {
            Error::Status(code, body) => {
                assert_eq!(code, 403);
                assert!(body.contains("AccessDenied"));
            }
            other => panic!("expected status error, got {other}"),
        }
    }

    #[tokio::test]
    async fn transport_error_is_a_plain_message() {
        let server = Server::run();
        let endpoint = server.url_str("").trim_end_matches('/').to_string();
        drop(server);

        let err = list_bucket(&endpoint, "my-bucket", "some-token")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Reqwest(_)));
        assert!(!err.to_string().is_empty());
    }
}
