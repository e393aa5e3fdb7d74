use std::convert::TryFrom;

use async_trait::async_trait;
use http::{Request, Response};

/// Executes the HTTP exchanges of the token flow.
///
/// Timeouts, redirects and connection reuse are up to the implementation;
/// failures are reported as they are and never retried by this crate, since a
/// signed request must not be replayed with the same nonce.
#[async_trait(?Send)]
pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn execute(&self, request: Request<String>) -> Result<Response<String>, Self::Error>;
}

#[async_trait(?Send)]
impl Transport for reqwest::Client {
    type Error = reqwest::Error;

    async fn execute(&self, request: Request<String>) -> Result<Response<String>, Self::Error> {
        let request = reqwest::Request::try_from(request)?;
        let response = reqwest::Client::execute(self, request).await?;

        let mut builder = Response::builder()
            .status(response.status())
            .version(response.version());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(
                response
                    .headers()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
        }
        let body = response.text().await?;
        // status and headers come from a valid response, so the builder holds no error
        Ok(builder.body(body).unwrap_or_default())
    }
}
