/*!
oauth1a: the client side of three-legged OAuth 1.0a.

# Overview

This library signs outgoing HTTP requests with an OAuth 1.0a `Authorization`
header ([RFC 5849](https://tools.ietf.org/html/rfc5849)) and drives the token
exchange that turns consumer credentials into access credentials for a user.

HTTP requests are plain [`http::Request`] values. The token exchange goes
through a [`Transport`], implemented for [`reqwest::Client`]. TLS for that
client comes from the `default-tls` feature (on by default) or `rustls-tls`.

# How to use

## Basic usecase 1 - Acquiring OAuth token & secret

```no_run
use oauth1a::{ClientConfig, HmacSha1Signer, Service, UserConfig};

# async fn run() -> oauth1a::Result<()> {
let service = Service::new(
    "https://api.twitter.com/oauth/request_token",
    "https://api.twitter.com/oauth/authorize",
    "https://api.twitter.com/oauth/access_token",
    ClientConfig::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]", "http://localhost:10000/callback/"),
    HmacSha1Signer,
);
let client = reqwest::Client::new();

// step 1: acquire request token & token secret
let mut user = UserConfig::new();
user.get_request_token(&service, &client).await?;

// step 2: redirect the user, then read the callback
println!("please access to: {}", user.authorize_url(&service)?);
let callback_query = "oauth_token=[TOKEN]&oauth_verifier=[VERIFIER]";
let (token, verifier) = user.parse_callback_query(callback_query)?;

// step 3: acquire access token
user.get_access_token(&token, &verifier, &service, &client).await?;
let (token, secret) = user.access_token().unwrap();
println!("your token and secret is: \n token: {}\n secret: {}", token, secret);
println!("screen name: {:?}", user.access_values().and_then(|v| v.get("screen_name")));
# Ok(())
# }
```

## Basic usecase 2 - signing an API call

```
use oauth1a::{ClientConfig, HmacSha1Signer, Service, UserConfig};

let service = Service::new(
    "https://api.twitter.com/oauth/request_token",
    "https://api.twitter.com/oauth/authorize",
    "https://api.twitter.com/oauth/access_token",
    ClientConfig::new("[CONSUMER_KEY]", "[CONSUMER_SECRET]", "oob"),
    HmacSha1Signer,
);
let user = UserConfig::authorized("[ACCESS_TOKEN]", "[TOKEN_SECRET]");

let mut request = http::Request::get("https://api.twitter.com/1.1/account/verify_credentials.json")
    .body(String::new())
    .unwrap();
service.sign(&mut request, Some(&user)).unwrap();
assert!(request.headers()["authorization"].to_str().unwrap().starts_with("OAuth "));
```
*/
mod base_string;
mod config;
mod encoding;
mod error;
mod overrides;
mod parameters;
mod service;
mod signer;
mod token_reader;
mod transport;
mod user;

// exposed to external program
pub use base_string::{base_url, signature_base_string};
pub use config::{ClientConfig, ServiceConfig};
pub use encoding::{percent_decode, percent_encode};
pub use error::{
    EncodingError, EncodingResult, Error, ProtocolError, ProtocolResult, Result, SecurityError,
    StateError,
};
pub use overrides::{SigningOverrides, NONCE_OVERRIDE_HEADER, TIMESTAMP_OVERRIDE_HEADER};
pub use parameters::ParameterList;
pub use service::{OAuthParameters, Service};
pub use signer::{signing_key, HmacSha1Signer, PlaintextSigner, SignatureMethod, Signer};
pub use token_reader::{AccessValues, TokenResponse};
pub use transport::Transport;
pub use user::{AuthorizationStage, UserConfig};

// exposed constant variables
/// Represents `oauth_callback`.
pub const OAUTH_CALLBACK_KEY: &str = "oauth_callback";
/// Represents `oauth_consumer_key`.
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Represents `oauth_nonce`.
pub const OAUTH_NONCE_KEY: &str = "oauth_nonce";
/// Represents `oauth_signature`.
pub const OAUTH_SIGNATURE_KEY: &str = "oauth_signature";
/// Represents `oauth_signature_method`.
pub const OAUTH_SIGNATURE_METHOD_KEY: &str = "oauth_signature_method";
/// Represents `oauth_timestamp`.
pub const OAUTH_TIMESTAMP_KEY: &str = "oauth_timestamp";
/// Represents `oauth_token`.
pub const OAUTH_TOKEN_KEY: &str = "oauth_token";
/// Represents `oauth_token_secret`.
pub const OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
/// Represents `oauth_verifier`.
pub const OAUTH_VERIFIER_KEY: &str = "oauth_verifier";
/// Represents `oauth_version`.
pub const OAUTH_VERSION_KEY: &str = "oauth_version";

pub(crate) const OAUTH_VERSION: &str = "1.0";
