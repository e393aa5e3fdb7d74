use http::header::CONTENT_TYPE;
use http::Request;

use crate::token_reader::read_token_response;
use crate::{
    AccessValues, ProtocolError, ProtocolResult, Result, SecurityError, Service, SigningOverrides,
    StateError, TokenResponse, Transport, OAUTH_CALLBACK_KEY, OAUTH_TOKEN_KEY, OAUTH_VERIFIER_KEY,
};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// How far the three-legged flow of one user has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStage {
    Unauthorized,
    HasRequestToken,
    HasAccessToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenState {
    Unauthorized,
    RequestToken {
        token: String,
        secret: String,
    },
    AccessToken {
        token: String,
        secret: String,
        values: AccessValues,
    },
}

/// Token state of a single end user.
///
/// Moves forward only: `Unauthorized`, then `HasRequestToken`, then
/// `HasAccessToken`. A failed step leaves the state untouched. One flow owns
/// an instance; concurrent callbacks for the same user must be serialized by
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserConfig {
    state: TokenState,
}

impl Default for UserConfig {
    fn default() -> Self {
        UserConfig {
            state: TokenState::Unauthorized,
        }
    }
}

impl UserConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Restore previously obtained access credentials.
    pub fn authorized<TToken, TSecret>(token: TToken, secret: TSecret) -> Self
    where
        TToken: Into<String>,
        TSecret: Into<String>,
    {
        UserConfig {
            state: TokenState::AccessToken {
                token: token.into(),
                secret: secret.into(),
                values: AccessValues::default(),
            },
        }
    }

    pub fn stage(&self) -> AuthorizationStage {
        match self.state {
            TokenState::Unauthorized => AuthorizationStage::Unauthorized,
            TokenState::RequestToken { .. } => AuthorizationStage::HasRequestToken,
            TokenState::AccessToken { .. } => AuthorizationStage::HasAccessToken,
        }
    }

    /// Token and secret to sign with: the access pair once authorized,
    /// the request pair while authorization is pending.
    pub fn token(&self) -> Option<(&str, &str)> {
        match &self.state {
            TokenState::Unauthorized => None,
            TokenState::RequestToken { token, secret }
            | TokenState::AccessToken { token, secret, .. } => Some((token, secret)),
        }
    }

    pub fn request_token(&self) -> Option<&str> {
        match &self.state {
            TokenState::RequestToken { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn access_token(&self) -> Option<(&str, &str)> {
        match &self.state {
            TokenState::AccessToken { token, secret, .. } => Some((token, secret)),
            _ => None,
        }
    }

    /// Extra fields of the access-token response, such as `screen_name`.
    pub fn access_values(&self) -> Option<&AccessValues> {
        match &self.state {
            TokenState::AccessToken { values, .. } => Some(values),
            _ => None,
        }
    }

    /// Step 1: obtain a request token, sending `oauth_callback`.
    pub async fn get_request_token<T>(&mut self, service: &Service, transport: &T) -> Result<()>
    where
        T: Transport,
    {
        match self.state {
            TokenState::Unauthorized => {}
            TokenState::RequestToken { .. } => return Err(StateError::RequestTokenPending.into()),
            TokenState::AccessToken { .. } => return Err(StateError::AlreadyAuthorized.into()),
        }

        let callback = service.client().callback_url.as_str();
        let response = exchange(
            service,
            transport,
            service.request_url(),
            None,
            &[(OAUTH_CALLBACK_KEY, callback)],
        )
        .await?;

        tracing::debug!("obtained request token");
        self.state = TokenState::RequestToken {
            token: response.oauth_token,
            secret: response.oauth_token_secret,
        };
        Ok(())
    }

    /// Step 2: where to send the user to grant access.
    pub fn authorize_url(&self, service: &Service) -> Result<String> {
        match &self.state {
            TokenState::RequestToken { token, .. } => Ok(format!(
                "{}?{}={}",
                service.authorize_url(),
                OAUTH_TOKEN_KEY,
                token
            )),
            TokenState::Unauthorized => Err(StateError::NoRequestToken.into()),
            TokenState::AccessToken { .. } => Err(StateError::AlreadyAuthorized.into()),
        }
    }

    /// Extract `(oauth_token, oauth_verifier)` from the provider's redirect.
    pub fn parse_authorize<B>(&self, request: &Request<B>) -> Result<(String, String)> {
        self.parse_callback_query(request.uri().query().unwrap_or_default())
    }

    /// Same as [`parse_authorize`](Self::parse_authorize), from a raw query string.
    ///
    /// The returned token must be the pending request token, otherwise the
    /// callback is treated as forged or stale.
    pub fn parse_callback_query(&self, query: &str) -> Result<(String, String)> {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query).map_err(ProtocolError::from)?;
        let token = required(&pairs, OAUTH_TOKEN_KEY)?;
        let verifier = required(&pairs, OAUTH_VERIFIER_KEY)?;
        self.check_pending_token(&token)?;
        Ok((token, verifier))
    }

    /// Step 3: exchange the verifier for access credentials.
    ///
    /// Extra response fields are kept in [`access_values`](Self::access_values).
    pub async fn get_access_token<T>(
        &mut self,
        token: &str,
        verifier: &str,
        service: &Service,
        transport: &T,
    ) -> Result<()>
    where
        T: Transport,
    {
        self.check_pending_token(token)?;
        let response = exchange(
            service,
            transport,
            service.access_url(),
            self.token(),
            &[(OAUTH_VERIFIER_KEY, verifier)],
        )
        .await?;

        tracing::debug!(
            extra_fields = response.remain.len(),
            "obtained access token"
        );
        self.state = TokenState::AccessToken {
            token: response.oauth_token,
            secret: response.oauth_token_secret,
            values: response.remain,
        };
        Ok(())
    }

    fn check_pending_token(&self, returned: &str) -> Result<()> {
        match &self.state {
            TokenState::RequestToken { token, .. } if token == returned => Ok(()),
            TokenState::RequestToken { .. } => {
                tracing::warn!(returned, "callback token does not match the request token");
                Err(SecurityError::TokenMismatch {
                    returned: returned.to_string(),
                }
                .into())
            }
            TokenState::Unauthorized => Err(StateError::NoRequestToken.into()),
            TokenState::AccessToken { .. } => Err(StateError::AlreadyAuthorized.into()),
        }
    }
}

fn required(pairs: &[(String, String)], key: &'static str) -> ProtocolResult<String> {
    pairs
        .iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.clone())
        .ok_or(ProtocolError::MissingCallbackParameter(key))
}

/// Signed POST to a token endpoint, returning the parsed credentials.
async fn exchange<T>(
    service: &Service,
    transport: &T,
    url: &str,
    token: Option<(&str, &str)>,
    protocol_extras: &[(&'static str, &str)],
) -> ProtocolResult<TokenResponse>
where
    T: Transport,
{
    let mut request = Request::post(url)
        .header(CONTENT_TYPE, FORM_URLENCODED)
        .body(String::new())?;
    service.sign_request(&mut request, token, protocol_extras, SigningOverrides::new())?;

    tracing::debug!(url, "requesting token");
    let response = transport
        .execute(request)
        .await
        .map_err(ProtocolError::transport)?;
    read_token_response(response)
}
