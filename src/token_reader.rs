use http::Response;

use crate::{ProtocolError, ProtocolResult, OAUTH_TOKEN_KEY, OAUTH_TOKEN_SECRET_KEY};

/// Represents response of token acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    /// OAuth Token
    pub oauth_token: String,
    /// OAuth Token Secret
    pub oauth_token_secret: String,
    /// Other contents
    pub remain: AccessValues,
}

/// Additional fields returned by the provider, in response order.
///
/// A key may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessValues(Vec<(String, String)>);

impl AccessValues {
    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<(String, String)>> for AccessValues {
    fn from(pairs: Vec<(String, String)>) -> Self {
        AccessValues(pairs)
    }
}

/// Check the provider status and parse the form-encoded token body.
pub(crate) fn read_token_response(response: Response<String>) -> ProtocolResult<TokenResponse> {
    let (parts, body) = response.into_parts();
    if !parts.status.is_success() {
        tracing::warn!(status = %parts.status, "token endpoint rejected the request");
        return Err(ProtocolError::Status {
            status: parts.status,
            body,
        });
    }
    read_oauth_token(body)
}

fn read_oauth_token(text: String) -> ProtocolResult<TokenResponse> {
    let mut destructured: Vec<(String, String)> = serde_urlencoded::from_str(&text)?;
    let oauth_token = take_first(&mut destructured, OAUTH_TOKEN_KEY);
    let oauth_token_secret = take_first(&mut destructured, OAUTH_TOKEN_SECRET_KEY);
    match (oauth_token, oauth_token_secret) {
        (Some(t), Some(s)) => Ok(TokenResponse {
            oauth_token: t,
            oauth_token_secret: s,
            remain: destructured.into(),
        }),
        (None, _) => Err(ProtocolError::TokenKeyNotFound(OAUTH_TOKEN_KEY, text)),
        (_, _) => Err(ProtocolError::TokenKeyNotFound(
            OAUTH_TOKEN_SECRET_KEY,
            text,
        )),
    }
}

fn take_first(pairs: &mut Vec<(String, String)>, key: &str) -> Option<String> {
    let index = pairs.iter().position(|(k, _)| k == key)?;
    Some(pairs.remove(index).1)
}

#[cfg(test)]
mod test {
    use http::StatusCode;

    use super::*;

    #[test]
    fn parse_response_typical() {
        let resp_str_sample = "oauth_token=Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik&oauth_token_secret=Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM&oauth_callback_confirmed=true";
        let parsed = read_oauth_token(resp_str_sample.to_string()).unwrap();
        assert_eq!(
            parsed.oauth_token,
            "Z6eEdO8MOmk394WozF5oKyuAv855l4Mlqo7hhlSLik"
        );
        assert_eq!(
            parsed.oauth_token_secret,
            "Kd75W4OQfb2oJTV0vzGzeXftVAwgMnEK9MumzYcM"
        );
        assert_eq!(parsed.remain.len(), 1);
        assert_eq!(parsed.remain.get("oauth_callback_confirmed"), Some("true"));
    }

    #[test]
    fn parse_response_edge() {
        let resp_str_sample = "oauth_token==&oauth_token_secret=&keyonly=&keyonly2&=&&";
        let parsed = read_oauth_token(resp_str_sample.to_string()).unwrap();
        assert_eq!(parsed.oauth_token, "=");
        assert_eq!(parsed.oauth_token_secret, "");
        assert_eq!(parsed.remain.len(), 3);
        assert_eq!(parsed.remain.get("keyonly"), Some(""));
        assert_eq!(parsed.remain.get("keyonly2"), Some(""));
        assert_eq!(parsed.remain.get(""), Some(""));
    }

    #[test]
    fn parse_decodes_values_and_keeps_order() {
        let resp_str_sample =
            "user_id=6253282&oauth_token=a%2Bb&oauth_token_secret=c+d&screen_name=twitterapi&user_id=2";
        let parsed = read_oauth_token(resp_str_sample.to_string()).unwrap();
        assert_eq!(parsed.oauth_token, "a+b");
        assert_eq!(parsed.oauth_token_secret, "c d");
        let keys: Vec<&str> = parsed.remain.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["user_id", "screen_name", "user_id"]);
        assert_eq!(parsed.remain.get("user_id"), Some("6253282"));
        assert_eq!(
            parsed.remain.get_all("user_id").collect::<Vec<_>>(),
            vec!["6253282", "2"]
        );
    }

    #[test]
    fn parse_minimal() {
        let resp_str_sample = "oauth_token&oauth_token_secret";
        let parsed = read_oauth_token(resp_str_sample.to_string()).unwrap();
        assert_eq!(parsed.oauth_token, "");
        assert_eq!(parsed.oauth_token_secret, "");
        assert!(parsed.remain.is_empty());
    }

    #[test]
    fn parse_token_notfound() {
        let resp_str_sample = "oauth_token_secret=";
        let parsed = read_oauth_token(resp_str_sample.to_string());
        if let Err(ProtocolError::TokenKeyNotFound(key, resp_str)) = parsed {
            assert_eq!(key, OAUTH_TOKEN_KEY);
            assert_eq!(resp_str, resp_str_sample)
        } else {
            panic!("unexpected result: {:?}", parsed)
        }
    }

    #[test]
    fn parse_token_secret_notfound() {
        let resp_str_sample = "oauth_token=";
        let parsed = read_oauth_token(resp_str_sample.to_string());
        if let Err(ProtocolError::TokenKeyNotFound(key, resp_str)) = parsed {
            assert_eq!(key, OAUTH_TOKEN_SECRET_KEY);
            assert_eq!(resp_str, resp_str_sample)
        } else {
            panic!("unexpected result: {:?}", parsed)
        }
    }

    #[test]
    fn non_success_status_rejected() {
        let response = Response::builder()
            .status(StatusCode::UNAUTHORIZED)
            .body("Failed to validate oauth signature and token".to_string())
            .unwrap();
        match read_token_response(response) {
            Err(ProtocolError::Status { status, body }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert!(body.starts_with("Failed"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
