use std::collections::BTreeMap;
use std::fmt;

use http::header::AUTHORIZATION;
use http::{HeaderValue, Request};
use url::Url;

use crate::base_string::signature_base_string;
use crate::encoding::percent_encode;
use crate::parameters::ParameterList;
use crate::{
    ClientConfig, ProtocolError, ProtocolResult, Result, ServiceConfig, Signer, SigningOverrides,
    UserConfig, OAUTH_CALLBACK_KEY, OAUTH_CONSUMER_KEY, OAUTH_NONCE_KEY, OAUTH_SIGNATURE_KEY,
    OAUTH_SIGNATURE_METHOD_KEY, OAUTH_TIMESTAMP_KEY, OAUTH_TOKEN_KEY, OAUTH_VERSION,
    OAUTH_VERSION_KEY,
};

/// Provider endpoints, consumer credentials and signature method.
///
/// Built once and shared by every authorization flow against the provider.
pub struct Service {
    request_url: String,
    authorize_url: String,
    access_url: String,
    client: ClientConfig,
    signer: Box<dyn Signer>,
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("request_url", &self.request_url)
            .field("authorize_url", &self.authorize_url)
            .field("access_url", &self.access_url)
            .field("consumer_key", &self.client.consumer_key)
            .field("signature_method", &self.signer.method_name())
            .finish()
    }
}

impl Service {
    pub fn new<TRequest, TAuthorize, TAccess, TSigner>(
        request_url: TRequest,
        authorize_url: TAuthorize,
        access_url: TAccess,
        client: ClientConfig,
        signer: TSigner,
    ) -> Self
    where
        TRequest: Into<String>,
        TAuthorize: Into<String>,
        TAccess: Into<String>,
        TSigner: Signer + 'static,
    {
        Service {
            request_url: request_url.into(),
            authorize_url: authorize_url.into(),
            access_url: access_url.into(),
            client,
            signer: Box::new(signer),
        }
    }

    pub fn from_config(config: ServiceConfig) -> Self {
        Service {
            request_url: config.request_url,
            authorize_url: config.authorize_url,
            access_url: config.access_url,
            client: config.client,
            signer: config.signature_method.signer(),
        }
    }

    pub fn request_url(&self) -> &str {
        &self.request_url
    }

    pub fn authorize_url(&self) -> &str {
        &self.authorize_url
    }

    pub fn access_url(&self) -> &str {
        &self.access_url
    }

    pub fn client(&self) -> &ClientConfig {
        &self.client
    }

    pub fn signer(&self) -> &dyn Signer {
        self.signer.as_ref()
    }

    /// Sign `request` on behalf of `user` by setting its `Authorization` header.
    ///
    /// `X-OAuth-Nonce` and `X-OAuth-Timestamp` headers, when present, are used
    /// as the nonce and timestamp and removed from the request.
    pub fn sign<B>(&self, request: &mut Request<B>, user: Option<&UserConfig>) -> Result<()>
    where
        B: AsRef<[u8]>,
    {
        self.sign_with_overrides(request, user, SigningOverrides::new())
    }

    /// Same as [`sign`](Self::sign), with an explicit nonce/timestamp override.
    ///
    /// Explicit values win over the override headers; the headers are removed
    /// either way.
    pub fn sign_with_overrides<B>(
        &self,
        request: &mut Request<B>,
        user: Option<&UserConfig>,
        overrides: SigningOverrides,
    ) -> Result<()>
    where
        B: AsRef<[u8]>,
    {
        let token = user.and_then(UserConfig::token);
        let callback = [(OAUTH_CALLBACK_KEY, self.client.callback_url.as_str())];
        self.sign_request(request, token, self.leg_extras(token, &callback), overrides)?;
        Ok(())
    }

    /// Compute the signed OAuth parameters of `request` without modifying it.
    pub fn oauth_params<B>(
        &self,
        request: &Request<B>,
        user: Option<&UserConfig>,
        overrides: &SigningOverrides,
    ) -> Result<OAuthParameters>
    where
        B: AsRef<[u8]>,
    {
        let token = user.and_then(UserConfig::token);
        let callback = [(OAUTH_CALLBACK_KEY, self.client.callback_url.as_str())];
        Ok(self.collect_oauth_params(
            request,
            token,
            self.leg_extras(token, &callback),
            overrides,
        )?)
    }

    /// Without any token the request is the request-token leg, which carries
    /// `oauth_callback` instead of `oauth_token`.
    fn leg_extras<'a>(
        &self,
        token: Option<(&str, &str)>,
        callback: &'a [(&'static str, &'a str)],
    ) -> &'a [(&'static str, &'a str)] {
        match token {
            Some(_) => &[],
            None => callback,
        }
    }

    pub(crate) fn sign_request<B>(
        &self,
        request: &mut Request<B>,
        token: Option<(&str, &str)>,
        protocol_extras: &[(&'static str, &str)],
        overrides: SigningOverrides,
    ) -> ProtocolResult<OAuthParameters>
    where
        B: AsRef<[u8]>,
    {
        let overrides = overrides.or(SigningOverrides::take_from_headers(request.headers_mut()));
        let params = self.collect_oauth_params(request, token, protocol_extras, &overrides)?;
        let header = HeaderValue::from_str(&params.to_header_value()).map_err(http::Error::from)?;
        request.headers_mut().insert(AUTHORIZATION, header);
        Ok(params)
    }

    fn collect_oauth_params<B>(
        &self,
        request: &Request<B>,
        token: Option<(&str, &str)>,
        protocol_extras: &[(&'static str, &str)],
        overrides: &SigningOverrides,
    ) -> ProtocolResult<OAuthParameters>
    where
        B: AsRef<[u8]>,
    {
        let uri = request.uri().to_string();
        let url = Url::parse(&uri).map_err(|e| ProtocolError::InvalidUrl(uri.clone(), e))?;

        let mut oauth = BTreeMap::new();
        oauth.insert(OAUTH_CONSUMER_KEY, self.client.consumer_key.clone());
        oauth.insert(OAUTH_NONCE_KEY, overrides.nonce_or_generate());
        oauth.insert(OAUTH_SIGNATURE_METHOD_KEY, self.signer.method_name().to_string());
        oauth.insert(OAUTH_TIMESTAMP_KEY, overrides.timestamp_or_now());
        oauth.insert(OAUTH_VERSION_KEY, OAUTH_VERSION.to_string());
        if let Some((token, _)) = token {
            oauth.insert(OAUTH_TOKEN_KEY, token.to_string());
        }
        for (key, value) in protocol_extras {
            oauth.insert(*key, value.to_string());
        }

        let mut signing = ParameterList::new();
        signing.extend(oauth.iter().map(|(k, v)| (*k, v.as_str())));
        signing.extend_query(&url);
        signing.extend_form(request.headers(), request.body().as_ref());

        let base_string = signature_base_string(request.method(), &url, &signing);
        tracing::trace!(base_string = %base_string, "computed signature base string");

        let signature = self.signer.sign(
            &base_string,
            &self.client.consumer_secret,
            token.map(|(_, secret)| secret),
        );
        oauth.insert(OAUTH_SIGNATURE_KEY, signature);

        tracing::debug!(
            method = %request.method(),
            url = %crate::base_string::base_url(&url),
            signature_method = self.signer.method_name(),
            with_token = token.is_some(),
            "signed request"
        );

        Ok(OAuthParameters {
            params: oauth,
            base_string,
        })
    }
}

/// The `oauth_*` parameters of one signed request, signature included.
#[derive(Debug, Clone)]
pub struct OAuthParameters {
    params: BTreeMap<&'static str, String>,
    base_string: String,
}

impl OAuthParameters {
    /// Raw (not encoded) value of an `oauth_*` parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn signature(&self) -> &str {
        self.get(OAUTH_SIGNATURE_KEY).unwrap_or_default()
    }

    /// The exact string that was signed.
    pub fn base_string(&self) -> &str {
        &self.base_string
    }

    /// `OAuth k="v", ...` in lexicographic key order with encoded values.
    pub fn to_header_value(&self) -> String {
        let parts = self
            .params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
            .collect::<Vec<_>>();
        format!("OAuth {}", parts.join(", "))
    }
}
