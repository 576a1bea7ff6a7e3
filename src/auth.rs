//! Authentication contexts and the OAuth2 code flow.
//!
//! Public read endpoints only need the application client id, sent as the
//! `X-MAL-CLIENT-ID` header. Endpoints that act on the `@me` user need a
//! bearer token obtained through the OAuth2 authorization-code flow with
//! PKCE. Note that the server only supports the `plain` code challenge
//! method, so the challenge equals the verifier.

use crate::requests::query_utils::Query;
use crate::requests::{Error, Result};
use crate::MalClient;

use rand::distr::Alphanumeric;
use rand::Rng as _;
use serde::{Deserialize, Serialize};

pub const OAUTH_AUTHORIZE_URL: &str = "https://myanimelist.net/v1/oauth2/authorize";
pub const OAUTH_TOKEN_URL: &str = "https://myanimelist.net/v1/oauth2/token";

/// How requests against the API identify themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// Application client id, for public read endpoints
    ClientId(String),
    /// OAuth2 access token, for user-scoped endpoints
    Bearer(String),
}

impl Auth {
    pub(crate) fn apply(
        &self,
        req: reqwest_middleware::RequestBuilder,
    ) -> reqwest_middleware::RequestBuilder {
        match self {
            Auth::ClientId(id) => req.header("X-MAL-CLIENT-ID", id),
            Auth::Bearer(token) => req.bearer_auth(token),
        }
    }
}

/// Prepared authorization request for the browser step of the OAuth2 flow.
#[derive(Debug, Clone)]
pub struct OAuthRequest {
    /// Url the user has to visit to authorize the application
    pub url: String,
    /// PKCE code verifier, needed again for [`MalClient::exchange_code`]
    pub code_verifier: String,
    /// Random state echoed back in the redirect, to be checked by the caller
    pub state: String,
}

/// Token set returned by the token endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct TokenResponse {
    pub token_type: String,
    pub expires_in: u64,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize, Debug)]
struct AuthorizeQuery<'a> {
    response_type: &'a str,
    client_id: &'a str,
    code_challenge: &'a str,
    code_challenge_method: &'a str,
    state: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'a str>,
}

impl Query for AuthorizeQuery<'_> {}

#[derive(Serialize, Debug)]
struct ExchangeCodeBody<'a> {
    client_id: &'a str,
    client_secret: Option<&'a str>,
    grant_type: &'a str,
    code: &'a str,
    code_verifier: &'a str,
    redirect_uri: Option<&'a str>,
}

#[derive(Serialize, Debug)]
struct RefreshTokenBody<'a> {
    client_id: &'a str,
    client_secret: Option<&'a str>,
    grant_type: &'a str,
    refresh_token: &'a str,
}

fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

impl MalClient {
    fn client_id(&self) -> Result<&str> {
        match &self.auth {
            Auth::ClientId(id) => Ok(id),
            Auth::Bearer(_) => Err(Error::MissingClientId),
        }
    }

    /// Builds the authorization url the user has to open in a browser,
    /// together with the PKCE verifier and state needed to finish the flow
    #[tracing::instrument(skip(self))]
    pub fn oauth_request(&self, redirect_uri: Option<&str>) -> Result<OAuthRequest> {
        let code_verifier = random_token(128);
        let state = random_token(32);

        let query = AuthorizeQuery {
            response_type: "code",
            client_id: self.client_id()?,
            // `plain` method: the challenge is the verifier itself
            code_challenge: &code_verifier,
            code_challenge_method: "plain",
            state: &state,
            redirect_uri,
        };

        let query_data = serde_qs::to_string(&query)?;

        Ok(OAuthRequest {
            url: format!("{OAUTH_AUTHORIZE_URL}?{query_data}"),
            code_verifier,
            state,
        })
    }

    /// Exchanges the authorization code from the redirect for a token set.
    ///
    /// `code_verifier` and `redirect_uri` must match the values used in the
    /// corresponding [`oauth_request`](MalClient::oauth_request)
    #[tracing::instrument(skip(self, code, code_verifier))]
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
        redirect_uri: Option<&str>,
    ) -> Result<TokenResponse> {
        let body = ExchangeCodeBody {
            client_id: self.client_id()?,
            client_secret: self.client_secret.as_deref(),
            grant_type: "authorization_code",
            code,
            code_verifier,
            redirect_uri,
        };

        self.post_form(&self.token_url, &body).await
    }

    /// Trades a refresh token for a fresh token set
    #[tracing::instrument(skip(self, refresh_token))]
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let body = RefreshTokenBody {
            client_id: self.client_id()?,
            client_secret: self.client_secret.as_deref(),
            grant_type: "refresh_token",
            refresh_token,
        };

        self.post_form(&self.token_url, &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_request_url() {
        let client = MalClient::from_client_id("my_client_id").unwrap();
        let req = client
            .oauth_request(Some("http://localhost:8080/cb"))
            .unwrap();

        assert_eq!(req.code_verifier.len(), 128);
        assert!(req.url.starts_with(OAUTH_AUTHORIZE_URL));
        assert!(req.url.contains("response_type=code"));
        assert!(req.url.contains("client_id=my_client_id"));
        assert!(req.url.contains("code_challenge_method=plain"));
        // plain challenge: verifier appears verbatim in the url
        assert!(req.url.contains(&req.code_verifier));
        assert!(req.url.contains(&req.state));
    }

    #[test]
    fn test_oauth_request_without_redirect_uri() {
        let client = MalClient::from_client_id("id").unwrap();
        let req = client.oauth_request(None).unwrap();

        assert!(!req.url.contains("redirect_uri"));
    }

    #[test]
    fn test_oauth_request_needs_client_id() {
        let client = MalClient::new(Auth::Bearer("tok".to_owned())).unwrap();

        assert!(matches!(
            client.oauth_request(None),
            Err(Error::MissingClientId)
        ));
    }

    #[test]
    fn test_verifiers_are_unique() {
        let client = MalClient::from_client_id("id").unwrap();

        let a = client.oauth_request(None).unwrap();
        let b = client.oauth_request(None).unwrap();

        assert_ne!(a.code_verifier, b.code_verifier);
        assert_ne!(a.state, b.state);
    }
}
