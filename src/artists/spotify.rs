use std::{path::Path, time::Duration};

use oauth2::{
    basic::BasicClient, reqwest::http_client, AuthUrl, ClientId, ClientSecret, RefreshToken,
    TokenResponse, TokenUrl,
};

use super::{model::{Artist, TopArtistsResponse}, TopArtistsSource};
use crate::error::{Error, Result};

const ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const API_URL: &str = "https://api.spotify.com/v1";

pub fn auth_url() -> String {
    format!("{ACCOUNTS_URL}/authorize")
}

pub fn token_url() -> String {
    format!("{ACCOUNTS_URL}/api/token")
}

pub fn top_artists_url() -> String {
    format!("{API_URL}/me/top/artists")
}

/// Long-lived credentials; a fresh access token is minted from them per request.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Credentials {
    /// `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` and `SPOTIFY_REFRESH_TOKEN`,
    /// layered over the optional settings file.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SPOTIFY"))
            .build()
            .map_err(|err| Error::Config(err.to_string()))?;
        let get = |key: &str| {
            settings
                .get_string(key)
                .map_err(|err| Error::Config(format!("{key}: {err}")))
        };

        Ok(Self {
            client_id: get("client_id")?,
            client_secret: get("client_secret")?,
            refresh_token: get("refresh_token")?,
        })
    }
}

pub struct SpotifyClient {
    oauth: BasicClient,
    refresh_token: RefreshToken,
    client: reqwest::blocking::Client,
}

impl SpotifyClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let oauth = BasicClient::new(
            ClientId::new(credentials.client_id),
            Some(ClientSecret::new(credentials.client_secret)),
            AuthUrl::new(auth_url()).map_err(|err| Error::Config(err.to_string()))?,
            Some(TokenUrl::new(token_url()).map_err(|err| Error::Config(err.to_string()))?),
        );

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| Error::Config(err.to_string()))?;

        Ok(Self {
            oauth,
            refresh_token: RefreshToken::new(credentials.refresh_token),
            client,
        })
    }

    fn access_token(&self) -> Result<String> {
        let token = self
            .oauth
            .exchange_refresh_token(&self.refresh_token)
            .request(http_client)
            .map_err(|err| Error::UpstreamUnavailable(format!("token refresh failed: {err}")))?;

        Ok(format!("Bearer {}", token.access_token().secret()))
    }
}

impl TopArtistsSource for SpotifyClient {
    fn top_artists(&self) -> Result<Vec<Artist>> {
        let token = self.access_token()?;

        let resp = self
            .client
            .get(top_artists_url())
            .header("authorization", token)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| Error::UpstreamUnavailable(format!("api request failed: {err}")))?;

        let text = resp
            .text()
            .map_err(|err| Error::UpstreamUnavailable(format!("api response error: {err}")))?;
        let parsed: TopArtistsResponse = serde_json::from_str(&text)
            .map_err(|err| Error::UpstreamUnavailable(format!("api response parse error: {err}")))?;

        Ok(parsed.items)
    }
}
