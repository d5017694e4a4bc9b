//! The top-artists endpoint: one upstream call per request, reshaped into
//! a short list of [`ArtistSummary`] values.

pub mod model;
pub mod serve;
pub mod spotify;

use model::{Artist, ArtistSummary, ErrorBody, TopArtists};

use crate::error::Result;

pub const CACHE_CONTROL: &str = "public, s-maxage=86400, stale-while-revalidate=43200";

/// Upper bound on the artists served.
pub const TOP_ARTISTS_LIMIT: usize = 5;

/// Anything that can produce the listener's top artists, most played first.
pub trait TopArtistsSource {
    fn top_artists(&self) -> Result<Vec<Artist>>;
}

/// A response before it is bound to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub cache_control: Option<&'static str>,
    pub body: String,
}

impl Reply {
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorBody {
            error: message.to_owned(),
        })
        .unwrap_or_else(|_| String::from(r#"{"error":"internal error"}"#));

        Self {
            status,
            cache_control: None,
            body,
        }
    }
}

pub fn summarize(artists: Vec<Artist>) -> Vec<ArtistSummary> {
    artists
        .into_iter()
        .take(TOP_ARTISTS_LIMIT)
        .map(ArtistSummary::from)
        .collect()
}

/// Fetch, reshape and serialize. Upstream failures become a 502.
pub fn handle(source: &dyn TopArtistsSource) -> Reply {
    log::debug!("Fetching top artists from upstream");
    let artists = match source.top_artists() {
        Ok(artists) => artists,
        Err(err) => {
            log::error!("Failed to fetch top artists: {}", err);
            return Reply::error(502, "upstream unavailable");
        }
    };

    let artists = summarize(artists);
    log::debug!("Serving {} artists", artists.len());

    match serde_json::to_string(&TopArtists { artists }) {
        Ok(body) => Reply {
            status: 200,
            cache_control: Some(CACHE_CONTROL),
            body,
        },
        Err(err) => {
            log::error!("Failed to encode top artists: {}", err);
            Reply::error(500, "internal error")
        }
    }
}
