use serde::{Deserialize, Serialize};

// UsersTopArtistsResponse is documented at https://developer.spotify.com/documentation/web-api/reference/get-users-top-artists-and-tracks
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TopArtistsResponse {
    pub items: Vec<Artist>,
}

// Artist is documented at https://developer.spotify.com/documentation/web-api/reference/get-an-artist
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub genres: Vec<String>,
}

// Image is documented at https://developer.spotify.com/documentation/web-api/reference/get-an-artist
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

// ArtistSummary is the shape served to the site.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    pub id: String,
    pub title: String,
    pub artist_url: String,
    pub art: Option<Image>,
    pub genre: Option<String>,
}

impl From<Artist> for ArtistSummary {
    fn from(artist: Artist) -> Self {
        let Artist {
            id,
            name,
            uri,
            mut images,
            genres,
        } = artist;

        Self {
            id,
            title: name,
            artist_url: uri,
            art: images.pop(),
            genre: genres.into_iter().next(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TopArtists {
    pub artists: Vec<ArtistSummary>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}
