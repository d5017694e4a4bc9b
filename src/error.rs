use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("post directory `{path}` cannot be read")]
    RepositoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no post found for slug `{0}`")]
    PostNotFound(String),

    #[error("malformed front-matter in `{slug}`: {reason}")]
    MalformedFrontMatter { slug: String, reason: String },

    #[error("slug `{0}` is claimed by more than one source file")]
    DuplicateSlug(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("template error")]
    Template(#[from] tera::Error),

    #[error("syntax highlighting failed")]
    Highlight(#[from] syntect::Error),

    #[error("unknown highlight theme `{0}`")]
    UnknownTheme(String),

    #[error("cannot write `{path}`")]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
