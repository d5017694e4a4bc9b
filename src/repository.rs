use std::{
    ffi::OsStr,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    post::Post,
};

/// Extensions recognised as post sources.
pub const EXTENSIONS: [&str; 2] = ["md", "markdown"];

fn is_source_file(file: &Path) -> bool {
    let Some(filename) = file.file_name().and_then(OsStr::to_str) else {
        return false;
    };

    let is_backup = filename.ends_with('~');
    let is_buffer = filename.ends_with('#') && filename.starts_with('#');
    let is_hidden = filename.starts_with('.');
    let is_markdown = file
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| EXTENSIONS.contains(&ext));

    file.is_file() && !is_buffer && !is_backup && !is_hidden && is_markdown
}

fn slug_of(file: &Path) -> Option<String> {
    file.file_stem()
        .and_then(OsStr::to_str)
        .map(|stem| stem.to_owned())
}

/// Reads posts out of a flat directory of markdown files.
#[derive(Clone, Debug)]
pub struct PostRepository {
    dir: PathBuf,
}

impl PostRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn unavailable(&self, source: std::io::Error) -> Error {
        Error::RepositoryUnavailable {
            path: self.dir.clone(),
            source,
        }
    }

    /// walkdir silently yields nothing when the root is a plain file.
    fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }

        let kind = if self.dir.exists() {
            ErrorKind::InvalidInput
        } else {
            ErrorKind::NotFound
        };
        Err(self.unavailable(std::io::Error::new(kind, "not a directory")))
    }

    /// Every source file keyed by slug, sorted by slug.
    fn source_files(&self) -> Result<Vec<(String, PathBuf)>> {
        self.ensure_dir()?;

        let mut files: Vec<(String, PathBuf)> = vec![];

        for entry in walkdir::WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|err| self.unavailable(err.into()))?;
            let path = entry.into_path();

            if !is_source_file(&path) {
                continue;
            }
            if let Some(slug) = slug_of(&path) {
                files.push((slug, path));
            }
        }

        files.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(pair) = files.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(Error::DuplicateSlug(pair[0].0.clone()));
        }

        Ok(files)
    }

    /// Slugs of every post, in ascending order.
    pub fn list_slugs(&self) -> Result<Vec<String>> {
        Ok(self
            .source_files()?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect())
    }

    fn locate(&self, slug: &str) -> Result<PathBuf> {
        self.ensure_dir()?;

        let is_plain = !slug.is_empty()
            && !slug.starts_with('.')
            && !slug.contains(|ch: char| ch == '/' || ch == '\\');
        if !is_plain {
            return Err(Error::PostNotFound(slug.to_owned()));
        }

        let mut found = EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{slug}.{ext}")))
            .filter(|path| path.is_file());

        match (found.next(), found.next()) {
            (Some(path), None) => Ok(path),
            (Some(_), Some(_)) => Err(Error::DuplicateSlug(slug.to_owned())),
            (None, _) => Err(Error::PostNotFound(slug.to_owned())),
        }
    }

    /// Load a single post. The markdown body is only kept when `include_content` is set.
    pub fn get_post_by_slug(&self, slug: &str, include_content: bool) -> Result<Post> {
        let path = self.locate(slug)?;

        let source = std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::PostNotFound(slug.to_owned()),
            _ => self.unavailable(err),
        })?;

        Post::parse(slug, &source, include_content)
    }

    /// All posts without content, newest first. Equal dates fall back to slug order.
    pub fn get_all_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self
            .source_files()?
            .into_iter()
            .map(|(slug, path)| {
                let source = std::fs::read_to_string(&path).map_err(|err| self.unavailable(err))?;
                Post::parse(&slug, &source, false)
            })
            .collect::<Result<Vec<Post>>>()?;

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        log::debug!("Loaded {} posts from {:?}", posts.len(), self.dir);

        Ok(posts)
    }
}
