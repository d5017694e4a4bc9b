use rayon::prelude::*;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    config::SiteConfig,
    error::{Error, Result},
    feed,
    markdown::{self, Highlighter},
    post::Post,
    repository::PostRepository,
    template::Templates,
};

/// A rendered file, relative to the output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub path: PathBuf,
    pub contents: String,
}

fn writeable(path: &Path) -> std::io::Result<std::fs::File> {
    use std::fs::{create_dir_all, File};

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    File::create(path)
}

pub struct PageGenerator {
    site: SiteConfig,
    repository: PostRepository,
    templates: Templates,
    highlighter: Highlighter,
}

impl PageGenerator {
    pub fn new(
        site: SiteConfig,
        repository: PostRepository,
        templates: Templates,
        highlighter: Highlighter,
    ) -> Self {
        Self {
            site,
            repository,
            templates,
            highlighter,
        }
    }

    /// Wire up a generator for a source directory holding `site.yaml`.
    pub fn from_source(source_dir: &Path) -> Result<Self> {
        let site = SiteConfig::load(source_dir)?;
        let repository = PostRepository::new(source_dir.join(&site.posts_dir));
        let templates = Templates::new(&source_dir.join(&site.templates_dir))?;
        let highlighter = Highlighter::new(&site.highlight_theme)?;

        Ok(Self::new(site, repository, templates, highlighter))
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// The newest posts, as many as the home page lists.
    pub fn recent_posts(&self) -> Result<Vec<Post>> {
        let mut posts = self.repository.get_all_posts()?;
        posts.truncate(self.site.recent_posts);

        Ok(posts)
    }

    pub fn render_home(&self) -> Result<Page> {
        let posts = self.recent_posts()?;
        log::info!("Rendering home page with {} recent posts", posts.len());

        Ok(Page {
            path: PathBuf::from("index.html"),
            contents: self.templates.render_home(&self.site, &posts)?,
        })
    }

    pub fn render_post(&self, slug: &str) -> Result<Page> {
        let post = self.repository.get_post_by_slug(slug, true)?;
        log::info!("Rendering post `{}`", post.slug);

        let html = markdown::render(post.content.as_deref().unwrap_or_default(), &self.highlighter)?;

        Ok(Page {
            path: PathBuf::from_iter([slug, "index.html"]),
            contents: self.templates.render_post(&self.site, &post, &html)?,
        })
    }

    pub fn render_feed(&self) -> Result<Option<Page>> {
        let Some(feed) = &self.site.feed else {
            return Ok(None);
        };

        let posts = self.repository.get_all_posts()?;
        Ok(Some(Page {
            path: PathBuf::from(feed::FEED_FILE),
            contents: feed::render(&self.site, feed, &posts),
        }))
    }

    /// Every page of the site. Any failing slug fails the whole set.
    pub fn render_site(&self) -> Result<Vec<Page>> {
        let slugs = self.repository.list_slugs()?;

        let mut pages = vec![self.render_home()?];
        pages.extend(
            slugs
                .par_iter()
                .map(|slug| self.render_post(slug))
                .collect::<Result<Vec<Page>>>()?,
        );
        pages.extend(self.render_feed()?);

        Ok(pages)
    }

    /// Render everything, then write it under `dest`. Nothing is written if rendering fails.
    pub fn generate(&self, dest: &Path) -> Result<Vec<Page>> {
        let pages = self.render_site()?;

        for page in &pages {
            let path = dest.join(&page.path);
            writeable(&path)
                .and_then(|mut file| file.write_all(page.contents.as_bytes()))
                .map_err(|source| Error::Output { path, source })?;
        }

        Ok(pages)
    }
}
