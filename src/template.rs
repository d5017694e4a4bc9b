// SPDX-FileCopyrightText: 2024 Ohin "Kazani" Taylor <kazani@kazani.dev>
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};

use crate::{config::SiteConfig, error::Result, post::Post};

const BUILTIN: [(&str, &str); 3] = [
    ("base.html", include_str!("templates/base.html")),
    ("index.html", include_str!("templates/index.html")),
    ("post.html", include_str!("templates/post.html")),
];

/// A post as it appears in a listing.
#[derive(Serialize)]
struct Listed<'a> {
    #[serde(flatten)]
    post: &'a Post,
    url: String,
}

#[derive(Clone, Debug)]
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Only the templates embedded in the binary.
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(BUILTIN.to_vec())?;

        Ok(Self { tera })
    }

    /// Templates from `dir`, with the embedded ones filling in whatever `dir` lacks.
    pub fn new(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            log::debug!("No template directory at {:?}, using built-in templates", dir);
            return Self::builtin();
        }

        let mut pb = dir.to_owned();
        pb.push("**");
        pb.push("*.html");

        let mut tera = Tera::parse(&pb.to_string_lossy())?;
        for name in tera.get_template_names() {
            log::info!("Using template override {}", name);
        }

        // `extend` never replaces templates that are already present.
        tera.extend(&Self::builtin()?.tera)?;

        Ok(Self { tera })
    }

    /// Render the home page from the posts it should list.
    pub fn render_home(&self, site: &SiteConfig, posts: &[Post]) -> Result<String> {
        let listed: Vec<Listed> = posts
            .iter()
            .map(|post| Listed {
                post,
                url: site.post_url(&post.slug),
            })
            .collect();

        let mut context: Context = Context::new();
        context.insert("site", site);
        context.insert("posts", &listed);

        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render a post page around already-rendered HTML content.
    pub fn render_post(&self, site: &SiteConfig, post: &Post, contents: &str) -> Result<String> {
        let mut context: Context = Context::new();
        context.insert("site", site);
        context.insert("post", post);
        context.insert("content", contents);

        Ok(self.tera.render("post.html", &context)?)
    }
}
