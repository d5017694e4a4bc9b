// SPDX-FileCopyrightText: 2024 Ohin "Kazani" Taylor <kazani@kazani.dev>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

lazy_static! {
    static ref FRONT_MATTER_REGEX: Regex =
        Regex::new(r"(?s)\A\s*---[ \t]*\r?\n(?<meta>.*?)\r?\n---[ \t]*(?:\r?\n|\z)(?<body>.*)\z")
            .unwrap();
}

/// One published article.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: Option<String>,

    /// Raw markdown body. `None` when the post was loaded for a listing.
    pub content: Option<String>,
}

#[derive(Deserialize, Default)]
struct FrontMatter {
    title: Option<String>,
    date: Option<String>,
    excerpt: Option<String>,
}

impl Post {
    /// Parse a source file: a `---` delimited YAML block followed by markdown.
    pub fn parse(slug: &str, source: &str, include_content: bool) -> Result<Self> {
        let malformed = |reason: String| Error::MalformedFrontMatter {
            slug: slug.to_owned(),
            reason,
        };

        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let caps = FRONT_MATTER_REGEX
            .captures(source)
            .ok_or_else(|| malformed("no `---` delimited block at the start of the file".into()))?;

        let meta = caps.name("meta").map_or("", |m| m.as_str());
        let front_matter: FrontMatter = if meta.trim().is_empty() {
            FrontMatter::default()
        } else {
            serde_yaml::from_str(meta).map_err(|err| malformed(err.to_string()))?
        };

        let title = front_matter
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| malformed("missing `title`".into()))?;
        let date = front_matter
            .date
            .ok_or_else(|| malformed("missing `date`".into()))?;
        let date = parse_date(&date).ok_or_else(|| malformed(format!("invalid `date` {date:?}")))?;

        Ok(Self {
            slug: slug.to_owned(),
            title,
            date,
            excerpt: front_matter.excerpt,
            content: include_content.then(|| caps["body"].to_owned()),
        })
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Accepts `2021-01-01`, a local `2021-01-01 10:00:00` style timestamp, or
/// RFC 3339, keeping only the date.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use crate::{error::Error, post::Post};

    #[test]
    fn parse_with_content() {
        let post = Post::parse(
            "hello-world",
            "---\ntitle: \"Hello\"\ndate: 2021-01-01\n---\n# Hi",
            true,
        )
        .unwrap();

        assert_eq!(
            post,
            Post {
                slug: "hello-world".into(),
                title: "Hello".into(),
                date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
                excerpt: None,
                content: Some("# Hi".into()),
            }
        );
    }

    #[test]
    fn parse_without_content() {
        let post = Post::parse(
            "notes",
            "---\ntitle: Notes\ndate: '2020-06-15T08:30:00Z'\nexcerpt: Short.\n---\n\nBody\n",
            false,
        )
        .unwrap();

        assert_eq!(post.date, NaiveDate::from_ymd_opt(2020, 6, 15).unwrap());
        assert_eq!(post.excerpt.as_deref(), Some("Short."));
        assert_eq!(post.content, None);
    }

    #[test]
    fn body_keeps_markdown_verbatim() {
        let post = Post::parse(
            "code",
            "---\ntitle: Code\ndate: 2022-02-02\n---\n\n```rust\nfn main() {}\n```\n",
            true,
        )
        .unwrap();

        assert_eq!(post.content.as_deref(), Some("\n```rust\nfn main() {}\n```\n"));
    }

    #[test]
    fn timestamp_dates() {
        for date in [
            "2021-01-01 10:00:00",
            "2021-01-01T10:00:00",
            "2021-01-01 10:00",
            "2021-01-01T10:00:00+02:00",
        ] {
            let source = format!("---\ntitle: Stamped\ndate: {date}\n---\n");
            let post = Post::parse("stamped", &source, false).unwrap();
            assert_eq!(post.date, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(), "{date}");
        }
    }

    #[test]
    fn leading_byte_order_mark() {
        let post = Post::parse(
            "bom",
            "\u{feff}---\ntitle: Bom\ndate: 2021-01-01\n---\nBody",
            true,
        )
        .unwrap();

        assert_eq!(post.title, "Bom");
        assert_eq!(post.content.as_deref(), Some("Body"));
    }

    #[test]
    fn missing_block() {
        assert!(matches!(
            Post::parse("plain", "# Just markdown", true),
            Err(Error::MalformedFrontMatter { .. })
        ));
    }

    #[test]
    fn missing_fields() {
        match Post::parse("untitled", "---\ndate: 2021-01-01\n---\nbody", true) {
            Err(Error::MalformedFrontMatter { slug, reason }) => {
                assert_eq!(slug, "untitled");
                assert_eq!(reason, "missing `title`");
            }
            other => panic!("unexpected {other:?}"),
        }

        match Post::parse("undated", "---\ntitle: Undated\n---\nbody", true) {
            Err(Error::MalformedFrontMatter { reason, .. }) => {
                assert_eq!(reason, "missing `date`")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_date() {
        assert!(matches!(
            Post::parse("bad", "---\ntitle: Bad\ndate: yesterday\n---\n", true),
            Err(Error::MalformedFrontMatter { .. })
        ));
    }

    #[test]
    fn invalid_yaml() {
        assert!(matches!(
            Post::parse("broken", "---\ntitle: [unclosed\ndate: 2021-01-01\n---\n", true),
            Err(Error::MalformedFrontMatter { .. })
        ));
    }
}
