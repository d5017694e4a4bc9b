use chrono::{NaiveTime, TimeZone, Utc};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder};

use crate::{
    config::{FeedConfig, SiteConfig},
    post::Post,
};

pub const FEED_FILE: &str = "feed.xml";

/// RSS 2.0 document listing `posts` in the order given.
pub fn render(site: &SiteConfig, feed: &FeedConfig, posts: &[Post]) -> String {
    let items = posts
        .iter()
        .map(|post| {
            let url = site.post_url(&post.slug);
            let published = Utc.from_utc_datetime(&post.date.and_time(NaiveTime::default()));

            ItemBuilder::default()
                .title(Some(post.title.clone()))
                .link(Some(url.clone()))
                .description(post.excerpt.clone())
                .guid(Some(GuidBuilder::default().value(url).permalink(true).build()))
                .pub_date(Some(published.to_rfc2822()))
                .build()
        })
        .collect::<Vec<_>>();

    ChannelBuilder::default()
        .title(feed.title.clone().unwrap_or_else(|| site.title.clone()))
        .link(site.site_url.clone())
        .description(
            feed.description
                .clone()
                .or_else(|| site.description.clone())
                .unwrap_or_default(),
        )
        .language(feed.language.clone())
        .items(items)
        .build()
        .to_string()
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use crate::{
        config::{FeedConfig, SiteConfig},
        feed::render,
        post::Post,
    };

    #[test]
    fn channel() {
        let site = SiteConfig::from_yaml("site_url: https://example.com\ntitle: Example\n").unwrap();
        let posts = vec![Post {
            slug: "hello-world".into(),
            title: "Hello".into(),
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            excerpt: Some("First post.".into()),
            content: None,
        }];

        let xml = render(
            &site,
            &FeedConfig {
                language: Some("en-us".into()),
                ..Default::default()
            },
            &posts,
        );

        assert!(xml.contains("<title>Example</title>"));
        assert!(xml.contains("<language>en-us</language>"));
        assert!(xml.contains("<link>https://example.com/hello-world/</link>"));
        assert!(xml.contains("First post."));
        assert!(xml.contains("Jan 2021 00:00:00 +0000</pubDate>"));
    }
}
