use lazy_static::lazy_static;
use syntect::{
    highlighting::{Theme, ThemeSet},
    html::highlighted_html_for_string,
    parsing::SyntaxSet,
};

use super::{plain_code_block, CodeRenderer};
use crate::error::{Error, Result};

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
    static ref THEME_SET: ThemeSet = ThemeSet::load_defaults();
}

/// Highlights code blocks with syntect, keyed on the fence language.
#[derive(Clone, Debug)]
pub struct Highlighter {
    theme: Theme,
}

impl Highlighter {
    pub fn new(theme: &str) -> Result<Self> {
        match THEME_SET.themes.get(theme) {
            Some(found) => Ok(Self {
                theme: found.clone(),
            }),
            None => {
                log::error!(
                    "Theme `{}` not found. Available: {}",
                    theme,
                    Self::themes().collect::<Vec<_>>().join(", ")
                );
                Err(Error::UnknownTheme(theme.to_owned()))
            }
        }
    }

    pub fn themes() -> impl Iterator<Item = &'static str> {
        THEME_SET.themes.keys().map(|name| name.as_str())
    }
}

impl CodeRenderer for Highlighter {
    fn render_code(&self, language: Option<&str>, source: &str) -> Result<String> {
        match language.and_then(|language| SYNTAX_SET.find_syntax_by_token(language)) {
            Some(syntax) => Ok(highlighted_html_for_string(
                source,
                &SYNTAX_SET,
                syntax,
                &self.theme,
            )?),
            None => Ok(plain_code_block(language, source)),
        }
    }
}
