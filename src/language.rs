//! Site language (English / Hebrew) and its persisted preference.

use std::fmt;

use crate::dom::DomNode;
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    He,
}

/// Text direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::He => "he",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Language::En),
            "he" | "he-il" | "iw" => Some(Language::He),
            _ => None,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::He,
            Language::He => Language::En,
        }
    }

    pub fn dir(self) -> Direction {
        match self {
            Language::En => Direction::Ltr,
            Language::He => Direction::Rtl,
        }
    }

    /// Root class the site styles key off (`lang--en` / `lang--he`).
    pub fn root_class(self) -> &'static str {
        match self {
            Language::En => "lang--en",
            Language::He => "lang--he",
        }
    }

    /// Horizontal slide sign for content fades: English pages leave to the
    /// right, Hebrew pages to the left.
    pub fn slide_sign(self) -> f32 {
        match self {
            Language::En => 1.0,
            Language::He => -1.0,
        }
    }

    /// Resolve the starting language: the page root's class or `lang`
    /// attribute wins, then the stored preference, then English.
    pub fn detect(html_root: Option<&DomNode>, store: &dyn KeyValueStore, key: &str) -> Self {
        if let Some(root) = html_root {
            if root.has_class(Language::He.root_class()) {
                return Language::He;
            }
            if let Some(lang) = root.attr("lang").and_then(Language::parse) {
                if lang == Language::He {
                    return lang;
                }
            }
        }
        match store.get(key) {
            Ok(Some(code)) => Language::parse(&code).unwrap_or_default(),
            Ok(None) => Language::default(),
            Err(e) => {
                log::warn!("could not read language preference: {e}");
                Language::default()
            }
        }
    }

    pub fn save(self, store: &mut dyn KeyValueStore, key: &str) {
        if let Err(e) = store.set(key, self.code()) {
            log::warn!("could not save language preference: {e}");
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
