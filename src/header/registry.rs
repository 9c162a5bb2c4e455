use std::collections::HashSet;

use crate::config::MarkupConfig;
use crate::dom::DomNode;
use crate::header::word::Word;
use crate::header::HeaderError;

/// Catalog of every navigation word, built once from the initial header
/// markup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct WordRegistry {
    words: Vec<Word>,
    home: Option<Word>,
}

impl WordRegistry {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words, home: None }
    }

    pub fn with_home(mut self, home: Word) -> Self {
        self.home = Some(home);
        self
    }

    /// Scan the header's pile zone, then its pinned zone, in document order,
    /// producing one word per `a[data-id]`. Duplicate ids keep the first
    /// occurrence. The place zone's anchor becomes the home word under
    /// `home_slug`.
    pub fn build(
        document: &DomNode,
        markup: &MarkupConfig,
        home_slug: &str,
    ) -> Result<Self, HeaderError> {
        let header = document
            .find_by_id(&markup.header_id)
            .ok_or_else(|| HeaderError::MissingHeader(markup.header_id.clone()))?;

        let pile = header
            .find_by_class(&markup.pile_class)
            .ok_or_else(|| HeaderError::MissingZone(markup.pile_class.clone()))?;
        let pinned = header
            .find_by_class(&markup.pinned_class)
            .ok_or_else(|| HeaderError::MissingZone(markup.pinned_class.clone()))?;

        let id_attr = markup.word_id_attr.as_str();
        let mut seen = HashSet::new();
        let mut words = Vec::new();
        for zone in [pile, pinned] {
            for anchor in zone.find_all(|n| n.tag == "a" && n.attr(id_attr).is_some()) {
                let id = anchor.attr(id_attr).unwrap_or_default().trim().to_string();
                if id.is_empty() {
                    log::warn!("skipping word link with empty {id_attr}");
                    continue;
                }
                if !seen.insert(id.clone()) {
                    log::warn!("duplicate word id {id:?} in header, keeping the first");
                    continue;
                }
                words.push(Word::from_anchor(anchor, id));
            }
        }

        let home = header
            .find_by_class(&markup.place_class)
            .and_then(|zone| zone.find(|n| n.tag == "a"))
            .map(|a| Word::from_anchor(a, home_slug.to_string()));

        log::debug!(
            "header registry: {} words{}",
            words.len(),
            if home.is_some() { " + home" } else { "" }
        );
        Ok(Self { words, home })
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn home(&self) -> Option<&Word> {
        self.home.as_ref()
    }

    pub fn get(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<String> {
        self.words.iter().map(|w| w.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parser::parse_fragment;
    use crate::language::Language;

    const HEADER: &str = r#"
        <header id="wordplay-header">
          <div class="zone-place"><a href="/">place</a></div>
          <div class="zone-pinned">
            <div class="word-item"><a data-id="about" href="/about/">about</a></div>
          </div>
          <div class="zone-pile">
            <div class="word-item"><a data-id="home" href="/home/">home</a></div>
            <div class="word-item"><a data-id="contact" href="/contact/">contact</a></div>
            <div class="word-item"><a data-id="home" href="/dup/">dup</a></div>
          </div>
        </header>"#;

    fn build(markup: &str) -> Result<WordRegistry, HeaderError> {
        WordRegistry::build(&parse_fragment(markup), &MarkupConfig::default(), "place")
    }

    #[test]
    fn scans_pile_then_pinned_and_drops_duplicates() {
        let registry = build(HEADER).unwrap();
        assert_eq!(registry.ids(), vec!["home", "contact", "about"]);
        assert_eq!(registry.get("home").unwrap().href, "/home/");
    }

    #[test]
    fn place_anchor_becomes_home_word() {
        let registry = build(HEADER).unwrap();
        let home = registry.home().unwrap();
        assert_eq!(home.id, "place");
        assert_eq!(home.href, "/");
        assert_eq!(home.label(Language::En), "place");
        assert!(!registry.contains("place"));
    }

    #[test]
    fn missing_header_is_reported() {
        let err = build("<main>no header here</main>").unwrap_err();
        assert!(matches!(err, HeaderError::MissingHeader(ref id) if id == "wordplay-header"));
    }

    #[test]
    fn missing_zone_is_reported() {
        let err = build(r#"<header id="wordplay-header"><div class="zone-pile"></div></header>"#)
            .unwrap_err();
        assert!(matches!(err, HeaderError::MissingZone(ref class) if class == "zone-pinned"));
    }
}
