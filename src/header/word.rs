use crate::dom::DomNode;
use crate::language::Language;

/// Per-language label text of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub en: String,
    pub he: String,
}

impl Labels {
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            en: text.clone(),
            he: text,
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::He => &self.he,
        }
    }
}

/// A navigation word. Plain data: zones are rendered from these records,
/// never by moving markup around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub id: String,
    pub href: String,
    pub labels: Labels,
}

impl Word {
    pub fn new(id: impl Into<String>, href: impl Into<String>, labels: Labels) -> Self {
        Self {
            id: id.into(),
            href: href.into(),
            labels,
        }
    }

    pub fn label(&self, lang: Language) -> &str {
        self.labels.get(lang)
    }

    /// Build a word from its anchor. `id` overrides the anchor's id
    /// attribute (used for the home word, which carries none).
    pub(crate) fn from_anchor(anchor: &DomNode, id: String) -> Self {
        let href = anchor.attr("href").unwrap_or_default().to_string();
        Self {
            id,
            href,
            labels: anchor_labels(anchor),
        }
    }
}

/// Language variants live in child elements tagged `lang-en`/`lang-he`
/// (or carrying a `lang` attribute); plain anchors use their text for both.
fn anchor_labels(anchor: &DomNode) -> Labels {
    let variant = |lang: Language| {
        let class = format!("lang-{}", lang.code());
        anchor
            .find(|n| {
                n.is_element()
                    && (n.has_class(&class) || n.attr("lang").and_then(Language::parse) == Some(lang))
            })
            .map(|n| n.collect_text())
            .filter(|t| !t.is_empty())
    };

    let en = variant(Language::En);
    let he = variant(Language::He);
    if en.is_none() && he.is_none() {
        return Labels::same(anchor.collect_text());
    }
    let en = en.unwrap_or_else(|| anchor.collect_text());
    let he = he.unwrap_or_else(|| en.clone());
    Labels { en, he }
}
