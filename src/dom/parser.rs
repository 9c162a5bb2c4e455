use std::collections::HashMap;

use scraper::{ElementRef, Html, Node, Selector};

use crate::dom::{DomNode, DomTree};

/// Elements kept as empty shells: nothing inside them is page text.
const OPAQUE: &[&str] = &["script", "style", "noscript", "svg", "template", "iframe"];

/// Parse a full page into an owned tree rooted at `<html>`.
pub fn parse_html(html: &str, url: &str) -> DomTree {
    let document = Html::parse_document(html);
    let title = Selector::parse("head > title, title")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default();

    DomTree {
        root: convert(document.root_element()),
        url: url.to_string(),
        title,
    }
}

/// Parse a markup fragment (a header snippet, say) into a document node
/// whose children are the fragment's top-level elements.
pub fn parse_fragment(html: &str) -> DomNode {
    let fragment = Html::parse_fragment(html);
    DomNode::document(convert_children(fragment.root_element()))
}

fn convert(el: ElementRef<'_>) -> DomNode {
    let tag = el.value().name().to_ascii_lowercase();
    let attributes: HashMap<String, String> = el
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let children = if OPAQUE.contains(&tag.as_str()) {
        Vec::new()
    } else {
        convert_children(el)
    };
    DomNode::element(tag, attributes, children)
}

fn convert_children(el: ElementRef<'_>) -> Vec<DomNode> {
    el.children()
        .filter_map(|child| match child.value() {
            Node::Element(_) => ElementRef::wrap(child).map(convert),
            Node::Text(t) => {
                let text = collapse_whitespace(t);
                (!text.is_empty()).then(|| DomNode::text(text))
            }
            _ => None,
        })
        .collect()
}

/// Runs of whitespace (including newlines from the template) become one
/// space; leading and trailing whitespace is dropped.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
