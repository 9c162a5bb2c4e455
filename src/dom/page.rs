//! A fetched page as the header widget sees it: its swappable container,
//! the namespace identifying its slug, and its bilingual text.

use thiserror::Error;
use url::Url;

use crate::config::MarkupConfig;
use crate::dom::parser::parse_html;
use crate::dom::{DomNode, DomTree};
use crate::header::renderer::normalize_slug;
use crate::language::Language;
use crate::net::fetch::FetchResult;

/// Token the site build places between the English and Hebrew bodies.
pub const HEBREW_SEPARATOR: &str = "%%%HEBREW%%%";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page {0} has no transition container")]
    MissingContainer(String),
    #[error("{url} returned HTTP {status} without a transition container")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BilingualText {
    pub en: String,
    pub he: String,
}

impl BilingualText {
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::He => &self.he,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    /// Slug taken from the container's namespace attribute.
    pub namespace: String,
    pub title: String,
    pub container: DomNode,
    pub content: BilingualText,
    pub document: DomTree,
    /// HTTP status the page was served with.
    pub status: u16,
}

impl Page {
    pub fn from_html(
        html: &str,
        url: &Url,
        markup: &MarkupConfig,
        home_slug: &str,
    ) -> Result<Self, PageError> {
        let document = parse_html(html, url.as_str());
        let container = document
            .root
            .find(|n| {
                n.is_element() && n.attr(&markup.container_attr) == Some(markup.container_value.as_str())
            })
            .cloned()
            .ok_or_else(|| PageError::MissingContainer(url.to_string()))?;

        let namespace = container
            .attr(&markup.namespace_attr)
            .and_then(|ns| ns.split(|c: char| c == ',' || c.is_whitespace()).find(|s| !s.is_empty()))
            .map(|ns| normalize_slug(ns, home_slug))
            .unwrap_or_else(|| slug_from_url(url, home_slug));

        let content = split_bilingual(&container);
        Ok(Self {
            url: url.clone(),
            namespace,
            title: document.title.clone(),
            container,
            content,
            document,
            status: 200,
        })
    }

    /// Build a page from a fetch. An error status is accepted when the body
    /// is still a site page: static hosts answer unmapped routes with the
    /// site's own 404 page, header and container included.
    pub fn from_fetch(
        fetched: &FetchResult,
        markup: &MarkupConfig,
        home_slug: &str,
    ) -> Result<Self, PageError> {
        match Self::from_html(&fetched.html, &fetched.url, markup, home_slug) {
            Ok(page) => Ok(Self {
                status: fetched.status,
                ..page
            }),
            Err(_) if !fetched.is_success() => Err(PageError::Status {
                url: fetched.url.to_string(),
                status: fetched.status,
            }),
            Err(e) => Err(e),
        }
    }

    /// Same-site links on the page in document order, one per target.
    pub fn links(&self) -> Vec<(String, Url)> {
        let mut out: Vec<(String, Url)> = Vec::new();
        for anchor in self.document.root.find_all(|n| n.tag == "a") {
            let Some(href) = anchor.attr("href").filter(|h| !h.starts_with('#')) else {
                continue;
            };
            let Ok(target) = self.url.join(href) else {
                continue;
            };
            if target.origin() != self.url.origin() || out.iter().any(|(_, u)| *u == target) {
                continue;
            }
            let label = anchor.collect_text();
            let label = if label.trim().is_empty() {
                target.path().to_string()
            } else {
                label.trim().to_string()
            };
            out.push((label, target));
        }
        out
    }

    /// `<html>` element of the page, for language detection.
    pub fn html_root(&self) -> Option<&DomNode> {
        self.document.root.find(|n| n.tag == "html")
    }
}

/// Path of a URL as a slug (`/about/sub/` → `about/sub`).
pub fn slug_from_url(url: &Url, home_slug: &str) -> String {
    normalize_slug(url.path(), home_slug)
}

/// Split container text into its English and Hebrew bodies: on the build
/// separator when present, otherwise by `lang-he` / `lang="he"` subtrees.
pub fn split_bilingual(container: &DomNode) -> BilingualText {
    let text = container.collect_text();
    if let Some((en, he)) = text.split_once(HEBREW_SEPARATOR) {
        return BilingualText {
            en: en.trim().to_string(),
            he: he.trim().to_string(),
        };
    }

    let mut en = String::new();
    let mut he = String::new();
    collect_by_language(container, Language::En, &mut en, &mut he);
    if he.is_empty() {
        he = en.clone();
    }
    BilingualText { en, he }
}

fn collect_by_language(node: &DomNode, current: Language, en: &mut String, he: &mut String) {
    let lang = marked_language(node).unwrap_or(current);
    if !node.text.trim().is_empty() {
        let buf = match lang {
            Language::En => &mut *en,
            Language::He => &mut *he,
        };
        if !buf.is_empty() {
            buf.push(' ');
        }
        buf.push_str(node.text.trim());
    }
    for child in &node.children {
        collect_by_language(child, lang, en, he);
    }
}

fn marked_language(node: &DomNode) -> Option<Language> {
    if !node.is_element() {
        return None;
    }
    if node.has_class("lang-he") {
        return Some(Language::He);
    }
    if node.has_class("lang-en") {
        return Some(Language::En);
    }
    node.attr("lang").and_then(Language::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str, url: &str) -> Result<Page, PageError> {
        let url = Url::parse(url).unwrap();
        Page::from_html(html, &url, &MarkupConfig::default(), "place")
    }

    #[test]
    fn reads_namespace_from_container() {
        let p = page(
            r#"<html><head><title>About</title></head><body>
               <div data-barba="wrapper"><main data-barba="container" data-barba-namespace="about">
               <p>Hi</p></main></div></body></html>"#,
            "https://site.test/about/",
        )
        .unwrap();
        assert_eq!(p.namespace, "about");
        assert_eq!(p.title, "About");
        assert_eq!(p.content.get(Language::En), "Hi");
    }

    #[test]
    fn namespace_falls_back_to_url_path() {
        let p = page(
            r#"<html><body><main data-barba="container"><p>x</p></main></body></html>"#,
            "https://site.test/about/sub/",
        )
        .unwrap();
        assert_eq!(p.namespace, "about/sub");

        let home = page(
            r#"<html><body><main data-barba="container"></main></body></html>"#,
            "https://site.test/",
        )
        .unwrap();
        assert_eq!(home.namespace, "place");
    }

    #[test]
    fn missing_container_is_an_error() {
        let err = page("<html><body><p>plain</p></body></html>", "https://site.test/x/").unwrap_err();
        assert_eq!(err, PageError::MissingContainer("https://site.test/x/".into()));
    }

    fn fetched(status: u16, html: &str) -> FetchResult {
        FetchResult {
            html: html.to_string(),
            url: Url::parse("https://site.test/unknown/").unwrap(),
            status,
            content_type: "text/html".into(),
        }
    }

    #[test]
    fn not_found_page_with_container_is_a_page() {
        let p = Page::from_fetch(
            &fetched(
                404,
                r#"<html><body><main data-barba="container" data-barba-namespace="404"><p>Lost</p></main></body></html>"#,
            ),
            &MarkupConfig::default(),
            "place",
        )
        .unwrap();
        assert_eq!(p.status, 404);
        assert_eq!(p.namespace, "404");
        assert_eq!(p.content.en, "Lost");
    }

    #[test]
    fn error_status_without_container_reports_status() {
        let err = Page::from_fetch(&fetched(500, "<p>oops</p>"), &MarkupConfig::default(), "place")
            .unwrap_err();
        assert_eq!(
            err,
            PageError::Status {
                url: "https://site.test/unknown/".into(),
                status: 500
            }
        );
    }

    #[test]
    fn links_are_same_site_and_deduplicated() {
        let p = page(
            r##"<html><body><nav><a href="/about/">About</a><a href="https://elsewhere.test/">Out</a>
               <a href="#top">Top</a><a href="/contact/"></a></nav>
               <main data-barba="container"><a href="about/">again</a></main></body></html>"##,
            "https://site.test/",
        )
        .unwrap();
        let links = p.links();
        let got: Vec<(&str, &str)> = links
            .iter()
            .map(|(label, url)| (label.as_str(), url.path()))
            .collect();
        assert_eq!(got, [("About", "/about/"), ("/contact/", "/contact/")]);
    }

    #[test]
    fn splits_on_separator() {
        let p = page(
            r#"<html><body><main data-barba="container" data-barba-namespace="about">
               <p>Hello</p><p>%%%HEBREW%%%</p><p>שלום</p></main></body></html>"#,
            "https://site.test/about/",
        )
        .unwrap();
        assert_eq!(p.content.en, "Hello");
        assert_eq!(p.content.he, "שלום");
    }

    #[test]
    fn splits_on_language_markers() {
        let p = page(
            r#"<html><body><main data-barba="container" data-barba-namespace="about">
               <div class="lang-en"><p>Hello</p></div><div lang="he"><p>שלום</p></div></main></body></html>"#,
            "https://site.test/about/",
        )
        .unwrap();
        assert_eq!(p.content.en, "Hello");
        assert_eq!(p.content.he, "שלום");
    }
}
