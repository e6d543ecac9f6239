// src/page/extract.rs
// =============================================================================
// This module reads a wiki page's HTML and returns its title and the links
// worth following.
//
// Which links are worth following:
// - they sit inside the article body (the "content region", found with a
//   CSS selector, `.mw-parser-output` on MediaWiki sites)
// - their href starts with the article prefix (e.g. "/wiki/")
// - they don't point at a section ("#") and aren't namespaced pages like
//   "/wiki/File:..." or "/wiki/Help:..." (":")
//
// We use the `scraper` crate for parsing and CSS selectors.
// =============================================================================

use super::{LinkExtractor, PageSummary};
use crate::error::SearchError;
use scraper::{Html, Selector};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    title_suffix: String,
    link_prefix: String,
    content_source: String,
    content: Selector,
    title: Selector,
    anchors: Selector,
}

impl HtmlExtractor {
    // Creates an extractor
    //
    // Parameters:
    //   title_suffix: text removed from the end of <title>, e.g. " - Wikipedia"
    //   content_selector: CSS selector of the article body
    //   link_prefix: href prefix of article links, e.g. "/wiki/"
    pub fn new(
        title_suffix: &str,
        content_selector: &str,
        link_prefix: &str,
    ) -> Result<Self, SearchError> {
        Ok(HtmlExtractor {
            title_suffix: title_suffix.to_string(),
            link_prefix: link_prefix.to_string(),
            content_source: content_selector.to_string(),
            content: parse_selector(content_selector)?,
            title: parse_selector("title")?,
            anchors: parse_selector("a[href]")?,
        })
    }

    /// Settings for Wikipedia and most MediaWiki installs
    pub fn wikipedia() -> Result<Self, SearchError> {
        Self::new(" - Wikipedia", ".mw-parser-output", "/wiki/")
    }

    fn is_article_link(&self, href: &str) -> bool {
        href.starts_with(&self.link_prefix) && !href.contains('#') && !href.contains(':')
    }
}

impl LinkExtractor for HtmlExtractor {
    fn extract_links_and_title(&self, content: &str) -> Result<PageSummary, SearchError> {
        let document = Html::parse_document(content);

        let raw_title = document
            .select(&self.title)
            .next()
            .map(|element| element.text().collect::<String>())
            .unwrap_or_default();
        let title = raw_title
            .strip_suffix(self.title_suffix.as_str())
            .unwrap_or(raw_title.as_str())
            .trim()
            .to_string();
        if title.is_empty() {
            return Err(SearchError::Parse("page has no <title>".to_string()));
        }

        let region = document.select(&self.content).next().ok_or_else(|| {
            SearchError::Parse(format!("no element matches '{}'", self.content_source))
        })?;

        // Same link can appear many times in one article; keep the first
        let mut seen = HashSet::new();
        let links = region
            .select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| self.is_article_link(href))
            .filter(|href| seen.insert(*href))
            .map(str::to_string)
            .collect();

        Ok(PageSummary { title, links })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, SearchError> {
    Selector::parse(selector)
        .map_err(|e| SearchError::Config(format!("invalid CSS selector '{}': {:?}", selector, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(title: &str, body: &str) -> String {
        format!(
            r#"<html><head><title>{}</title></head>
               <body>
                 <a href="/wiki/Sidebar">Sidebar</a>
                 <div id="mw-content-text"><div class="mw-parser-output">{}</div></div>
               </body></html>"#,
            title, body
        )
    }

    #[test]
    fn test_strips_title_suffix() {
        let extractor = HtmlExtractor::wikipedia().unwrap();
        let summary = extractor
            .extract_links_and_title(&page("Hatsune Miku - Wikipedia", ""))
            .unwrap();
        assert_eq!(summary.title, "Hatsune Miku");
        assert!(summary.links.is_empty());
    }

    #[test]
    fn test_keeps_title_without_suffix() {
        let extractor = HtmlExtractor::wikipedia().unwrap();
        let summary = extractor
            .extract_links_and_title(&page("Online shopping", ""))
            .unwrap();
        assert_eq!(summary.title, "Online shopping");
    }

    #[test]
    fn test_only_article_links_in_content() {
        let extractor = HtmlExtractor::wikipedia().unwrap();
        let body = r##"
            <a href="/wiki/Vocaloid">Vocaloid</a>
            <a href="/wiki/Crypton#History">Section</a>
            <a href="/wiki/File:Miku.png">File</a>
            <a href="#cite_note-1">[1]</a>
            <a href="https://example.com/wiki/External">External</a>
            <a href="/w/index.php?title=Edit">Edit</a>
            <a href="/wiki/Sapporo">Sapporo</a>
        "##;
        let summary = extractor
            .extract_links_and_title(&page("Hatsune Miku - Wikipedia", body))
            .unwrap();
        // The sidebar link is outside the content region
        assert_eq!(summary.links, vec!["/wiki/Vocaloid", "/wiki/Sapporo"]);
    }

    #[test]
    fn test_duplicate_links_are_removed() {
        let extractor = HtmlExtractor::wikipedia().unwrap();
        let body = r#"
            <a href="/wiki/Vocaloid">Vocaloid</a>
            <a href="/wiki/Sapporo">Sapporo</a>
            <a href="/wiki/Vocaloid">Vocaloid again</a>
        "#;
        let summary = extractor
            .extract_links_and_title(&page("Hatsune Miku - Wikipedia", body))
            .unwrap();
        assert_eq!(summary.links, vec!["/wiki/Vocaloid", "/wiki/Sapporo"]);
    }

    #[test]
    fn test_missing_content_region_is_parse_error() {
        let extractor = HtmlExtractor::wikipedia().unwrap();
        let html = "<html><head><title>Login - Wikipedia</title></head><body></body></html>";
        let err = extractor.extract_links_and_title(html).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        let extractor = HtmlExtractor::wikipedia().unwrap();
        let html = r#"<html><body><div class="mw-parser-output"></div></body></html>"#;
        let err = extractor.extract_links_and_title(html).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn test_custom_site_settings() {
        let extractor = HtmlExtractor::new(" | Docs", "main", "/docs/").unwrap();
        let html = r#"<html><head><title>Intro | Docs</title></head>
            <body><main>
              <a href="/docs/setup">Setup</a><a href="/blog/post">Post</a>
            </main></body></html>"#;
        let summary = extractor.extract_links_and_title(html).unwrap();
        assert_eq!(summary.title, "Intro");
        assert_eq!(summary.links, vec!["/docs/setup"]);
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let err = HtmlExtractor::new("", "div[", "/wiki/").unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
