use std::path::Path;

use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use tracing::info;

use crate::error::CatalogError;

const SITEMAP_NS: &[u8] = b"http://www.sitemaps.org/schemas/sitemap/0.9";

/// Ordered list of document URLs loaded from a sitemap feed. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<String>,
}

impl Catalog {
    /// Load and parse a sitemap file. Missing or malformed files are fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| CatalogError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = parse_urlset(&xml).map_err(|reason| CatalogError::Malformed {
            path: path.to_path_buf(),
            reason,
        })?;
        info!("Loaded {} drug interaction entries from {}", entries.len(), path.display());
        Ok(Catalog { entries })
    }

    pub fn from_entries(entries: Vec<String>) -> Self {
        Catalog { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a urlset XML and return every namespaced `url/loc` value in order.
/// A document that ends with elements still open is malformed.
fn parse_urlset(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = NsReader::from_str(xml);
    let mut urls = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;
    let mut in_url = false;
    let mut loc: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        let (ns, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| e.to_string())?;
        match event {
            Event::Start(e) => {
                depth += 1;
                saw_root = true;
                if is_sitemap(&ns) {
                    match e.local_name().as_ref() {
                        b"url" => in_url = true,
                        b"loc" if in_url => loc = Some(String::new()),
                        _ => {}
                    }
                }
            }
            Event::Empty(_) => saw_root = true,
            Event::Text(e) => {
                if let Some(text) = loc.as_mut() {
                    text.push_str(&e.unescape().map_err(|e| e.to_string())?);
                }
            }
            Event::CData(e) => {
                if let Some(text) = loc.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(e) => {
                depth = depth.saturating_sub(1);
                if is_sitemap(&ns) {
                    match e.local_name().as_ref() {
                        b"loc" => {
                            if let Some(text) = loc.take() {
                                push_loc(&mut urls, &text);
                            }
                        }
                        b"url" => in_url = false,
                        _ => {}
                    }
                }
            }
            Event::Eof => {
                if !saw_root {
                    return Err("document has no root element".to_string());
                }
                if depth > 0 {
                    return Err("unexpected end of document".to_string());
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(urls)
}

fn is_sitemap(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(n) if n.as_ref() == SITEMAP_NS)
}

fn push_loc(urls: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        urls.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://www.drugs.com/drug-interactions/acebutolol-with-taurine-123-0-456.html</loc></url>
  <url>
    <loc>
      https://www.drugs.com/drug-interactions/warfarin-with-aspirin-1247-0-198-439.html
    </loc>
    <lastmod>2024-01-01</lastmod>
  </url>
  <url><loc><![CDATA[https://www.drugs.com/drug-interactions/index.html]]></loc></url>
</urlset>"#;

    #[test]
    fn parses_locs_in_order() {
        let urls = parse_urlset(FEED).unwrap();
        assert_eq!(urls.len(), 3);
        assert!(urls[0].ends_with("acebutolol-with-taurine-123-0-456.html"));
        assert!(urls[1].ends_with("warfarin-with-aspirin-1247-0-198-439.html"));
        assert!(urls[2].ends_with("index.html"));
    }

    #[test]
    fn ignores_locs_outside_sitemap_namespace() {
        let xml = r#"<urlset><url><loc>https://example.com/a.html</loc></url></urlset>"#;
        assert!(parse_urlset(xml).unwrap().is_empty());
    }

    #[test]
    fn mismatched_tags_are_malformed() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>x</url></urlset>"#;
        assert!(parse_urlset(xml).is_err());
    }

    #[test]
    fn truncated_feed_is_malformed() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"><url><loc>https://x/drug-interactions/a-with-b-1.html</loc></url><url><loc>https://x/drug-interactions/c-with"#;
        assert!(parse_urlset(xml).is_err());
    }

    #[test]
    fn empty_feed_is_malformed() {
        assert!(parse_urlset("").is_err());
        assert!(parse_urlset("<?xml version=\"1.0\"?>").is_err());
    }

    #[test]
    fn split_loc_text_is_one_entry() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <url><loc>https://x/drug-interactions/a-with-<!-- c -->b-1.html</loc></url>
            <url><loc>https://x/drug-interactions/<![CDATA[c-with-]]>d-2.html</loc></url>
        </urlset>"#;
        assert_eq!(
            parse_urlset(xml).unwrap(),
            vec![
                "https://x/drug-interactions/a-with-b-1.html",
                "https://x/drug-interactions/c-with-d-2.html",
            ]
        );
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEED.as_bytes()).unwrap();
        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load(dir.path().join("nope.xml")).unwrap_err();
        assert!(matches!(err, CatalogError::Unreadable { .. }));
    }

    #[test]
    fn truncated_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEED.trim_end_matches("</urlset>").as_bytes()).unwrap();
        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\"><url></loc></urlset>")
            .unwrap();
        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }
}
