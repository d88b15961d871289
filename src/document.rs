//! Minimal traversal interface over a parsed HTML page.
//!
//! Extractors only ever need "find the first / all elements like this" and
//! "give me the text", so that is all [`DocumentNode`] exposes. Queries are
//! small structured predicates instead of CSS strings.

use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Html};

/// How an element's `class` attribute must look for a [`Query`] to match.
#[derive(Debug, Clone)]
pub enum ClassRule {
    /// Any one class equals one of these names.
    AnyOf(Vec<&'static str>),
    /// Any one class contains a match of this pattern.
    Matches(Regex),
}

/// Structured element predicate: tag names, plus optional class and id rules.
#[derive(Debug, Clone)]
pub struct Query {
    tags: Vec<&'static str>,
    class: Option<ClassRule>,
    id: Option<Regex>,
}

impl Query {
    /// Match any of the given tag names. An empty list matches every tag.
    pub fn tags(tags: &[&'static str]) -> Self {
        Query {
            tags: tags.to_vec(),
            class: None,
            id: None,
        }
    }

    pub fn tag(tag: &'static str) -> Self {
        Self::tags(&[tag])
    }

    pub fn with_class(mut self, name: &'static str) -> Self {
        self.class = Some(ClassRule::AnyOf(vec![name]));
        self
    }

    pub fn with_any_class(mut self, names: &[&'static str]) -> Self {
        self.class = Some(ClassRule::AnyOf(names.to_vec()));
        self
    }

    pub fn with_class_matching(mut self, pattern: Regex) -> Self {
        self.class = Some(ClassRule::Matches(pattern));
        self
    }

    pub fn with_id_matching(mut self, pattern: Regex) -> Self {
        self.id = Some(pattern);
        self
    }

    pub fn matches(&self, el: &Element) -> bool {
        if !self.tags.is_empty() && !self.tags.iter().any(|t| *t == el.name()) {
            return false;
        }
        let class_ok = match &self.class {
            None => true,
            Some(ClassRule::AnyOf(names)) => el.classes().any(|c| names.iter().any(|n| *n == c)),
            Some(ClassRule::Matches(re)) => el.classes().any(|c| re.is_match(c)),
        };
        let id_ok = match &self.id {
            None => true,
            Some(re) => el.id().is_some_and(|id| re.is_match(id)),
        };
        class_ok && id_ok
    }
}

/// The traversal surface every extractor works against.
pub trait DocumentNode: Sized {
    /// First descendant matching `query`, in document order.
    fn find_first(&self, query: &Query) -> Option<Self>;

    /// Every descendant matching `query`, in document order.
    fn find_all(&self, query: &Query) -> Vec<Self>;

    /// Visible text with whitespace collapsed to single spaces and trimmed.
    fn text_content(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    /// Nearest enclosing element with one of `tags` around the first text
    /// node under `self` that matches `pattern`.
    fn find_text_container(&self, pattern: &Regex, tags: &[&str]) -> Option<Self>;

    /// True when `self` sits somewhere below `other` in the tree.
    fn is_within(&self, other: &Self) -> bool;
}

impl<'a> DocumentNode for ElementRef<'a> {
    fn find_first(&self, query: &Query) -> Option<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| query.matches(el.value()))
    }

    fn find_all(&self, query: &Query) -> Vec<Self> {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| query.matches(el.value()))
            .collect()
    }

    fn text_content(&self) -> String {
        compact_ws(&self.text().collect::<String>())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.value().attr(name).map(str::to_string)
    }

    fn find_text_container(&self, pattern: &Regex, tags: &[&str]) -> Option<Self> {
        let hit = self
            .descendants()
            .find(|node| node.value().as_text().is_some_and(|t| pattern.is_match(t)))?;
        hit.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| tags.iter().any(|t| *t == el.value().name()))
    }

    fn is_within(&self, other: &Self) -> bool {
        self.ancestors().any(|node| node.id() == other.id())
    }
}

/// A fetched and parsed page.
pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(source: &str) -> Self {
        Page {
            html: Html::parse_document(source),
        }
    }

    /// The `<html>` element; every extractor starts its search here.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

pub fn compact_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
