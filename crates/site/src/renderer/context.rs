//! Rendering state carried through a single document traversal.

use super::TocEntry;
use crate::registry::ComponentRegistry;
use archdocs_core::Slugger;
use markdown::mdast::Node;
use std::collections::HashMap;

/// Link reference definition (`[id]: url "title"`).
#[derive(Debug, Clone)]
pub(super) struct LinkDefinition {
    pub url: String,
    pub title: Option<String>,
}

pub(super) struct Context<'r> {
    pub out: String,
    pub registry: &'r ComponentRegistry,
    /// Paragraphs are unwrapped inside tight list items.
    pub tight: bool,
    pub headings: Vec<TocEntry>,
    slugger: Slugger,
    definitions: HashMap<String, LinkDefinition>,
    footnote_order: Vec<String>,
    footnotes: HashMap<String, String>,
}

impl<'r> Context<'r> {
    pub fn new(registry: &'r ComponentRegistry, root: &Node) -> Self {
        let mut definitions = HashMap::new();
        collect_definitions(root, &mut definitions);
        Self {
            out: String::new(),
            registry,
            tight: false,
            headings: Vec::new(),
            slugger: Slugger::new(),
            definitions,
            footnote_order: Vec::new(),
            footnotes: HashMap::new(),
        }
    }

    pub fn push_raw(&mut self, html: &str) {
        self.out.push_str(html);
    }

    pub fn push_text(&mut self, text: &str) {
        self.out.push_str(&html_escape::encode_text(text));
    }

    pub fn push_attr(&mut self, value: &str) {
        self.out
            .push_str(&html_escape::encode_double_quoted_attribute(value));
    }

    pub fn heading_id(&mut self, text: &str) -> String {
        self.slugger.slug(text)
    }

    pub fn definition(&self, identifier: &str) -> Option<&LinkDefinition> {
        self.definitions.get(&identifier.to_lowercase())
    }

    /// Ordinal of a footnote, assigned by first reference.
    pub fn footnote_ordinal(&mut self, identifier: &str) -> usize {
        if let Some(index) = self.footnote_order.iter().position(|id| id == identifier) {
            return index + 1;
        }
        self.footnote_order.push(identifier.to_string());
        self.footnote_order.len()
    }

    pub fn push_footnote(&mut self, identifier: &str, html: String) {
        self.footnotes.insert(identifier.to_string(), html);
    }

    /// Appends the footnote section (if any) and returns the document HTML.
    pub fn finish(mut self) -> (String, Vec<TocEntry>) {
        let referenced: Vec<(String, String)> = self
            .footnote_order
            .iter()
            .filter_map(|id| self.footnotes.get(id).map(|html| (id.clone(), html.clone())))
            .collect();
        if !referenced.is_empty() {
            self.out.push_str(r#"<section class="footnotes"><ol>"#);
            for (id, html) in referenced {
                let id = footnote_id(&id);
                self.out.push_str(&format!(
                    r##"<li id="fn-{id}">{html} <a href="#fnref-{id}" aria-label="Back to reference">↩</a></li>"##
                ));
            }
            self.out.push_str("</ol></section>");
        }
        (self.out, self.headings)
    }
}

/// Anchor-safe footnote identifier.
pub(super) fn footnote_id(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

fn collect_definitions(node: &Node, into: &mut HashMap<String, LinkDefinition>) {
    if let Node::Definition(definition) = node {
        into.entry(definition.identifier.to_lowercase())
            .or_insert_with(|| LinkDefinition {
                url: definition.url.clone(),
                title: definition.title.clone(),
            });
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_definitions(child, into);
        }
    }
}
