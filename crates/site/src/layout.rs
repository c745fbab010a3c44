//! Docs layout: nav bar, sidebar tree, page body and table of contents.

use crate::content::{CompiledPage, PageTree};
use crate::logo::render_static;
use crate::nav::NavOptions;
use crate::renderer::TocEntry;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Chrome shared by every docs page.
#[derive(Debug, Clone)]
pub struct DocsLayout {
    nav: NavOptions,
    tree: PageTree,
    home_url: String,
}

impl DocsLayout {
    /// Layout around `tree`, with the nav title linking to `home_url`.
    pub fn new(nav: NavOptions, tree: PageTree, home_url: impl Into<String>) -> Self {
        Self {
            nav,
            tree,
            home_url: home_url.into(),
        }
    }

    /// The sidebar tree.
    pub fn tree(&self) -> &PageTree {
        &self.tree
    }

    /// Body markup for `page`.
    pub fn render_page(&self, page: &CompiledPage) -> String {
        let mut article = String::new();
        article.push_str(&format!(r#"<h1 class="fd-title">{}</h1>"#, text(&page.title)));
        if let Some(description) = &page.description {
            article.push_str(&format!(
                r#"<p class="fd-description">{}</p>"#,
                text(description)
            ));
        }
        article.push_str(r#"<div class="prose">"#);
        article.push_str(&page.html);
        article.push_str("</div>");

        let toc = if page.full {
            String::new()
        } else {
            render_toc(&page.toc)
        };
        let class = if page.full { "fd-page fd-page-full" } else { "fd-page" };
        self.frame(
            &page.url,
            &format!(r#"<main class="{class}"><article>{article}</article>{toc}</main>"#),
        )
    }

    /// Body markup for a missing page.
    pub fn render_not_found(&self) -> String {
        self.frame(
            "",
            &format!(
                r#"<main class="fd-page"><article><h1 class="fd-title">Not Found</h1><p>This page could not be found. <a href="{}">Back to the docs</a></p></article></main>"#,
                attr(&self.home_url)
            ),
        )
    }

    fn frame(&self, current: &str, main: &str) -> String {
        format!(
            concat!(
                r#"<header class="fd-nav"><a href="{home}" class="fd-nav-title">{title}</a>"#,
                r#"<nav class="fd-nav-links">{links}</nav></header>"#,
                r#"<div class="fd-docs-layout"><aside class="fd-sidebar">"#,
                r#"<div class="fd-sidebar-banner">{logo}</div>{tree}</aside>{main}</div>"#,
            ),
            home = attr(&self.home_url),
            title = self.nav.render_title(),
            links = self.nav.render_links(current),
            logo = render_static(),
            tree = self.tree.render(current),
            main = main,
        )
    }
}

fn render_toc(entries: &[TocEntry]) -> String {
    let items: String = entries
        .iter()
        .filter(|entry| entry.depth >= 2)
        .map(|entry| {
            format!(
                r##"<li data-depth="{}"><a href="#{}">{}</a></li>"##,
                entry.depth,
                attr(&entry.id),
                text(&entry.text)
            )
        })
        .collect();
    if items.is_empty() {
        return String::new();
    }
    format!(r#"<nav class="fd-toc"><p>On this page</p><ul>{items}</ul></nav>"#)
}
