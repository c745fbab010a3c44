//! MDAST to HTML renderer.
//!
//! Markdown nodes become plain HTML; capitalised JSX tags are looked up in the
//! [`ComponentRegistry`] and rendered with their children already converted to
//! HTML. Lowercase JSX tags pass through as HTML elements. An unregistered
//! component is a content error: the page cannot be compiled.

mod context;

use crate::registry::{ComponentRegistry, Props};
use archdocs_core::{SiteError, SourceLocation};
use context::{Context, footnote_id};
use markdown::mdast::{AlignKind, AttributeContent, AttributeValue, Node};
use markdown::unist::Position;
use serde::Serialize;

/// Table of contents entry collected from a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub depth: u8,
    /// Anchor id assigned to the heading.
    pub id: String,
    /// Plain heading text.
    pub text: String,
}

/// Output of rendering one document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Body HTML.
    pub html: String,
    /// Headings in document order.
    pub headings: Vec<TocEntry>,
}

/// Renders a parsed document with the given component registry.
pub fn render_document(
    root: &Node,
    registry: &ComponentRegistry,
) -> Result<RenderedDocument, SiteError> {
    let mut ctx = Context::new(registry, root);
    render_node(root, &mut ctx)?;
    let (html, headings) = ctx.finish();
    Ok(RenderedDocument { html, headings })
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn render_children(children: &[Node], ctx: &mut Context<'_>) -> Result<(), SiteError> {
    for child in children {
        render_node(child, ctx)?;
    }
    Ok(())
}

/// Renders `children` into a separate buffer.
fn capture(children: &[Node], tight: bool, ctx: &mut Context<'_>) -> Result<String, SiteError> {
    let saved_out = std::mem::take(&mut ctx.out);
    let saved_tight = std::mem::replace(&mut ctx.tight, tight);
    let result = render_children(children, ctx);
    ctx.tight = saved_tight;
    let captured = std::mem::replace(&mut ctx.out, saved_out);
    result.map(|()| captured)
}

fn wrap(tag: &str, children: &[Node], ctx: &mut Context<'_>) -> Result<(), SiteError> {
    ctx.push_raw(&format!("<{tag}>"));
    render_children(children, ctx)?;
    ctx.push_raw(&format!("</{tag}>"));
    Ok(())
}

fn render_node(node: &Node, ctx: &mut Context<'_>) -> Result<(), SiteError> {
    match node {
        Node::Root(root) => render_children(&root.children, ctx)?,
        Node::Paragraph(para) => {
            if ctx.tight {
                render_children(&para.children, ctx)?;
            } else {
                wrap("p", &para.children, ctx)?;
            }
        }
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Strong(strong) => wrap("strong", &strong.children, ctx)?,
        Node::Emphasis(em) => wrap("em", &em.children, ctx)?,
        Node::Delete(del) => wrap("del", &del.children, ctx)?,
        Node::InlineCode(code) => {
            ctx.push_raw("<code>");
            ctx.push_text(&code.value);
            ctx.push_raw("</code>");
        }
        Node::Break(_) => ctx.push_raw("<br />"),
        Node::ThematicBreak(_) => ctx.push_raw("<hr />"),
        Node::Heading(heading) => {
            let text = plain_text(&heading.children);
            let id = ctx.heading_id(&text);
            ctx.push_raw(&format!("<h{} id=\"", heading.depth));
            ctx.push_attr(&id);
            ctx.push_raw("\">");
            render_children(&heading.children, ctx)?;
            ctx.push_raw(&format!("</h{}>", heading.depth));
            ctx.headings.push(TocEntry {
                depth: heading.depth,
                id,
                text,
            });
        }
        Node::Blockquote(quote) => {
            let inner = capture(&quote.children, false, ctx)?;
            ctx.push_raw(&format!("<blockquote>{inner}</blockquote>"));
        }
        Node::List(list) => {
            let tag = if list.ordered { "ol" } else { "ul" };
            match list.start {
                Some(start) if list.ordered && start != 1 => {
                    ctx.push_raw(&format!("<ol start=\"{start}\">"))
                }
                _ => ctx.push_raw(&format!("<{tag}>")),
            }
            render_children(&list.children, ctx)?;
            ctx.push_raw(&format!("</{tag}>"));
        }
        Node::ListItem(item) => {
            ctx.push_raw("<li>");
            if let Some(checked) = item.checked {
                ctx.push_raw(if checked {
                    r#"<input type="checkbox" checked disabled /> "#
                } else {
                    r#"<input type="checkbox" disabled /> "#
                });
            }
            let inner = capture(&item.children, !item.spread, ctx)?;
            ctx.push_raw(&inner);
            ctx.push_raw("</li>");
        }
        Node::Code(code) => {
            match code.lang.as_deref() {
                Some(lang) => {
                    ctx.push_raw("<pre><code class=\"language-");
                    ctx.push_attr(lang);
                    ctx.push_raw("\">");
                }
                None => ctx.push_raw("<pre><code>"),
            }
            ctx.push_text(&code.value);
            ctx.push_raw("</code></pre>");
        }
        Node::Link(link) => {
            open_link(&link.url, link.title.as_deref(), ctx);
            render_children(&link.children, ctx)?;
            ctx.push_raw("</a>");
        }
        Node::Image(image) => push_image(&image.url, &image.alt, image.title.as_deref(), ctx),
        Node::LinkReference(reference) => match ctx.definition(&reference.identifier).cloned() {
            Some(def) => {
                open_link(&def.url, def.title.as_deref(), ctx);
                render_children(&reference.children, ctx)?;
                ctx.push_raw("</a>");
            }
            None => render_children(&reference.children, ctx)?,
        },
        Node::ImageReference(reference) => match ctx.definition(&reference.identifier).cloned() {
            Some(def) => push_image(&def.url, &reference.alt, def.title.as_deref(), ctx),
            None => ctx.push_text(&reference.alt),
        },
        Node::Definition(_) => {}
        Node::Table(table) => render_table(table, ctx)?,
        Node::TableRow(_) | Node::TableCell(_) => {}
        Node::FootnoteReference(reference) => {
            let ordinal = ctx.footnote_ordinal(&reference.identifier);
            let id = footnote_id(&reference.identifier);
            ctx.push_raw(&format!(
                r##"<sup><a href="#fn-{id}" id="fnref-{id}">{ordinal}</a></sup>"##
            ));
        }
        Node::FootnoteDefinition(definition) => {
            let html = capture(&definition.children, true, ctx)?;
            ctx.push_footnote(&definition.identifier, html);
        }
        Node::Html(html) => ctx.push_text(&html.value),
        Node::MdxJsxFlowElement(element) => render_jsx(
            element.name.as_deref(),
            &element.attributes,
            &element.children,
            element.position.as_ref(),
            false,
            ctx,
        )?,
        Node::MdxJsxTextElement(element) => render_jsx(
            element.name.as_deref(),
            &element.attributes,
            &element.children,
            element.position.as_ref(),
            true,
            ctx,
        )?,
        Node::MdxjsEsm(esm) => {
            log::debug!("skipping ESM statement: {}", esm.value);
        }
        Node::MdxFlowExpression(expr) => {
            log::debug!("expression not evaluated: {{{}}}", expr.value);
        }
        Node::MdxTextExpression(expr) => {
            log::debug!("expression not evaluated: {{{}}}", expr.value);
        }
        Node::Yaml(_) | Node::Toml(_) => {}
        other => {
            log::warn!("Unhandled markdown node type: {:?}", other);
        }
    }
    Ok(())
}

fn open_link(url: &str, title: Option<&str>, ctx: &mut Context<'_>) {
    ctx.push_raw("<a href=\"");
    ctx.push_attr(url);
    ctx.push_raw("\"");
    if let Some(title) = title {
        ctx.push_raw(" title=\"");
        ctx.push_attr(title);
        ctx.push_raw("\"");
    }
    ctx.push_raw(">");
}

fn push_image(url: &str, alt: &str, title: Option<&str>, ctx: &mut Context<'_>) {
    ctx.push_raw("<img src=\"");
    ctx.push_attr(url);
    ctx.push_raw("\" alt=\"");
    ctx.push_attr(alt);
    ctx.push_raw("\"");
    if let Some(title) = title {
        ctx.push_raw(" title=\"");
        ctx.push_attr(title);
        ctx.push_raw("\"");
    }
    ctx.push_raw(" />");
}

fn render_table(table: &markdown::mdast::Table, ctx: &mut Context<'_>) -> Result<(), SiteError> {
    ctx.push_raw("<table>");
    for (index, row) in table.children.iter().enumerate() {
        let Node::TableRow(row) = row else { continue };
        let cell_tag = if index == 0 { "th" } else { "td" };
        if index == 0 {
            ctx.push_raw("<thead>");
        } else if index == 1 {
            ctx.push_raw("<tbody>");
        }
        ctx.push_raw("<tr>");
        for (column, cell) in row.children.iter().enumerate() {
            let Node::TableCell(cell) = cell else { continue };
            match table.align.get(column) {
                Some(AlignKind::Left) => ctx.push_raw(&format!("<{cell_tag} align=\"left\">")),
                Some(AlignKind::Right) => ctx.push_raw(&format!("<{cell_tag} align=\"right\">")),
                Some(AlignKind::Center) => ctx.push_raw(&format!("<{cell_tag} align=\"center\">")),
                _ => ctx.push_raw(&format!("<{cell_tag}>")),
            }
            render_children(&cell.children, ctx)?;
            ctx.push_raw(&format!("</{cell_tag}>"));
        }
        ctx.push_raw("</tr>");
        if index == 0 {
            ctx.push_raw("</thead>");
        }
    }
    if table.children.len() > 1 {
        ctx.push_raw("</tbody>");
    }
    ctx.push_raw("</table>");
    Ok(())
}

fn render_jsx(
    name: Option<&str>,
    attributes: &[AttributeContent],
    children: &[Node],
    position: Option<&Position>,
    inline: bool,
    ctx: &mut Context<'_>,
) -> Result<(), SiteError> {
    // Fragment: `<>...</>`
    let Some(name) = name else {
        return render_children(children, ctx);
    };

    let props = jsx_props(name, attributes);

    if is_html_element(name) {
        ctx.push_raw(&format!("<{name}"));
        for (key, value) in &props {
            let key = match key.as_str() {
                "className" => "class",
                "htmlFor" => "for",
                other => other,
            };
            ctx.push_raw(&format!(" {key}=\""));
            ctx.push_attr(value);
            ctx.push_raw("\"");
        }
        if VOID_ELEMENTS.contains(&name) {
            ctx.push_raw(" />");
            return Ok(());
        }
        ctx.push_raw(">");
        let inner = capture(children, inline, ctx)?;
        ctx.push_raw(&inner);
        ctx.push_raw(&format!("</{name}>"));
        return Ok(());
    }

    let registry = ctx.registry;
    let Some(component) = registry.get(name) else {
        let location = position
            .map(|p| SourceLocation::new(p.start.line, p.start.column))
            .unwrap_or_else(|| SourceLocation::new(1, 1));
        return Err(SiteError::content_at(
            format!("unknown component `<{name}>`"),
            location,
        ));
    };

    let inner = capture(children, inline, ctx)?;
    let html = component.render(&props, &inner);
    ctx.push_raw(&html);
    Ok(())
}

fn jsx_props(name: &str, attributes: &[AttributeContent]) -> Props {
    let mut props = Props::new();
    for attribute in attributes {
        match attribute {
            AttributeContent::Property(prop) => {
                let value = match &prop.value {
                    Some(AttributeValue::Literal(value)) => value.clone(),
                    Some(AttributeValue::Expression(expr)) => {
                        log::debug!(
                            "<{name}> prop `{}` is an expression, passing source through",
                            prop.name
                        );
                        expr.value.clone()
                    }
                    None => "true".to_string(),
                };
                props.insert(prop.name.clone(), value);
            }
            AttributeContent::Expression(expr) => {
                log::debug!("<{name}> spread attribute ignored: {{{}}}", expr.value);
            }
        }
    }
    props
}

fn is_html_element(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) && !name.contains('.')
}

/// Concatenated text of a node list (used for heading anchors).
fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(&text.value),
            Node::InlineCode(code) => out.push_str(&code.value),
            other => {
                if let Some(children) = other.children() {
                    out.push_str(&plain_text(children));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::build_registry;
    use archdocs_core::{MermaidTransform, ParserPipeline};
    use pretty_assertions::assert_eq;

    fn render(input: &str) -> RenderedDocument {
        let root = ParserPipeline::mdx()
            .with_transform(MermaidTransform)
            .parse(input)
            .expect("parse");
        render_document(&root, &build_registry(None)).expect("render")
    }

    #[test]
    fn renders_basic_markdown() {
        let doc = render("Hello **world** and `code`.");
        assert_eq!(
            doc.html,
            "<p>Hello <strong>world</strong> and <code>code</code>.</p>"
        );
    }

    #[test]
    fn headings_get_unique_ids_and_toc_entries() {
        let doc = render("## Setup\n\n## Setup\n\n### Run `arch-cli`\n");
        assert_eq!(
            doc.html,
            r#"<h2 id="setup">Setup</h2><h2 id="setup-1">Setup</h2><h3 id="run-arch-cli">Run <code>arch-cli</code></h3>"#
        );
        assert_eq!(doc.headings.len(), 3);
        assert_eq!(doc.headings[2].text, "Run arch-cli");
        assert_eq!(doc.headings[2].depth, 3);
    }

    #[test]
    fn warning_renders_through_registry() {
        let doc = render("<Warning>\n  Keep your **keys** safe.\n</Warning>\n");
        assert_eq!(
            doc.html,
            r#"<div class="my-6 rounded-lg bg-yellow-50 dark:bg-yellow-950/30 px-4 py-3 text-sm"><p>Keep your <strong>keys</strong> safe.</p></div>"#
        );
    }

    #[test]
    fn mermaid_fence_becomes_diagram() {
        let doc = render("```mermaid\ngraph TD;\nA-->B;\n```\n");
        assert_eq!(doc.html, "<pre class=\"mermaid\">graph TD;\nA--&gt;B;</pre>");
    }

    #[test]
    fn code_is_escaped_with_language_class() {
        let doc = render("```rust\nlet x = a < b;\n```\n");
        assert_eq!(
            doc.html,
            "<pre><code class=\"language-rust\">let x = a &lt; b;</code></pre>"
        );
    }

    #[test]
    fn tight_lists_do_not_wrap_paragraphs() {
        let doc = render("- one\n- two\n");
        assert_eq!(doc.html, "<ul><li>one</li><li>two</li></ul>");
    }

    #[test]
    fn html_elements_pass_through() {
        let doc = render("<div className=\"note\">\n  text\n</div>\n");
        assert_eq!(doc.html, "<div class=\"note\"><p>text</p></div>");
    }

    #[test]
    fn unknown_component_is_a_content_error() {
        let root = ParserPipeline::mdx().parse("\n<Banner />\n").unwrap();
        let err = render_document(&root, &build_registry(None)).unwrap_err();
        assert!(err.is_content());
        assert!(err.to_string().contains("<Banner>"), "{err}");
        assert!(err.to_string().contains("2:1"), "{err}");
    }

    #[test]
    fn links_and_reference_definitions() {
        let doc = render("[inline](/docs \"Docs\") and [ref][arch]\n\n[arch]: https://arch.network\n");
        assert_eq!(
            doc.html,
            r#"<p><a href="/docs" title="Docs">inline</a> and <a href="https://arch.network">ref</a></p>"#
        );
    }

    #[test]
    fn footnotes_are_collected_at_the_end() {
        let doc = render("Claim[^1].\n\n[^1]: Source.\n");
        assert!(doc.html.starts_with(
            r##"<p>Claim<sup><a href="#fn-1" id="fnref-1">1</a></sup>.</p>"##
        ));
        assert!(doc.html.contains(r#"<li id="fn-1">Source."#));
    }
}
