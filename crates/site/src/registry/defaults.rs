//! Framework default components shared by every docs page.
//!
//! Includes the stock callout (with icon and border), cards, steps, tabs and
//! the diagram component the mermaid fence transform targets.

use super::types::{ComponentRegistry, Props, attr, text};
use archdocs_core::MERMAID_COMPONENT;

/// Registry holding the default components.
///
/// ```
/// use archdocs_site::registry::defaults::default_components;
///
/// let registry = default_components();
/// assert!(registry.contains("Callout"));
/// assert!(registry.contains("Mermaid"));
/// ```
pub fn default_components() -> ComponentRegistry {
    ComponentRegistry::new()
        .with("Callout", callout)
        .with("Card", card)
        .with("Cards", cards)
        .with("Steps", steps)
        .with("Step", step)
        .with("Tabs", tabs)
        .with("Tab", tab)
        .with(MERMAID_COMPONENT, mermaid)
}

fn callout(props: &Props, children: &str) -> String {
    let kind = match props.get("type").map(String::as_str) {
        Some("warn" | "warning") => "warning",
        Some("error" | "danger") => "error",
        _ => "info",
    };
    let icon = match kind {
        "warning" => "!",
        "error" => "\u{2715}",
        _ => "i",
    };
    let title = props
        .get("title")
        .map(|t| format!(r#"<p class="fd-callout-title font-medium">{}</p>"#, text(t)))
        .unwrap_or_default();
    format!(
        r#"<div class="fd-callout fd-callout-{kind} my-4 flex gap-2 rounded-lg border p-3 text-sm shadow-md"><span class="fd-callout-icon" aria-hidden="true">{icon}</span><div class="min-w-0 flex-1">{title}{children}</div></div>"#
    )
}

fn card(props: &Props, children: &str) -> String {
    let title = props.get("title").map(|t| text(t)).unwrap_or_default();
    let description = props
        .get("description")
        .map(|d| format!(r#"<p class="text-sm text-fd-muted-foreground">{}</p>"#, text(d)))
        .unwrap_or_default();
    let inner = format!(
        r#"<h3 class="not-prose mb-1 text-sm font-medium">{title}</h3>{description}{children}"#
    );
    match props.get("href") {
        Some(href) => format!(
            r#"<a href="{}" class="fd-card block rounded-lg border bg-fd-card p-4">{inner}</a>"#,
            attr(href)
        ),
        None => format!(r#"<div class="fd-card block rounded-lg border bg-fd-card p-4">{inner}</div>"#),
    }
}

fn cards(_props: &Props, children: &str) -> String {
    format!(r#"<div class="fd-cards grid grid-cols-2 gap-4">{children}</div>"#)
}

fn steps(_props: &Props, children: &str) -> String {
    format!(r#"<div class="fd-steps">{children}</div>"#)
}

fn step(_props: &Props, children: &str) -> String {
    format!(r#"<div class="fd-step">{children}</div>"#)
}

fn tabs(props: &Props, children: &str) -> String {
    let items = props
        .get("items")
        .map(|items| format!(r#" data-items="{}""#, attr(items)))
        .unwrap_or_default();
    format!(r#"<div class="fd-tabs" role="tablist"{items}>{children}</div>"#)
}

fn tab(props: &Props, children: &str) -> String {
    let value = props
        .get("value")
        .or_else(|| props.get("title"))
        .map(|v| format!(r#" data-value="{}""#, attr(v)))
        .unwrap_or_default();
    format!(r#"<div class="fd-tab" role="tabpanel"{value}>{children}</div>"#)
}

fn mermaid(props: &Props, _children: &str) -> String {
    let chart = props.get("chart").map(String::as_str).unwrap_or_default();
    format!(r#"<pre class="mermaid">{}</pre>"#, text(chart))
}
