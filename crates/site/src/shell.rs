//! The HTML document shell wrapping every rendered page.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Icon links emitted in every `<head>`: `(rel, href, type, sizes)`.
const ICONS: &[(&str, &str, Option<&str>, Option<&str>)] = &[
    ("icon", "/arch-favicon.ico", Some("image/x-icon"), None),
    ("icon", "/real-icon.png", Some("image/png"), Some("64x64")),
    ("icon", "/arch-logo.svg", Some("image/svg+xml"), None),
    ("apple-touch-icon", "/real-icon.png", None, Some("64x64")),
];

/// Applies the stored theme preference before first paint so the page never
/// flashes the wrong scheme.
const THEME_SCRIPT: &str = r#"(function(){try{var t=localStorage.getItem('theme');if(t!=='light'&&t!=='dark'){t=window.matchMedia('(prefers-color-scheme: dark)').matches?'dark':'light';}document.documentElement.classList.add(t);document.documentElement.style.colorScheme=t;}catch(e){}})();"#;

/// Document-level settings for the shell.
#[derive(Debug, Clone)]
pub struct RootShell {
    lang: String,
    theme_color: String,
    stylesheet: String,
}

impl Default for RootShell {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            theme_color: "#4E3AF1".to_string(),
            stylesheet: "/global.css".to_string(),
        }
    }
}

impl RootShell {
    /// Shell with explicit language and theme color.
    pub fn new(lang: impl Into<String>, theme_color: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            theme_color: theme_color.into(),
            ..Self::default()
        }
    }

    /// Wraps `body` (already rendered HTML) in a complete document.
    pub fn render(&self, title: &str, description: Option<&str>, body: &str) -> String {
        let mut head = String::new();
        head.push_str(r#"<meta charset="utf-8" />"#);
        head.push_str(r#"<meta name="viewport" content="width=device-width, initial-scale=1" />"#);
        head.push_str(&format!("<title>{}</title>", text(title)));
        if let Some(description) = description {
            head.push_str(&format!(
                r#"<meta name="description" content="{}" />"#,
                attr(description)
            ));
        }
        for (rel, href, kind, sizes) in ICONS {
            head.push_str(&format!(r#"<link rel="{rel}" href="{href}""#));
            if let Some(kind) = kind {
                head.push_str(&format!(r#" type="{kind}""#));
            }
            if let Some(sizes) = sizes {
                head.push_str(&format!(r#" sizes="{sizes}""#));
            }
            head.push_str(" />");
        }
        head.push_str(&format!(
            r#"<meta name="theme-color" content="{}" />"#,
            attr(&self.theme_color)
        ));
        head.push_str(&format!(
            r#"<link rel="stylesheet" href="{}" />"#,
            attr(&self.stylesheet)
        ));
        head.push_str(&format!("<script>{THEME_SCRIPT}</script>"));

        format!(
            r#"<!DOCTYPE html><html lang="{}"><head>{head}</head><body class="flex flex-col min-h-screen">{body}</body></html>"#,
            attr(&self.lang)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_carries_icons_and_theme_color() {
        let html = RootShell::default().render("Intro", Some("About Arch"), "<main></main>");
        assert!(html.starts_with(r#"<!DOCTYPE html><html lang="en">"#));
        assert!(html.contains(r#"<link rel="icon" href="/arch-favicon.ico" type="image/x-icon" />"#));
        assert!(html.contains(
            r#"<link rel="icon" href="/real-icon.png" type="image/png" sizes="64x64" />"#
        ));
        assert!(html.contains(r#"<link rel="icon" href="/arch-logo.svg" type="image/svg+xml" />"#));
        assert!(html.contains(r#"<link rel="apple-touch-icon" href="/real-icon.png" sizes="64x64" />"#));
        assert!(html.contains(r##"<meta name="theme-color" content="#4E3AF1" />"##));
        assert!(html.contains(r#"<meta name="description" content="About Arch" />"#));
        assert!(html.contains(r#"<body class="flex flex-col min-h-screen"><main></main></body>"#));
    }

    #[test]
    fn title_is_escaped() {
        let html = RootShell::new("en", "#000").render("A <b>", None, "");
        assert!(html.contains("<title>A &lt;b&gt;</title>"));
        assert!(!html.contains(r#"name="description""#));
    }
}
