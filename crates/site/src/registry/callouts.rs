//! Site callouts: plain tinted boxes, no icon and no border.

use super::types::Props;

const TIP_CLASS: &str = "my-6 rounded-lg bg-blue-50 dark:bg-blue-950/30 px-4 py-3 text-sm";
const WARNING_CLASS: &str = "my-6 rounded-lg bg-yellow-50 dark:bg-yellow-950/30 px-4 py-3 text-sm";

/// `<Tip>`: blue-tinted container around arbitrary content.
pub fn tip(_props: &Props, children: &str) -> String {
    tinted(TIP_CLASS, children)
}

/// `<Warning>`: yellow-tinted container around arbitrary content.
pub fn warning(_props: &Props, children: &str) -> String {
    tinted(WARNING_CLASS, children)
}

fn tinted(class: &str, children: &str) -> String {
    format!(r#"<div class="{class}">{children}</div>"#)
}
