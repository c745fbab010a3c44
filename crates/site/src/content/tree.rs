//! Sidebar page tree: folders, `meta.json` ordering, separators and links.

use super::DocPage;
use archdocs_core::MetaDescriptor;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

const REST: &str = "...";
const INDEX: &str = "index";

/// Link to a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub url: String,
}

/// A folder of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    /// Display title.
    pub title: String,
    /// The folder's own index page, if any.
    pub index: Option<PageLink>,
    /// Ordered children.
    pub children: Vec<TreeNode>,
    /// Expanded when the current page is elsewhere.
    pub default_open: bool,
}

/// Node of the sidebar tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A page.
    Page(PageLink),
    /// A folder.
    Folder(Folder),
    /// A labelled separator (`---Label---`).
    Separator(String),
    /// An external link (`[Text](url)`).
    Link {
        /// Link text.
        text: String,
        /// Target URL.
        url: String,
    },
}

impl TreeNode {
    fn contains(&self, url: &str) -> bool {
        match self {
            TreeNode::Page(page) => page.url == url,
            TreeNode::Folder(folder) => {
                folder.index.as_ref().is_some_and(|i| i.url == url)
                    || folder.children.iter().any(|c| c.contains(url))
            }
            _ => false,
        }
    }
}

/// Sidebar tree of the docs collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTree {
    /// Top-level nodes.
    pub children: Vec<TreeNode>,
}

impl PageTree {
    /// Builds the tree from loaded pages and folder descriptors.
    pub fn build(pages: &[DocPage], metas: &BTreeMap<PathBuf, MetaDescriptor>) -> Self {
        Self {
            children: build_folder(Path::new(""), pages, metas),
        }
    }

    /// Sidebar HTML with `current` marked active and its folders open.
    pub fn render(&self, current: &str) -> String {
        let mut out = String::from(r#"<ul class="fd-sidebar-list">"#);
        for node in &self.children {
            render_node(node, current, &mut out);
        }
        out.push_str("</ul>");
        out
    }
}

fn build_folder(
    dir: &Path,
    pages: &[DocPage],
    metas: &BTreeMap<PathBuf, MetaDescriptor>,
) -> Vec<TreeNode> {
    let is_root = dir.as_os_str().is_empty();
    let mut items: BTreeMap<String, TreeNode> = BTreeMap::new();
    let mut subfolders = BTreeSet::new();

    for page in pages {
        if page.folder() == dir {
            let stem = page.stem();
            if stem == INDEX && !is_root {
                continue;
            }
            items.insert(stem, TreeNode::Page(link(page)));
        } else if let Ok(rest) = page.relative.strip_prefix(dir)
            && let Some(first) = rest.components().next()
        {
            subfolders.insert(first.as_os_str().to_string_lossy().into_owned());
        }
    }

    for name in subfolders {
        let child_dir = dir.join(&name);
        // `guide.mdx` next to `guide/` serves as the folder's landing page.
        let sibling = match items.remove(&name) {
            Some(TreeNode::Page(page)) => Some(page),
            _ => None,
        };
        let index = pages
            .iter()
            .find(|p| p.folder() == child_dir && p.stem() == INDEX)
            .map(link)
            .or(sibling);
        let meta = metas.get(&child_dir);
        let title = meta
            .and_then(|m| m.title.clone())
            .or_else(|| index.as_ref().map(|p| p.title.clone()))
            .unwrap_or_else(|| name.clone());
        let folder = Folder {
            title,
            index,
            children: build_folder(&child_dir, pages, metas),
            default_open: meta.is_some_and(MetaDescriptor::is_default_open),
        };
        items.insert(name, TreeNode::Folder(folder));
    }

    order(dir, items, metas.get(dir))
}

fn link(page: &DocPage) -> PageLink {
    PageLink {
        title: page.frontmatter.title.clone(),
        url: page.url.clone(),
    }
}

fn order(
    dir: &Path,
    mut items: BTreeMap<String, TreeNode>,
    meta: Option<&MetaDescriptor>,
) -> Vec<TreeNode> {
    let Some(entries) = meta.and_then(|m| m.pages.as_ref()) else {
        let mut out = Vec::with_capacity(items.len());
        if let Some(index) = items.remove(INDEX) {
            out.push(index);
        }
        out.extend(items.into_values());
        return out;
    };

    let listed: HashSet<&str> = entries.iter().map(String::as_str).collect();
    let mut out = Vec::new();
    for entry in entries {
        if entry == REST {
            let rest: Vec<String> = items
                .keys()
                .filter(|k| !listed.contains(k.as_str()))
                .cloned()
                .collect();
            for key in rest {
                if let Some(node) = items.remove(&key) {
                    out.push(node);
                }
            }
        } else if let Some(label) = separator(entry) {
            out.push(TreeNode::Separator(label.to_string()));
        } else if let Some((text, url)) = external_link(entry) {
            out.push(TreeNode::Link {
                text: text.to_string(),
                url: url.to_string(),
            });
        } else if let Some(node) = items.remove(entry) {
            out.push(node);
        } else {
            log::warn!(
                "meta.json in `{}` lists unknown entry `{entry}`",
                dir.display()
            );
        }
    }
    out
}

fn separator(entry: &str) -> Option<&str> {
    entry
        .strip_prefix("---")
        .and_then(|s| s.strip_suffix("---"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn external_link(entry: &str) -> Option<(&str, &str)> {
    let inner = entry.strip_prefix('[')?.strip_suffix(')')?;
    let (text, url) = inner.split_once("](")?;
    Some((text, url))
}

fn render_node(node: &TreeNode, current: &str, out: &mut String) {
    match node {
        TreeNode::Page(page) => {
            out.push_str("<li>");
            render_page_link(page, current, out);
            out.push_str("</li>");
        }
        TreeNode::Folder(folder) => {
            let open = folder.default_open || node.contains(current);
            out.push_str(if open { "<li><details open><summary>" } else { "<li><details><summary>" });
            match &folder.index {
                Some(index) => render_page_link(
                    &PageLink {
                        title: folder.title.clone(),
                        url: index.url.clone(),
                    },
                    current,
                    out,
                ),
                None => out.push_str(&text(&folder.title)),
            }
            out.push_str(r#"</summary><ul class="fd-sidebar-list">"#);
            for child in &folder.children {
                render_node(child, current, out);
            }
            out.push_str("</ul></details></li>");
        }
        TreeNode::Separator(label) => {
            out.push_str(r#"<li class="fd-sidebar-separator">"#);
            out.push_str(&text(label));
            out.push_str("</li>");
        }
        TreeNode::Link { text: label, url } => {
            out.push_str(&format!(
                r#"<li><a href="{}" class="fd-sidebar-item" target="_blank" rel="noreferrer noopener">{}</a></li>"#,
                attr(url),
                text(label)
            ));
        }
    }
}

fn render_page_link(page: &PageLink, current: &str, out: &mut String) {
    let active = if page.url == current { r#" data-active="true""# } else { "" };
    out.push_str(&format!(
        r#"<a href="{}" class="fd-sidebar-item"{active}>{}</a>"#,
        attr(&page.url),
        text(&page.title)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DocsCollection;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn collection(files: &[(&str, &str)]) -> DocsCollection {
        let dir = tempfile::tempdir().unwrap();
        for (relative, contents) in files {
            let path = dir.path().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        DocsCollection::load(dir.path(), "/docs").unwrap()
    }

    fn page(title: &str) -> String {
        format!("---\ntitle: {title}\n---\n")
    }

    fn titles(nodes: &[TreeNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|n| match n {
                TreeNode::Page(p) => p.title.clone(),
                TreeNode::Folder(f) => format!("{}/", f.title),
                TreeNode::Separator(s) => format!("--{s}--"),
                TreeNode::Link { text, .. } => format!("[{text}]"),
            })
            .collect()
    }

    #[test]
    fn index_first_then_alphabetical() {
        let docs = collection(&[
            ("zeta.mdx", page("Zeta").as_str()),
            ("index.mdx", page("Home").as_str()),
            ("alpha.mdx", page("Alpha").as_str()),
            ("guide/index.mdx", page("Guide").as_str()),
            ("guide/setup.mdx", page("Setup").as_str()),
        ]);
        let tree = docs.tree();
        assert_eq!(titles(&tree.children), vec!["Home", "Alpha", "Guide/", "Zeta"]);

        let TreeNode::Folder(guide) = &tree.children[2] else {
            panic!("expected folder");
        };
        assert_eq!(guide.index.as_ref().unwrap().url, "/docs/guide");
        assert_eq!(titles(&guide.children), vec!["Setup"]);
    }

    #[test]
    fn meta_pages_control_order() {
        let docs = collection(&[
            ("index.mdx", page("Home").as_str()),
            ("a.mdx", page("A").as_str()),
            ("b.mdx", page("B").as_str()),
            ("c.mdx", page("C").as_str()),
            (
                "meta.json",
                r#"{"pages": ["c", "---Reference---", "...", "[GitHub](https://github.com/Arch-Network)", "missing"]}"#,
            ),
        ]);
        assert_eq!(
            titles(&docs.tree().children),
            vec!["C", "--Reference--", "A", "B", "Home", "[GitHub]"]
        );
    }

    #[test]
    fn folder_title_prefers_meta() {
        let docs = collection(&[
            ("guides/meta.json", r#"{"title": "All Guides", "defaultOpen": true}"#),
            ("guides/index.mdx", page("Guides Index").as_str()),
            ("guides/one.mdx", page("One").as_str()),
        ]);
        let tree = docs.tree();
        let TreeNode::Folder(folder) = &tree.children[0] else {
            panic!("expected folder");
        };
        assert_eq!(folder.title, "All Guides");
        assert!(folder.default_open);
    }

    #[test]
    fn page_beside_folder_becomes_its_index() {
        let docs = collection(&[
            ("guide.mdx", page("Guide Page").as_str()),
            ("guide/setup.mdx", page("Setup").as_str()),
        ]);
        let tree = docs.tree();
        assert_eq!(titles(&tree.children), vec!["Guide Page/"]);
        let TreeNode::Folder(folder) = &tree.children[0] else {
            panic!("expected folder");
        };
        assert_eq!(
            folder.index,
            Some(PageLink {
                title: "Guide Page".to_string(),
                url: "/docs/guide".to_string(),
            })
        );
        assert_eq!(titles(&folder.children), vec!["Setup"]);
        assert!(tree.render("/docs/guide").contains(r#"data-active="true">Guide Page</a>"#));
    }

    #[test]
    fn render_marks_current_page() {
        let docs = collection(&[
            ("index.mdx", page("Home").as_str()),
            ("guide/setup.mdx", page("Setup").as_str()),
        ]);
        let html = docs.tree().render("/docs/guide/setup");
        assert!(html.contains("<details open><summary>guide</summary>"), "{html}");
        assert!(html.contains(
            r#"<a href="/docs/guide/setup" class="fd-sidebar-item" data-active="true">Setup</a>"#
        ));
        assert!(html.contains(r#"<a href="/docs" class="fd-sidebar-item">Home</a>"#));
    }
}
