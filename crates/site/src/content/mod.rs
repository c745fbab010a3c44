//! Docs collection: discovery, validation and compilation of MDX pages.
//!
//! Every `.mdx`/`.md` file under the content directory is a page whose
//! frontmatter must satisfy [`PageFrontmatter`]; every `meta.json` describes
//! its folder and must satisfy [`MetaDescriptor`]. Validation failures abort
//! loading with the offending file in the error.

pub mod tree;

pub use tree::{Folder, PageLink, PageTree, TreeNode};

use crate::registry::ComponentRegistry;
use crate::renderer::{TocEntry, render_document};
use archdocs_core::{
    MermaidTransform, MetaDescriptor, PageFrontmatter, ParserPipeline, SiteError, extract_frontmatter,
    page_slugs,
};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const META_FILE: &str = "meta.json";

/// A validated, not yet compiled documentation page.
#[derive(Debug, Clone)]
pub struct DocPage {
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// Path relative to the content directory.
    pub relative: PathBuf,
    /// URL slugs derived from the relative path.
    pub slugs: Vec<String>,
    /// Public URL of the page.
    pub url: String,
    /// Validated frontmatter.
    pub frontmatter: PageFrontmatter,
    source: String,
    body_start: usize,
    body_line_offset: usize,
}

impl DocPage {
    /// Markdown body without frontmatter.
    pub fn body(&self) -> &str {
        &self.source[self.body_start..]
    }

    /// File stem (`intro` for `quick-start/intro.mdx`).
    pub fn stem(&self) -> String {
        self.relative
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory of the page relative to the content root.
    pub fn folder(&self) -> &Path {
        self.relative.parent().unwrap_or_else(|| Path::new(""))
    }

    fn load(path: &Path, relative: PathBuf, base_url: &str) -> Result<Self, SiteError> {
        let source = read_source(path)?;
        let extraction =
            extract_frontmatter(&source).map_err(|err| SiteError::content(err.to_string(), path))?;
        let frontmatter = PageFrontmatter::validate(extraction.value, path)?;
        let slugs = page_slugs(&relative);
        let url = page_url(base_url, &slugs);

        Ok(Self {
            path: path.to_path_buf(),
            relative,
            slugs,
            url,
            frontmatter,
            body_start: extraction.body_start,
            body_line_offset: extraction.body_line_offset,
            source,
        })
    }
}

/// A page rendered to HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledPage {
    /// Public URL.
    pub url: String,
    /// URL slugs.
    pub slugs: Vec<String>,
    /// Page title.
    pub title: String,
    /// Page description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Body HTML (not part of the manifest).
    #[serde(skip)]
    pub html: String,
    /// Table of contents.
    pub toc: Vec<TocEntry>,
    /// Full-width page without table of contents.
    pub full: bool,
    /// Source file relative to the content directory.
    pub source: PathBuf,
}

/// All pages and folder descriptors of one content directory.
#[derive(Debug, Clone, Default)]
pub struct DocsCollection {
    pages: Vec<DocPage>,
    metas: BTreeMap<PathBuf, MetaDescriptor>,
}

impl DocsCollection {
    /// Walks `dir`, validating every page and `meta.json`. Pages are served
    /// under `base_url`.
    pub fn load(dir: &Path, base_url: &str) -> Result<Self, SiteError> {
        let mut pages = Vec::new();
        let mut metas = BTreeMap::new();
        let mut urls: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                SiteError::Io(err.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other("filesystem loop in content directory")
                }))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(dir).unwrap_or(path).to_path_buf();

            if entry.file_name() == META_FILE {
                let source = read_source(path)?;
                let meta = MetaDescriptor::parse(&source, path)?;
                let folder = relative.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
                log::debug!("loaded meta for `{}`", folder.display());
                metas.insert(folder, meta);
                continue;
            }

            if !is_document(path) {
                continue;
            }
            let page = DocPage::load(path, relative, base_url)?;
            if let Some(previous) = urls.insert(page.url.clone(), page.path.clone()) {
                return Err(SiteError::content(
                    format!("URL `{}` is already served by `{}`", page.url, previous.display()),
                    path,
                ));
            }
            log::debug!("loaded page {} from {}", page.url, page.relative.display());
            pages.push(page);
        }

        log::info!("loaded {} pages from {}", pages.len(), dir.display());
        Ok(Self { pages, metas })
    }

    /// Pages in path order.
    pub fn pages(&self) -> &[DocPage] {
        &self.pages
    }

    /// Folder descriptors keyed by folder path relative to the content root.
    pub fn metas(&self) -> &BTreeMap<PathBuf, MetaDescriptor> {
        &self.metas
    }

    /// Sidebar tree for this collection.
    pub fn tree(&self) -> PageTree {
        PageTree::build(&self.pages, &self.metas)
    }

    /// Compiles every page in parallel. Output keeps path order.
    pub fn compile(&self, registry: &ComponentRegistry) -> Result<Vec<CompiledPage>, SiteError> {
        let pipeline = ParserPipeline::mdx().with_transform(MermaidTransform);
        let compiled = self
            .pages
            .par_iter()
            .map(|page| compile_page(page, &pipeline, registry))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("compiled {} pages", compiled.len());
        Ok(compiled)
    }
}

/// Parses and renders a single page.
pub fn compile_page(
    page: &DocPage,
    pipeline: &ParserPipeline,
    registry: &ComponentRegistry,
) -> Result<CompiledPage, SiteError> {
    let root = pipeline
        .parse(page.body())
        .map_err(|err| relocate(err, page))?;
    let rendered = render_document(&root, registry).map_err(|err| relocate(err, page))?;

    Ok(CompiledPage {
        url: page.url.clone(),
        slugs: page.slugs.clone(),
        title: page.frontmatter.title.clone(),
        description: page.frontmatter.description.clone(),
        html: rendered.html,
        toc: rendered.headings,
        full: page.frontmatter.is_full(),
        source: page.relative.clone(),
    })
}

/// Maps body-relative error locations back onto the source file.
fn relocate(err: SiteError, page: &DocPage) -> SiteError {
    match err {
        SiteError::ContentValidation {
            message,
            mut location,
        } => {
            location.line += page.body_line_offset;
            SiteError::content_at(message, location.in_file(&page.path))
        }
        other => other,
    }
}

/// Reads a content file. Undecodable bytes are the author's problem, so they
/// surface as a content error naming the file.
fn read_source(path: &Path) -> Result<String, SiteError> {
    std::fs::read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::InvalidData => SiteError::content(format!("cannot read: {err}"), path),
        _ => SiteError::Io(err),
    })
}

fn is_document(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("mdx") | Some("md")
    )
}

/// `base_url` joined with the page slugs.
pub fn page_url(base_url: &str, slugs: &[String]) -> String {
    let base = base_url.trim_end_matches('/');
    if slugs.is_empty() {
        if base.is_empty() {
            "/".to_string()
        } else {
            base.to_string()
        }
    } else {
        format!("{base}/{}", slugs.join("/"))
    }
}
