//! Static site build: configuration, content, redirects and output files.

use crate::config::{SiteConfig, active_environment};
use crate::content::{CompiledPage, DocsCollection};
use crate::layout::DocsLayout;
use crate::nav::base_options;
use crate::registry::{ComponentRegistry, build_registry};
use crate::router::Router;
use crate::shell::RootShell;
use archdocs_core::{AliasMap, RedirectTable, SiteError};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Redirect manifest consumed by the hosting layer.
pub const REDIRECTS_FILE: &str = "redirects.json";
/// Page manifest written to the manifest directory.
pub const PAGES_FILE: &str = "pages.json";
/// Not-found page.
pub const NOT_FOUND_FILE: &str = "404.html";

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages written.
    pub pages: usize,
    /// Redirect rules written to the manifest.
    pub redirects: usize,
    /// Output directory.
    pub out_dir: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RedirectEntry<'a> {
    source: &'a str,
    destination: &'a str,
    permanent: bool,
    status_code: u16,
}

/// A loaded, compiled site ready to route and render.
#[derive(Debug)]
pub struct Site {
    router: Router,
    layout: DocsLayout,
    shell: RootShell,
    default_description: Option<String>,
}

impl Site {
    /// Request router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Full HTML document for `page`.
    pub fn render_page(&self, page: &CompiledPage) -> String {
        let description = page
            .description
            .as_deref()
            .or(self.default_description.as_deref());
        self.shell
            .render(&page.title, description, &self.layout.render_page(page))
    }

    /// Full HTML document for the not-found page.
    pub fn render_not_found(&self) -> String {
        self.shell.render(
            "Not Found",
            self.default_description.as_deref(),
            &self.layout.render_not_found(),
        )
    }
}

/// Drives a build for one project root and environment.
#[derive(Debug)]
pub struct SiteBuilder {
    aliases: AliasMap,
    config: SiteConfig,
    environment: String,
    overrides: Option<ComponentRegistry>,
}

impl SiteBuilder {
    /// Loads `archdocs.yaml` from `root` and selects the environment.
    pub fn new(root: impl Into<PathBuf>, environment: Option<&str>) -> Result<Self, SiteError> {
        let root = root.into();
        let config = SiteConfig::load(&root)?;
        Ok(Self::with_config(root, config, environment))
    }

    /// Builder with an explicit configuration.
    pub fn with_config(root: impl Into<PathBuf>, config: SiteConfig, environment: Option<&str>) -> Self {
        Self {
            aliases: AliasMap::new(root),
            config,
            environment: active_environment(environment),
            overrides: None,
        }
    }

    /// Component overrides layered over the default registry.
    pub fn with_components(mut self, overrides: ComponentRegistry) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Active environment name.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Redirect table of the active environment.
    pub fn redirects(&self) -> Result<RedirectTable, SiteError> {
        self.config.redirect_table(&self.environment)
    }

    /// Loads, validates and compiles everything without writing output.
    pub fn prepare(&self) -> Result<Site, SiteError> {
        let redirects = self.redirects()?;
        let content_dir = self.aliases.resolve_existing(&self.config.content_dir)?;
        let collection = DocsCollection::load(&content_dir, &self.config.base_url)?;
        let registry = build_registry(self.overrides.clone());
        let pages = collection.compile(&registry)?;

        Ok(Site {
            router: Router::new(redirects, pages),
            layout: DocsLayout::new(base_options(), collection.tree(), self.config.base_url.clone()),
            shell: RootShell::new(self.config.lang.clone(), self.config.theme_color.clone()),
            default_description: self.config.description.clone(),
        })
    }

    /// Builds the site into `out_dir`.
    pub fn build(&self) -> Result<BuildReport, SiteError> {
        let site = self.prepare()?;
        let out_dir = self.aliases.resolve(&self.config.out_dir);
        self.reset_out_dir(&out_dir)?;

        site.router()
            .pages()
            .par_iter()
            .try_for_each(|page| write_page(&site, page, &out_dir))?;
        fs::write(out_dir.join(NOT_FOUND_FILE), site.render_not_found())?;

        let redirects = write_redirects(site.router().redirects(), &out_dir)?;
        write_manifest(site.router().pages(), &self.aliases.resolve(&self.config.manifest_dir))?;

        let public_dir = self.aliases.resolve(&self.config.public_dir);
        if public_dir.is_dir() {
            copy_public(&public_dir, &out_dir)?;
        }

        let report = BuildReport {
            pages: site.router().pages().len(),
            redirects,
            out_dir,
        };
        log::info!(
            "built {} pages and {} redirects into {}",
            report.pages,
            report.redirects,
            report.out_dir.display()
        );
        Ok(report)
    }

    /// Empties `out_dir` so pages of deleted documents are not served. Refuses
    /// an output directory that would swallow the project or its sources.
    fn reset_out_dir(&self, out_dir: &Path) -> Result<(), SiteError> {
        let protected = [
            self.aliases.root().to_path_buf(),
            self.aliases.resolve(&self.config.content_dir),
            self.aliases.resolve(&self.config.public_dir),
            self.aliases.resolve(&self.config.manifest_dir),
        ];
        if let Some(inside) = protected.iter().find(|p| p.starts_with(out_dir)) {
            return Err(SiteError::config(format!(
                "out_dir `{}` would overwrite `{}`",
                out_dir.display(),
                inside.display()
            )));
        }
        if out_dir.exists() {
            log::debug!("clearing {}", out_dir.display());
            fs::remove_dir_all(out_dir)?;
        }
        fs::create_dir_all(out_dir)?;
        Ok(())
    }
}

/// Output file for a page URL: `/docs/a` → `<out>/docs/a/index.html`.
pub fn page_output_path(out_dir: &Path, url: &str) -> PathBuf {
    let relative = url.trim_matches('/');
    if relative.is_empty() {
        out_dir.join("index.html")
    } else {
        out_dir.join(relative).join("index.html")
    }
}

fn write_page(site: &Site, page: &CompiledPage, out_dir: &Path) -> Result<(), SiteError> {
    let path = page_output_path(out_dir, &page.url);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, site.render_page(page))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

fn write_redirects(table: &RedirectTable, out_dir: &Path) -> Result<usize, SiteError> {
    let entries: Vec<RedirectEntry<'_>> = table
        .rules()
        .map(|rule| RedirectEntry {
            source: &rule.source,
            destination: &rule.destination,
            permanent: rule.permanent,
            status_code: rule.status().code(),
        })
        .collect();
    fs::write(
        out_dir.join(REDIRECTS_FILE),
        serde_json::to_string_pretty(&entries)?,
    )?;
    Ok(entries.len())
}

fn write_manifest(pages: &[CompiledPage], manifest_dir: &Path) -> Result<(), SiteError> {
    fs::create_dir_all(manifest_dir)?;
    fs::write(
        manifest_dir.join(PAGES_FILE),
        serde_json::to_string_pretty(pages)?,
    )?;
    Ok(())
}

fn copy_public(public_dir: &Path, out_dir: &Path) -> Result<(), SiteError> {
    for entry in WalkDir::new(public_dir).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            SiteError::Io(
                err.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop in public directory")),
            )
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(public_dir).unwrap_or(entry.path());
        let target = out_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
    }
    Ok(())
}
