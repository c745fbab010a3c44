#![deny(missing_docs)]
//! archdocs site engine: component registry, rendering, layout, routing and
//! static build.

/// Static build driver.
pub mod builder;
/// Site configuration.
pub mod config;
/// Docs collection and page tree.
pub mod content;
/// Docs page layout.
pub mod layout;
/// Theme-aware logo.
pub mod logo;
/// Navigation options.
pub mod nav;
/// MDX component registry.
pub mod registry;
/// MDAST to HTML rendering.
pub mod renderer;
/// Request routing.
pub mod router;
/// HTML document shell.
pub mod shell;

pub use builder::{BuildReport, Site, SiteBuilder};
pub use config::{EnvironmentConfig, RedirectSource, SiteConfig, active_environment};
pub use content::{CompiledPage, DocPage, DocsCollection, PageTree, TreeNode};
pub use layout::DocsLayout;
pub use logo::{Logo, LogoState, Theme, render_logo, render_static};
pub use nav::{LinkActive, Markup, NavLink, NavOptions, base_options};
pub use registry::{Component, ComponentRegistry, Props, build_registry};
pub use renderer::{RenderedDocument, TocEntry, render_document};
pub use router::{Route, Router};
pub use shell::RootShell;
