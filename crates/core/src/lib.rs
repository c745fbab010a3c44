#![deny(missing_docs)]
//! archdocs core: redirect table, build path aliases, content schemas,
//! frontmatter extraction and the MDX parse pipeline.

/// Build path alias resolution.
pub mod alias;
/// Error and source location types.
pub mod error;
/// YAML frontmatter extraction helpers.
pub mod frontmatter;
/// Diagram fence rewriting.
pub mod mermaid;
/// MDX parsing and AST transform hooks.
pub mod parse;
/// Legacy URL redirects.
pub mod redirect;
/// Page frontmatter and folder meta schemas.
pub mod schema;
/// Heading anchors and page slugs.
pub mod slug;

pub use alias::AliasMap;
pub use error::{Result, SiteError, SourceLocation};
pub use frontmatter::{FrontmatterError, FrontmatterExtraction, extract_frontmatter};
pub use mermaid::{MERMAID_COMPONENT, MermaidTransform};
pub use parse::{AstTransform, ParseOptions, ParserPipeline};
pub use redirect::{RedirectOutcome, RedirectProfile, RedirectRule, RedirectStatus, RedirectTable};
pub use schema::{MetaDescriptor, PageFrontmatter};
pub use slug::{Slugger, page_slugs, slugify};
