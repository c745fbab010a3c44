//! MDX parsing with pluggable AST transforms.

use crate::SourceLocation;
use crate::error::SiteError;
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Trait for mutating the parsed MDAST after parsing (remark-style plugins).
pub trait AstTransform: Send + Sync {
    /// Mutate the parsed markdown AST in place.
    fn transform(&self, root: &mut Node);
}

impl<F> AstTransform for F
where
    F: Fn(&mut Node) + Send + Sync,
{
    fn transform(&self, root: &mut Node) {
        (self)(root)
    }
}

/// Construct switches for the parser. Plain data, so a pipeline can be
/// shared across worker threads; the markdown-rs options are built per parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// JSX, ESM and expressions.
    pub mdx: bool,
    /// GitHub Flavored Markdown.
    pub gfm: bool,
    /// YAML frontmatter.
    pub frontmatter: bool,
    /// Indented code blocks; off for MDX, where component children are indented.
    pub code_indented: bool,
}

impl ParseOptions {
    /// Documentation MDX: GFM, JSX, ESM, expressions and frontmatter.
    pub const fn mdx() -> Self {
        Self {
            mdx: true,
            gfm: true,
            frontmatter: true,
            code_indented: false,
        }
    }

    /// Builds the markdown-rs options.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            code_indented: self.code_indented,
            html_flow: false,
            html_text: false,
            ..markdown::Constructs::default()
        };
        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }
        if self.mdx {
            constructs.mdx_esm = true;
            constructs.mdx_expression_flow = true;
            constructs.mdx_expression_text = true;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }
        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::mdx()
    }
}

/// Parser plus an ordered list of AST transforms.
pub struct ParserPipeline {
    options: ParseOptions,
    transforms: Vec<Box<dyn AstTransform>>,
}

impl ParserPipeline {
    /// Create a pipeline with the given construct switches.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            transforms: Vec::new(),
        }
    }

    /// MDX pipeline with no transforms.
    pub fn mdx() -> Self {
        Self::new(ParseOptions::mdx())
    }

    /// Append an AST transform; transforms run in insertion order.
    pub fn with_transform<T: AstTransform + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Parse a document body and run every transform.
    ///
    /// Parse failures are reported as content validation errors; the location
    /// is relative to the body, so callers add their frontmatter line offset.
    pub fn parse(&self, input: &str) -> Result<Node, SiteError> {
        let mut root = markdown::to_mdast(input, &self.options.to_markdown()).map_err(|message| {
            SiteError::content_at(message.reason.clone(), message_location(&message))
        })?;
        for transform in &self.transforms {
            transform.transform(&mut root);
        }
        Ok(root)
    }
}

impl Default for ParserPipeline {
    fn default() -> Self {
        Self::mdx()
    }
}

fn message_location(message: &Message) -> SourceLocation {
    match message.place.as_deref() {
        Some(Place::Point(point)) => SourceLocation::new(point.line, point.column),
        Some(Place::Position(position)) => {
            SourceLocation::new(position.start.line, position.start.column)
        }
        None => SourceLocation::new(1, 1),
    }
}
