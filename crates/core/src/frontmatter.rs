//! YAML frontmatter extraction for docs pages.

use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Frontmatter split off the top of a document.
#[derive(Debug)]
pub struct FrontmatterExtraction {
    /// Parsed frontmatter as a JSON object (empty when the document has none).
    pub value: JsonValue,
    /// Byte offset where the Markdown body begins.
    pub body_start: usize,
    /// Number of lines consumed before the body (used to remap body line numbers).
    pub body_line_offset: usize,
}

impl FrontmatterExtraction {
    fn empty() -> Self {
        Self {
            value: JsonValue::Object(Map::new()),
            body_start: 0,
            body_line_offset: 0,
        }
    }

    /// Returns the body slice of `input`.
    pub fn body<'a>(&self, input: &'a str) -> &'a str {
        &input[self.body_start..]
    }
}

/// Errors emitted while parsing or extracting frontmatter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Unclosed YAML fence (missing terminating `---`).
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Extracts YAML frontmatter from the top of a document.
///
/// Leading blank lines and a UTF-8 BOM are skipped. A document whose first
/// non-blank line is not `---` has no frontmatter.
pub fn extract_frontmatter(input: &str) -> Result<FrontmatterExtraction, FrontmatterError> {
    let bom = if input.starts_with('\u{feff}') {
        '\u{feff}'.len_utf8()
    } else {
        0
    };

    let mut offset = bom;
    let mut lines = input[bom..].split_inclusive('\n').enumerate();
    let mut yaml_start = None;

    for (_, line) in lines.by_ref() {
        offset += line.len();
        if line.trim().is_empty() {
            continue;
        }
        if !is_fence(line) {
            return Ok(FrontmatterExtraction::empty());
        }
        yaml_start = Some(offset);
        break;
    }

    let Some(yaml_start) = yaml_start else {
        return Ok(FrontmatterExtraction::empty());
    };

    for (index, line) in lines {
        let fence_start = offset;
        offset += line.len();
        if is_fence(line) {
            let value = parse_block(&input[yaml_start..fence_start])?;
            return Ok(FrontmatterExtraction {
                value,
                body_start: offset,
                body_line_offset: index + 1,
            });
        }
    }

    Err(FrontmatterError::Unterminated)
}

fn parse_block(block: &str) -> Result<JsonValue, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(JsonValue::Object(Map::new()));
    }

    let yaml: serde_yaml::Value =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;
    match serde_json::to_value(yaml).map_err(|err| FrontmatterError::Parse(err.to_string()))? {
        JsonValue::Null => Ok(JsonValue::Object(Map::new())),
        value @ JsonValue::Object(_) => Ok(value),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

fn is_fence(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == "---"
}
