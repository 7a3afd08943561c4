//! YAML frontmatter codec for vault markdown documents.
//!
//! Documents open with a `---` fenced YAML header followed by free-form
//! markdown. Parsing keeps the body verbatim so a rewrite never loses
//! the director's notes below the header.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{VaultError, VaultResult};

/// A parsed markdown document: typed header plus body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    pub frontmatter: T,
    pub content: String,
}

/// Parse the YAML frontmatter and content out of a markdown string.
pub fn parse<T: DeserializeOwned>(markdown: &str) -> VaultResult<Document<T>> {
    let rest = markdown
        .strip_prefix("---")
        .ok_or(VaultError::MissingFrontmatter)?;
    let rest = rest.strip_prefix('\n').unwrap_or(rest);

    let end = rest.find("\n---").ok_or(VaultError::MissingFrontmatter)?;
    let header = &rest[..end];
    let body = &rest[end + 4..];
    let body = body.strip_prefix('\n').unwrap_or(body);

    let frontmatter = serde_yaml::from_str(header)?;
    Ok(Document {
        frontmatter,
        content: body.trim().to_string(),
    })
}

/// Serialize frontmatter and content back to a markdown string.
pub fn serialize<T: Serialize>(frontmatter: &T, content: &str) -> VaultResult<String> {
    let yaml = serde_yaml::to_string(frontmatter)?;

    let mut out = String::with_capacity(yaml.len() + content.len() + 16);
    out.push_str("---\n");
    out.push_str(&yaml);
    if !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("---\n");
    if !content.is_empty() {
        out.push('\n');
        out.push_str(content);
        out.push('\n');
    }
    Ok(out)
}
