//! Markdown vault storage for stories and timelines.
//!
//! Stories live as folders under a stories directory; each folder holds
//! timeline documents (markdown with YAML frontmatter) and an assets
//! subfolder with local screenshots and recordings.

pub mod error;
pub mod frontmatter;
pub mod store;

pub use error::{VaultError, VaultResult};
pub use frontmatter::Document;
pub use store::Vault;
