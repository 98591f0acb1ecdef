//! Managed regions inside existing documents.
//!
//! A region is delimited by `<!-- tag:embed:start -->` and `<!-- tag:embed:end -->`.
//! Merging replaces every region for the tag with freshly rendered content, or
//! appends a new region after a blank line when the document has none. Repeated
//! merges of the same content are byte-identical.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use regex::bytes::{NoExpand, Regex};
use tracing::debug;

use crate::error::Result;

/// Artifact kinds, each owning one region tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedTag {
    Wbs,
    WbsTable,
    Pert,
    Kanban,
    Bug,
    Epic,
}

impl EmbedTag {
    /// Marker tag name.
    pub fn name(self) -> &'static str {
        match self {
            EmbedTag::Wbs => "wbs",
            EmbedTag::WbsTable => "wbsTable",
            EmbedTag::Pert => "pert",
            EmbedTag::Kanban => "kanban",
            EmbedTag::Bug => "bug",
            EmbedTag::Epic => "epic",
        }
    }

    /// Content as it appears inside the region. PlantUML charts are fenced.
    pub fn wrap(self, content: &str) -> String {
        match self {
            EmbedTag::Wbs | EmbedTag::Pert => format!("```plantuml\n{}\n```\n", content),
            _ => content.to_string(),
        }
    }
}

/// Full tagged block for `content`, ending in a newline.
pub fn embed_block(tag: &str, content: &str) -> String {
    format!(
        "<!-- {tag}:embed:start -->\n\n{content}\n<!-- {tag}:embed:end -->\n",
        tag = tag,
        content = content
    )
}

/// Pattern matching a whole region for `tag`: leading indentation, any bytes
/// between the markers, and trailing blanks plus one line break.
pub fn region_pattern(tag: &str) -> Result<Regex> {
    let tag = regex::escape(tag);
    let pattern = format!(
        r"(?m)^[ \t]*<!--\s*{tag}:embed:start\s*-->(?s-u:.*?)<!--\s*{tag}:embed:end\s*-->[ \t]*(?:\r?\n)?",
        tag = tag
    );
    Ok(Regex::new(&pattern)?)
}

/// Merge `content` into the `existing` document bytes under `tag`.
///
/// The document need not be UTF-8; bytes outside the region are copied as-is.
pub fn merge_region(existing: &[u8], content: &str, tag: &str) -> Result<Vec<u8>> {
    let block = embed_block(tag, content);
    let re = region_pattern(tag)?;

    let replacements = re.find_iter(existing).count();
    if replacements > 0 {
        debug!(tag, replacements, "replacing embedded regions");
        return Ok(re.replace_all(existing, NoExpand(block.as_bytes())).into_owned());
    }

    debug!(tag, "no embed markers found, appending region");
    if existing.is_empty() {
        return Ok(block.into_bytes());
    }
    let mut merged = Vec::with_capacity(existing.len() + 2 + block.len());
    merged.extend_from_slice(existing);
    merged.extend_from_slice(b"\n\n");
    merged.extend_from_slice(block.as_bytes());
    Ok(merged)
}

/// Read, merge, truncate and rewrite `file` in place through the one handle.
pub fn merge_into_file(file: &mut File, content: &str, tag: &str) -> Result<()> {
    file.seek(SeekFrom::Start(0))?;
    let mut existing = Vec::new();
    file.read_to_end(&mut existing)?;

    let merged = merge_region(&existing, content, tag)?;

    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(&merged)?;
    file.flush()?;
    Ok(())
}
