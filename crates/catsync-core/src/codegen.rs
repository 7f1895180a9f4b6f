//! Generation and in-place replacement of the storefront `VARIANT_MAP`
//! block.
//!
//! The block is located structurally — opening declaration token, then a
//! brace-depth scan to the matching close and its terminating semicolon —
//! rather than by regex, so a nested brace anywhere in the block cannot
//! truncate the match. Everything outside the located span is preserved
//! byte for byte.

use std::ops::Range;

use thiserror::Error;

use crate::catalog::{CatalogItem, BUNDLES, SKILLS};
use crate::variant_map::VariantMap;

/// Opening token of the declaration the injector owns inside the target
/// file. The span runs from here to the first brace that closes it,
/// followed by `;`.
pub const BLOCK_OPEN: &str = "const VARIANT_MAP: Record<string, string> = {";

/// Errors raised while locating the declaration block in the target file.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The opening token is missing; the target file's structure has
    /// drifted from what this tool expects.
    #[error("VARIANT_MAP declaration not found in target file")]
    BlockNotFound,

    /// The opening token exists but nothing terminates it.
    #[error("VARIANT_MAP declaration is not terminated by `}};`")]
    UnterminatedBlock,
}

/// Render the full declaration block from the fixed catalog order.
///
/// Every catalog slug appears exactly once, skills first then bundles,
/// in list order, never the map's own order. Slugs absent from `map`
/// render with an empty value so the line count is stable.
#[must_use]
pub fn render_block(map: &VariantMap) -> String {
    render_sections(
        map,
        &[("Skills", SKILLS), ("Bundles", BUNDLES)],
    )
}

fn render_sections(map: &VariantMap, sections: &[(&str, &[CatalogItem])]) -> String {
    let mut lines = vec![BLOCK_OPEN.to_string()];
    for (label, items) in sections {
        lines.push(format!("  // {label}"));
        for item in *items {
            let variant_id = map.get(item.slug).unwrap_or("");
            lines.push(format!("  \"{}\": \"{variant_id}\",", item.slug));
        }
    }
    lines.push("};".to_string());
    lines.join("\n")
}

/// Replace the existing declaration block in `source` with `block`.
///
/// # Errors
///
/// [`CodegenError::BlockNotFound`] / [`CodegenError::UnterminatedBlock`]
/// when the target file does not contain a well-formed block; `source` is
/// never partially modified on error.
pub fn replace_block(source: &str, block: &str) -> Result<String, CodegenError> {
    let span = locate_block(source)?;
    let mut updated = String::with_capacity(source.len() + block.len());
    updated.push_str(&source[..span.start]);
    updated.push_str(block);
    updated.push_str(&source[span.end..]);
    Ok(updated)
}

/// Locate the byte span of the declaration block, `const …` through `};`.
fn locate_block(source: &str) -> Result<Range<usize>, CodegenError> {
    let start = source.find(BLOCK_OPEN).ok_or(CodegenError::BlockNotFound)?;
    let body_start = start + BLOCK_OPEN.len();

    // BLOCK_OPEN ends with the opening brace, so the scan starts at depth 1.
    let mut depth = 1usize;
    let mut close = None;
    for (offset, c) in source[body_start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(body_start + offset);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close.ok_or(CodegenError::UnterminatedBlock)?;

    // The declaration ends at the first `;` after the matching brace,
    // allowing whitespace between the two.
    let rest = &source[close + 1..];
    let mut end = None;
    for (offset, c) in rest.char_indices() {
        if c == ';' {
            end = Some(close + 1 + offset + 1);
            break;
        }
        if !c.is_whitespace() {
            break;
        }
    }
    let end = end.ok_or(CodegenError::UnterminatedBlock)?;

    Ok(start..end)
}
