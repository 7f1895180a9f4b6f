//! The `apply` subcommand.
//!
//! Reads the variant map the publisher produced and splices a freshly
//! rendered `VARIANT_MAP` block into the storefront source file. The file
//! is only written after the existing block has been located, so a
//! drifted target is left untouched. No backup is taken; the target is
//! expected to be under version control.

use anyhow::Context;
use catsync_core::variant_map::VariantMap;
use catsync_core::{codegen, AppConfig};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let map = VariantMap::load(&config.variant_map_path)?;
    tracing::info!(
        path = %config.variant_map_path.display(),
        entries = map.len(),
        "variant map loaded"
    );

    let target = &config.target_path;
    let source = std::fs::read_to_string(target)
        .with_context(|| format!("failed to read target file {}", target.display()))?;

    let block = codegen::render_block(&map);
    let updated = codegen::replace_block(&source, &block)
        .with_context(|| format!("cannot update {}", target.display()))?;

    std::fs::write(target, updated)
        .with_context(|| format!("failed to write target file {}", target.display()))?;
    tracing::info!(path = %target.display(), "VARIANT_MAP block rewritten");

    println!("VARIANT_MAP updated in {}.", target.display());
    println!();
    println!("Next steps:");
    println!("  1. Review the file: every slug should carry a variant id.");
    println!("  2. Set LSQ_API_KEY, LSQ_STORE_ID and the webhook secret on the deploy host.");
    println!("  3. Point the Lemon Squeezy webhook at the storefront's checkout endpoint.");
    println!("  4. Commit and deploy.");
    Ok(())
}
