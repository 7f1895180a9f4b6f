//! The `publish` subcommand.
//!
//! Walks the compiled-in catalog in order and runs the three-step remote
//! workflow per item: create a draft product, fetch its auto-created
//! variant, then price and activate that variant. Per-item failures are
//! logged and skipped rather than propagated so a single bad item does not
//! abort the full run; only an all-items-failed run exits non-zero.

use std::time::Duration;

use anyhow::{bail, Context};
use catsync_core::catalog::{self, CatalogItem, ItemKind};
use catsync_core::variant_map::VariantMap;
use catsync_core::{codegen, AppConfig};
use catsync_lemonsqueezy::{LemonSqueezyClient, LemonSqueezyError};

pub async fn run(config: &AppConfig, only_slug: Option<&str>) -> anyhow::Result<()> {
    // Credentials are rejected before any network call is made.
    let api_key = config
        .lsq_api_key
        .as_deref()
        .context("LSQ_API_KEY is not set; export it before running `catsync publish`")?;
    let store_id = config
        .lsq_store_id
        .context("LSQ_STORE_ID is not set; export the numeric store id before running `catsync publish`")?;

    catalog::validate_catalog()
        .map_err(|msg| anyhow::anyhow!("catalog definition error: {msg}"))?;
    let items = select_items(only_slug)?;

    let client = LemonSqueezyClient::new(api_key, config.request_timeout_secs, &config.user_agent)?
        .retry_policy(config.max_retries, config.retry_backoff_base_ms);

    tracing::info!(
        items = items.len(),
        store_id,
        "publishing catalog to Lemon Squeezy"
    );

    let (map, failed) = publish_catalog(&client, config, store_id, &items).await;

    if failed == items.len() {
        bail!("all {failed} catalog items failed to publish");
    }

    map.save(&config.variant_map_path)?;
    tracing::info!(
        path = %config.variant_map_path.display(),
        entries = map.len(),
        "variant map written"
    );
    if failed > 0 {
        tracing::warn!(
            failed,
            total = items.len(),
            "some items failed to publish; re-run after fixing, or create them in the dashboard"
        );
    }

    print_summary(&map, items.len() - failed, items.len(), config);
    Ok(())
}

/// Resolve the items for this run: the full catalog, or a single item when
/// `--slug` was given. An unknown slug is fatal.
fn select_items(only_slug: Option<&str>) -> anyhow::Result<Vec<(ItemKind, &'static CatalogItem)>> {
    match only_slug {
        Some(slug) => {
            let entry = catalog::find_by_slug(slug).ok_or_else(|| {
                anyhow::anyhow!(
                    "catalog item '{slug}' not found; check the slug against the compiled-in lists"
                )
            })?;
            Ok(vec![entry])
        }
        None => Ok(catalog::all_items()),
    }
}

/// Publish `items` strictly in sequence, pausing between items, and return
/// the accumulated variant map plus the failed-item count.
async fn publish_catalog(
    client: &LemonSqueezyClient,
    config: &AppConfig,
    store_id: u64,
    items: &[(ItemKind, &'static CatalogItem)],
) -> (VariantMap, usize) {
    let mut map = VariantMap::new();
    let mut failed: usize = 0;

    for &(kind, item) in items {
        match publish_item(client, config, store_id, item).await {
            Ok((product_id, variant_id)) => {
                tracing::info!(
                    kind = %kind,
                    slug = item.slug,
                    product_id,
                    variant_id,
                    price_cents = item.price_cents,
                    "published"
                );
                map.insert(item.slug, variant_id);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(
                    kind = %kind,
                    slug = item.slug,
                    error = %e,
                    "failed to publish item; continuing with the next"
                );
            }
        }
        // Inter-item pause regardless of outcome, to stay under the
        // provider's rate limits.
        tokio::time::sleep(Duration::from_millis(config.item_delay_ms)).await;
    }

    (map, failed)
}

/// The three-step remote workflow for one item. The pauses between steps
/// give the provider time to materialise the default variant and keep the
/// call rate polite.
async fn publish_item(
    client: &LemonSqueezyClient,
    config: &AppConfig,
    store_id: u64,
    item: &CatalogItem,
) -> Result<(String, String), LemonSqueezyError> {
    let product_id = client
        .create_product(store_id, item.name, item.description)
        .await?;
    tokio::time::sleep(Duration::from_millis(config.step_delay_ms)).await;

    let variant_id = client.default_variant_id(&product_id).await?;
    tokio::time::sleep(Duration::from_millis(config.step_delay_ms)).await;

    client
        .activate_variant(&variant_id, item.price_cents)
        .await?;
    Ok((product_id, variant_id))
}

/// End-of-run console report: counts, the ready-to-paste block, and the
/// follow-on manual steps the tool cannot perform.
fn print_summary(map: &VariantMap, published: usize, total: usize, config: &AppConfig) {
    println!();
    println!("Published {published}/{total} catalog items.");
    println!();
    println!("── VARIANT_MAP for the storefront ─────────────────────────────");
    println!();
    println!("{}", codegen::render_block(map));
    println!();
    println!(
        "Run `catsync apply` to write this block into {}.",
        config.target_path.display()
    );
    println!();
    println!("Next steps:");
    println!("  1. Upload the packaged ZIP for each product in the Lemon Squeezy");
    println!("     dashboard (https://app.lemonsqueezy.com/products).");
    println!("  2. Configure the store webhook for checkout events.");
    println!("  3. Deploy the storefront with the LSQ_* env vars set.");
}
