use std::path::PathBuf;

/// Runtime configuration for both subcommands.
///
/// Credentials are optional at load time because only `publish` talks to
/// the provider; the publisher rejects a missing key/store id before any
/// network call.
#[derive(Clone)]
pub struct AppConfig {
    pub lsq_api_key: Option<String>,
    pub lsq_store_id: Option<u64>,
    pub log_level: String,
    /// Where the publisher writes, and the injector reads, the slug →
    /// variant-id JSON artifact.
    pub variant_map_path: PathBuf,
    /// The storefront source file whose `VARIANT_MAP` block gets rewritten.
    pub target_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Pause between the create/list/update steps of a single item.
    pub step_delay_ms: u64,
    /// Pause after every item, successful or not.
    pub item_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "lsq_api_key",
                &self.lsq_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("lsq_store_id", &self.lsq_store_id)
            .field("log_level", &self.log_level)
            .field("variant_map_path", &self.variant_map_path)
            .field("target_path", &self.target_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("step_delay_ms", &self.step_delay_ms)
            .field("item_delay_ms", &self.item_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
