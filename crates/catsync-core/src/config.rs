use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid. Missing
/// credentials are not an error here; they surface as `None` and are
/// rejected by the publisher before any network call.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let lsq_api_key = lookup("LSQ_API_KEY").ok().filter(|v| !v.is_empty());

    // A present-but-garbled store id is a config mistake worth failing on,
    // unlike an absent one.
    let lsq_store_id = match lookup("LSQ_STORE_ID") {
        Ok(raw) if raw.is_empty() => None,
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "LSQ_STORE_ID".to_string(),
                    reason: e.to_string(),
                })?,
        ),
        Err(_) => None,
    };

    let log_level = or_default("CATSYNC_LOG_LEVEL", "info");
    let variant_map_path = PathBuf::from(or_default(
        "CATSYNC_VARIANT_MAP_PATH",
        "./config/variant-map.json",
    ));
    let target_path = PathBuf::from(or_default(
        "CATSYNC_TARGET_PATH",
        "./src/lib/lemon-squeezy.ts",
    ));

    let request_timeout_secs = parse_u64("CATSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("CATSYNC_USER_AGENT", "catsync/0.1 (catalog-provisioning)");
    let step_delay_ms = parse_u64("CATSYNC_STEP_DELAY_MS", "500")?;
    let item_delay_ms = parse_u64("CATSYNC_ITEM_DELAY_MS", "1000")?;
    let max_retries = parse_u32("CATSYNC_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("CATSYNC_RETRY_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        lsq_api_key,
        lsq_store_id,
        log_level,
        variant_map_path,
        target_path,
        request_timeout_secs,
        user_agent,
        step_delay_ms,
        item_delay_ms,
        max_retries,
        retry_backoff_base_ms,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn empty_env_yields_defaults_and_no_credentials() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should parse");
        assert!(cfg.lsq_api_key.is_none());
        assert!(cfg.lsq_store_id.is_none());
        assert_eq!(cfg.log_level, "info");
        assert_eq!(
            cfg.variant_map_path.to_str(),
            Some("./config/variant-map.json")
        );
        assert_eq!(cfg.target_path.to_str(), Some("./src/lib/lemon-squeezy.ts"));
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "catsync/0.1 (catalog-provisioning)");
        assert_eq!(cfg.step_delay_ms, 500);
        assert_eq!(cfg.item_delay_ms, 1000);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 1000);
    }

    #[test]
    fn credentials_are_picked_up_when_present() {
        let mut map = HashMap::new();
        map.insert("LSQ_API_KEY", "sk-test-key");
        map.insert("LSQ_STORE_ID", "12345");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.lsq_api_key.as_deref(), Some("sk-test-key"));
        assert_eq!(cfg.lsq_store_id, Some(12345));
    }

    #[test]
    fn empty_api_key_is_treated_as_absent() {
        let mut map = HashMap::new();
        map.insert("LSQ_API_KEY", "");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.lsq_api_key.is_none());
    }

    #[test]
    fn non_numeric_store_id_is_rejected() {
        let mut map = HashMap::new();
        map.insert("LSQ_STORE_ID", "store-42");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LSQ_STORE_ID"),
            "expected InvalidEnvVar(LSQ_STORE_ID), got: {result:?}"
        );
    }

    #[test]
    fn empty_store_id_is_treated_as_absent() {
        let mut map = HashMap::new();
        map.insert("LSQ_STORE_ID", "");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.lsq_store_id.is_none());
    }

    #[test]
    fn delay_overrides_are_applied() {
        let mut map = HashMap::new();
        map.insert("CATSYNC_STEP_DELAY_MS", "50");
        map.insert("CATSYNC_ITEM_DELAY_MS", "75");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.step_delay_ms, 50);
        assert_eq!(cfg.item_delay_ms, 75);
    }

    #[test]
    fn invalid_step_delay_is_rejected() {
        let mut map = HashMap::new();
        map.insert("CATSYNC_STEP_DELAY_MS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATSYNC_STEP_DELAY_MS"),
            "expected InvalidEnvVar(CATSYNC_STEP_DELAY_MS), got: {result:?}"
        );
    }

    #[test]
    fn invalid_max_retries_is_rejected() {
        let mut map = HashMap::new();
        map.insert("CATSYNC_MAX_RETRIES", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CATSYNC_MAX_RETRIES"),
            "expected InvalidEnvVar(CATSYNC_MAX_RETRIES), got: {result:?}"
        );
    }

    #[test]
    fn path_overrides_are_applied() {
        let mut map = HashMap::new();
        map.insert("CATSYNC_VARIANT_MAP_PATH", "/tmp/map.json");
        map.insert("CATSYNC_TARGET_PATH", "/tmp/target.ts");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.variant_map_path.to_str(), Some("/tmp/map.json"));
        assert_eq!(cfg.target_path.to_str(), Some("/tmp/target.ts"));
    }

    #[test]
    fn debug_output_redacts_the_api_key() {
        let mut map = HashMap::new();
        map.insert("LSQ_API_KEY", "sk-very-secret");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sk-very-secret"), "key leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }
}
