use thiserror::Error;

/// Errors returned by the Lemon Squeezy API client.
#[derive(Debug, Error)]
pub enum LemonSqueezyError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status. `body` carries the raw
    /// error payload truncated to 300 bytes for operator diagnosis.
    #[error("Lemon Squeezy API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// A freshly created product reported no variants yet. The provider
    /// creates the default variant asynchronously, so this signals a
    /// provider-side race; the item is skipped rather than retried.
    #[error("no variant found for product {product_id}")]
    MissingVariant { product_id: String },

    /// A request body could not be serialized, or a response body could
    /// not be deserialized into the expected type.
    #[error("JSON error for {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
