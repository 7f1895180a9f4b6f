//! HTTP client for the Lemon Squeezy JSON:API.
//!
//! Wraps `reqwest` with bearer-token auth, the `application/vnd.api+json`
//! content type, typed response deserialization, and retry-with-backoff on
//! transient failures. Non-2xx responses surface the raw error payload,
//! truncated, so the operator can see what the provider rejected.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Url};

use crate::error::LemonSqueezyError;
use crate::retry::retry_with_backoff;
use crate::types::{Document, NewProduct, Resource, VariantUpdate};

const DEFAULT_BASE_URL: &str = "https://api.lemonsqueezy.com/v1";
const JSON_API_MIME: &str = "application/vnd.api+json";

/// Error payloads are truncated to this many bytes before being surfaced.
const ERROR_BODY_LIMIT: usize = 300;

/// Client for the Lemon Squeezy REST API.
///
/// Use [`LemonSqueezyClient::new`] for production or
/// [`LemonSqueezyClient::with_base_url`] to point at a mock server in
/// tests.
pub struct LemonSqueezyClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl LemonSqueezyClient {
    /// Creates a new client pointed at the production Lemon Squeezy API.
    ///
    /// # Errors
    ///
    /// Returns [`LemonSqueezyError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, LemonSqueezyError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LemonSqueezyError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed, or
    /// [`LemonSqueezyError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, LemonSqueezyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so `Url::join` appends the
        // endpoint instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| LemonSqueezyError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries: 3,
            retry_backoff_base_ms: 1_000,
        })
    }

    /// Overrides the transient-failure retry policy.
    #[must_use]
    pub fn retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff_base_ms = backoff_base_ms;
        self
    }

    /// Creates a draft product in `store_id` and returns the
    /// provider-assigned product id.
    ///
    /// The product stays non-purchasable until its variant is priced and
    /// activated via [`LemonSqueezyClient::activate_variant`].
    ///
    /// # Errors
    ///
    /// - [`LemonSqueezyError::Api`] on a non-2xx response (body truncated).
    /// - [`LemonSqueezyError::Http`] on network failure.
    /// - [`LemonSqueezyError::Json`] if the response lacks the expected
    ///   `data.id`.
    pub async fn create_product(
        &self,
        store_id: u64,
        name: &str,
        description: &str,
    ) -> Result<String, LemonSqueezyError> {
        let url = self.endpoint("products", &[])?;
        let payload = Document {
            data: NewProduct::new(store_id, name, description),
        };
        let body = self
            .request_json(Method::POST, &url, Some(&to_body(&payload, "products request")?))
            .await?;

        let envelope: Document<Resource> =
            serde_json::from_value(body).map_err(|e| LemonSqueezyError::Json {
                context: format!("createProduct(name={name})"),
                source: e,
            })?;

        Ok(envelope.data.id)
    }

    /// Returns the id of the default variant the provider auto-created for
    /// `product_id`.
    ///
    /// The provider creates the default variant asynchronously after
    /// product creation; callers pause briefly before asking.
    ///
    /// # Errors
    ///
    /// - [`LemonSqueezyError::MissingVariant`] if the product has no
    ///   variants yet.
    /// - [`LemonSqueezyError::Api`] / [`LemonSqueezyError::Http`] /
    ///   [`LemonSqueezyError::Json`] as for the other calls.
    pub async fn default_variant_id(
        &self,
        product_id: &str,
    ) -> Result<String, LemonSqueezyError> {
        let url = self.endpoint("variants", &[("filter[product_id]", product_id)])?;
        let body = self.request_json(Method::GET, &url, None).await?;

        let envelope: Document<Vec<Resource>> =
            serde_json::from_value(body).map_err(|e| LemonSqueezyError::Json {
                context: format!("listVariants(product_id={product_id})"),
                source: e,
            })?;

        let mut variants = envelope.data;
        if variants.len() > 1 {
            tracing::debug!(
                product_id,
                count = variants.len(),
                "product has more than one variant; using the first"
            );
        }
        if variants.is_empty() {
            return Err(LemonSqueezyError::MissingVariant {
                product_id: product_id.to_owned(),
            });
        }
        Ok(variants.remove(0).id)
    }

    /// Sets the variant's price (minor units), clears the
    /// membership/trial/pay-what-you-want flags, and marks it active.
    ///
    /// # Errors
    ///
    /// - [`LemonSqueezyError::Api`] on a non-2xx response (body truncated).
    /// - [`LemonSqueezyError::Http`] on network failure.
    pub async fn activate_variant(
        &self,
        variant_id: &str,
        price_cents: u32,
    ) -> Result<(), LemonSqueezyError> {
        let url = self.endpoint(&format!("variants/{variant_id}"), &[])?;
        let payload = Document {
            data: VariantUpdate::activate(variant_id, price_cents),
        };
        self.request_json(
            Method::PATCH,
            &url,
            Some(&to_body(&payload, "variants request")?),
        )
        .await?;
        Ok(())
    }

    /// Builds the full request URL for `path` with percent-encoded query
    /// parameters.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, LemonSqueezyError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| LemonSqueezyError::InvalidBaseUrl(format!("{path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends the request with retry-with-backoff on transient failures,
    /// asserts a 2xx status, and parses the response body as JSON.
    async fn request_json(
        &self,
        method: Method,
        url: &Url,
        body: Option<&str>,
    ) -> Result<serde_json::Value, LemonSqueezyError> {
        retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.request_json_once(method.clone(), url, body)
        })
        .await
    }

    async fn request_json_once(
        &self,
        method: Method,
        url: &Url,
        body: Option<&str>,
    ) -> Result<serde_json::Value, LemonSqueezyError> {
        let mut request = self
            .client
            .request(method, url.clone())
            .bearer_auth(&self.api_key)
            .header(ACCEPT, JSON_API_MIME);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, JSON_API_MIME)
                .body(body.to_owned());
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LemonSqueezyError::Api {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| LemonSqueezyError::Json {
            context: url.to_string(),
            source: e,
        })
    }
}

fn to_body<T: serde::Serialize>(payload: &T, context: &str) -> Result<String, LemonSqueezyError> {
    serde_json::to_string(payload).map_err(|e| LemonSqueezyError::Json {
        context: context.to_owned(),
        source: e,
    })
}

/// Clips an error payload to [`ERROR_BODY_LIMIT`] bytes on a char boundary.
fn truncate_body(body: &str) -> String {
    if body.len() <= ERROR_BODY_LIMIT {
        return body.to_owned();
    }
    let mut end = ERROR_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
