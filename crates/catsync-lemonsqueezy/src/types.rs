//! Lemon Squeezy JSON:API request and response shapes.
//!
//! Requests and responses share the `{"data": …}` envelope; resource
//! objects carry `type`, `id`, and an `attributes` object. Only the fields
//! this tool reads or writes are modeled; everything else passes through
//! untouched on the wire.

use serde::{Deserialize, Serialize};

/// The JSON:API `{"data": …}` envelope, shared by requests and responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
}

// ---------------------------------------------------------------------------
// POST /v1/products
// ---------------------------------------------------------------------------

/// Request resource for creating a product.
#[derive(Debug, Serialize)]
pub struct NewProduct {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: NewProductAttributes,
    pub relationships: NewProductRelationships,
}

#[derive(Debug, Serialize)]
pub struct NewProductAttributes {
    pub name: String,
    pub description: String,
    /// Always `"draft"` at creation time; the product becomes purchasable
    /// only after its variant is priced and activated, and its assets are
    /// uploaded in the dashboard.
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NewProductRelationships {
    pub store: Relationship,
}

/// A to-one JSON:API relationship.
#[derive(Debug, Serialize)]
pub struct Relationship {
    pub data: ResourceIdentifier,
}

/// `{"type": …, "id": …}`: the id is a string on the wire even when the
/// provider documents it as numeric.
#[derive(Debug, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
}

impl NewProduct {
    #[must_use]
    pub fn new(store_id: u64, name: &str, description: &str) -> Self {
        Self {
            kind: "products",
            attributes: NewProductAttributes {
                name: name.to_owned(),
                description: description.to_owned(),
                status: "draft",
            },
            relationships: NewProductRelationships {
                store: Relationship {
                    data: ResourceIdentifier {
                        kind: "stores",
                        id: store_id.to_string(),
                    },
                },
            },
        }
    }
}

// ---------------------------------------------------------------------------
// PATCH /v1/variants/{id}
// ---------------------------------------------------------------------------

/// Request resource for the one-shot variant mutation: set the price and
/// activate, with the subscription-style flags switched off.
#[derive(Debug, Serialize)]
pub struct VariantUpdate {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: VariantUpdateAttributes,
}

#[derive(Debug, Serialize)]
pub struct VariantUpdateAttributes {
    /// Price in minor currency units.
    pub price: u32,
    pub is_membership: bool,
    pub has_free_trial: bool,
    pub pay_what_you_want: bool,
    pub status: &'static str,
}

impl VariantUpdate {
    #[must_use]
    pub fn activate(variant_id: &str, price_cents: u32) -> Self {
        Self {
            kind: "variants",
            id: variant_id.to_owned(),
            attributes: VariantUpdateAttributes {
                price: price_cents,
                is_membership: false,
                has_free_trial: false,
                pay_what_you_want: false,
                status: "active",
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// A resource object as returned by the API; only the identifier is read.
#[derive(Debug, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}
