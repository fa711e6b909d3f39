#![forbid(unsafe_code)]

//! Product identity: the composite key used for equality across the engine.
//!
//! A product is the same *assignable entity* as another iff both its product
//! code and its color (variant) code match. Display fields (name, image,
//! stock and sale flags) never take part in equality.

use serde::{Deserialize, Serialize};

/// Composite identity `(product_code, color_code)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIdentity {
    pub product_code: String,
    pub color_code: String,
}

impl ProductIdentity {
    /// Create an identity from its two codes.
    #[must_use]
    pub fn new(product_code: impl Into<String>, color_code: impl Into<String>) -> Self {
        Self {
            product_code: product_code.into(),
            color_code: color_code.into(),
        }
    }
}

impl std::fmt::Display for ProductIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.product_code, self.color_code)
    }
}

/// Read-only catalog product as supplied by the catalog provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub identity: ProductIdentity,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub out_of_stock: bool,
    /// Whether the product is sellable through the B2B channel.
    #[serde(default = "default_sale_eligible", rename = "isSaleB2B")]
    pub sale_eligible: bool,
}

fn default_sale_eligible() -> bool {
    true
}

impl Product {
    /// Create a product with the given identity and default display fields.
    #[must_use]
    pub fn new(product_code: impl Into<String>, color_code: impl Into<String>) -> Self {
        Self {
            identity: ProductIdentity::new(product_code, color_code),
            name: None,
            image_url: String::new(),
            out_of_stock: false,
            sale_eligible: true,
        }
    }

    /// Builder: set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: set the image reference.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Builder: set the out-of-stock flag.
    #[must_use]
    pub fn with_out_of_stock(mut self, out_of_stock: bool) -> Self {
        self.out_of_stock = out_of_stock;
        self
    }

    /// Builder: set sale eligibility.
    #[must_use]
    pub fn with_sale_eligible(mut self, sale_eligible: bool) -> Self {
        self.sale_eligible = sale_eligible;
        self
    }

    /// The product's composite identity.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> &ProductIdentity {
        &self.identity
    }
}

/// Derive the identity of a product.
#[inline]
#[must_use]
pub fn identity_of(product: &Product) -> &ProductIdentity {
    &product.identity
}

/// Structural identity equality over `(product_code, color_code)`.
#[inline]
#[must_use]
pub fn same_identity(a: &Product, b: &Product) -> bool {
    a.identity == b.identity
}
