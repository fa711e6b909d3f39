#![forbid(unsafe_code)]

//! Display classification for catalog cards. Never consulted by placement.

use crate::identity::Product;

/// Card status, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductStatus {
    /// Already pinned to a slot.
    Pinned,
    OutOfStock,
    /// Not sellable through the channel.
    Inactive,
    Active,
}

impl ProductStatus {
    /// Classify a catalog card.
    #[must_use]
    pub fn classify(product: &Product, pinned: bool) -> Self {
        if pinned {
            Self::Pinned
        } else if product.out_of_stock {
            Self::OutOfStock
        } else if !product.sale_eligible {
            Self::Inactive
        } else {
            Self::Active
        }
    }

    /// Stable name for host styling hooks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pinned => "pinned",
            Self::OutOfStock => "out-of-stock",
            Self::Inactive => "inactive",
            Self::Active => "active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence() {
        let both = Product::new("A", "1")
            .with_out_of_stock(true)
            .with_sale_eligible(false);
        assert_eq!(ProductStatus::classify(&both, true), ProductStatus::Pinned);
        assert_eq!(ProductStatus::classify(&both, false), ProductStatus::OutOfStock);

        let inactive = Product::new("A", "1").with_sale_eligible(false);
        assert_eq!(ProductStatus::classify(&inactive, false), ProductStatus::Inactive);
        assert_eq!(
            ProductStatus::classify(&Product::new("A", "1"), false),
            ProductStatus::Active
        );
    }

    #[test]
    fn names() {
        assert_eq!(ProductStatus::OutOfStock.as_str(), "out-of-stock");
    }
}
