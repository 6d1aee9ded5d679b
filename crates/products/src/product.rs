use serde::{Deserialize, Serialize};

use dioca_core::{DomainResult, Entity, ProductId};

use crate::value::{Price, ProductName, Quantity};

/// Parsed and validated product form input.
///
/// Building a draft is all-or-nothing: if any field is invalid, nothing is
/// produced and the caller has nothing to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: ProductName,
    pub price: Price,
    pub quantity: Quantity,
}

impl ProductDraft {
    /// Validate the three raw form fields (name, then price, then quantity).
    pub fn parse(name: &str, price: &str, quantity: &str) -> DomainResult<Self> {
        Ok(Self {
            name: ProductName::parse(name)?,
            price: Price::parse(price)?,
            quantity: Quantity::parse(quantity)?,
        })
    }
}

/// An inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: ProductName,
    price: Price,
    quantity: Quantity,
}

impl Product {
    pub fn new(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            quantity: draft.quantity,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Replace name, price and quantity; the id never changes.
    pub fn revise(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
        self.quantity = draft.quantity;
    }

    pub fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioca_core::DomainError;

    #[test]
    fn draft_parses_all_fields() {
        let draft = ProductDraft::parse(" Rice ", "50", "10").unwrap();
        assert_eq!(draft.name.as_str(), "Rice");
        assert_eq!(draft.price.amount(), 50.0);
        assert_eq!(draft.quantity.get(), 10);
    }

    #[test]
    fn draft_reports_the_first_invalid_field() {
        let err = ProductDraft::parse("", "abc", "x").unwrap_err();
        assert_eq!(err, DomainError::validation("product name cannot be empty"));

        let err = ProductDraft::parse("Rice", "abc", "x").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.starts_with("price")));
    }

    #[test]
    fn revise_keeps_identity() {
        let id = ProductId::new();
        let mut product = Product::new(id, ProductDraft::parse("Rice", "50", "10").unwrap());
        product.revise(ProductDraft::parse("Beans", "20", "3").unwrap());

        assert_eq!(product.id(), &id);
        assert_eq!(product.name().as_str(), "Beans");
        assert_eq!(product.price().amount(), 20.0);
        assert_eq!(product.quantity().get(), 3);
    }
}
