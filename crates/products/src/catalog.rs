//! Ordered in-memory product collection.

use serde::{Deserialize, Serialize};

use dioca_core::ProductId;

use crate::product::Product;

/// Products in insertion order.
///
/// The catalog itself does not reject duplicate names: the session decides
/// when a name may be reused. Lookups by name return the earliest match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    pub fn get_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id_typed() == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// First product whose trimmed, lower-cased name equals `name`'s.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name().matches(name))
    }

    /// Append at the end (newest last).
    pub fn push(&mut self, product: Product) {
        debug_assert!(!self.contains(product.id_typed()), "duplicate product id");
        self.products.push(product);
    }

    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id_typed() == id)?;
        Some(self.products.remove(index))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = core::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProductDraft;

    fn product(name: &str, qty: &str) -> Product {
        Product::new(ProductId::new(), ProductDraft::parse(name, "1", qty).unwrap())
    }

    #[test]
    fn preserves_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.push(product("Rice", "1"));
        catalog.push(product("Beans", "1"));
        catalog.push(product("Salt", "1"));

        let names: Vec<&str> = catalog.iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, ["Rice", "Beans", "Salt"]);
    }

    #[test]
    fn find_by_name_is_case_insensitive_and_trimmed() {
        let mut catalog = Catalog::new();
        let rice = product("Rice", "1");
        let id = rice.id_typed();
        catalog.push(rice);

        assert_eq!(catalog.find_by_name("  rICE ").map(|p| p.id_typed()), Some(id));
        assert!(catalog.find_by_name("rice cake").is_none());
    }

    #[test]
    fn find_by_name_returns_earliest_duplicate() {
        let mut catalog = Catalog::new();
        let first = product("Rice", "1");
        let first_id = first.id_typed();
        catalog.push(first);
        catalog.push(product("RICE", "2"));

        assert_eq!(catalog.find_by_name("rice").map(|p| p.id_typed()), Some(first_id));
    }

    #[test]
    fn remove_is_by_id_and_reports_absence() {
        let mut catalog = Catalog::new();
        let rice = product("Rice", "1");
        let id = rice.id_typed();
        catalog.push(rice);
        catalog.push(product("Beans", "1"));

        assert!(catalog.remove(id).is_some());
        assert!(catalog.remove(id).is_none());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.as_slice()[0].name().as_str(), "Beans");
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut catalog = Catalog::new();
        let rice = product("Rice", "4");
        let id = rice.id_typed();
        catalog.push(rice);

        catalog.get_mut(id).unwrap().set_quantity(crate::Quantity::new(9));
        assert_eq!(catalog.get(id).unwrap().quantity().get(), 9);
    }
}
