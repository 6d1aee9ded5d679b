//! Product form state (add mode / edit mode).

use serde::{Deserialize, Serialize};

use dioca_core::ProductId;
use dioca_products::Product;

/// One of the three text inputs of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Price,
    Quantity,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Price, Field::Quantity];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Product Name",
            Field::Price => "Product Price",
            Field::Quantity => "Product Quantity",
        }
    }
}

/// Whether the form creates a product or edits the selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormMode {
    #[default]
    Adding,
    Editing(ProductId),
}

impl FormMode {
    pub fn selected(self) -> Option<ProductId> {
        match self {
            FormMode::Adding => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, FormMode::Editing(_))
    }
}

/// Raw text of the product form plus the current selection.
///
/// Fields hold whatever was typed; parsing happens only on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    name: String,
    price: String,
    quantity: String,
    mode: FormMode,
}

impl ProductForm {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::Quantity => &self.quantity,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Price => &mut self.price,
            Field::Quantity => &mut self.quantity,
        };
        *slot = value.into();
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn selected(&self) -> Option<ProductId> {
        self.mode.selected()
    }

    /// Caption of the form's single submit control.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Adding => "Add Product",
            FormMode::Editing(_) => "Update Product",
        }
    }

    /// True when all fields are empty and nothing is selected.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.price.is_empty()
            && self.quantity.is_empty()
            && !self.mode.is_editing()
    }

    /// Populate the fields from `product` and switch to edit mode.
    pub(crate) fn load(&mut self, product: &Product) {
        self.name = product.name().as_str().to_string();
        self.price = product.price().form_text();
        self.quantity = product.quantity().form_text();
        self.mode = FormMode::Editing(product.id_typed());
    }

    /// Clear every field and return to add mode.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
