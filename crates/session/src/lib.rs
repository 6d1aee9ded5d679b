//! Inventory session: the whole behavioral core of the store.
//!
//! A [`Session`] owns the login flag, the product catalog and the product
//! form. Every user action is a [`SessionCommand`]; accepted commands become
//! [`SessionEvent`]s that are applied in order. Rejected commands change
//! nothing and surface a [`dioca_core::DomainError`] for the presentation
//! layer to turn into a notice.

pub mod form;
pub mod session;

pub use form::{Field, FormMode, ProductForm};
pub use session::{Session, SessionCommand, SessionEvent, Submission};
