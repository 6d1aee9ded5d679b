//! User-facing notices (the terminal's modal alerts).

use core::fmt::Display;

use dioca_core::DomainError;
use dioca_session::FormMode;

const ADD_HINT: &str = "Please provide valid product name, price, and quantity.";
const UPDATE_HINT: &str = "Please select a product and provide valid updated details.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Alert for a rejected operation. `mode` is the form mode at the time
    /// the operation was attempted.
    pub fn from_error(err: &DomainError, mode: FormMode) -> Self {
        let hint = match mode {
            FormMode::Adding => ADD_HINT,
            FormMode::Editing(_) => UPDATE_HINT,
        };
        match err {
            DomainError::InvalidCredentials => {
                Self::new("Login Failed", "Invalid username or password")
            }
            DomainError::Validation(reason) => Self::new("Error", format!("{hint} ({reason})")),
            DomainError::NoSelection => Self::new("Error", UPDATE_HINT),
            DomainError::OutOfStock { name } => {
                Self::new("Out of Stock", format!("Product \"{name}\" is out of stock."))
            }
            DomainError::NotFound(_) => Self::new("Error", "That product no longer exists."),
            DomainError::InvariantViolation(msg) => Self::new("Error", msg.clone()),
        }
    }

    /// Alert after one unit of `name` was sold.
    pub fn purchased(name: impl Display) -> Self {
        Self::new("Purchase Successful", format!("You purchased \"{name}\"."))
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}] {}", self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioca_core::ProductId;

    #[test]
    fn login_failure_matches_the_original_wording() {
        let notice = Notice::from_error(&DomainError::InvalidCredentials, FormMode::Adding);
        assert_eq!(notice.to_string(), "[Login Failed] Invalid username or password");
    }

    #[test]
    fn validation_hint_depends_on_mode() {
        let err = DomainError::validation("price is required");

        let adding = Notice::from_error(&err, FormMode::Adding);
        assert_eq!(
            adding.message,
            "Please provide valid product name, price, and quantity. (price is required)"
        );

        let editing = Notice::from_error(&err, FormMode::Editing(ProductId::new()));
        assert!(editing.message.starts_with(UPDATE_HINT));
    }

    #[test]
    fn out_of_stock_names_the_product() {
        let notice = Notice::from_error(&DomainError::out_of_stock("Salt"), FormMode::Adding);
        assert_eq!(notice.title, "Out of Stock");
        assert_eq!(notice.message, "Product \"Salt\" is out of stock.");
    }

    #[test]
    fn purchase_notice_quotes_the_product() {
        assert_eq!(
            Notice::purchased("Salt").to_string(),
            "[Purchase Successful] You purchased \"Salt\"."
        );
    }
}
