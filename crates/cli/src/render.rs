//! Text rendering of the two screens.

use core::fmt;

use dioca_session::{Field, Session};

use crate::controller::Screen;

pub struct LoginScreen;

impl fmt::Display for LoginScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Login")?;
        writeln!(f, "-----")?;
        write!(f, "Type `login` to enter username and password, `quit` to exit.")
    }
}

pub struct InventoryScreen<'a> {
    pub session: &'a Session,
}

impl fmt::Display for InventoryScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.session.form();

        writeln!(f, "{:>40}", "[Logout]")?;
        writeln!(f, "Dioca Store")?;
        writeln!(f)?;
        for field in Field::ALL {
            writeln!(f, "  {:<18}{}", format!("{}:", field.label()), form.get(field))?;
        }
        writeln!(f, "  [{}]", form.submit_label())?;
        writeln!(f)?;

        writeln!(f, "Inventory")?;
        let products = self.session.products();
        if products.is_empty() {
            return write!(f, "  No products available.");
        }
        for (index, product) in products.iter().enumerate() {
            let marker = if form.selected() == Some(product.id_typed()) {
                " (editing)"
            } else {
                ""
            };
            writeln!(f, "  {}. {}{}", index + 1, product.name(), marker)?;
            writeln!(f, "     Price: P{}", product.price())?;
            writeln!(f, "     Quantity: {}", product.quantity())?;
            write!(f, "     [Edit] [Delete] [Buy]")?;
            if index + 1 < products.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

pub fn help(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => concat!(
            "Commands:\n",
            "  login  - sign in\n",
            "  help   - show commands\n",
            "  quit   - exit",
        ),
        Screen::Inventory => concat!(
            "Form:\n",
            "  name <text>       - set product name\n",
            "  price <text>      - set product price\n",
            "  quantity <text>   - set product quantity (alias: qty)\n",
            "  submit            - Add Product / Update Product\n",
            "  reset             - clear the form (back to add mode)\n",
            "Cards:\n",
            "  edit <n>          - load card n into the form\n",
            "  delete <n>        - remove card n\n",
            "  buy <n>           - sell one unit of card n\n",
            "Other:\n",
            "  list              - redraw\n",
            "  logout            - back to the login screen\n",
            "  help              - show commands\n",
            "  quit              - exit",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inventory_says_so() {
        let session = Session::default();
        let text = InventoryScreen { session: &session }.to_string();
        assert!(text.contains("Dioca Store"));
        assert!(text.contains("[Add Product]"));
        assert!(text.ends_with("No products available."));
    }

    #[test]
    fn cards_show_two_decimal_price_and_quantity() {
        let mut session = Session::default();
        session.add_or_increment("Rice", "50", "10").unwrap();
        session.add_or_increment("Beans", "12.5", "3").unwrap();

        let text = InventoryScreen { session: &session }.to_string();
        assert!(text.contains("  1. Rice\n     Price: P50.00\n     Quantity: 10\n"));
        assert!(text.contains(
            "  2. Beans\n     Price: P12.50\n     Quantity: 3\n     [Edit] [Delete] [Buy]"
        ));
    }

    #[test]
    fn selected_card_is_marked_and_form_is_filled() {
        let mut session = Session::default();
        let id = session.add_or_increment("Rice", "50", "10").unwrap().product_id();
        session.select(id).unwrap();

        let text = InventoryScreen { session: &session }.to_string();
        assert!(text.contains("1. Rice (editing)"));
        assert!(text.contains("Product Price:    50"));
        assert!(text.contains("[Update Product]"));
    }

    #[test]
    fn help_differs_per_screen() {
        assert!(help(Screen::Login).contains("login"));
        assert!(help(Screen::Inventory).contains("buy <n>"));
    }
}
