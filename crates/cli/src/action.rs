//! One line of user input, parsed.

use core::str::FromStr;

use thiserror::Error;

use dioca_session::Field;

/// What the user asked for. Card numbers are 1-based, as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the text of a form field (empty text clears it).
    Set(Field, String),
    Submit,
    Edit(usize),
    Delete(usize),
    Buy(usize),
    Reset,
    Login,
    Logout,
    List,
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("unknown command `{0}` (type `help` for a list)")]
    Unknown(String),

    #[error("`{0}` needs a card number, e.g. `{0} 1`")]
    MissingCard(&'static str),

    #[error("`{0}` is not a card number")]
    BadCard(String),
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let action = match verb.to_ascii_lowercase().as_str() {
            "name" => Action::Set(Field::Name, rest.to_string()),
            "price" => Action::Set(Field::Price, rest.to_string()),
            "quantity" | "qty" => Action::Set(Field::Quantity, rest.to_string()),
            "submit" | "save" => Action::Submit,
            "edit" => Action::Edit(card("edit", rest)?),
            "delete" | "del" => Action::Delete(card("delete", rest)?),
            "buy" => Action::Buy(card("buy", rest)?),
            "reset" | "cancel" => Action::Reset,
            "login" => Action::Login,
            "logout" => Action::Logout,
            "list" | "ls" => Action::List,
            "help" | "?" => Action::Help,
            "quit" | "exit" => Action::Quit,
            _ => return Err(ActionParseError::Unknown(verb.to_string())),
        };
        Ok(action)
    }
}

fn card(verb: &'static str, arg: &str) -> Result<usize, ActionParseError> {
    if arg.is_empty() {
        return Err(ActionParseError::MissingCard(verb));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ActionParseError::BadCard(arg.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_text_keeps_inner_spaces() {
        assert_eq!(
            "name   Brown Rice  ".parse::<Action>(),
            Ok(Action::Set(Field::Name, "Brown Rice".to_string()))
        );
        assert_eq!("qty 5".parse::<Action>(), Ok(Action::Set(Field::Quantity, "5".to_string())));
    }

    #[test]
    fn bare_field_verb_clears_the_field() {
        assert_eq!("price".parse::<Action>(), Ok(Action::Set(Field::Price, String::new())));
    }

    #[test]
    fn verbs_are_case_insensitive() {
        assert_eq!("SUBMIT".parse::<Action>(), Ok(Action::Submit));
        assert_eq!("Buy 2".parse::<Action>(), Ok(Action::Buy(2)));
    }

    #[test]
    fn card_actions_need_a_positive_number() {
        assert_eq!(
            "edit".parse::<Action>(),
            Err(ActionParseError::MissingCard("edit"))
        );
        assert_eq!(
            "delete 0".parse::<Action>(),
            Err(ActionParseError::BadCard("0".to_string()))
        );
        assert_eq!(
            "buy two".parse::<Action>(),
            Err(ActionParseError::BadCard("two".to_string()))
        );
    }

    #[test]
    fn unknown_verbs_are_reported() {
        let err = "sell 1".parse::<Action>().unwrap_err();
        assert_eq!(err.to_string(), "unknown command `sell` (type `help` for a list)");
    }
}
