//! Parsing of session input lines.

use chemsales_core::{DomainError, ProductId};
use chemsales_sales::CustomerField;

pub const USAGE: &str = "\
Commands:
  products                 show the product grid
  add <id>                 add one minimum order to the cart
  inc <id> | dec <id>      change a cart line by one minimum order
  remove <id>              remove a cart line
  cart                     open the cart panel
  close                    close the cart panel or invoice
  name|company|email|phone <value>
                           set a customer field
  checkout                 generate the invoice
  print                    print the shown invoice
  help                     show this help
  quit                     leave";

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Products,
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    OpenCart,
    Close,
    SetField(CustomerField, String),
    Checkout,
    Print,
    Help,
    Quit,
}

impl Action {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    ///
    /// Customer field values are the rest of the line after the field name,
    /// taken verbatim apart from the single separating space.
    pub fn parse(line: &str) -> Result<Option<Action>, DomainError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim().is_empty() {
            return Ok(None);
        }

        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (trimmed.trim_end(), ""),
        };

        let action = match word.to_lowercase().as_str() {
            "products" | "list" => Action::Products,
            "add" => Action::Add(product_id(word, rest)?),
            "inc" | "+" => Action::Increase(product_id(word, rest)?),
            "dec" | "-" => Action::Decrease(product_id(word, rest)?),
            "remove" | "rm" => Action::Remove(product_id(word, rest)?),
            "cart" => Action::OpenCart,
            "close" => Action::Close,
            "checkout" | "receipt" => Action::Checkout,
            "print" => Action::Print,
            "help" | "?" => Action::Help,
            "quit" | "exit" => Action::Quit,
            other => match other.parse::<CustomerField>() {
                Ok(field) => Action::SetField(field, rest.to_string()),
                Err(_) => {
                    return Err(DomainError::validation(format!(
                        "unknown command {word:?}; type `help` for the list"
                    )));
                }
            },
        };

        Ok(Some(action))
    }
}

fn product_id(word: &str, rest: &str) -> Result<ProductId, DomainError> {
    if rest.trim().is_empty() {
        return Err(DomainError::validation(format!("usage: {word} <product id>")));
    }
    rest.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cart_commands() {
        assert_eq!(Action::parse("add 4").unwrap(), Some(Action::Add(ProductId::new(4))));
        assert_eq!(Action::parse("INC 4").unwrap(), Some(Action::Increase(ProductId::new(4))));
        assert_eq!(Action::parse("dec 4\n").unwrap(), Some(Action::Decrease(ProductId::new(4))));
        assert_eq!(Action::parse("remove 2").unwrap(), Some(Action::Remove(ProductId::new(2))));
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(Action::parse("   \n").unwrap(), None);
    }

    #[test]
    fn field_values_keep_inner_spaces() {
        assert_eq!(
            Action::parse("company Obi Coatings  Ltd").unwrap(),
            Some(Action::SetField(CustomerField::Company, "Obi Coatings  Ltd".to_string()))
        );
    }

    #[test]
    fn bare_field_name_clears_the_field() {
        assert_eq!(
            Action::parse("phone").unwrap(),
            Some(Action::SetField(CustomerField::Phone, String::new()))
        );
    }

    #[test]
    fn missing_product_id_is_a_usage_error() {
        match Action::parse("add").unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("usage: add <product id>")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_product_id_is_invalid() {
        assert!(matches!(Action::parse("add four"), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(matches!(Action::parse("dance"), Err(DomainError::Validation(_))));
    }
}
