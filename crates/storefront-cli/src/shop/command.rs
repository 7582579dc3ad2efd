//! Parsing of interactive shop commands.

use std::time::Duration;

use storefront_core::{CategoryFilter, CheckoutField};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },

    #[error("'{command}': {reason}")]
    InvalidArgument {
        command: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PanelAction {
    Open,
    Close,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShopCommand {
    Home,
    /// Empty text clears the search.
    Search(String),
    Category(CategoryFilter),
    View(String),
    /// Catalog: add the given id. Detail page: add the selected quantity.
    Add(Option<String>),
    More,
    Less,
    Cart,
    Panel(PanelAction),
    Increase(String),
    Decrease(String),
    SetQuantity { id: String, quantity: i64 },
    Remove(String),
    Clear,
    Checkout,
    Set { field: CheckoutField, value: String },
    Submit,
    Wait(Duration),
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
Commands:
  home                       browse the catalog
  search <text>              filter by text (empty clears)
  category <name>            all, electronics, clothing, accessories
  view <id>                  open a product page
  add [id]                   add a catalog item, or the selected quantity on a product page
  more | less                change the selected quantity on a product page
  cart                       open the cart page
  panel [open|close|toggle]  show or hide the cart panel
  inc <id> | dec <id>        step a cart line up or down
  qty <id> <n>               set a cart line's quantity (0 removes)
  remove <id> | clear        remove one line or empty the cart
  checkout                   open the checkout form
  set <field> <value>        first_name, last_name, email, address, city, zip_code
  submit                     place the order
  wait <ms>                  let time pass
  help | quit";

impl ShopCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub(crate) fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "home" | "shop" | "products" => ShopCommand::Home,
            "search" => ShopCommand::Search(rest.to_string()),
            "category" | "cat" => {
                let raw = required("category", "a category name", rest)?;
                let filter = raw.parse().map_err(|reason| CommandError::InvalidArgument {
                    command: "category",
                    reason,
                })?;
                ShopCommand::Category(filter)
            }
            "view" => ShopCommand::View(required("view", "a product id", rest)?.to_string()),
            "add" => ShopCommand::Add((!rest.is_empty()).then(|| rest.to_string())),
            "more" | "+" => ShopCommand::More,
            "less" | "-" => ShopCommand::Less,
            "cart" => ShopCommand::Cart,
            "panel" => ShopCommand::Panel(match rest.to_lowercase().as_str() {
                "" | "toggle" => PanelAction::Toggle,
                "open" => PanelAction::Open,
                "close" => PanelAction::Close,
                other => {
                    return Err(CommandError::InvalidArgument {
                        command: "panel",
                        reason: format!("expected open, close or toggle, got '{other}'"),
                    })
                }
            }),
            "inc" => ShopCommand::Increase(required("inc", "a product id", rest)?.to_string()),
            "dec" => ShopCommand::Decrease(required("dec", "a product id", rest)?.to_string()),
            "qty" => {
                let raw = required("qty", "a product id and a quantity", rest)?;
                let Some((id, quantity)) = raw.split_once(char::is_whitespace) else {
                    return Err(CommandError::MissingArgument {
                        command: "qty",
                        what: "a product id and a quantity",
                    });
                };
                let quantity =
                    quantity
                        .trim()
                        .parse()
                        .map_err(|_| CommandError::InvalidArgument {
                            command: "qty",
                            reason: format!("'{}' is not a whole number", quantity.trim()),
                        })?;
                ShopCommand::SetQuantity {
                    id: id.to_string(),
                    quantity,
                }
            }
            "remove" | "rm" => {
                ShopCommand::Remove(required("remove", "a product id", rest)?.to_string())
            }
            "clear" => ShopCommand::Clear,
            "checkout" => ShopCommand::Checkout,
            "set" => {
                let raw = required("set", "a field name", rest)?;
                let (name, value) = match raw.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (raw, ""),
                };
                let field = name.parse().map_err(|reason| CommandError::InvalidArgument {
                    command: "set",
                    reason,
                })?;
                ShopCommand::Set {
                    field,
                    value: value.to_string(),
                }
            }
            "submit" | "place" => ShopCommand::Submit,
            "wait" => {
                let raw = required("wait", "a duration in milliseconds", rest)?;
                let ms: u64 = raw.parse().map_err(|_| CommandError::InvalidArgument {
                    command: "wait",
                    reason: format!("'{raw}' is not a number of milliseconds"),
                })?;
                ShopCommand::Wait(Duration::from_millis(ms))
            }
            "help" | "?" => ShopCommand::Help,
            "quit" | "exit" | "q" => ShopCommand::Quit,
            _ => return Err(CommandError::UnknownCommand(word.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(
    command: &'static str,
    what: &'static str,
    rest: &'a str,
) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument { command, what })
    } else {
        Ok(rest)
    }
}
