use shop_catalog::Product;
use shop_core::{CatalogError, Purchase};

use crate::error::ShellError;

/// One parsed line of shell input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(Product),
    Search(String),
    Delete(String),
    Update { name: String, price: f64 },
    List,
    Export,
    Bill(Vec<Purchase>),
    Help,
    Exit,
}

pub const MENU: &str = "\
Choose an operation:
1. Insert a product          insert <name> <price> <stock>
2. Search for a product      search <name>
3. Delete a product          delete <name>
4. Update the price          update <name> <price>
5. Traverse the products     list
6. Generate a bill           bill <name>:<qty> [<name>:<qty> ...]
7. Exit                      exit
   Export as JSON            export";

impl Command {
    /// Parses a whitespace separated command. Blank lines yield `None`.
    /// The numeric menu choices are accepted in place of the verbs.
    pub fn parse(line: &str) -> Result<Option<Command>, ShellError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "1" | "insert" => {
                let [name, price, stock] = args[..] else {
                    return Err(ShellError::Usage("insert <name> <price> <stock>"));
                };
                let product = Product::new(
                    name,
                    parse_number(price, "price")?,
                    parse_number(stock, "stock")?,
                )
                .map_err(CatalogError::from)?;
                Command::Insert(product)
            }
            "2" | "search" => Command::Search(single_name(&args, "search <name>")?),
            "3" | "delete" => Command::Delete(single_name(&args, "delete <name>")?),
            "4" | "update" => {
                let [name, price] = args[..] else {
                    return Err(ShellError::Usage("update <name> <price>"));
                };
                Command::Update {
                    name: name.to_string(),
                    price: parse_number(price, "price")?,
                }
            }
            "5" | "list" | "traverse" => Command::List,
            "6" | "bill" => {
                if args.is_empty() {
                    return Err(ShellError::Usage("bill <name>:<qty> [<name>:<qty> ...]"));
                }
                Command::Bill(args.iter().map(|a| parse_purchase(a)).collect::<Result<_, _>>()?)
            }
            "7" | "exit" | "quit" => Command::Exit,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            _ => return Err(ShellError::UnknownCommand(verb.to_string())),
        };

        Ok(Some(command))
    }
}

fn single_name(args: &[&str], usage: &'static str) -> Result<String, ShellError> {
    match args {
        [name] => Ok(name.to_string()),
        _ => Err(ShellError::Usage(usage)),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, field: &'static str) -> Result<T, ShellError> {
    value.parse().map_err(|_| ShellError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_purchase(arg: &str) -> Result<Purchase, ShellError> {
    let (name, quantity) = arg
        .rsplit_once(':')
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| ShellError::InvalidPurchase(arg.to_string()))?;

    Ok(Purchase::new(name, parse_number(quantity, "quantity")?))
}
