use std::io::{BufRead, Write};

use shop_core::{CatalogError, CatalogService, InsertOutcome, Purchase};

use crate::app_config::ShellConfig;
use crate::command::{Command, MENU};
use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line-driven front end over a [`CatalogService`]
pub struct Shell<R, W> {
    service: CatalogService,
    input: R,
    output: W,
    config: ShellConfig,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(service: CatalogService, input: R, output: W, config: ShellConfig) -> Self {
        Self {
            service,
            input,
            output,
            config,
        }
    }

    pub fn service(&self) -> &CatalogService {
        &self.service
    }

    /// Read and execute commands until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let mut line = String::new();
        loop {
            if self.config.show_menu {
                writeln!(self.output, "\n{}", MENU)?;
            }
            write!(self.output, "{}", self.config.prompt)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            let result = Command::parse(&line).and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(Flow::Continue),
            });

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::debug!("Command rejected: {:?}", e);
                    writeln!(self.output, "{}", e)?;
                }
            }
        }

        tracing::info!("Shell closed with {} products in catalog", self.service.len());
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow, ShellError> {
        match command {
            Command::Insert(product) => match self.service.insert_product(product)? {
                InsertOutcome::Inserted => {
                    writeln!(self.output, "Product inserted successfully.")?
                }
                InsertOutcome::Merged => writeln!(self.output, "Product updated with new stock.")?,
            },
            Command::Search(name) => match self.service.search_product(&name) {
                Some(product) => writeln!(
                    self.output,
                    "Product found: {}, Price: {}, Stock: {}",
                    product.name, product.price, product.stock
                )?,
                None => writeln!(self.output, "Product not found.")?,
            },
            Command::Delete(name) => match self.service.delete_product(&name) {
                Some(_) => writeln!(self.output, "Product deleted successfully.")?,
                None => writeln!(self.output, "Product not found.")?,
            },
            Command::Update { name, price } => {
                self.service.update_price(&name, price)?;
                writeln!(self.output, "Price updated successfully.")?;
            }
            Command::List => {
                writeln!(self.output, "Products:")?;
                for product in self.service.products() {
                    writeln!(self.output, "{}", product)?;
                }
            }
            Command::Export => {
                let products: Vec<_> = self.service.products().collect();
                writeln!(self.output, "{}", serde_json::to_string_pretty(&products)?)?;
            }
            Command::Bill(purchases) => self.print_bill(&purchases)?,
            Command::Help => writeln!(self.output, "{}", MENU)?,
            Command::Exit => {
                writeln!(self.output, "Exiting the program.")?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    fn print_bill(&mut self, purchases: &[Purchase]) -> Result<(), ShellError> {
        let bill = self.service.generate_bill(purchases);

        writeln!(self.output, "\n.....................Bill.....................")?;
        for line in &bill.lines {
            writeln!(
                self.output,
                "Product Name: {}, Quantity: {}, Total: {}",
                line.name, line.quantity, line.line_total
            )?;
        }
        if let Some(shortfall) = bill.shortfall.clone() {
            writeln!(self.output, "{}", CatalogError::from(shortfall))?;
        }
        writeln!(self.output, "Total Bill: {}", bill.total)?;
        Ok(())
    }
}
