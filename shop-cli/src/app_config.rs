use serde::Deserialize;
use shop_catalog::{Product, ProductError};
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_true")]
    pub show_menu: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_menu: true,
        }
    }
}

fn default_prompt() -> String { "Enter your choice: ".to_string() }
fn default_true() -> bool { true }

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

fn default_filter() -> String { "shop_cli=info,shop_core=info".to_string() }

/// Products laid out into the catalog once at startup
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub seed: Vec<Product>,
}

impl CatalogConfig {
    /// Seed entries re-checked with the same rules as interactive inserts
    pub fn seed_products(&self) -> Result<Vec<Product>, ProductError> {
        self.seed
            .iter()
            .map(|p| Product::new(p.name.clone(), p.price, p.stock))
            .collect()
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/test.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local, uncommitted overrides
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `SHOP_SHELL__PROMPT="> "` would set `shell.prompt`
            .add_source(
                config::Environment::with_prefix("SHOP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_any_source() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.shell.prompt, "Enter your choice: ");
        assert!(config.shell.show_menu);
        assert_eq!(config.logging.filter, "shop_cli=info,shop_core=info");
        assert!(config.catalog.seed.is_empty());
    }

    #[test]
    fn test_seed_products_are_read() {
        let config = Config::from_toml(
            r#"
            [shell]
            prompt = "> "
            show_menu = false

            [[catalog.seed]]
            name = "Widget"
            price = 10.0
            stock = 5

            [[catalog.seed]]
            name = "Gadget"
            price = 3.5
            stock = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.shell.prompt, "> ");
        assert!(!config.shell.show_menu);
        let seed = config.catalog.seed_products().unwrap();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[1].name, "Gadget");
        assert_eq!(seed[1].price, 3.5);
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let config = Config::from_toml(
            r#"
            [[catalog.seed]]
            name = "Broken"
            price = -2.0
            stock = 1
            "#,
        )
        .unwrap();

        assert_eq!(
            config.catalog.seed_products(),
            Err(ProductError::InvalidPrice(-2.0))
        );
    }
}
