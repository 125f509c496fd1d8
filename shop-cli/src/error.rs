use shop_core::CatalogError;

/// Problems with a single line of shell input. None of these end the session.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Invalid choice. Please try again.")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid purchase {0}, expected <name>:<quantity>")]
    InvalidPurchase(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ShellError {
    /// I/O failures on the shell's own streams stop the loop; everything
    /// else is reported and the next command is read.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ShellError::Io(_))
    }
}
