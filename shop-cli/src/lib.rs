pub mod app_config;
pub mod command;
pub mod error;
pub mod shell;

pub use command::Command;
pub use error::ShellError;
pub use shell::Shell;
