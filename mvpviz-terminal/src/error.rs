/// Errors surfaced by the terminal front-end
use std::io;

use mvpviz_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
