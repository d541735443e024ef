pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod overrides;
pub mod parser;
pub mod pipeline;
pub mod reference;
pub mod resolve;
pub mod ui;
pub mod uigf;
pub mod validate;

pub use cli::{Cli, Commands};
pub use error::ConvertError;
pub use pipeline::{run_convert, ConvertSummary};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
