/// CLI layer: argument parsing, output sink, diagnostics.
pub mod args;
pub mod errors;
pub mod output;

pub use args::{Config, parse_flags};
pub use errors::{EXIT_MISUSE, SinkError};
pub use output::{OutputCtx, Sink, write_args_error, write_error};
