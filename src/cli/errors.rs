/// Errors from the CLI layer: argument parsing and output sink creation.
use std::io;

use thiserror::Error;

/// Exit code for general failures (bad arguments, unusable output file).
pub const EXIT_GENERAL: i32 = 1;

/// Exit code for misuse: help was displayed, or templates failed to load or render.
pub const EXIT_MISUSE: i32 = 2;

/// Outcomes of argument parsing that stop the invocation.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// A help flag was given. Not a failure, but short-circuits like one.
    #[error("help requested")]
    Help {
        /// Full help text.
        usage: String,
    },

    /// A flag that is not defined.
    #[error("flag provided but not defined: {flag}")]
    UnknownFlag {
        /// The flag as typed.
        flag: String,
        /// Usage text naming the program.
        usage: String,
    },

    /// A value-taking flag appeared last with no value.
    #[error("flag needs an argument: {flag}")]
    MissingValue {
        /// The flag missing its value.
        flag: String,
        /// Usage text naming the program.
        usage: String,
    },

    /// Any other misuse reported by the parser.
    #[error("{message}")]
    Invalid {
        /// Parser-provided description.
        message: String,
        /// Usage text naming the program.
        usage: String,
    },
}

impl ArgsError {
    /// Usage text to show alongside the error.
    #[must_use]
    pub fn usage(&self) -> &str {
        match self {
            Self::Help { usage }
            | Self::UnknownFlag { usage, .. }
            | Self::MissingValue { usage, .. }
            | Self::Invalid { usage, .. } => usage,
        }
    }

    /// Return the CLI exit code for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Help { .. } => EXIT_MISUSE,
            _ => EXIT_GENERAL,
        }
    }
}

/// Failure to set up the output sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The output file could not be created or truncated.
    #[error("error creating file: {path}: {source}")]
    Create {
        /// Requested output path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl SinkError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Create { .. } => EXIT_GENERAL,
        }
    }
}
