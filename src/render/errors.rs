/// Errors from loading and rendering templates.
use std::io;

use thiserror::Error;

/// Failure while building the template registry. Every variant names the
/// glob pattern being loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The pattern is not a valid glob.
    #[error("error loading templates from {pattern}: invalid pattern: {source}")]
    Pattern {
        /// The offending pattern.
        pattern: String,
        /// Glob syntax error.
        #[source]
        source: glob::PatternError,
    },

    /// The pattern matched no files.
    #[error("error loading templates from {pattern}: pattern matches no files")]
    NoMatch {
        /// The offending pattern.
        pattern: String,
    },

    /// A matched path could not be read.
    #[error("error loading templates from {pattern}: {path}: {source}")]
    Read {
        /// The pattern that produced the path.
        pattern: String,
        /// The unreadable path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A matched file is not a valid template.
    #[error("error loading templates from {pattern}: {source}")]
    Parse {
        /// The pattern that produced the file.
        pattern: String,
        /// Syntax error reported by the template engine.
        #[source]
        source: minijinja::Error,
    },
}

/// Failure while executing a template.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Missing render target, missing include, or any other execution fault.
    #[error("error rendering template: {0}")]
    Execute(#[from] minijinja::Error),

    /// The sink refused the rendered output.
    #[error("error rendering template: {0}")]
    Write(#[from] io::Error),
}
