/// CLI argument definitions via clap derive, plus Go-flag-style normalization.
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};

use super::errors::ArgsError;

/// envtmpl — render templates against the process environment.
#[derive(Debug, Parser)]
#[command(
    name = "envtmpl",
    about = "Render glob-loaded templates against the process environment",
    disable_version_flag = true
)]
pub struct Cli {
    /// Glob pattern of template files to load. Repeatable; later sets
    /// override earlier templates with the same file name.
    #[arg(short = 't', value_name = "PATTERN", action = ArgAction::Append, allow_hyphen_values = true)]
    pub templates: Vec<String>,

    /// Name of the template to render (its file name, e.g. `site.conf.tmpl`).
    #[arg(short = 'r', value_name = "NAME", action = ArgAction::Append, allow_hyphen_values = true)]
    pub render: Vec<String>,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', value_name = "PATH", action = ArgAction::Append, allow_hyphen_values = true)]
    pub output: Vec<String>,

    /// Print phase timing to stderr for debugging.
    #[arg(long)]
    pub debug: bool,

    /// Everything after the first non-flag argument; ignored.
    #[arg(hide = true, trailing_var_arg = true, num_args = 1..)]
    #[allow(dead_code)]
    pub rest: Vec<String>,
}

/// Resolved invocation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Template to execute. Empty means no template was selected.
    pub render: String,
    /// Output file path. Empty means stdout.
    pub output: String,
    /// Glob patterns, in the order given.
    pub templates: Vec<String>,
    /// When true, print phase timings to stderr.
    pub debug: bool,
}

impl From<Cli> for Config {
    fn from(mut cli: Cli) -> Self {
        Self {
            render: cli.render.pop().unwrap_or_default(),
            output: cli.output.pop().unwrap_or_default(),
            templates: cli.templates,
            debug: cli.debug,
        }
    }
}

/// Flag names that take a value.
const VALUE_FLAGS: [&str; 3] = ["t", "r", "o"];

/// Flag spellings rejected before clap sees the arguments.
#[derive(Debug, PartialEq, Eq)]
enum FlagIssue {
    Unknown(String),
    MissingValue(String),
    BadValue { flag: String, value: String },
}

/// Parse `args` (without the program name) into a [`Config`].
///
/// Flag parsing stops at the first non-flag token. Usage text in every error
/// variant names `progname`.
///
/// # Errors
///
/// Returns `ArgsError::Help` when a help flag is given, and another
/// `ArgsError` variant for unknown flags, missing values or other misuse.
pub fn parse_flags<S: AsRef<str>>(progname: &str, args: &[S]) -> Result<Config, ArgsError> {
    let mut cmd = Cli::command().bin_name(progname.to_owned());

    let canonical = match normalize(args) {
        Ok(canonical) => canonical,
        Err(issue) => {
            let usage = cmd.render_help().to_string();
            return Err(match issue {
                FlagIssue::Unknown(flag) => ArgsError::UnknownFlag { flag, usage },
                FlagIssue::MissingValue(flag) => ArgsError::MissingValue { flag, usage },
                FlagIssue::BadValue { flag, value } => ArgsError::Invalid {
                    message: format!("invalid boolean value {value:?} for {flag}"),
                    usage,
                },
            });
        }
    };
    let argv = std::iter::once(progname.to_owned()).chain(canonical);

    let matches = match cmd.try_get_matches_from_mut(argv) {
        Ok(m) => m,
        Err(err) => {
            let usage = cmd.render_help().to_string();
            return Err(classify(&err, usage));
        }
    };

    Cli::from_arg_matches(&matches)
        .map(Config::from)
        .map_err(|err| ArgsError::Invalid {
            message: describe(err.kind()),
            usage: cmd.render_help().to_string(),
        })
}

/// Rewrite Go-style flags into the spellings clap parses.
///
/// One or two leading dashes are equivalent, values attach with `=` or follow
/// as the next token, and a flag token never clusters (`-th` is the unknown
/// flag `th`, not `-t h`). Parsing stops at `--` or the first non-flag token;
/// the remainder is passed after `--`.
fn normalize<S: AsRef<str>>(args: &[S]) -> Result<Vec<String>, FlagIssue> {
    let mut flags = Vec::with_capacity(args.len());
    let mut tail = Vec::new();
    let mut debug = false;
    let mut tokens = args.iter().map(AsRef::as_ref);

    while let Some(arg) = tokens.next() {
        if arg == "--" {
            tail.extend(tokens.by_ref().map(str::to_owned));
            break;
        }
        let Some(body) = flag_body(arg) else {
            tail.push(arg.to_owned());
            tail.extend(tokens.by_ref().map(str::to_owned));
            break;
        };
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        match name {
            "h" | "help" => {
                flags.push("--help".to_owned());
                return Ok(flags);
            }
            "debug" => match inline {
                None => debug = true,
                Some(value) => {
                    debug = parse_bool(value).ok_or_else(|| FlagIssue::BadValue {
                        flag: format!("-{name}"),
                        value: value.to_owned(),
                    })?;
                }
            },
            _ if VALUE_FLAGS.contains(&name) => {
                let value = match inline {
                    Some(value) => value,
                    None => tokens
                        .next()
                        .ok_or_else(|| FlagIssue::MissingValue(format!("-{name}")))?,
                };
                if value.is_empty() {
                    flags.push(format!("-{name}"));
                    flags.push(String::new());
                } else {
                    flags.push(format!("-{name}={value}"));
                }
            }
            _ => return Err(FlagIssue::Unknown(format!("-{name}"))),
        }
    }

    if debug {
        flags.push("--debug".to_owned());
    }
    if !tail.is_empty() {
        flags.push("--".to_owned());
        flags.extend(tail);
    }
    Ok(flags)
}

/// The flag name (and any `=value`) of a token in flag position, or `None`
/// for a non-flag token such as `x` or `-`.
fn flag_body(arg: &str) -> Option<&str> {
    let body = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'))?;
    (!body.is_empty()).then_some(body)
}

/// Boolean spellings accepted by `-debug=<value>`.
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Map a clap error onto the stable `ArgsError` diagnostics.
fn classify(err: &clap::Error, usage: String) -> ArgsError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            ArgsError::Help {
                usage: err.render().to_string(),
            }
        }
        ErrorKind::UnknownArgument => ArgsError::UnknownFlag {
            flag: context_str(err, ContextKind::InvalidArg).unwrap_or_default(),
            usage,
        },
        ErrorKind::InvalidValue
            if context_str(err, ContextKind::InvalidValue).is_none_or(|v| v.is_empty()) =>
        {
            let arg = context_str(err, ContextKind::InvalidArg).unwrap_or_default();
            ArgsError::MissingValue {
                flag: arg.split_whitespace().next().unwrap_or_default().to_owned(),
                usage,
            }
        }
        kind => ArgsError::Invalid {
            message: describe(kind),
            usage,
        },
    }
}

fn describe(kind: ErrorKind) -> String {
    kind.as_str().unwrap_or("invalid arguments").to_owned()
}

fn context_str(err: &clap::Error, kind: ContextKind) -> Option<String> {
    match err.get(kind)? {
        ContextValue::String(s) => Some(s.clone()),
        _ => None,
    }
}
