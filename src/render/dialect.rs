/// Template dialect configuration: plain-text Jinja with Go-style `<no value>`.
use minijinja::{AutoEscape, Environment, Error, ErrorKind, Output, State, Value, escape_formatter};

/// Text emitted in place of a variable that is not in the context.
pub const NO_VALUE: &str = "<no value>";

/// Configure `env` as a text dialect: no auto-escaping for any extension,
/// trailing newlines kept, undefined values printed as [`NO_VALUE`].
pub fn configure(env: &mut Environment<'static>) {
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.set_formatter(format_value);
}

fn format_value(out: &mut Output<'_>, state: &State<'_, '_>, value: &Value) -> Result<(), Error> {
    if value.is_undefined() {
        return out
            .write_str(NO_VALUE)
            .map_err(|_| Error::new(ErrorKind::WriteFailure, "failed to write placeholder"));
    }
    escape_formatter(out, state, value)
}
