/// `generate`: load templates, snapshot the environment, render one template.
use std::io::Write;

use thiserror::Error;

use crate::cli::{Config, EXIT_MISUSE, OutputCtx, Sink, SinkError};
use crate::render::{LoadError, RenderError, load_env, load_templates, render};

/// Any failure of the generate pipeline.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The output file could not be created.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// A template set failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The render target failed to execute.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl GenerateError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Sink(err) => err.exit_code(),
            Self::Load(_) | Self::Render(_) => EXIT_MISUSE,
        }
    }

    /// Diagnostic prefix naming the failed phase.
    #[must_use]
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Sink(_) => "error opening output",
            Self::Load(_) | Self::Render(_) => "error generating template",
        }
    }
}

/// Resolve the output sink, then run [`generate`] into it.
///
/// A sink that cannot be created stops the run before any template is loaded.
/// The sink is closed when this returns, on success or failure.
///
/// # Errors
///
/// Returns `GenerateError` from whichever phase failed first.
pub fn run(config: &Config, ctx: &OutputCtx) -> Result<(), GenerateError> {
    let t_sink = ctx.timer("resolve_sink");
    let mut sink = Sink::resolve(&config.output)?;
    drop(t_sink);

    generate(config, &mut sink, ctx)
}

/// Load `config.templates`, snapshot the environment and render
/// `config.render` into `sink`.
///
/// # Errors
///
/// Returns `GenerateError::Load` or `GenerateError::Render`.
pub fn generate<W: Write>(config: &Config, sink: &mut W, ctx: &OutputCtx) -> Result<(), GenerateError> {
    let t_load = ctx.timer("load_templates");
    let templates = load_templates(config.templates.as_slice())?;
    drop(t_load);

    let t_env = ctx.timer("load_env");
    let env = load_env();
    drop(t_env);

    if ctx.debug {
        eprintln!(
            "[debug] {} templates [{}], {} environment variables",
            templates.names().len(),
            templates.names().join(", "),
            env.len()
        );
    }

    let t_render = ctx.timer("render");
    render(&templates, &config.render, &env, sink)?;
    drop(t_render);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config(templates: &[&str], render: &str) -> Config {
        Config {
            render: render.to_owned(),
            templates: templates.iter().map(|s| (*s).to_owned()).collect(),
            ..Config::default()
        }
    }

    #[test]
    fn test_generate_with_files() {
        let cases: [(&str, Config, &str, &str); 5] = [
            ("empty params", config(&[], ""), "", "error rendering template"),
            ("non existing templates", config(&["no_template"], ""), "", "error loading template"),
            (
                "non existing render template",
                config(&[], "no_render_template"),
                "",
                "error rendering template",
            ),
            ("template with include", config(&["test_data/*.input"], "template_c.input"), "a b c", ""),
            (
                "template with include overwrite",
                config(
                    &["test_data/*.input", "test_data/other_folder/*.input"],
                    "template_c.input",
                ),
                "other a template b c",
                "",
            ),
        ];

        for (name, conf, want_out, want_err) in cases {
            let mut out = Vec::new();
            let result = generate(&conf, &mut out, &OutputCtx::default());
            match (result, want_err) {
                (Ok(()), "") => {}
                (Ok(()), _) => panic!("{name}: expected error containing {want_err:?}"),
                (Err(err), "") => panic!("{name}: unexpected error {err}"),
                (Err(err), _) => {
                    assert!(err.to_string().contains(want_err), "{name}: got {err}");
                    assert_eq!(err.exit_code(), 2, "{name}");
                }
            }
            assert_eq!(String::from_utf8(out).unwrap(), want_out, "{name}");
        }
    }

    #[test]
    fn test_non_existing_included_template() {
        let mut out = Vec::new();
        let err = generate(
            &config(&["test_data/*.input"], "template_fail.input"),
            &mut out,
            &OutputCtx::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::Render(_)));
        assert!(err.to_string().contains("error rendering template"));
    }

    #[test]
    #[serial]
    fn test_generate_with_env_vars() {
        // SAFETY: serialized with every other test that touches the environment.
        unsafe { std::env::set_var("bar", "FOO") };

        let cases = [
            ("template_env_a.input", "Template with an FOO var"),
            ("template_env_b.input", "Template with an <no value> var"),
        ];
        let mut results = Vec::new();
        for (name, _) in cases {
            let pattern = format!("test_data/{name}");
            let mut out = Vec::new();
            let result = generate(&config(&[pattern.as_str()], name), &mut out, &OutputCtx::default());
            results.push((result.map_err(|e| e.to_string()), String::from_utf8(out).unwrap()));
        }

        // SAFETY: as above.
        unsafe { std::env::remove_var("bar") };

        for ((_, want), (result, got)) in cases.iter().zip(results) {
            assert_eq!(result, Ok(()));
            assert_eq!(got, *want);
        }
    }

    #[test]
    fn test_run_stops_when_output_cannot_be_created() {
        let dir = tempfile::tempdir().unwrap();
        let conf = Config {
            output: dir.path().join("nope").join("out.txt").display().to_string(),
            ..config(&["no_template"], "x")
        };
        let err = run(&conf, &OutputCtx::default()).unwrap_err();
        assert!(matches!(err, GenerateError::Sink(_)), "got {err:?}");
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.phase(), "error opening output");
    }

    #[test]
    fn test_run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let conf = Config {
            output: path.display().to_string(),
            ..config(&["test_data/*.input"], "template_c.input")
        };
        run(&conf, &OutputCtx::default()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "a b c");
    }
}
