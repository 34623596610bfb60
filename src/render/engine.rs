/// Execute a named template against the environment snapshot.
use std::io::Write;

use super::env::EnvData;
use super::errors::RenderError;
use super::loader::TemplateSet;

/// Render template `name` from `templates` with `env` as its context,
/// streaming the output into `sink`.
///
/// Variables missing from `env` render as [`super::dialect::NO_VALUE`].
///
/// # Errors
///
/// Returns `RenderError` if `name` is not registered, an included template
/// is missing, execution fails, or the sink cannot be written.
pub fn render<W: Write>(
    templates: &TemplateSet,
    name: &str,
    env: &EnvData,
    sink: &mut W,
) -> Result<(), RenderError> {
    let tmpl = templates.environment().get_template(name)?;
    tmpl.render_captured_to(env, &mut *sink)?;
    sink.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::load_templates;

    fn render_str(patterns: &[&str], name: &str, env: &EnvData) -> (String, Result<(), RenderError>) {
        let templates = load_templates(patterns).unwrap();
        let mut out = Vec::new();
        let result = render(&templates, name, env, &mut out);
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn test_include() {
        let (out, result) = render_str(&["test_data/*.input"], "template_c.input", &EnvData::default());
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "a b c");
    }

    #[test]
    fn test_include_overlay() {
        let (out, result) = render_str(
            &["test_data/*.input", "test_data/other_folder/*.input"],
            "template_c.input",
            &EnvData::default(),
        );
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "other a template b c");
    }

    #[test]
    fn test_missing_render_target() {
        for name in ["", "no_render_template"] {
            let (out, result) = render_str(&[], name, &EnvData::default());
            let err = result.unwrap_err();
            assert!(err.to_string().contains("error rendering template"), "got {err}");
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_missing_included_template() {
        let (_, result) = render_str(&["test_data/*.input"], "template_fail.input", &EnvData::default());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("error rendering template"), "got {err}");
    }

    #[test]
    fn test_env_var_substitution() {
        let env: EnvData = [("bar", "FOO")].into_iter().collect();
        let (out, result) = render_str(&["test_data/template_env_a.input"], "template_env_a.input", &env);
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "Template with an FOO var");
    }

    #[test]
    fn test_missing_env_var_renders_no_value() {
        let (out, result) = render_str(
            &["test_data/template_env_b.input"],
            "template_env_b.input",
            &EnvData::default(),
        );
        assert!(result.is_ok(), "{result:?}");
        assert_eq!(out, "Template with an <no value> var");
    }

    #[test]
    fn test_env_in_control_flow() {
        let mut templates = TemplateSet::new();
        templates
            .add(
                "t".to_owned(),
                "{% if MODE == \"prod\" %}live{% else %}dev{% endif %}:{{ PORT }}".to_owned(),
            )
            .unwrap();
        let env: EnvData = [("MODE", "prod"), ("PORT", "8080")].into_iter().collect();
        let mut out = Vec::new();
        render(&templates, "t", &env, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "live:8080");
    }
}
