/// Template registry built from an ordered list of glob patterns.
use std::path::Path;

use minijinja::Environment;

use super::dialect;
use super::errors::LoadError;

/// Named templates, parsed and ready to render.
///
/// Registering a name that already exists replaces the earlier template, so
/// a later glob can overlay templates loaded by an earlier one.
pub struct TemplateSet {
    env: Environment<'static>,
    /// Registered names in order of first registration.
    names: Vec<String>,
}

impl TemplateSet {
    /// An empty registry using the text dialect.
    #[must_use]
    pub fn new() -> Self {
        let mut env = Environment::new();
        dialect::configure(&mut env);
        Self {
            env,
            names: Vec::new(),
        }
    }

    /// Parse `source` and register it as `name`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Returns the engine's syntax error if `source` does not parse.
    pub fn add(&mut self, name: String, source: String) -> Result<(), minijinja::Error> {
        self.env.add_template_owned(name.clone(), source)?;
        if !self.names.contains(&name) {
            self.names.push(name);
        }
        Ok(())
    }

    /// Expand `pattern` and register every matching file under its file name.
    ///
    /// Matches are visited in sorted path order; directories are skipped.
    /// Returns the number of files loaded.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the pattern is invalid, matches no files, or a
    /// match cannot be read or parsed.
    pub fn load_glob(&mut self, pattern: &str) -> Result<usize, LoadError> {
        let paths = glob::glob(pattern).map_err(|source| LoadError::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;

        let mut loaded = 0;
        for entry in paths {
            let path = entry.map_err(|e| LoadError::Read {
                pattern: pattern.to_owned(),
                path: e.path().display().to_string(),
                source: e.into(),
            })?;
            if path.is_dir() {
                continue;
            }
            let source = std::fs::read_to_string(&path).map_err(|source| LoadError::Read {
                pattern: pattern.to_owned(),
                path: path.display().to_string(),
                source,
            })?;
            self.add(template_name(&path), source)
                .map_err(|source| LoadError::Parse {
                    pattern: pattern.to_owned(),
                    source,
                })?;
            loaded += 1;
        }

        if loaded == 0 {
            return Err(LoadError::NoMatch {
                pattern: pattern.to_owned(),
            });
        }
        Ok(loaded)
    }

    /// Registered names in order of first registration.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub(crate) fn environment(&self) -> &Environment<'static> {
        &self.env
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Load every pattern in order into one registry.
///
/// # Errors
///
/// Returns the first `LoadError`; no partial registry is returned.
pub fn load_templates<S: AsRef<str>>(patterns: &[S]) -> Result<TemplateSet, LoadError> {
    patterns.iter().try_fold(TemplateSet::new(), |mut set, pattern| {
        set.load_glob(pattern.as_ref())?;
        Ok(set)
    })
}

/// Registry name for a template file: its final path component.
fn template_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
