//! Template processing
//!
//! Generators never render text themselves: they hand a template identifier,
//! a data dictionary and a destination to a [`TemplateProcessor`].

use handlebars::Handlebars;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Key/value data handed to a template
pub type TemplateData = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("failed to render {template}: {source}")]
    Render {
        template: String,
        #[source]
        source: handlebars::RenderError,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome for one target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitStatus {
    /// Rendered during this run
    Written,
    /// Already on disk, left untouched
    Kept,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub path: PathBuf,
    pub status: EmitStatus,
}

impl EmittedFile {
    pub fn written(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: EmitStatus::Written,
        }
    }

    pub fn kept(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            status: EmitStatus::Kept,
        }
    }

    pub fn is_written(&self) -> bool {
        self.status == EmitStatus::Written
    }
}

/// Renders a named template with `data` into `destination`
pub trait TemplateProcessor {
    fn process(
        &self,
        template: &str,
        data: &TemplateData,
        destination: &Path,
    ) -> Result<(), TemplateError>;
}

/// Render `template` into `destination` unless the file already exists.
///
/// An existing file is never opened for writing.
pub fn render_if_absent(
    processor: &dyn TemplateProcessor,
    template: &str,
    data: &TemplateData,
    destination: &Path,
) -> Result<EmittedFile, TemplateError> {
    if destination.exists() {
        log::debug!("{} exists, skipped", destination.display());
        return Ok(EmittedFile::kept(destination));
    }
    processor.process(template, data, destination)?;
    Ok(EmittedFile::written(destination))
}

/// Handlebars templates read from a directory, one file per template
///
/// Output is plain source code, so HTML escaping is off, and variables
/// missing from the data render as empty text.
pub struct HandlebarsProcessor {
    root: PathBuf,
    registry: Handlebars<'static>,
}

impl HandlebarsProcessor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(false);
        Self {
            root: root.into(),
            registry,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render without writing anything
    pub fn render(&self, template: &str, data: &TemplateData) -> Result<String, TemplateError> {
        let path = self.root.join(template);
        let source = fs::read_to_string(&path).map_err(|_| TemplateError::Missing(path.clone()))?;
        self.registry
            .render_template(&source, data)
            .map_err(|source| TemplateError::Render {
                template: template.to_string(),
                source,
            })
    }
}

impl TemplateProcessor for HandlebarsProcessor {
    fn process(
        &self,
        template: &str,
        data: &TemplateData,
        destination: &Path,
    ) -> Result<(), TemplateError> {
        let rendered = self.render(template, data)?;

        let io_err = |source| TemplateError::Io {
            path: destination.to_path_buf(),
            source,
        };
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(destination, rendered).map_err(io_err)
    }
}
