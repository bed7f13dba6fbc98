//! Template loading and rendering

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use minijinja::{Environment, ErrorKind, Value};
use tracing::debug;

use crate::error::{DebianError, Result};

/// Extension of files loaded as templates
pub const TEMPLATE_EXTENSION: &str = "template";

/// Renders named templates into a destination
pub trait TemplateRenderer {
    /// Substitute `ctx` into the named template and write the result
    fn render(&self, name: &str, ctx: Value, out: &mut dyn Write) -> Result<()>;

    /// Copy the named file byte-for-byte, without substitution
    fn copy_raw(&self, name: &str, out: &mut dyn Write) -> Result<()>;
}

/// Every `*.template` file of one directory
#[derive(Debug)]
pub struct TemplateSet {
    dir: PathBuf,
    env: Environment<'static>,
}

impl TemplateSet {
    /// Load all templates in `dir`.
    ///
    /// Fails if the directory cannot be read, holds no templates, or any
    /// template does not parse.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let entries =
            fs::read_dir(&dir).map_err(|e| DebianError::template_load(&dir, e.to_string()))?;

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        let mut loaded = 0usize;
        for entry in entries {
            let path = entry.map_err(|e| DebianError::template_load(&dir, e.to_string()))?.path();
            if !path.is_file() || path.extension() != Some(OsStr::new(TEMPLATE_EXTENSION)) {
                continue;
            }
            let Some(name) = path.file_name().and_then(OsStr::to_str) else {
                continue;
            };

            let source = fs::read_to_string(&path)
                .map_err(|e| DebianError::template_load(&path, e.to_string()))?;
            env.add_template_owned(name.to_string(), source)
                .map_err(|e| DebianError::template_load(&path, e.to_string()))?;

            debug!("Loaded template {name}");
            loaded += 1;
        }

        if loaded == 0 {
            return Err(DebianError::template_load(&dir, "no *.template files found"));
        }

        Ok(Self { dir, env })
    }

    /// Directory the templates were loaded from
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TemplateRenderer for TemplateSet {
    fn render(&self, name: &str, ctx: Value, out: &mut dyn Write) -> Result<()> {
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => DebianError::template_not_found(name),
            _ => DebianError::render(name, e.to_string()),
        })?;

        template
            .render_captured_to(ctx, out)
            .map_err(|e| DebianError::render(name, e.to_string()))?;
        Ok(())
    }

    fn copy_raw(&self, name: &str, out: &mut dyn Write) -> Result<()> {
        let path = self.dir.join(name);
        let mut source = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DebianError::template_not_found(name),
            _ => DebianError::Io(e),
        })?;

        io::copy(&mut source, out)?;
        Ok(())
    }
}
