//! Debian scaffold generation

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use minijinja::Value;
use sanepack_core::{Copyright, Frameworker, Package};
use tracing::{debug, info};

use crate::control::ControlFile;
use crate::error::{DebianError, Result};
use crate::history::{ChangelogFile, GitHistory, HistorySource, VersionHistory};
use crate::template::{TemplateRenderer, TemplateSet};

/// Name the Debian backend is selected by
pub const TARGET_NAME: &str = "debian";

/// Instructions shown once the scaffold is in place
pub const DEBIAN_INFO: &str = "To complete building the package, invoke:
    fakeroot dpkg-buildpackage";

/// debhelper compatibility level written to debian/compat
pub const COMPAT_VERSION: &str = "8";

const CHANGELOG_TEMPLATE: &str = "changelog.template";
const CONTROL_TEMPLATE: &str = "control.template";
const COPYRIGHT_TEMPLATE: &str = "copyright.template";
const RULES_FILE: &str = "rules";

/// Generates a `debian/` directory for a project
#[derive(Debug, Clone)]
pub struct DebianFrameworker<H = GitHistory> {
    /// Project root, where `debian/` is created
    project_dir: PathBuf,
    /// Directory holding the `debian/` template subdirectory
    template_dir: PathBuf,
    /// Source of the version and change entries
    history: H,
}

impl DebianFrameworker<GitHistory> {
    /// Create a frameworker reading history from the project's git checkout
    pub fn new(project_dir: impl Into<PathBuf>, template_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let history = GitHistory::new(project_dir.clone());
        Self { project_dir, template_dir: template_dir.into(), history }
    }
}

impl<H: HistorySource> DebianFrameworker<H> {
    /// Create a frameworker with a custom history source
    pub fn with_history(
        project_dir: impl Into<PathBuf>,
        template_dir: impl Into<PathBuf>,
        history: H,
    ) -> Self {
        Self { project_dir: project_dir.into(), template_dir: template_dir.into(), history }
    }

    /// Output directory of the scaffold
    pub fn debian_dir(&self) -> PathBuf {
        self.project_dir.join("debian")
    }

    /// Directory the Debian templates are loaded from
    pub fn templates_dir(&self) -> PathBuf {
        self.template_dir.join("debian")
    }

    /// Write every debian/ file for `package`, stopping at the first failure.
    ///
    /// Required fields are checked before anything touches the disk. An
    /// existing debian/ directory is an error, never overwritten.
    pub fn generate(&self, package: &Package) -> Result<()> {
        let control = ControlFile::assemble(package)?;

        let templates = TemplateSet::load(self.templates_dir())?;
        debug!("Loaded templates from {}", templates.dir().display());

        let debian_dir = self.debian_dir();
        debug!("Attempting to create {}", debian_dir.display());
        create_output_dir(&debian_dir)?;

        debug!("Attempting to create debian/changelog");
        let history = VersionHistory::extract(&self.history)?;
        let changelog = ChangelogFile::new(
            &package.project_name,
            history,
            &package.maintainer,
            chrono::Local::now(),
        );
        write_changelog(&templates, &debian_dir, &changelog)?;

        debug!("Attempting to create debian/control");
        write_control(&templates, &debian_dir, &control)?;

        debug!("Attempting to create debian/compat");
        write_compat(&debian_dir)?;

        debug!("Attempting to create debian/copyright");
        write_copyright(&templates, &debian_dir, &copyright_for(package))?;

        debug!("Attempting to create debian/rules");
        write_rules(&templates, &debian_dir)?;

        debug!("Attempting to create debian/docs");
        write_lines(&debian_dir.join("docs"), &package.docs)?;

        let manpages = format!("{}.manpages", package.project_name);
        debug!("Attempting to create debian/{manpages}");
        write_lines(&debian_dir.join(manpages), &package.man_pages)?;

        match &package.init_script {
            Some(script) => {
                let init = format!("{}.init", package.project_name);
                debug!("Attempting to create debian/{init}");
                copy_file(&self.project_dir.join(script), &debian_dir.join(init))?;
            }
            None => debug!("Skipped creating debian/{}.init", package.project_name),
        }

        info!("Generated debian/ for {} {}", package.project_name, changelog.version);
        Ok(())
    }
}

impl<H: HistorySource> Frameworker for DebianFrameworker<H> {
    fn info(&self) -> &'static str {
        DEBIAN_INFO
    }

    fn framework(&self, package: &Package) -> sanepack_core::Result<()> {
        self.generate(package)
            .map_err(|e| sanepack_core::Error::backend(TARGET_NAME, e))
    }
}

fn create_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir(dir).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => DebianError::DirectoryExists { path: dir.to_path_buf() },
        _ => DebianError::Io(e),
    })
}

/// Copyright record with defaults filled in from the package
fn copyright_for(package: &Package) -> Copyright {
    let mut copyright = package.copyright.clone();
    if let Some(homepage) = package.homepage.as_ref().filter(|h| !h.is_empty()) {
        copyright.homepage = Some(homepage.clone());
    }
    if copyright.name.is_empty() {
        copyright.name = package.project_name.clone();
    }
    copyright
}

fn write_changelog(
    renderer: &dyn TemplateRenderer,
    debian_dir: &Path,
    changelog: &ChangelogFile,
) -> Result<()> {
    let mut file = File::create(debian_dir.join("changelog"))?;
    renderer.render(CHANGELOG_TEMPLATE, Value::from_serialize(changelog), &mut file)
}

fn write_control(
    renderer: &dyn TemplateRenderer,
    debian_dir: &Path,
    control: &ControlFile,
) -> Result<()> {
    let mut file = File::create(debian_dir.join("control"))?;
    renderer.render(CONTROL_TEMPLATE, Value::from_serialize(control), &mut file)
}

fn write_compat(debian_dir: &Path) -> Result<()> {
    let mut file = File::create(debian_dir.join("compat"))?;
    writeln!(file, "{COMPAT_VERSION}")?;
    Ok(())
}

fn write_copyright(
    renderer: &dyn TemplateRenderer,
    debian_dir: &Path,
    copyright: &Copyright,
) -> Result<()> {
    let mut file = File::create(debian_dir.join("copyright"))?;
    renderer.render(COPYRIGHT_TEMPLATE, Value::from_serialize(copyright), &mut file)
}

/// debian/rules is copied verbatim and made executable
fn write_rules(renderer: &dyn TemplateRenderer, debian_dir: &Path) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o755);
    }

    let mut file = options.open(debian_dir.join(RULES_FILE))?;
    renderer.copy_raw(RULES_FILE, &mut file)
}

/// One entry per line
fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut file = File::create(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}

fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    let mut input = File::open(source)?;
    let mut output = File::create(destination)?;
    io::copy(&mut input, &mut output)?;
    Ok(())
}
