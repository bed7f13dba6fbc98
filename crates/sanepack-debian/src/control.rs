//! Assembly of the debian/control record

use sanepack_core::{Package, Person};
use serde::Serialize;

use crate::error::{DebianError, Result};

/// Debian policy version the generated control file declares
pub const STANDARDS_VERSION: &str = "3.9.3";

/// Run-time dependency appended to every package
pub const HELPER_DEPENDENCY: &str = "debhelper";

/// Separator between entries of a relationship field
pub const SEPARATOR: &str = ", ";

/// Join relationship entries into a single control field value
pub fn concat<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Format an extended description as Debian continuation lines.
///
/// Every line gets a leading space and blank lines become ` .`.
pub fn format_long_description(text: &str) -> String {
    text.trim_end()
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                " .".to_string()
            } else {
                format!(" {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Which optional fields the control template emits
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ControlIncludes {
    pub homepage: bool,
    pub build_depends: bool,
    pub long_description: bool,
    pub recommends: bool,
    pub suggests: bool,
    pub conflicts: bool,
    pub provides: bool,
    pub replaces: bool,
}

/// Render-ready contents of debian/control
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ControlFile {
    pub name: String,
    pub section: String,
    pub priority: String,
    pub architecture: String,
    pub standards_version: &'static str,
    pub homepage: String,
    pub description: String,
    pub long_description: String,
    pub maintainer: Person,
    pub build_depends: String,
    pub depends: String,
    pub recommends: String,
    pub suggests: String,
    pub conflicts: String,
    pub provides: String,
    pub replaces: String,
    pub include: ControlIncludes,
}

impl ControlFile {
    /// Build the control record from a descriptor.
    ///
    /// Fails with [`DebianError::MissingField`] naming the first required
    /// field that is empty. The dependency lists are required by the
    /// descriptor type itself.
    pub fn assemble(package: &Package) -> Result<Self> {
        require(&package.project_name, "name")?;
        require(&package.description, "description")?;
        require(&package.section, "section")?;
        require(&package.priority, "priority")?;
        require(&package.architecture, "architecture")?;
        require(&package.maintainer.name, "maintainer name")?;
        require(&package.maintainer.email, "maintainer email")?;

        let homepage = package.homepage.clone().unwrap_or_default();
        let long_description = package
            .long_description
            .as_deref()
            .map(format_long_description)
            .unwrap_or_default();

        let mut depends = package.depends.clone();
        depends.push(HELPER_DEPENDENCY.to_string());

        let (recommends, include_recommends) = optional_list(&package.recommends);
        let (suggests, include_suggests) = optional_list(&package.suggests);
        let (conflicts, include_conflicts) = optional_list(&package.conflicts);
        let (provides, include_provides) = optional_list(&package.provides);
        let (replaces, include_replaces) = optional_list(&package.replaces);

        Ok(Self {
            include: ControlIncludes {
                homepage: !homepage.is_empty(),
                build_depends: !package.build_depends.is_empty(),
                long_description: !long_description.is_empty(),
                recommends: include_recommends,
                suggests: include_suggests,
                conflicts: include_conflicts,
                provides: include_provides,
                replaces: include_replaces,
            },
            name: package.project_name.clone(),
            section: package.section.clone(),
            priority: package.priority.clone(),
            architecture: package.architecture.clone(),
            standards_version: STANDARDS_VERSION,
            homepage,
            description: package.description.clone(),
            long_description,
            maintainer: package.maintainer.clone(),
            build_depends: concat(&package.build_depends),
            depends: concat(&depends),
            recommends,
            suggests,
            conflicts,
            provides,
            replaces,
        })
    }
}

fn require(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DebianError::missing_field(field));
    }
    Ok(())
}

/// Concatenated value and whether the field should be emitted
fn optional_list(list: &Option<Vec<String>>) -> (String, bool) {
    match list {
        Some(items) if !items.is_empty() => (concat(items), true),
        _ => (String::new(), false),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use sanepack_core::Copyright;

    use super::*;

    pub(crate) fn sample_package() -> Package {
        Package {
            project_name: "foo".to_string(),
            project_owners: Vec::new(),
            maintainer: Person::new("Jane", "jane@x.org"),
            description: "bar".to_string(),
            long_description: None,
            homepage: None,
            section: "devel".to_string(),
            priority: "optional".to_string(),
            architecture: "any".to_string(),
            build_depends: vec!["gcc".to_string()],
            depends: vec!["libc6".to_string()],
            recommends: None,
            suggests: None,
            conflicts: None,
            provides: None,
            replaces: None,
            copyright: Copyright {
                name: "foo".to_string(),
                license: "MIT".to_string(),
                homepage: None,
                files: Vec::new(),
            },
            man_pages: Vec::new(),
            docs: Vec::new(),
            init_script: None,
        }
    }

    #[test]
    fn test_concat() {
        assert_eq!(concat::<&str>(&[]), "");
        assert_eq!(concat(&["a"]), "a");
        assert_eq!(concat(&["a", "b"]), "a, b");
        assert_eq!(concat(&["a", "b", "c"]), "a, b, c");
    }

    #[test]
    fn test_missing_required_fields() {
        let fields = [
            "name",
            "description",
            "section",
            "priority",
            "architecture",
            "maintainer name",
            "maintainer email",
        ];

        for expected in fields {
            let mut package = sample_package();
            match expected {
                "name" => package.project_name.clear(),
                "description" => package.description.clear(),
                "section" => package.section.clear(),
                "priority" => package.priority.clear(),
                "architecture" => package.architecture.clear(),
                "maintainer name" => package.maintainer.name.clear(),
                _ => package.maintainer.email.clear(),
            }
            match ControlFile::assemble(&package) {
                Err(DebianError::MissingField { field }) => assert_eq!(field, expected),
                other => panic!("expected missing {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_depends_gains_helper() {
        let package = sample_package();
        let control = ControlFile::assemble(&package).unwrap();

        assert_eq!(control.depends, "libc6, debhelper");
        assert_eq!(control.build_depends, "gcc");
        assert_eq!(package.depends, vec!["libc6".to_string()]);
    }

    #[test]
    fn test_empty_depends_still_gets_helper() {
        let mut package = sample_package();
        package.depends.clear();
        package.build_depends.clear();

        let control = ControlFile::assemble(&package).unwrap();
        assert_eq!(control.depends, "debhelper");
        assert_eq!(control.build_depends, "");
        assert!(!control.include.build_depends);
    }

    #[test]
    fn test_include_flags_follow_source_values() {
        let mut package = sample_package();
        package.homepage = Some("https://example.org".to_string());
        package.recommends = Some(Vec::new());
        package.suggests = Some(vec!["foo-doc".to_string()]);
        package.provides = Some(vec!["bar".to_string(), "baz".to_string()]);

        let control = ControlFile::assemble(&package).unwrap();

        assert_eq!(
            control.include,
            ControlIncludes {
                homepage: true,
                build_depends: true,
                suggests: true,
                provides: true,
                ..ControlIncludes::default()
            }
        );
        assert_eq!(control.suggests, "foo-doc");
        assert_eq!(control.provides, "bar, baz");
        assert_eq!(control.recommends, "");
        assert_eq!(control.standards_version, STANDARDS_VERSION);
    }

    #[test]
    fn test_long_description_formatting() {
        let text = "First paragraph\ncontinues here.\n\nSecond paragraph.\n";
        assert_eq!(
            format_long_description(text),
            " First paragraph\n continues here.\n .\n Second paragraph."
        );

        let mut package = sample_package();
        package.long_description = Some(text.to_string());
        let control = ControlFile::assemble(&package).unwrap();
        assert!(control.include.long_description);
    }
}
