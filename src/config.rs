//! Generation context
//!
//! Settings are read once at startup from a settings file layered with
//! `TABLEGEN__*` environment variables, then frozen into a [`GenerationContext`]
//! that every generator borrows.

use crate::error::{Result, ScaffoldError};
use chrono::{Local, NaiveDateTime};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `TABLEGEN__JDBC__PASSWORD`
pub const ENV_PREFIX: &str = "TABLEGEN";

/// Pattern used when `date_format` is absent or empty
pub const DEFAULT_DATE_FORMAT: &str = "yyyy/MM/dd";

#[derive(Debug, Clone, Deserialize)]
pub struct JdbcSettings {
    pub url: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub driver_class: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathSettings {
    /// Defaults to the current directory
    #[serde(default)]
    pub project_root: Option<PathBuf>,
    pub java: PathBuf,
    pub resources: PathBuf,
    pub templates: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PackageSettings {
    pub base: String,
    pub model: String,
    pub mapper: String,
    pub service: String,
    pub service_impl: String,
    pub controller: String,
    pub dao: String,
}

/// Fully-qualified names of the shared classes every generated type builds on
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceSettings {
    pub mapper_interface: String,
    pub service_interface: String,
    pub abstract_service_class: String,
}

/// Literal directory overrides; an empty value falls back to the package name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackagePathSettings {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub service_impl: String,
    #[serde(default)]
    pub controller: String,
    #[serde(default)]
    pub dao: String,
}

/// Raw settings as found in the settings file
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSettings {
    pub jdbc: JdbcSettings,
    pub paths: PathSettings,
    pub packages: PackageSettings,
    pub references: ReferenceSettings,
    #[serde(default)]
    pub package_paths: PackagePathSettings,
    pub author: String,
    #[serde(default)]
    pub date_format: String,
}

/// Resolved source directories, as `/com/demo/service/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePaths {
    pub service: String,
    pub service_impl: String,
    pub controller: String,
    pub dao: String,
}

/// Immutable generation settings shared by every generator of a run
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub jdbc: JdbcSettings,
    pub project_root: PathBuf,
    pub java_root: PathBuf,
    pub resources_root: PathBuf,
    pub template_root: PathBuf,
    pub packages: PackageSettings,
    pub package_paths: PackagePaths,
    pub references: ReferenceSettings,
    pub author: String,
    /// Generation date, already formatted
    pub date: String,
}

impl GenerationContext {
    /// Load the settings file at `path`, with `TABLEGEN__*` environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ScaffoldError::ConfigurationLoadFailed(format!(
                "settings file not found: {}",
                path.display()
            )));
        }

        let settings = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .map_err(|e| {
                ScaffoldError::ConfigurationLoadFailed(format!("{}: {}", path.display(), e))
            })?;

        let settings: GeneratorSettings = settings.try_deserialize().map_err(|e| {
            ScaffoldError::ConfigurationLoadFailed(format!("{}: {}", path.display(), e))
        })?;

        Self::from_settings(settings, Local::now().naive_local())
    }

    /// Build the context from deserialized settings, stamping it with `now`.
    pub fn from_settings(settings: GeneratorSettings, now: NaiveDateTime) -> Result<Self> {
        let project_root = match settings.paths.project_root {
            Some(root) => root,
            None => std::env::current_dir().map_err(|e| {
                ScaffoldError::ConfigurationLoadFailed(format!(
                    "cannot resolve project root: {}",
                    e
                ))
            })?,
        };

        let overrides = &settings.package_paths;
        let package_paths = PackagePaths {
            service: package_path(&settings.packages.service, &overrides.service),
            service_impl: package_path(&settings.packages.service_impl, &overrides.service_impl),
            controller: package_path(&settings.packages.controller, &overrides.controller),
            dao: package_path(&settings.packages.dao, &overrides.dao),
        };

        let date_format = if settings.date_format.is_empty() {
            DEFAULT_DATE_FORMAT
        } else {
            settings.date_format.as_str()
        };
        let date = format_date(date_format, &now)?;

        Ok(Self {
            java_root: project_root.join(&settings.paths.java),
            resources_root: project_root.join(&settings.paths.resources),
            template_root: project_root.join(&settings.paths.templates),
            project_root,
            jdbc: settings.jdbc,
            packages: settings.packages,
            package_paths,
            references: settings.references,
            author: settings.author,
            date,
        })
    }

    /// `<java root>/<package path>[/<sign>]/<file name>`
    pub fn java_file(&self, package_path: &str, sign: Option<&str>, file_name: &str) -> PathBuf {
        let mut path = self.java_root.join(package_path.trim_matches('/'));
        if let Some(sign) = sign {
            path.push(sign);
        }
        path.push(file_name);
        path
    }

    /// `<resources root>/<package as path>/<file name>`
    pub fn resource_file(&self, package: &str, file_name: &str) -> PathBuf {
        package_file(&self.resources_root, package, file_name)
    }
}

/// `<root>/<package as path>/<file name>`: `com.demo.model` → `com/demo/model`
pub fn package_file(root: &Path, package: &str, file_name: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(file_name);
    path
}

/// Source directory of a package: the override verbatim when set, else
/// `com.demo.service` → `/com/demo/service/`.
pub fn package_path(package: &str, override_path: &str) -> String {
    if !override_path.is_empty() {
        return override_path.to_string();
    }
    format!("/{}/", package.replace('.', "/"))
}

/// `package` or `package.sign`
pub fn qualify(package: &str, sign: Option<&str>) -> String {
    match sign {
        Some(sign) => format!("{}.{}", package, sign),
        None => package.to_string(),
    }
}

/// Format `now` with a `SimpleDateFormat`-style pattern such as `yyyy/MM/dd HH:mm`.
///
/// Supported letters are `y M d H h m s S E a`. Text inside single quotes is
/// literal and `''` is a quote. Any other unquoted ASCII letter is rejected.
pub fn format_date(pattern: &str, now: &NaiveDateTime) -> Result<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut strftime = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                strftime.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                push_literal(&mut strftime, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        let field = match (c, run) {
            ('y', 2) => Some("%y"),
            ('y', _) => Some("%Y"),
            ('M', 1) => Some("%-m"),
            ('M', 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('d', 1) => Some("%-d"),
            ('d', _) => Some("%d"),
            ('H', 1) => Some("%-H"),
            ('H', _) => Some("%H"),
            ('h', 1) => Some("%-I"),
            ('h', _) => Some("%I"),
            ('m', 1) => Some("%-M"),
            ('m', _) => Some("%M"),
            ('s', 1) => Some("%-S"),
            ('s', _) => Some("%S"),
            ('S', _) => Some("%3f"),
            ('E', 1..=3) => Some("%a"),
            ('E', _) => Some("%A"),
            ('a', _) => Some("%p"),
            _ => None,
        };

        match field {
            Some(field) => strftime.push_str(field),
            None if c.is_ascii_alphabetic() => {
                return Err(ScaffoldError::ConfigurationLoadFailed(format!(
                    "unsupported letter '{}' in date format '{}'",
                    c, pattern
                )));
            }
            None => {
                for _ in 0..run {
                    push_literal(&mut strftime, c);
                }
            }
        }
        i += run;
    }

    Ok(now.format(&strftime).to_string())
}

fn push_literal(strftime: &mut String, c: char) {
    if c == '%' {
        strftime.push_str("%%");
    } else {
        strftime.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn stamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 2)
            .unwrap()
    }

    const SETTINGS: &str = r#"
author = "zhh"

[jdbc]
url = "jdbc:postgresql://localhost:5432/demo"
username = "postgres"
password = "postgres"
driver_class = "org.postgresql.Driver"

[paths]
project_root = "/work/demo"
java = "src/main/java"
resources = "src/main/resources"
templates = "templates"

[packages]
base = "com.demo"
model = "com.demo.model"
mapper = "com.demo.dao"
service = "com.demo.service"
service_impl = "com.demo.service.impl"
controller = "com.demo.web"
dao = "com.demo.core"

[references]
mapper_interface = "com.demo.core.Mapper"
service_interface = "com.demo.service.Service"
abstract_service_class = "com.demo.service.AbstractService"

[package_paths]
controller = "/com/demo/controller/"
"#;

    #[test]
    fn test_package_path() {
        assert_eq!(package_path("com.bigsea.sns", ""), "/com/bigsea/sns/");
        assert_eq!(package_path("service", ""), "/service/");
        assert_eq!(package_path("com.bigsea.sns", "/custom/dir/"), "/custom/dir/");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("com.demo.model", Some("test")), "com.demo.model.test");
        assert_eq!(qualify("com.demo.model", None), "com.demo.model");
    }

    #[test]
    fn test_format_date() {
        let now = stamp();
        let cases = [
            (DEFAULT_DATE_FORMAT, "2024/03/07"),
            ("yyyy-MM-dd HH:mm:ss", "2024-03-07 09:05:02"),
            ("d/M/yy", "7/3/24"),
            ("yyyy'T'HH 100%", "2024T09 100%"),
            ("''yyyy''", "'2024'"),
            ("yyyy'年'M'月'", "2024年3月"),
        ];
        for (pattern, expected) in cases {
            assert_eq!(format_date(pattern, &now).unwrap(), expected, "pattern {}", pattern);
        }
    }

    #[test]
    fn test_format_date_rejects_unknown_letters() {
        let now = stamp();
        for pattern in ["yyyy-QQ", "yyyy/MM/dd zzz", "G yyyy"] {
            match format_date(pattern, &now) {
                Err(ScaffoldError::ConfigurationLoadFailed(msg)) => {
                    assert!(msg.contains(pattern), "message {}", msg)
                }
                other => panic!("expected ConfigurationLoadFailed for {}, got {:?}", pattern, other),
            }
        }
    }

    #[test]
    fn test_load_rejects_bad_date_format() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("generator.toml");
        fs::write(&file, SETTINGS.replace("author = \"zhh\"", "author = \"zhh\"\ndate_format = \"yyyy-ww\"")).unwrap();

        assert!(matches!(
            GenerationContext::load(&file),
            Err(ScaffoldError::ConfigurationLoadFailed(_))
        ));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("generator.toml");
        fs::write(&file, SETTINGS).unwrap();

        // no other test reads the password or the driver class
        std::env::set_var("TABLEGEN__JDBC__PASSWORD", "from-env");
        std::env::set_var("TABLEGEN__JDBC__DRIVER_CLASS", "org.example.Driver");
        let loaded = GenerationContext::load(&file);
        std::env::remove_var("TABLEGEN__JDBC__PASSWORD");
        std::env::remove_var("TABLEGEN__JDBC__DRIVER_CLASS");

        let ctx = loaded.expect("settings should load");
        assert_eq!(ctx.jdbc.password, "from-env");
        assert_eq!(ctx.jdbc.driver_class, "org.example.Driver");
        assert_eq!(ctx.jdbc.username, "postgres");
    }

    #[test]
    fn test_load_settings_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("generator.toml");
        fs::write(&file, SETTINGS).unwrap();

        let ctx = GenerationContext::load(&file).expect("settings should load");
        assert_eq!(ctx.author, "zhh");
        assert_eq!(ctx.java_root, PathBuf::from("/work/demo/src/main/java"));
        assert_eq!(ctx.template_root, PathBuf::from("/work/demo/templates"));
        assert_eq!(ctx.package_paths.service, "/com/demo/service/");
        assert_eq!(ctx.package_paths.controller, "/com/demo/controller/");
        assert_eq!(ctx.package_paths.dao, "/com/demo/core/");
        assert_eq!(ctx.references.mapper_interface, "com.demo.core.Mapper");
        // yyyy/MM/dd
        assert_eq!(ctx.date.len(), 10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = GenerationContext::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ScaffoldError::ConfigurationLoadFailed(_))));
    }

    #[test]
    fn test_load_missing_required_key() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("generator.toml");
        fs::write(&file, SETTINGS.replace("author = \"zhh\"", "")).unwrap();

        match GenerationContext::load(&file) {
            Err(ScaffoldError::ConfigurationLoadFailed(msg)) => assert!(msg.contains("author")),
            other => panic!("expected ConfigurationLoadFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_context_paths() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("generator.toml");
        fs::write(&file, SETTINGS).unwrap();
        let ctx = GenerationContext::load(&file).unwrap();

        assert_eq!(
            ctx.java_file(&ctx.package_paths.service, Some("test"), "DemoService.java"),
            PathBuf::from("/work/demo/src/main/java/com/demo/service/test/DemoService.java")
        );
        assert_eq!(
            ctx.java_file(&ctx.package_paths.dao, None, "Mapper.java"),
            PathBuf::from("/work/demo/src/main/java/com/demo/core/Mapper.java")
        );
        assert_eq!(
            ctx.resource_file("mapper.test", "DemoMapper.xml"),
            PathBuf::from("/work/demo/src/main/resources/mapper/test/DemoMapper.xml")
        );
    }
}
