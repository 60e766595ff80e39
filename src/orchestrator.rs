//! Batch generation driver
//!
//! Resolves the model name and sign of each table under a [`NamingPolicy`],
//! then runs the artifact generators in a fixed order. The shared base classes
//! are generated once, after every table succeeded.

use crate::config::GenerationContext;
use crate::error::Result;
use crate::generator::{
    ArtifactGenerator, CommonGenerator, ControllerGenerator, ModelAndMapperGenerator,
    ServiceGenerator, TableTarget,
};
use crate::naming::{default_model_name, extract_sign, to_upper_camel};
use crate::schema::SchemaGenerator;
use crate::template::{EmittedFile, TemplateProcessor};
use std::fmt;

/// How model names and signs are derived from table names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingPolicy {
    /// `gen_test_demo` → model `Demo`, sign `test`
    Simple,
    /// `gen_test_demo` → model `GenTestDemo`, sign `test`
    Detail,
    /// Caller-supplied model name, sign from the table
    Custom(String),
    /// `tb_app_page` → model `TbAppPage`, no sign
    NoModule,
}

impl fmt::Display for NamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingPolicy::Simple => write!(f, "simple"),
            NamingPolicy::Detail => write!(f, "detail"),
            NamingPolicy::Custom(name) => write!(f, "custom ({})", name),
            NamingPolicy::NoModule => write!(f, "no module"),
        }
    }
}

/// Names resolved for one table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedTable {
    pub model_name: Option<String>,
    pub sign: Option<String>,
}

impl ResolvedTable {
    pub fn target<'a>(&'a self, table_name: &'a str) -> TableTarget<'a> {
        TableTarget::new(table_name, self.model_name.as_deref(), self.sign.as_deref())
    }
}

/// Apply `policy` to `table_name`.
///
/// ```
/// use tablegen::orchestrator::{resolve, NamingPolicy};
///
/// let resolved = resolve(&NamingPolicy::Simple, "gen_test_demo").unwrap();
/// assert_eq!(resolved.model_name.as_deref(), Some("Demo"));
/// assert_eq!(resolved.sign.as_deref(), Some("test"));
/// ```
pub fn resolve(policy: &NamingPolicy, table_name: &str) -> Result<ResolvedTable> {
    let resolved = match policy {
        NamingPolicy::Simple => {
            let sign = extract_sign(table_name)?;
            let model = default_model_name(table_name)?;
            ResolvedTable {
                // two-segment tables have nothing left after the sign
                model_name: Some(model).filter(|name| !name.is_empty()),
                sign: Some(sign),
            }
        }
        NamingPolicy::Detail => ResolvedTable {
            sign: Some(extract_sign(table_name)?),
            model_name: Some(to_upper_camel(table_name)),
        },
        NamingPolicy::Custom(model) => ResolvedTable {
            sign: Some(extract_sign(table_name)?),
            model_name: Some(model.clone()),
        },
        NamingPolicy::NoModule => ResolvedTable::default(),
    };
    Ok(resolved)
}

/// What a successful run produced
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Tables generated, in input order
    pub tables: Vec<String>,
    /// Every target file, written or kept, in generation order
    pub files: Vec<EmittedFile>,
}

impl GenerationReport {
    pub fn written(&self) -> impl Iterator<Item = &EmittedFile> {
        self.files.iter().filter(|f| f.is_written())
    }

    pub fn kept(&self) -> impl Iterator<Item = &EmittedFile> {
        self.files.iter().filter(|f| !f.is_written())
    }
}

pub struct GenerationOrchestrator<'a> {
    ctx: &'a GenerationContext,
    schema: &'a dyn SchemaGenerator,
    templates: &'a dyn TemplateProcessor,
}

impl<'a> GenerationOrchestrator<'a> {
    pub fn new(
        ctx: &'a GenerationContext,
        schema: &'a dyn SchemaGenerator,
        templates: &'a dyn TemplateProcessor,
    ) -> Self {
        Self {
            ctx,
            schema,
            templates,
        }
    }

    /// `gen_test_demo` → `Demo` in module `test`
    pub fn generate_with_simple_name<S: AsRef<str>>(&self, tables: &[S]) -> Result<GenerationReport> {
        self.run(&NamingPolicy::Simple, tables)
    }

    /// `gen_test_demo` → `GenTestDemo` in module `test`
    pub fn generate_with_detail_name<S: AsRef<str>>(&self, tables: &[S]) -> Result<GenerationReport> {
        self.run(&NamingPolicy::Detail, tables)
    }

    pub fn generate_with_custom_name(
        &self,
        table_name: &str,
        model_name: &str,
    ) -> Result<GenerationReport> {
        self.run(&NamingPolicy::Custom(model_name.to_string()), &[table_name])
    }

    /// `tb_app_page` → `TbAppPage`, no module
    pub fn generate_without_modules<S: AsRef<str>>(&self, tables: &[S]) -> Result<GenerationReport> {
        self.run(&NamingPolicy::NoModule, tables)
    }

    /// Generate every table under `policy`, then the shared base classes.
    ///
    /// Stops at the first failure. Files written before it stay on disk.
    pub fn run<S: AsRef<str>>(&self, policy: &NamingPolicy, tables: &[S]) -> Result<GenerationReport> {
        log::info!("Generating {} table(s), {} naming", tables.len(), policy);

        let model_and_mapper = ModelAndMapperGenerator::new(self.ctx, self.schema);
        let service = ServiceGenerator::new(self.ctx, self.templates);
        let controller = ControllerGenerator::new(self.ctx, self.templates);
        let per_table: [&dyn ArtifactGenerator; 3] = [&model_and_mapper, &service, &controller];

        let mut report = GenerationReport::default();
        for table in tables {
            let table = table.as_ref();
            let resolved = resolve(policy, table)?;
            let target = resolved.target(table);
            log::debug!(
                "{}: model {}, sign {}",
                table,
                target.display_name(),
                target.sign.unwrap_or("-")
            );

            for generator in per_table {
                log::debug!("{}: generating {}", table, generator.artifact());
                report.files.extend(generator.generate(&target)?);
            }
            report.tables.push(table.to_string());
        }

        let common = CommonGenerator::new(self.ctx, self.templates);
        let shared: &dyn ArtifactGenerator = &common;
        log::debug!("generating {}", shared.artifact());
        report.files.extend(shared.generate(&TableTarget::run_wide())?);

        log::info!(
            "Generation finished: {} written, {} kept",
            report.written().count(),
            report.kept().count()
        );
        Ok(report)
    }
}
