//! Shared base classes: the generic mapper, the generic service and the
//! abstract service every generated service extends.
//!
//! Each is written once per destination. Later runs find the file and keep it.

use super::{base_data, log_emitted, ArtifactGenerator, TableTarget};
use crate::config::GenerationContext;
use crate::error::{Result, ScaffoldError};
use crate::naming::simple_name;
use crate::template::{render_if_absent, EmittedFile, TemplateData, TemplateProcessor};
use serde_json::json;

pub const BASE_MAPPER_TEMPLATE: &str = "basemapper.hbs";
pub const BASE_SERVICE_TEMPLATE: &str = "baseservice.hbs";
pub const BASE_ABSTRACT_SERVICE_TEMPLATE: &str = "baseabstractservice.hbs";

pub struct CommonGenerator<'a> {
    ctx: &'a GenerationContext,
    templates: &'a dyn TemplateProcessor,
}

/// `com.demo.core.Mapper` → `com.demo.core`
fn package_of(reference: &str) -> &str {
    reference.rsplit_once('.').map(|(package, _)| package).unwrap_or("")
}

impl<'a> CommonGenerator<'a> {
    pub fn new(ctx: &'a GenerationContext, templates: &'a dyn TemplateProcessor) -> Self {
        Self { ctx, templates }
    }

    /// All three shared artifacts, in dependency order
    pub fn generate_all(&self) -> Result<Vec<EmittedFile>> {
        Ok(vec![
            self.generate_mapper()?,
            self.generate_service()?,
            self.generate_abstract_service()?,
        ])
    }

    /// Generic mapper interface, under the dao package path
    pub fn generate_mapper(&self) -> Result<EmittedFile> {
        let reference = &self.ctx.references.mapper_interface;
        let mut data = base_data(self.ctx);
        data.insert("package".into(), json!(package_of(reference)));
        data.insert("mapperName".into(), json!(simple_name(reference)));
        data.insert("mapperInterfaceReference".into(), json!(reference));

        self.emit(reference, &self.ctx.package_paths.dao, BASE_MAPPER_TEMPLATE, &data)
    }

    /// Generic service interface, under the service package path
    pub fn generate_service(&self) -> Result<EmittedFile> {
        let reference = &self.ctx.references.service_interface;
        let mut data = base_data(self.ctx);
        data.insert("package".into(), json!(package_of(reference)));
        data.insert("serviceName".into(), json!(simple_name(reference)));
        data.insert("serviceInterfaceReference".into(), json!(reference));

        self.emit(reference, &self.ctx.package_paths.service, BASE_SERVICE_TEMPLATE, &data)
    }

    /// Abstract service implementing the generic service over the generic mapper
    pub fn generate_abstract_service(&self) -> Result<EmittedFile> {
        let refs = &self.ctx.references;
        let reference = &refs.abstract_service_class;
        let mut data = base_data(self.ctx);
        data.insert("package".into(), json!(package_of(reference)));
        data.insert("abstractServiceName".into(), json!(simple_name(reference)));
        data.insert("mapperInterfaceReference".into(), json!(refs.mapper_interface));
        data.insert("mapperName".into(), json!(simple_name(&refs.mapper_interface)));
        data.insert("serviceInterfaceReference".into(), json!(refs.service_interface));
        data.insert("serviceName".into(), json!(simple_name(&refs.service_interface)));

        self.emit(
            reference,
            &self.ctx.package_paths.service,
            BASE_ABSTRACT_SERVICE_TEMPLATE,
            &data,
        )
    }

    fn emit(
        &self,
        reference: &str,
        package_path: &str,
        template: &str,
        data: &TemplateData,
    ) -> Result<EmittedFile> {
        let label = format!("{}.java", reference);
        let file_name = format!("{}.java", simple_name(reference));
        let destination = self.ctx.java_file(package_path, None, &file_name);

        let file = render_if_absent(self.templates, template, data, &destination)
            .map_err(|e| ScaffoldError::generation_failed(label.as_str(), e))?;
        log_emitted(&file, &label);
        Ok(file)
    }
}

/// Shared artifacts do not depend on the table
impl ArtifactGenerator for CommonGenerator<'_> {
    fn artifact(&self) -> &'static str {
        "common"
    }

    fn generate(&self, _target: &TableTarget<'_>) -> Result<Vec<EmittedFile>> {
        self.generate_all()
    }
}
