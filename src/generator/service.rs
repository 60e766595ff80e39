//! Service interface and implementation

use super::{log_emitted, table_data, ArtifactGenerator, TableTarget};
use crate::config::GenerationContext;
use crate::error::{Result, ScaffoldError};
use crate::template::{render_if_absent, EmittedFile, TemplateProcessor};

pub const SERVICE_TEMPLATE: &str = "service.hbs";
pub const SERVICE_IMPL_TEMPLATE: &str = "service-impl.hbs";

pub struct ServiceGenerator<'a> {
    ctx: &'a GenerationContext,
    templates: &'a dyn TemplateProcessor,
}

impl<'a> ServiceGenerator<'a> {
    pub fn new(ctx: &'a GenerationContext, templates: &'a dyn TemplateProcessor) -> Self {
        Self { ctx, templates }
    }
}

impl ArtifactGenerator for ServiceGenerator<'_> {
    fn artifact(&self) -> &'static str {
        "service"
    }

    fn generate(&self, target: &TableTarget<'_>) -> Result<Vec<EmittedFile>> {
        let model = target.display_name();
        let data = table_data(self.ctx, target);
        let paths = &self.ctx.package_paths;

        let outputs = [
            (SERVICE_TEMPLATE, &paths.service, format!("{}Service.java", model)),
            (SERVICE_IMPL_TEMPLATE, &paths.service_impl, format!("{}ServiceImpl.java", model)),
        ];

        let mut emitted = Vec::with_capacity(outputs.len());
        for (template, package_path, file_name) in outputs {
            let destination = self.ctx.java_file(package_path, target.sign, &file_name);
            let file = render_if_absent(self.templates, template, &data, &destination)
                .map_err(|e| ScaffoldError::generation_failed(file_name.as_str(), e))?;
            log_emitted(&file, &file_name);
            emitted.push(file);
        }
        Ok(emitted)
    }
}
