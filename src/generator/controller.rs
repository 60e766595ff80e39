//! Controller

use super::{log_emitted, table_data, ArtifactGenerator, TableTarget};
use crate::config::GenerationContext;
use crate::error::{Result, ScaffoldError};
use crate::naming::{path_from_model_name, table_path_from_name};
use crate::template::{render_if_absent, EmittedFile, TemplateProcessor};
use serde_json::json;

pub const CONTROLLER_TEMPLATE: &str = "controller.hbs";

pub struct ControllerGenerator<'a> {
    ctx: &'a GenerationContext,
    templates: &'a dyn TemplateProcessor,
}

impl<'a> ControllerGenerator<'a> {
    pub fn new(ctx: &'a GenerationContext, templates: &'a dyn TemplateProcessor) -> Self {
        Self { ctx, templates }
    }
}

/// `/demo` for model `Demo`; `/tb/app/page` for table `tb_app_page` without a model name
pub fn base_request_mapping(target: &TableTarget<'_>) -> String {
    let path = match target.model_name {
        Some(model) if !model.is_empty() => path_from_model_name(model),
        _ => table_path_from_name(target.table_name),
    };
    format!("/{}", path)
}

impl ArtifactGenerator for ControllerGenerator<'_> {
    fn artifact(&self) -> &'static str {
        "controller"
    }

    fn generate(&self, target: &TableTarget<'_>) -> Result<Vec<EmittedFile>> {
        let file_name = format!("{}Controller.java", target.display_name());

        let mut data = table_data(self.ctx, target);
        data.insert("baseRequestMapping".into(), json!(base_request_mapping(target)));

        let destination =
            self.ctx
                .java_file(&self.ctx.package_paths.controller, target.sign, &file_name);
        let file = render_if_absent(self.templates, CONTROLLER_TEMPLATE, &data, &destination)
            .map_err(|e| ScaffoldError::generation_failed(file_name.as_str(), e))?;
        log_emitted(&file, &file_name);
        Ok(vec![file])
    }
}
