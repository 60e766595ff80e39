//! Model, mapper interface and mapper XML, delegated to a [`SchemaGenerator`]

use super::{log_emitted, ArtifactGenerator, TableTarget, MAPPER_RESOURCE_PACKAGE};
use crate::config::{qualify, GenerationContext};
use crate::error::{Result, ScaffoldError};
use crate::schema::{GeneratedKey, MapperPlugin, SchemaGenerator, SchemaRequest, MAPPER_PLUGIN};
use crate::template::EmittedFile;

pub struct ModelAndMapperGenerator<'a> {
    ctx: &'a GenerationContext,
    schema: &'a dyn SchemaGenerator,
}

impl<'a> ModelAndMapperGenerator<'a> {
    pub fn new(ctx: &'a GenerationContext, schema: &'a dyn SchemaGenerator) -> Self {
        Self { ctx, schema }
    }

    /// Request describing `target` to the schema generator
    pub fn request<'t>(&'t self, target: &TableTarget<'t>) -> SchemaRequest<'t> {
        let ctx = self.ctx;
        SchemaRequest {
            table_name: target.table_name,
            domain_object_name: target.model_name.filter(|name| !name.is_empty()),
            jdbc: &ctx.jdbc,
            java_root: &ctx.java_root,
            resources_root: &ctx.resources_root,
            model_package: qualify(&ctx.packages.model, target.sign),
            mapper_package: qualify(&ctx.packages.mapper, target.sign),
            mapper_resource_package: qualify(MAPPER_RESOURCE_PACKAGE, target.sign),
            plugin: MapperPlugin {
                configuration_type: MAPPER_PLUGIN.to_string(),
                mappers: ctx.references.mapper_interface.clone(),
            },
            generated_key: GeneratedKey::auto_increment_id(),
        }
    }
}

impl ArtifactGenerator for ModelAndMapperGenerator<'_> {
    fn artifact(&self) -> &'static str {
        "model and mapper"
    }

    fn generate(&self, target: &TableTarget<'_>) -> Result<Vec<EmittedFile>> {
        let model = target.display_name();
        let artifact = format!("{} model and mapper", model);

        let output = self
            .schema
            .generate(&self.request(target))
            .map_err(|e| ScaffoldError::generation_failed(artifact.as_str(), e))?;

        for warning in &output.warnings {
            log::warn!("{}: {}", target.table_name, warning);
        }

        // a generator that raised nothing but produced nothing still failed
        if output.java_files.is_empty() || output.resource_files.is_empty() {
            return Err(ScaffoldError::generation_failed(
                artifact,
                format!(
                    "schema generator produced no {} files, warnings: {:?}",
                    if output.java_files.is_empty() { "source" } else { "resource" },
                    output.warnings
                ),
            ));
        }

        let mut emitted = output.java_files;
        emitted.extend(output.resource_files);
        for file in &emitted {
            let label = file
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| model.clone());
            log_emitted(file, &label);
        }
        Ok(emitted)
    }
}
