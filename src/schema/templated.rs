//! Schema generator rendering the model, mapper and mapper XML from templates

use super::type_mapping::map_column_type;
use super::{ColumnInfo, ColumnSource, SchemaError, SchemaGenerator, SchemaOutput, SchemaRequest};
use crate::config::package_file;
use crate::naming::{lower_first, simple_name, to_lower_camel, to_upper_camel, upper_first};
use crate::template::{render_if_absent, TemplateData, TemplateProcessor};
use serde_json::{json, Value};
use std::collections::BTreeSet;

pub const MODEL_TEMPLATE: &str = "model.hbs";
pub const MAPPER_TEMPLATE: &str = "mapper.hbs";
pub const MAPPER_XML_TEMPLATE: &str = "mapper-xml.hbs";

/// Columns come from a [`ColumnSource`], text from a [`TemplateProcessor`]
pub struct TemplatedSchemaGenerator<'a, C> {
    columns: C,
    templates: &'a dyn TemplateProcessor,
}

impl<'a, C: ColumnSource> TemplatedSchemaGenerator<'a, C> {
    pub fn new(columns: C, templates: &'a dyn TemplateProcessor) -> Self {
        Self { columns, templates }
    }

    fn template_data(
        &self,
        request: &SchemaRequest<'_>,
        model_name: &str,
        columns: &[ColumnInfo],
    ) -> TemplateData {
        let mut imports = BTreeSet::new();
        let key = &request.generated_key;

        let column_values: Vec<Value> = columns
            .iter()
            .map(|column| {
                let java_type = map_column_type(&column.data_type);
                if let Some(import) = java_type.import {
                    imports.insert(import);
                }
                let property = to_lower_camel(&column.name);
                json!({
                    "column": column.name,
                    "property": property,
                    "accessor": upper_first(&property),
                    "javaType": java_type.name,
                    "jdbcType": java_type.jdbc_type,
                    "primaryKey": column.primary_key,
                    "nullable": column.nullable,
                    "generated": key.identity && column.name.eq_ignore_ascii_case(&key.column),
                })
            })
            .collect();

        let primary_keys: Vec<Value> = column_values
            .iter()
            .filter(|c| c["primaryKey"] == Value::Bool(true))
            .cloned()
            .collect();

        let generated_key = columns
            .iter()
            .find(|c| key.identity && c.name.eq_ignore_ascii_case(&key.column))
            .map(|c| {
                json!({
                    "column": c.name,
                    "property": to_lower_camel(&c.name),
                    "dialect": key.dialect,
                    "identityStatement": key.identity_statement(),
                })
            })
            .unwrap_or(Value::Null);

        let mapper_interface = request.plugin.mappers.as_str();

        let mut data = TemplateData::new();
        data.insert("tableName".into(), json!(request.table_name));
        data.insert("modelName".into(), json!(model_name));
        data.insert("modelNameLowerCamel".into(), json!(lower_first(model_name)));
        data.insert("modelPackage".into(), json!(request.model_package));
        data.insert("mapperPackage".into(), json!(request.mapper_package));
        data.insert("mapperName".into(), json!(format!("{}Mapper", model_name)));
        data.insert("mapperResourcePackage".into(), json!(request.mapper_resource_package));
        data.insert("mapperInterfaceReference".into(), json!(mapper_interface));
        data.insert("mapperInterfaceName".into(), json!(simple_name(mapper_interface)));
        data.insert("imports".into(), json!(imports.into_iter().collect::<Vec<_>>()));
        data.insert("hasPrimaryKey".into(), json!(!primary_keys.is_empty()));
        data.insert("primaryKeys".into(), Value::Array(primary_keys));
        data.insert("columns".into(), Value::Array(column_values));
        data.insert("generatedKey".into(), generated_key);
        data
    }
}

impl<'a, C: ColumnSource> SchemaGenerator for TemplatedSchemaGenerator<'a, C> {
    fn generate(&self, request: &SchemaRequest<'_>) -> Result<SchemaOutput, SchemaError> {
        let columns = self.columns.columns(request.table_name)?;
        if columns.is_empty() {
            return Err(SchemaError::TableNotFound(request.table_name.to_string()));
        }

        let model_name = request
            .domain_object_name
            .map(str::to_string)
            .unwrap_or_else(|| to_upper_camel(request.table_name));

        let mut output = SchemaOutput::default();
        if !columns.iter().any(|c| c.primary_key) {
            output
                .warnings
                .push(format!("table '{}' has no primary key", request.table_name));
        }

        let data = self.template_data(request, &model_name, &columns);

        let model_file = package_file(
            request.java_root,
            &request.model_package,
            &format!("{}.java", model_name),
        );
        let mapper_file = package_file(
            request.java_root,
            &request.mapper_package,
            &format!("{}Mapper.java", model_name),
        );
        let mapper_xml_file = package_file(
            request.resources_root,
            &request.mapper_resource_package,
            &format!("{}Mapper.xml", model_name),
        );

        output
            .java_files
            .push(render_if_absent(self.templates, MODEL_TEMPLATE, &data, &model_file)?);
        output
            .java_files
            .push(render_if_absent(self.templates, MAPPER_TEMPLATE, &data, &mapper_file)?);
        output.resource_files.push(render_if_absent(
            self.templates,
            MAPPER_XML_TEMPLATE,
            &data,
            &mapper_xml_file,
        )?);

        Ok(output)
    }
}
