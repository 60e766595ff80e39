//! Shared fixtures: a context rooted in a temp directory, and collaborators
//! that write placeholder files and record what they were asked to do.

#![allow(dead_code)]

use chrono::NaiveDate;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tablegen::config::{
    package_file, GeneratorSettings, JdbcSettings, PackagePathSettings, PackageSettings,
    PathSettings, ReferenceSettings,
};
use tablegen::schema::{SchemaError, SchemaOutput, SchemaRequest};
use tablegen::template::{render_if_absent, TemplateData, TemplateError};
use tablegen::{GenerationContext, SchemaGenerator, TemplateProcessor};

pub fn settings(project_root: &Path) -> GeneratorSettings {
    GeneratorSettings {
        jdbc: JdbcSettings {
            url: "jdbc:postgresql://localhost:5432/demo".to_string(),
            username: "postgres".to_string(),
            password: "postgres".to_string(),
            driver_class: "org.postgresql.Driver".to_string(),
        },
        paths: PathSettings {
            project_root: Some(project_root.to_path_buf()),
            java: "src/main/java".into(),
            resources: "src/main/resources".into(),
            templates: "templates".into(),
        },
        packages: PackageSettings {
            base: "com.demo".to_string(),
            model: "com.demo.model".to_string(),
            mapper: "com.demo.dao".to_string(),
            service: "com.demo.service".to_string(),
            service_impl: "com.demo.service.impl".to_string(),
            controller: "com.demo.web".to_string(),
            dao: "com.demo.core".to_string(),
        },
        references: ReferenceSettings {
            mapper_interface: "com.demo.core.Mapper".to_string(),
            service_interface: "com.demo.service.Service".to_string(),
            abstract_service_class: "com.demo.service.AbstractService".to_string(),
        },
        package_paths: PackagePathSettings::default(),
        author: "zhh".to_string(),
        date_format: "yyyy-MM-dd".to_string(),
    }
}

pub fn context(project_root: &Path) -> GenerationContext {
    let now = NaiveDate::from_ymd_opt(2024, 3, 7)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    GenerationContext::from_settings(settings(project_root), now).unwrap()
}

/// Path relative to `root`, with `/` separators
pub fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap()
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// One `process` call
#[derive(Debug, Clone)]
pub struct ProcessCall {
    pub template: String,
    pub destination: PathBuf,
    pub data: TemplateData,
}

impl ProcessCall {
    pub fn str(&self, key: &str) -> &str {
        self.data[key].as_str().unwrap_or_default()
    }
}

/// Writes the template name into the destination
#[derive(Default)]
pub struct RecordingTemplates {
    pub calls: RefCell<Vec<ProcessCall>>,
    /// Template that fails to render
    pub fail_on: Option<String>,
}

impl RecordingTemplates {
    pub fn failing_on(template: &str) -> Self {
        Self {
            fail_on: Some(template.to_string()),
            ..Self::default()
        }
    }

    pub fn call(&self, template: &str) -> ProcessCall {
        self.calls
            .borrow()
            .iter()
            .find(|c| c.template == template)
            .cloned()
            .unwrap_or_else(|| panic!("{} was never processed", template))
    }

    pub fn templates(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.template.clone()).collect()
    }
}

impl TemplateProcessor for RecordingTemplates {
    fn process(
        &self,
        template: &str,
        data: &TemplateData,
        destination: &Path,
    ) -> Result<(), TemplateError> {
        if self.fail_on.as_deref() == Some(template) {
            return Err(TemplateError::Missing(PathBuf::from(template)));
        }
        self.calls.borrow_mut().push(ProcessCall {
            template: template.to_string(),
            destination: destination.to_path_buf(),
            data: data.clone(),
        });
        let io_err = |source| TemplateError::Io {
            path: destination.to_path_buf(),
            source,
        };
        fs::create_dir_all(destination.parent().unwrap()).map_err(io_err)?;
        fs::write(destination, template).map_err(io_err)
    }
}

/// What the orchestrator asked of the schema generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub table_name: String,
    pub domain_object_name: Option<String>,
    pub model_package: String,
    pub mapper_package: String,
    pub mapper_resource_package: String,
    pub configuration_type: String,
    pub mappers: String,
    pub generated_key: (String, String, bool),
}

/// Writes placeholder model, mapper and mapper XML files
#[derive(Default)]
pub struct RecordingSchema {
    pub requests: RefCell<Vec<RecordedRequest>>,
    /// Table whose generation raises an error
    pub fail_on: Option<String>,
    /// Return without any resource file
    pub skip_resources: bool,
}

struct Placeholder;

impl TemplateProcessor for Placeholder {
    fn process(
        &self,
        template: &str,
        _data: &TemplateData,
        destination: &Path,
    ) -> Result<(), TemplateError> {
        let io_err = |source| TemplateError::Io {
            path: destination.to_path_buf(),
            source,
        };
        fs::create_dir_all(destination.parent().unwrap()).map_err(io_err)?;
        fs::write(destination, template).map_err(io_err)
    }
}

impl SchemaGenerator for RecordingSchema {
    fn generate(&self, request: &SchemaRequest<'_>) -> Result<SchemaOutput, SchemaError> {
        self.requests.borrow_mut().push(RecordedRequest {
            table_name: request.table_name.to_string(),
            domain_object_name: request.domain_object_name.map(str::to_string),
            model_package: request.model_package.clone(),
            mapper_package: request.mapper_package.clone(),
            mapper_resource_package: request.mapper_resource_package.clone(),
            configuration_type: request.plugin.configuration_type.clone(),
            mappers: request.plugin.mappers.clone(),
            generated_key: (
                request.generated_key.column.clone(),
                request.generated_key.dialect.clone(),
                request.generated_key.identity,
            ),
        });

        if self.fail_on.as_deref() == Some(request.table_name) {
            return Err(SchemaError::TableNotFound(request.table_name.to_string()));
        }

        let model = request
            .domain_object_name
            .map(str::to_string)
            .unwrap_or_else(|| tablegen::naming::to_upper_camel(request.table_name));
        let data = TemplateData::new();

        let mut output = SchemaOutput::default();
        let model_file = package_file(request.java_root, &request.model_package, &format!("{}.java", model));
        let mapper_file = package_file(
            request.java_root,
            &request.mapper_package,
            &format!("{}Mapper.java", model),
        );
        output
            .java_files
            .push(render_if_absent(&Placeholder, "model", &data, &model_file)?);
        output
            .java_files
            .push(render_if_absent(&Placeholder, "mapper", &data, &mapper_file)?);

        if !self.skip_resources {
            let xml_file = package_file(
                request.resources_root,
                &request.mapper_resource_package,
                &format!("{}Mapper.xml", model),
            );
            output
                .resource_files
                .push(render_if_absent(&Placeholder, "mapper-xml", &data, &xml_file)?);
        } else {
            output.warnings.push("no resource generated".to_string());
        }
        Ok(output)
    }
}
