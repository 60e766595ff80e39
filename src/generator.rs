//! Artifact generators
//!
//! One generator per artifact family. Each borrows the [`GenerationContext`]
//! and the collaborator it renders through, and reports every target file as
//! written or kept.

use crate::config::{qualify, GenerationContext};
use crate::error::Result;
use crate::naming::{lower_first, simple_name, to_upper_camel};
use crate::template::{EmittedFile, TemplateData};
use serde_json::json;

pub mod common;
pub mod controller;
pub mod model_and_mapper;
pub mod service;

pub use common::CommonGenerator;
pub use controller::ControllerGenerator;
pub use model_and_mapper::ModelAndMapperGenerator;
pub use service::ServiceGenerator;

/// Resource package holding the mapper XML files
pub const MAPPER_RESOURCE_PACKAGE: &str = "mapper";

/// The table being generated, with the names resolved by the naming policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableTarget<'a> {
    pub table_name: &'a str,
    pub model_name: Option<&'a str>,
    pub sign: Option<&'a str>,
}

impl<'a> TableTarget<'a> {
    pub fn new(table_name: &'a str, model_name: Option<&'a str>, sign: Option<&'a str>) -> Self {
        Self {
            table_name,
            model_name,
            sign,
        }
    }

    /// Target of generators that do not depend on a table
    pub fn run_wide() -> TableTarget<'static> {
        TableTarget::new("", None, None)
    }

    /// Model name for file names and logs: the resolved name, or the
    /// upper-camel table name when none was resolved
    pub fn display_name(&self) -> String {
        match self.model_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => to_upper_camel(self.table_name),
        }
    }
}

pub trait ArtifactGenerator {
    /// Artifact family, for logs
    fn artifact(&self) -> &'static str;

    fn generate(&self, target: &TableTarget<'_>) -> Result<Vec<EmittedFile>>;
}

/// Stamps every template receives
pub(crate) fn base_data(ctx: &GenerationContext) -> TemplateData {
    let mut data = TemplateData::new();
    data.insert("author".into(), json!(ctx.author));
    data.insert("date".into(), json!(ctx.date));
    data.insert("basePackage".into(), json!(ctx.packages.base));
    data
}

/// Names and packages shared by the service and controller templates
pub(crate) fn table_data(ctx: &GenerationContext, target: &TableTarget<'_>) -> TemplateData {
    let model = target.display_name();
    let sign = target.sign;
    let refs = &ctx.references;

    let mut data = base_data(ctx);
    data.insert("tableName".into(), json!(target.table_name));
    data.insert("sign".into(), json!(sign));
    data.insert("modelNameUpperCamel".into(), json!(model));
    data.insert("modelNameLowerCamel".into(), json!(lower_first(&model)));
    data.insert("modelPackage".into(), json!(qualify(&ctx.packages.model, sign)));
    data.insert("mapperPackage".into(), json!(qualify(&ctx.packages.mapper, sign)));
    data.insert("servicePackage".into(), json!(qualify(&ctx.packages.service, sign)));
    data.insert("serviceImplPackage".into(), json!(qualify(&ctx.packages.service_impl, sign)));
    data.insert("controllerPackage".into(), json!(qualify(&ctx.packages.controller, sign)));
    data.insert("mapperInterfaceReference".into(), json!(refs.mapper_interface));
    data.insert("mapperInterfaceName".into(), json!(simple_name(&refs.mapper_interface)));
    data.insert("serviceInterfaceReference".into(), json!(refs.service_interface));
    data.insert("serviceInterfaceName".into(), json!(simple_name(&refs.service_interface)));
    data.insert("abstractServiceClassReference".into(), json!(refs.abstract_service_class));
    data.insert(
        "abstractServiceClassName".into(),
        json!(simple_name(&refs.abstract_service_class)),
    );
    data
}

pub(crate) fn log_emitted(file: &EmittedFile, label: &str) {
    if file.is_written() {
        log::info!("{} generated", label);
    } else {
        log::debug!("{} already exists, kept", label);
    }
}
