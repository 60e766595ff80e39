//! Schema generation
//!
//! The model class, the mapper interface and the mapper XML come from the
//! table's columns. [`SchemaGenerator`] is the seam: the generators only
//! describe *what* to produce, the implementation decides how columns are
//! discovered and rendered.

use crate::config::JdbcSettings;
use crate::connection::ConnectionError;
use crate::template::{EmittedFile, TemplateError};
use std::path::Path;

pub mod postgres;
pub mod templated;
pub mod type_mapping;

pub use postgres::PostgresColumnSource;
pub use templated::TemplatedSchemaGenerator;

/// Plugin that makes generated mappers extend the shared generic mapper
pub const MAPPER_PLUGIN: &str = "tk.mybatis.mapper.generator.MapperPlugin";

/// Key generated by the database on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedKey {
    pub column: String,
    /// MyBatis dialect name, e.g. `Mysql`
    pub dialect: String,
    pub identity: bool,
}

impl GeneratedKey {
    /// Auto-increment `id`, read back the MySQL way
    pub fn auto_increment_id() -> Self {
        Self {
            column: "id".to_string(),
            dialect: "Mysql".to_string(),
            identity: true,
        }
    }

    /// Statement reading back the generated key, `None` for JDBC generated keys
    pub fn identity_statement(&self) -> Option<&'static str> {
        match self.dialect.to_ascii_lowercase().as_str() {
            "mysql" => Some("SELECT LAST_INSERT_ID()"),
            "sqlserver" => Some("SELECT SCOPE_IDENTITY()"),
            "hsqldb" => Some("CALL IDENTITY()"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperPlugin {
    pub configuration_type: String,
    /// Fully-qualified generic mapper every generated mapper extends
    pub mappers: String,
}

/// Everything a schema generator needs for one table
#[derive(Debug, Clone)]
pub struct SchemaRequest<'a> {
    pub table_name: &'a str,
    /// `None` lets the generator derive the name from the table
    pub domain_object_name: Option<&'a str>,
    pub jdbc: &'a JdbcSettings,
    pub java_root: &'a Path,
    pub resources_root: &'a Path,
    pub model_package: String,
    pub mapper_package: String,
    pub mapper_resource_package: String,
    pub plugin: MapperPlugin,
    pub generated_key: GeneratedKey,
}

/// Files accounted for by a schema generator, written or kept
#[derive(Debug, Clone, Default)]
pub struct SchemaOutput {
    pub java_files: Vec<EmittedFile>,
    pub resource_files: Vec<EmittedFile>,
    pub warnings: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    #[error("schema query failed: {0}")]
    Query(String),
    #[error("table '{0}' not found or has no columns")]
    TableNotFound(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// One column as reported by the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
}

/// Source of column metadata
pub trait ColumnSource {
    fn columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>, SchemaError>;
}

/// Produces the model, mapper interface and mapper resource of a table
pub trait SchemaGenerator {
    fn generate(&self, request: &SchemaRequest<'_>) -> Result<SchemaOutput, SchemaError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_statement() {
        assert_eq!(
            GeneratedKey::auto_increment_id().identity_statement(),
            Some("SELECT LAST_INSERT_ID()")
        );
        let jdbc = GeneratedKey {
            column: "id".to_string(),
            dialect: "JDBC".to_string(),
            identity: true,
        };
        assert_eq!(jdbc.identity_statement(), None);
    }
}
