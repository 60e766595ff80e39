//! # tablegen
//!
//! Scaffolding generator for layered Java/MyBatis services. Given table names
//! such as `gen_test_demo`, it derives model names and module signs, introspects
//! the tables, and renders the model, mapper, service and controller sources
//! plus the shared base classes they extend. Existing files are never touched.
//!
//! See `README.md` for the settings file and the command-line tool.

pub mod config;
pub mod connection;
pub mod error;
pub mod generator;
pub mod naming;
pub mod orchestrator;
pub mod schema;
pub mod template;

pub use config::GenerationContext;
pub use error::{Result, ScaffoldError};
pub use generator::{ArtifactGenerator, TableTarget};
pub use orchestrator::{resolve, GenerationOrchestrator, GenerationReport, NamingPolicy};
pub use schema::{PostgresColumnSource, SchemaGenerator, TemplatedSchemaGenerator};
pub use template::{EmitStatus, EmittedFile, HandlebarsProcessor, TemplateProcessor};
