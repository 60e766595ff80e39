//! Type mapping utilities for converting PostgreSQL column types to Java and JDBC types.

/// Java and JDBC types of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaType {
    /// Type name as written in the model class
    pub name: &'static str,
    /// Import needed for `name`, if any
    pub import: Option<&'static str>,
    /// `jdbcType` attribute of the mapper XML
    pub jdbc_type: &'static str,
}

const fn java(name: &'static str, jdbc_type: &'static str) -> JavaType {
    JavaType {
        name,
        import: None,
        jdbc_type,
    }
}

const fn imported(name: &'static str, import: &'static str, jdbc_type: &'static str) -> JavaType {
    JavaType {
        name,
        import: Some(import),
        jdbc_type,
    }
}

/// Map an `information_schema.columns.data_type` value
///
/// # Type Mapping
///
/// - "smallint" / "integer" / "bigint" → `Short` / `Integer` / `Long`
/// - "real" / "double precision" → `Float` / `Double`
/// - "numeric" / "decimal" / "money" → `BigDecimal`
/// - "boolean" → `Boolean`
/// - "character varying" / "text" / "character" → `String`
/// - "date" / "time" / "timestamp ..." → `Date`
/// - "bytea" → `byte[]`
/// - "uuid" / "json" / "jsonb" and unknown types → `String`
pub fn map_column_type(data_type: &str) -> JavaType {
    let data_type = data_type.to_lowercase();
    match data_type.as_str() {
        "smallint" | "int2" => java("Short", "SMALLINT"),
        "integer" | "int" | "int4" | "serial" => java("Integer", "INTEGER"),
        "bigint" | "int8" | "bigserial" => java("Long", "BIGINT"),
        "real" | "float4" => java("Float", "REAL"),
        "double precision" | "float8" => java("Double", "DOUBLE"),
        "numeric" | "decimal" | "money" => imported("BigDecimal", "java.math.BigDecimal", "DECIMAL"),
        "boolean" | "bool" => java("Boolean", "BIT"),
        "character" | "char" | "bpchar" => java("String", "CHAR"),
        "character varying" | "varchar" => java("String", "VARCHAR"),
        "text" => java("String", "LONGVARCHAR"),
        "date" => imported("Date", "java.util.Date", "DATE"),
        "bytea" => java("byte[]", "BINARY"),
        t if t.starts_with("timestamp") => imported("Date", "java.util.Date", "TIMESTAMP"),
        t if t.starts_with("time") => imported("Date", "java.util.Date", "TIME"),
        _ => java("String", "VARCHAR"),
    }
}
