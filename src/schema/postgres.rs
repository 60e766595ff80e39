//! Column metadata read from PostgreSQL `information_schema`

use super::{ColumnInfo, ColumnSource, SchemaError};
use crate::config::JdbcSettings;
use crate::connection;
use may_postgres::Client;
use once_cell::unsync::OnceCell;

// information_schema columns are domain types; cast to text so they decode as String
const COLUMNS_QUERY: &str = r#"
SELECT c.column_name::text,
       c.data_type::text,
       c.is_nullable::text,
       EXISTS (
           SELECT 1
           FROM information_schema.table_constraints tc
           JOIN information_schema.key_column_usage k
             ON k.constraint_name = tc.constraint_name
            AND k.table_schema = tc.table_schema
            AND k.table_name = tc.table_name
           WHERE tc.constraint_type = 'PRIMARY KEY'
             AND tc.table_schema = c.table_schema
             AND tc.table_name = c.table_name
             AND k.column_name = c.column_name
       ) AS primary_key
FROM information_schema.columns c
WHERE c.table_schema = current_schema()
  AND c.table_name::text = $1
ORDER BY c.ordinal_position
"#;

/// Reads columns over a connection opened on first use and reused afterwards
pub struct PostgresColumnSource {
    jdbc: JdbcSettings,
    client: OnceCell<Client>,
}

impl PostgresColumnSource {
    pub fn new(jdbc: JdbcSettings) -> Self {
        Self {
            jdbc,
            client: OnceCell::new(),
        }
    }

    fn client(&self) -> Result<&Client, SchemaError> {
        self.client
            .get_or_try_init(|| connection::connect(&self.jdbc))
            .map_err(SchemaError::from)
    }
}

impl ColumnSource for PostgresColumnSource {
    fn columns(&self, table_name: &str) -> Result<Vec<ColumnInfo>, SchemaError> {
        let rows = self
            .client()?
            .query(COLUMNS_QUERY, &[&table_name])
            .map_err(|e| SchemaError::Query(format!("{}: {}", table_name, e)))?;

        let decode = |e: may_postgres::Error| SchemaError::Query(format!("{}: {}", table_name, e));
        rows.iter()
            .map(|row| {
                let nullable: String = row.try_get(2).map_err(decode)?;
                Ok(ColumnInfo {
                    name: row.try_get(0).map_err(decode)?,
                    data_type: row.try_get(1).map_err(decode)?,
                    nullable: nullable.eq_ignore_ascii_case("YES"),
                    primary_key: row.try_get(3).map_err(decode)?,
                })
            })
            .collect()
    }
}
