//! SQL dialect identification and literal quoting primitives
//!
//! The accumulator supports a closed set of dialects. Each connection reports
//! a driver name once; the mapping to a [`Dialect`] happens at construction
//! and every dialect-specific decision afterwards is an exhaustive match, so
//! adding a dialect is a compile-time affair rather than a string pattern.

use crate::Value;

/// SQL dialect variants the accumulator can compose statements for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// MySQL/MariaDB family
    MySql,
    /// SQLite
    Sqlite,
    /// PostgreSQL family (including PostGIS)
    PostgreSql,
    /// Unrecognized driver; dialect-specific clauses degrade to plain SQL
    Other,
}

impl Dialect {
    /// Map a driver/adapter name onto a dialect.
    ///
    /// Matching is a case-insensitive prefix check so names like `Mysql2`,
    /// `SQLite` or `PostGIS` resolve the way callers expect. Unknown names
    /// map to [`Dialect::Other`] rather than failing.
    pub fn from_driver_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.starts_with("mysql") {
            Dialect::MySql
        } else if name.starts_with("sqlite") {
            Dialect::Sqlite
        } else if name.starts_with("postgres") || name.starts_with("postgis") {
            Dialect::PostgreSql
        } else {
            Dialect::Other
        }
    }

    /// Get display name for this dialect
    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::MySql => "MySQL",
            Dialect::Sqlite => "SQLite",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::Other => "SQL",
        }
    }

    /// Identifier quote character (backticks for MySQL, double quotes otherwise)
    pub fn identifier_quote(&self) -> char {
        match self {
            Dialect::MySql => '`',
            Dialect::Sqlite | Dialect::PostgreSql | Dialect::Other => '"',
        }
    }

    /// Quote a table or column identifier for this dialect
    pub fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let doubled = format!("{quote}{quote}");
        format!("{quote}{}{quote}", name.replace(quote, &doubled))
    }

    /// Quote a scalar value for literal embedding in SQL text.
    ///
    /// Single quotes are doubled everywhere; MySQL additionally needs
    /// backslashes escaped since it treats them as escape characters inside
    /// string literals.
    pub fn quote_value(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => {
                let text = match self {
                    Dialect::PostgreSql => {
                        if *b { "TRUE" } else { "FALSE" }
                    }
                    Dialect::MySql | Dialect::Sqlite | Dialect::Other => {
                        if *b { "1" } else { "0" }
                    }
                };
                text.to_string()
            }
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => {
                if v.is_finite() {
                    v.to_string()
                } else {
                    "NULL".to_string()
                }
            }
            Value::Decimal(v) => v.clone(),
            Value::String(v) => self.quote_string(v),
            Value::Bytes(v) => match self {
                Dialect::PostgreSql => format!("'\\x{}'", hex::encode(v)),
                Dialect::MySql | Dialect::Sqlite | Dialect::Other => {
                    format!("X'{}'", hex::encode(v))
                }
            },
            Value::Uuid(v) => format!("'{}'", v),
            Value::Date(v) => format!("'{}'", v.format("%Y-%m-%d")),
            Value::Time(v) => format!("'{}'", v.format("%H:%M:%S%.6f")),
            Value::DateTime(v) => format!("'{}'", v.format("%Y-%m-%d %H:%M:%S%.6f")),
            Value::DateTimeUtc(v) => {
                format!("'{}'", v.naive_utc().format("%Y-%m-%d %H:%M:%S%.6f"))
            }
            Value::Json(v) => self.quote_string(&v.to_string()),
        }
    }

    fn quote_string(&self, s: &str) -> String {
        let escaped = match self {
            Dialect::MySql => s.replace('\\', "\\\\").replace('\'', "''"),
            Dialect::Sqlite | Dialect::PostgreSql | Dialect::Other => s.replace('\'', "''"),
        };
        format!("'{escaped}'")
    }
}
