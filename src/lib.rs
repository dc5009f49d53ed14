//! # influxql: a chainable InfluxQL statement builder
//!
//! > **Stop concatenating query strings.**
//!
//! Build InfluxQL statements from plain Rust values. Names are quoted as
//! identifiers, values as data, durations become compact tokens and
//! timestamps RFC3339 UTC strings.
//!
//! ## Quick Example
//!
//! ```
//! use influxql::prelude::*;
//!
//! let q = select(["foo"])
//!     .from("bar")
//!     .where_("location", ["Toronto"])
//!     .and("altitude >=", [500])
//!     .to_influxql()
//!     .unwrap();
//!
//! assert_eq!(
//!     q,
//!     r#"SELECT "foo" FROM "bar" WHERE "location" = 'Toronto' AND "altitude" >= 500"#
//! );
//! ```
//!
//! ## Conditions
//!
//! | Form       | Condition          | Values         | Output                    |
//! |------------|--------------------|----------------|---------------------------|
//! | explicit   | `location = ?`     | `["Toronto"]`  | `location = 'Toronto'`    |
//! | name       | `location`         | `["Toronto"]`  | `"location" = 'Toronto'`  |
//! | name + op  | `altitude >=`      | `[500]`        | `"altitude" >= 500`       |
//! | verbatim   | `location != 'x'`  | none           | `location != 'x'`         |

pub mod ast;
pub mod config;
pub mod duration;
pub mod error;
pub mod expr;
pub mod functions;
pub mod script;
pub mod statement;
mod template;
pub mod value;

use std::time::Duration;

pub use ast::{Direction, Keyword, Literal, Order, ToInfluxQl};
pub use error::{QueryError, QueryResult};
pub use expr::Expr;
pub use statement::{
    CreateDatabase, CreateRetentionPolicy, Delete, DropDatabase, DropMeasurement,
    DropRetentionPolicy, Fill, Select, ShowDatabases, ShowFieldKeys, ShowMeasurements,
    ShowRetentionPolicies, ShowTagKeys,
};
pub use value::Value;

pub mod prelude {
    pub use crate::ast::{Direction, Literal, ToInfluxQl};
    pub use crate::error::*;
    pub use crate::functions::*;
    pub use crate::statement::*;
    pub use crate::value::Value;
    pub use crate::vals;
    pub use crate::{
        create_database, create_retention_policy, delete, drop_database, drop_measurement,
        drop_retention_policy, select, show_databases, show_field_keys, show_measurements,
        show_retention_policies, show_tag_keys,
    };
}

/// Start a SELECT of `fields`.
///
/// # Example
///
/// ```
/// use influxql::{select, ToInfluxQl};
///
/// let q = select(["*"]).from("bar").limit(1).offset(2);
/// assert_eq!(q.to_influxql().unwrap(), r#"SELECT * FROM "bar" LIMIT 1 OFFSET 2"#);
/// ```
pub fn select(fields: impl IntoIterator<Item = impl Into<Literal>>) -> Select {
    Select::new(fields)
}

/// Start a DELETE.
pub fn delete() -> Delete {
    Delete::new()
}

/// CREATE DATABASE `name`.
pub fn create_database(name: impl Into<Literal>) -> CreateDatabase {
    CreateDatabase::new(name)
}

/// DROP DATABASE `name`.
pub fn drop_database(name: impl Into<Literal>) -> DropDatabase {
    DropDatabase::new(name)
}

/// DROP MEASUREMENT `name`.
pub fn drop_measurement(name: impl Into<Literal>) -> DropMeasurement {
    DropMeasurement::new(name)
}

/// CREATE RETENTION POLICY `name` ON `database`.
pub fn create_retention_policy(
    name: impl Into<Literal>,
    database: impl Into<Literal>,
    duration: Duration,
    replication: u32,
) -> CreateRetentionPolicy {
    CreateRetentionPolicy::new(name, database, duration, replication)
}

/// DROP RETENTION POLICY `name` ON `database`.
pub fn drop_retention_policy(
    name: impl Into<Literal>,
    database: impl Into<Literal>,
) -> DropRetentionPolicy {
    DropRetentionPolicy::new(name, database)
}

pub fn show_measurements() -> ShowMeasurements {
    ShowMeasurements::new()
}

pub fn show_retention_policies() -> ShowRetentionPolicies {
    ShowRetentionPolicies::new()
}

pub fn show_databases() -> ShowDatabases {
    ShowDatabases::new()
}

pub fn show_tag_keys() -> ShowTagKeys {
    ShowTagKeys::new()
}

pub fn show_field_keys() -> ShowFieldKeys {
    ShowFieldKeys::new()
}
