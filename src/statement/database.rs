//! CREATE DATABASE, DROP DATABASE and DROP MEASUREMENT.

use super::traced;
use crate::ast::{Literal, ToInfluxQl};
use crate::error::QueryResult;
use crate::template::ObjectTemplate;

/// A CREATE DATABASE statement.
#[derive(Debug)]
pub struct CreateDatabase {
    database: Literal,
}

impl CreateDatabase {
    pub fn new(name: impl Into<Literal>) -> Self {
        Self {
            database: name.into(),
        }
    }
}

impl ToInfluxQl for CreateDatabase {
    fn to_influxql(&self) -> QueryResult<String> {
        traced("CREATE DATABASE", compile_object("CREATE DATABASE", &self.database))
    }
}

/// A DROP DATABASE statement.
#[derive(Debug)]
pub struct DropDatabase {
    database: Literal,
}

impl DropDatabase {
    pub fn new(name: impl Into<Literal>) -> Self {
        Self {
            database: name.into(),
        }
    }
}

impl ToInfluxQl for DropDatabase {
    fn to_influxql(&self) -> QueryResult<String> {
        traced("DROP DATABASE", compile_object("DROP DATABASE", &self.database))
    }
}

/// A DROP MEASUREMENT statement.
#[derive(Debug)]
pub struct DropMeasurement {
    measurement: Literal,
}

impl DropMeasurement {
    pub fn new(name: impl Into<Literal>) -> Self {
        Self {
            measurement: name.into(),
        }
    }
}

impl ToInfluxQl for DropMeasurement {
    fn to_influxql(&self) -> QueryResult<String> {
        traced(
            "DROP MEASUREMENT",
            compile_object("DROP MEASUREMENT", &self.measurement),
        )
    }
}

fn compile_object(head: &'static str, name: &Literal) -> QueryResult<String> {
    let data = ObjectTemplate {
        head,
        name: name.to_influxql()?,
        database: None,
    };
    Ok(data.render())
}
