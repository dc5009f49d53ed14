//! SHOW statements.

use super::traced;
use crate::ast::{Literal, ToInfluxQl, compile_opt};
use crate::error::{QueryError, QueryResult};
use crate::template::ShowTemplate;

/// A SHOW MEASUREMENTS statement.
#[derive(Debug, Default)]
pub struct ShowMeasurements {
    database: Option<Literal>,
}

impl ShowMeasurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `ON <database>`.
    pub fn on(mut self, database: impl Into<Literal>) -> Self {
        self.database = Some(database.into());
        self
    }
}

impl ToInfluxQl for ShowMeasurements {
    fn to_influxql(&self) -> QueryResult<String> {
        traced(
            "SHOW MEASUREMENTS",
            compile_show("MEASUREMENTS", self.database.as_ref()),
        )
    }
}

/// A SHOW RETENTION POLICIES statement.
#[derive(Debug, Default)]
pub struct ShowRetentionPolicies {
    database: Option<Literal>,
}

impl ShowRetentionPolicies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `ON <database>`.
    pub fn on(mut self, database: impl Into<Literal>) -> Self {
        self.database = Some(database.into());
        self
    }
}

impl ToInfluxQl for ShowRetentionPolicies {
    fn to_influxql(&self) -> QueryResult<String> {
        traced(
            "SHOW RETENTION POLICIES",
            compile_show("RETENTION POLICIES", self.database.as_ref()),
        )
    }
}

/// A SHOW DATABASES statement.
#[derive(Debug, Default)]
pub struct ShowDatabases;

impl ShowDatabases {
    pub fn new() -> Self {
        Self
    }
}

impl ToInfluxQl for ShowDatabases {
    fn to_influxql(&self) -> QueryResult<String> {
        traced("SHOW DATABASES", compile_show("DATABASES", None))
    }
}

fn compile_show(what: &'static str, database: Option<&Literal>) -> QueryResult<String> {
    let data = ShowTemplate {
        what,
        database: compile_opt(database)?,
        ..Default::default()
    };
    Ok(data.render())
}

/// The `[ON <db>] [FROM [<rp>.]<measurement>]` part shared by SHOW TAG KEYS
/// and SHOW FIELD KEYS.
#[derive(Debug, Default)]
struct KeysSource {
    database: Option<Literal>,
    retention_policy: Option<Literal>,
    measurement: Option<Literal>,
}

impl KeysSource {
    fn compile(&self, what: &'static str) -> QueryResult<String> {
        let data = ShowTemplate {
            what,
            database: compile_opt(self.database.as_ref())?,
            measurement: compile_opt(self.measurement.as_ref())?,
            retention_policy: compile_opt(self.retention_policy.as_ref())?,
        };

        if data.retention_policy.is_some() && data.measurement.is_none() {
            return Err(QueryError::RetentionPolicyWithoutMeasurement);
        }

        Ok(data.render())
    }
}

/// A SHOW TAG KEYS statement.
#[derive(Debug, Default)]
pub struct ShowTagKeys {
    source: KeysSource,
}

impl ShowTagKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `ON <database>`.
    pub fn on(mut self, database: impl Into<Literal>) -> Self {
        self.source.database = Some(database.into());
        self
    }

    /// The measurement in `FROM <measurement>`.
    pub fn from(mut self, measurement: impl Into<Literal>) -> Self {
        self.source.measurement = Some(measurement.into());
        self
    }

    /// Qualify the measurement with a retention policy. Requires
    /// [`from`](Self::from).
    pub fn retention_policy(mut self, rp: impl Into<Literal>) -> Self {
        self.source.retention_policy = Some(rp.into());
        self
    }
}

impl ToInfluxQl for ShowTagKeys {
    fn to_influxql(&self) -> QueryResult<String> {
        traced("SHOW TAG KEYS", self.source.compile("TAG KEYS"))
    }
}

/// A SHOW FIELD KEYS statement.
#[derive(Debug, Default)]
pub struct ShowFieldKeys {
    source: KeysSource,
}

impl ShowFieldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `ON <database>`.
    pub fn on(mut self, database: impl Into<Literal>) -> Self {
        self.source.database = Some(database.into());
        self
    }

    /// The measurement in `FROM <measurement>`.
    pub fn from(mut self, measurement: impl Into<Literal>) -> Self {
        self.source.measurement = Some(measurement.into());
        self
    }

    /// Qualify the measurement with a retention policy. Requires
    /// [`from`](Self::from).
    pub fn retention_policy(mut self, rp: impl Into<Literal>) -> Self {
        self.source.retention_policy = Some(rp.into());
        self
    }
}

impl ToInfluxQl for ShowFieldKeys {
    fn to_influxql(&self) -> QueryResult<String> {
        traced("SHOW FIELD KEYS", self.source.compile("FIELD KEYS"))
    }
}
