//! Statement files.
//!
//! A statement file lists statements as data so they can be compiled without
//! writing Rust. TOML:
//!
//! ```toml
//! [[statement]]
//! kind = "select"
//! fields = [{ function = "mean", args = ["value"] }]
//! from = "cpu"
//! where = [
//!     { expr = "region", values = ["uswest"] },
//!     { expr = "time > now() - ?", values = [{ duration = "1h" }] },
//! ]
//! group_by = [{ time = "10m" }, "host"]
//! fill = "none"
//!
//! [[statement]]
//! kind = "create_retention_policy"
//! name = "week"
//! database = "telegraf"
//! duration = "168h"
//! replication = 1
//! ```
//!
//! JSON files use the same shape: `{"statement": [{"kind": "select", ...}]}`.
//! Timestamps are written `{ time = "2015-08-18T00:00:00Z" }`; TOML files
//! may also use a native offset datetime such as `{ time = 2015-08-18T00:00:00Z }`.

use std::path::Path;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

use crate::ast::{Literal, ToInfluxQl};
use crate::config::Config;
use crate::duration::parse_duration;
use crate::error::{QueryError, QueryResult};
use crate::functions::{self, Call, asc, desc};
use crate::statement::{
    CreateDatabase, CreateRetentionPolicy, Delete, DropDatabase, DropMeasurement,
    DropRetentionPolicy, Fill, Select, ShowDatabases, ShowFieldKeys, ShowMeasurements,
    ShowRetentionPolicies, ShowTagKeys,
};
use crate::value::Value;

/// The statements in a file, in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatementFile {
    #[serde(rename = "statement", default)]
    pub statements: Vec<StatementSpec>,
}

impl StatementFile {
    pub fn from_toml(content: &str) -> QueryResult<Self> {
        toml::from_str(content).map_err(|e| QueryError::Config(e.to_string()))
    }

    pub fn from_json(content: &str) -> QueryResult<Self> {
        serde_json::from_str(content).map_err(|e| QueryError::Config(e.to_string()))
    }

    /// Read a `.json` file as JSON and anything else as TOML.
    pub fn load(path: &Path) -> QueryResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    /// Compile every statement. Stops at the first failure.
    pub fn compile(&self, config: &Config) -> QueryResult<Vec<String>> {
        self.statements
            .iter()
            .map(|s| s.build(config)?.to_influxql())
            .collect()
    }
}

/// One statement.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementSpec {
    Select(SelectSpec),
    Delete(DeleteSpec),
    CreateDatabase { name: String },
    DropDatabase { name: String },
    DropMeasurement { name: String },
    CreateRetentionPolicy(RetentionPolicySpec),
    AlterRetentionPolicy(RetentionPolicySpec),
    DropRetentionPolicy {
        name: String,
        database: Option<String>,
    },
    ShowMeasurements {
        database: Option<String>,
    },
    ShowRetentionPolicies {
        database: Option<String>,
    },
    ShowDatabases,
    ShowTagKeys(KeysSpec),
    ShowFieldKeys(KeysSpec),
}

impl StatementSpec {
    /// Turn the description into a builder. Unset databases and retention
    /// policies fall back to `config`.
    pub fn build(&self, config: &Config) -> QueryResult<Box<dyn ToInfluxQl>> {
        Ok(match self {
            StatementSpec::Select(spec) => Box::new(spec.build(config)?),
            StatementSpec::Delete(spec) => Box::new(spec.build()?),
            StatementSpec::CreateDatabase { name } => Box::new(CreateDatabase::new(name)),
            StatementSpec::DropDatabase { name } => Box::new(DropDatabase::new(name)),
            StatementSpec::DropMeasurement { name } => Box::new(DropMeasurement::new(name)),
            StatementSpec::CreateRetentionPolicy(spec) => Box::new(spec.build(config)?),
            StatementSpec::AlterRetentionPolicy(spec) => Box::new(spec.build(config)?.alter()),
            StatementSpec::DropRetentionPolicy { name, database } => Box::new(
                DropRetentionPolicy::new(name, required_database(database, config)?),
            ),
            StatementSpec::ShowMeasurements { database } => {
                let mut show = ShowMeasurements::new();
                if let Some(db) = database.as_ref().or(config.database.as_ref()) {
                    show = show.on(db);
                }
                Box::new(show)
            }
            StatementSpec::ShowRetentionPolicies { database } => {
                let mut show = ShowRetentionPolicies::new();
                if let Some(db) = database.as_ref().or(config.database.as_ref()) {
                    show = show.on(db);
                }
                Box::new(show)
            }
            StatementSpec::ShowDatabases => Box::new(ShowDatabases::new()),
            StatementSpec::ShowTagKeys(spec) => {
                let mut show = ShowTagKeys::new();
                if let Some(db) = spec.database(config) {
                    show = show.on(db);
                }
                if let Some(m) = &spec.from {
                    show = show.from(m);
                }
                if let Some(rp) = spec.retention_policy(config) {
                    show = show.retention_policy(rp);
                }
                Box::new(show)
            }
            StatementSpec::ShowFieldKeys(spec) => {
                let mut show = ShowFieldKeys::new();
                if let Some(db) = spec.database(config) {
                    show = show.on(db);
                }
                if let Some(m) = &spec.from {
                    show = show.from(m);
                }
                if let Some(rp) = spec.retention_policy(config) {
                    show = show.retention_policy(rp);
                }
                Box::new(show)
            }
        })
    }
}

fn required_database<'a>(database: &'a Option<String>, config: &'a Config) -> QueryResult<&'a String> {
    database
        .as_ref()
        .or(config.database.as_ref())
        .ok_or_else(|| QueryError::Config("no database given and none configured".to_string()))
}

/// How a condition joins the ones before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Join {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionSpec {
    pub expr: String,
    #[serde(default)]
    pub values: Vec<ValueSpec>,
    /// Ignored on the first condition.
    #[serde(default)]
    pub join: Join,
}

impl ConditionSpec {
    fn values(&self) -> QueryResult<Vec<Value>> {
        self.values.iter().map(ValueSpec::to_value).collect()
    }
}

/// A condition value. Plain scalars map to text, integers and the generic
/// form; durations and timestamps need a wrapping table. A timestamp is
/// either an RFC3339 string or, in TOML, a native offset datetime.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    Duration { duration: String },
    Time { time: DateTime<Utc> },
    TomlTime { time: toml::value::Datetime },
}

impl ValueSpec {
    pub fn to_value(&self) -> QueryResult<Value> {
        Ok(match self {
            ValueSpec::Int(n) => Value::Int(*n),
            ValueSpec::UInt(n) => Value::UInt(*n),
            ValueSpec::Float(f) => Value::from(*f),
            ValueSpec::Bool(b) => Value::from(*b),
            ValueSpec::Text(s) => Value::Text(s.clone()),
            ValueSpec::Duration { duration } => Value::Duration(parse_duration(duration)?),
            ValueSpec::Time { time } => Value::Timestamp(*time),
            ValueSpec::TomlTime { time } => Value::from(toml_timestamp(time)?),
        })
    }
}

/// Local datetimes and bare dates carry no offset and are rejected.
fn toml_timestamp(time: &toml::value::Datetime) -> QueryResult<DateTime<FixedOffset>> {
    let text = time.to_string();
    DateTime::parse_from_rfc3339(&text).map_err(|e| {
        QueryError::Config(format!(
            "timestamp {} needs a date, time and offset: {}",
            text, e
        ))
    })
}

/// A selected field, GROUP BY or ORDER BY term.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TermSpec {
    Name(String),
    Int(i64),
    Float(f64),
    Call {
        function: String,
        #[serde(default)]
        args: Vec<TermSpec>,
        alias: Option<String>,
    },
    Time {
        time: String,
        offset: Option<String>,
    },
    Asc {
        asc: String,
    },
    Desc {
        desc: String,
    },
}

impl TermSpec {
    pub fn to_literal(&self) -> QueryResult<Literal> {
        Ok(match self {
            TermSpec::Name(name) => Literal::from(name),
            TermSpec::Int(n) => Literal::raw(n.to_string()),
            TermSpec::Float(f) => Literal::raw(f.to_string()),
            TermSpec::Call {
                function,
                args,
                alias,
            } => {
                let args = args
                    .iter()
                    .map(TermSpec::to_literal)
                    .collect::<QueryResult<Vec<_>>>()?;
                let mut call = Call::new(function.to_uppercase(), args);
                if let Some(alias) = alias {
                    call = call.alias(alias);
                }
                Literal::from(call)
            }
            TermSpec::Time { time, offset } => {
                let interval = parse_duration(time)?;
                let call = match offset {
                    Some(offset) => functions::time_with_offset(interval, parse_duration(offset)?),
                    None => functions::time(interval),
                };
                Literal::from(call)
            }
            TermSpec::Asc { asc: field } => Literal::from(asc(field)),
            TermSpec::Desc { desc: field } => Literal::from(desc(field)),
        })
    }
}

fn literals(terms: &[TermSpec]) -> QueryResult<Vec<Literal>> {
    terms.iter().map(TermSpec::to_literal).collect()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FillSpec {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FillSpec {
    pub fn to_fill(&self) -> QueryResult<Fill> {
        match self {
            FillSpec::Int(n) => Ok(Fill::from(*n)),
            FillSpec::Float(f) => Ok(Fill::from(*f)),
            FillSpec::Text(s) => s.parse(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectSpec {
    pub fields: Vec<TermSpec>,
    pub from: Option<String>,
    pub retention_policy: Option<String>,
    #[serde(rename = "where")]
    pub conditions: Vec<ConditionSpec>,
    pub group_by: Vec<TermSpec>,
    pub order_by: Vec<TermSpec>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub slimit: Option<u64>,
    pub soffset: Option<u64>,
    pub fill: Option<FillSpec>,
}

impl SelectSpec {
    pub fn build(&self, config: &Config) -> QueryResult<Select> {
        let mut select = Select::new(literals(&self.fields)?);

        if let Some(m) = &self.from {
            select = select.from(m);
        }
        if let Some(rp) = self.retention_policy.as_ref().or(config.retention_policy.as_ref()) {
            select = select.retention_policy(rp);
        }

        for (i, c) in self.conditions.iter().enumerate() {
            select = match (i, c.join) {
                (0, _) => select.where_(&c.expr, c.values()?),
                (_, Join::And) => select.and(&c.expr, c.values()?),
                (_, Join::Or) => select.or(&c.expr, c.values()?),
            };
        }

        if !self.group_by.is_empty() {
            select = select.group_by(literals(&self.group_by)?);
        }
        if !self.order_by.is_empty() {
            select = select.order_by(literals(&self.order_by)?);
        }
        if let Some(n) = self.limit {
            select = select.limit(n);
        }
        if let Some(n) = self.offset {
            select = select.offset(n);
        }
        if let Some(n) = self.slimit {
            select = select.slimit(n);
        }
        if let Some(n) = self.soffset {
            select = select.soffset(n);
        }
        if let Some(fill) = &self.fill {
            select = select.fill(fill.to_fill()?);
        }

        Ok(select)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeleteSpec {
    pub from: Option<String>,
    #[serde(rename = "where")]
    pub conditions: Vec<ConditionSpec>,
}

impl DeleteSpec {
    pub fn build(&self) -> QueryResult<Delete> {
        let mut delete = Delete::new();

        if let Some(m) = &self.from {
            delete = delete.from(m);
        }

        for (i, c) in self.conditions.iter().enumerate() {
            delete = match (i, c.join) {
                (0, _) => delete.where_(&c.expr, c.values()?),
                (_, Join::And) => delete.and(&c.expr, c.values()?),
                (_, Join::Or) => delete.or(&c.expr, c.values()?),
            };
        }

        Ok(delete)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetentionPolicySpec {
    pub name: String,
    pub database: Option<String>,
    pub duration: String,
    pub replication: u32,
    pub shard_duration: Option<String>,
    #[serde(default)]
    pub default: bool,
}

impl RetentionPolicySpec {
    pub fn build(&self, config: &Config) -> QueryResult<CreateRetentionPolicy> {
        let database = required_database(&self.database, config)?;
        let mut rp = CreateRetentionPolicy::new(
            &self.name,
            database,
            parse_duration(&self.duration)?,
            self.replication,
        );

        if let Some(shard) = &self.shard_duration {
            rp = rp.shard_duration(parse_duration(shard)?);
        }
        if self.default {
            rp = rp.default();
        }

        Ok(rp)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysSpec {
    pub database: Option<String>,
    pub from: Option<String>,
    pub retention_policy: Option<String>,
}

impl KeysSpec {
    fn database<'a>(&'a self, config: &'a Config) -> Option<&'a String> {
        self.database.as_ref().or(config.database.as_ref())
    }

    /// The configured retention policy only applies when a measurement is
    /// named; an explicit one is always passed on.
    fn retention_policy<'a>(&'a self, config: &'a Config) -> Option<&'a String> {
        match (&self.retention_policy, &self.from) {
            (Some(rp), _) => Some(rp),
            (None, Some(_)) => config.retention_policy.as_ref(),
            (None, None) => None,
        }
    }
}
