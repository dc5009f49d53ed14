//! CREATE, ALTER and DROP RETENTION POLICY.

use std::time::Duration;

use super::traced;
use crate::ast::{Literal, ToInfluxQl, compile_opt};
use crate::error::QueryResult;
use crate::template::{ObjectTemplate, RetentionPolicyTemplate};
use crate::value::Value;

/// A CREATE RETENTION POLICY statement, or ALTER once [`alter`](Self::alter)
/// is called.
#[derive(Debug)]
pub struct CreateRetentionPolicy {
    name: Literal,
    database: Literal,
    duration: Value,
    replication: u32,
    shard_duration: Option<Value>,
    is_default: bool,
    is_alter: bool,
}

impl CreateRetentionPolicy {
    pub fn new(
        name: impl Into<Literal>,
        database: impl Into<Literal>,
        duration: Duration,
        replication: u32,
    ) -> Self {
        Self {
            name: name.into(),
            database: database.into(),
            duration: Value::Duration(duration),
            replication,
            shard_duration: None,
            is_default: false,
            is_alter: false,
        }
    }

    /// Add `SHARD DURATION <duration>`.
    pub fn shard_duration(mut self, duration: Duration) -> Self {
        self.shard_duration = Some(Value::Duration(duration));
        self
    }

    /// Turn the statement into ALTER RETENTION POLICY.
    pub fn alter(mut self) -> Self {
        self.is_alter = true;
        self
    }

    /// Make this the database's default retention policy.
    #[allow(clippy::should_implement_trait)]
    pub fn default(mut self) -> Self {
        self.is_default = true;
        self
    }

    fn compile(&self) -> QueryResult<String> {
        let data = RetentionPolicyTemplate {
            is_alter: self.is_alter,
            name: self.name.to_influxql()?,
            database: self.database.to_influxql()?,
            duration: self.duration.to_influxql()?,
            replication: self.replication,
            shard_duration: compile_opt(self.shard_duration.as_ref())?,
            is_default: self.is_default,
        };
        Ok(data.render())
    }
}

impl ToInfluxQl for CreateRetentionPolicy {
    fn to_influxql(&self) -> QueryResult<String> {
        let statement = if self.is_alter {
            "ALTER RETENTION POLICY"
        } else {
            "CREATE RETENTION POLICY"
        };
        traced(statement, self.compile())
    }
}

/// A DROP RETENTION POLICY statement.
#[derive(Debug)]
pub struct DropRetentionPolicy {
    name: Literal,
    database: Literal,
}

impl DropRetentionPolicy {
    pub fn new(name: impl Into<Literal>, database: impl Into<Literal>) -> Self {
        Self {
            name: name.into(),
            database: database.into(),
        }
    }

    fn compile(&self) -> QueryResult<String> {
        let data = ObjectTemplate {
            head: "DROP RETENTION POLICY",
            name: self.name.to_influxql()?,
            database: Some(self.database.to_influxql()?),
        };
        Ok(data.render())
    }
}

impl ToInfluxQl for DropRetentionPolicy {
    fn to_influxql(&self) -> QueryResult<String> {
        traced("DROP RETENTION POLICY", self.compile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HOUR: Duration = Duration::from_secs(3600);

    #[test]
    fn test_create() {
        let q = CreateRetentionPolicy::new("name", "db", HOUR, 1);
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"CREATE RETENTION POLICY "name" ON "db" DURATION 1h REPLICATION 1"#
        );
    }

    #[test]
    fn test_alter() {
        let q = CreateRetentionPolicy::new("name", "db", HOUR, 1).alter();
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"ALTER RETENTION POLICY "name" ON "db" DURATION 1h REPLICATION 1"#
        );
    }

    #[test]
    fn test_shard_duration() {
        let q = CreateRetentionPolicy::new("name", "db", HOUR, 1)
            .shard_duration(Duration::from_secs(60));
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"CREATE RETENTION POLICY "name" ON "db" DURATION 1h REPLICATION 1 SHARD DURATION 1m"#
        );
    }

    #[test]
    fn test_default() {
        let q = CreateRetentionPolicy::new("name", "db", HOUR, 1).default();
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"CREATE RETENTION POLICY "name" ON "db" DURATION 1h REPLICATION 1 DEFAULT"#
        );
    }

    #[test]
    fn test_infinite_duration() {
        let q = CreateRetentionPolicy::new("forever", "db", Duration::ZERO, 3)
            .shard_duration(Duration::from_secs(7 * 24 * 3600))
            .alter()
            .default();
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"ALTER RETENTION POLICY "forever" ON "db" DURATION 0s REPLICATION 3 SHARD DURATION 168h DEFAULT"#
        );
    }

    #[test]
    fn test_drop() {
        let q = DropRetentionPolicy::new("week", "db");
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"DROP RETENTION POLICY "week" ON "db""#
        );
    }
}
