//! DELETE statements.

use super::{Conditions, impl_conditions, traced};
use crate::ast::{Literal, ToInfluxQl};
use crate::error::{QueryError, QueryResult};
use crate::template::DeleteTemplate;

/// A DELETE statement.
#[derive(Debug, Default)]
pub struct Delete {
    measurement: Option<Literal>,
    conditions: Conditions,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    /// The measurement to delete from.
    pub fn from(mut self, measurement: impl Into<Literal>) -> Self {
        self.measurement = Some(measurement.into());
        self
    }

    fn compile(&self) -> QueryResult<String> {
        let measurement = self
            .measurement
            .as_ref()
            .ok_or_else(|| QueryError::missing_measurement("DELETE"))?;

        let data = DeleteTemplate {
            measurement: measurement.to_influxql()?,
            where_terms: self.conditions.compile()?,
        };

        Ok(data.render())
    }
}

impl_conditions!(Delete);

impl ToInfluxQl for Delete {
    fn to_influxql(&self) -> QueryResult<String> {
        traced("DELETE", self.compile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_delete_all() {
        let q = Delete::new().from("cpu");
        assert_eq!(q.to_influxql().unwrap(), r#"DELETE FROM "cpu""#);
    }

    #[test]
    fn test_delete_where() {
        let t = Utc.with_ymd_and_hms(2015, 8, 18, 0, 0, 0).unwrap();
        let q = Delete::new()
            .from("cpu")
            .where_("time <", [t])
            .or("host", ["server01"]);
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"DELETE FROM "cpu" WHERE "time" < '2015-08-18T00:00:00Z' OR "host" = 'server01'"#
        );
    }

    #[test]
    fn test_delete_requires_measurement() {
        let err = Delete::new().where_("host", ["a"]).to_influxql().unwrap_err();
        assert!(matches!(
            err,
            QueryError::MissingMeasurement { statement: "DELETE" }
        ));
    }

    #[test]
    fn test_delete_bad_condition() {
        let q = Delete::new().from("cpu").where_("host = ? ?", ["a"]);
        assert!(matches!(
            q.to_influxql(),
            Err(QueryError::PlaceholderMismatch { .. })
        ));
    }
}
