//! SELECT statements.

use std::fmt;
use std::str::FromStr;

use super::{Conditions, impl_conditions, traced};
use crate::ast::{Literal, ToInfluxQl, compile_all, compile_opt, impl_literal_from_node};
use crate::error::{QueryError, QueryResult};
use crate::template::SelectTemplate;

/// What `fill()` puts in empty GROUP BY time windows.
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Null,
    None,
    Previous,
    Linear,
    /// A fixed number.
    Number(String),
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fill::Null => write!(f, "null"),
            Fill::None => write!(f, "none"),
            Fill::Previous => write!(f, "previous"),
            Fill::Linear => write!(f, "linear"),
            Fill::Number(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for Fill {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "null" => Ok(Fill::Null),
            "none" => Ok(Fill::None),
            "previous" => Ok(Fill::Previous),
            "linear" => Ok(Fill::Linear),
            other if is_finite_number(other) => Ok(Fill::Number(other.to_string())),
            _ => Err(QueryError::InvalidFill(s.to_string())),
        }
    }
}

/// `nan` and `inf` parse as floats but are not valid fill values.
fn is_finite_number(s: &str) -> bool {
    s.parse::<f64>().is_ok_and(f64::is_finite)
}

impl Fill {
    /// Reject numbers that came in through `From<f64>` as NaN or infinity.
    fn checked(&self) -> QueryResult<String> {
        match self {
            Fill::Number(n) if !is_finite_number(n) => Err(QueryError::InvalidFill(n.clone())),
            fill => Ok(fill.to_string()),
        }
    }
}

macro_rules! impl_fill_from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Fill {
            fn from(n: $t) -> Self {
                Fill::Number(n.to_string())
            }
        })*
    };
}

impl_fill_from_number!(i32, i64, u32, u64, f32, f64);

/// `None` fills with `null`.
impl<T: Into<Fill>> From<Option<T>> for Fill {
    fn from(v: Option<T>) -> Self {
        v.map_or(Fill::Null, Into::into)
    }
}

/// A SELECT statement.
///
/// ```
/// use std::time::Duration;
/// use influxql::prelude::*;
///
/// let q = select([mean("value")])
///     .from("cpu")
///     .where_("region", ["uswest"])
///     .group_by([Duration::from_secs(600)])
///     .fill(0)
///     .to_influxql()
///     .unwrap();
/// assert_eq!(
///     q,
///     r#"SELECT MEAN("value") FROM "cpu" WHERE "region" = 'uswest' GROUP BY time(10m) fill(0)"#
/// );
/// ```
#[derive(Debug, Default)]
pub struct Select {
    fields: Vec<Literal>,
    measurement: Option<Literal>,
    retention_policy: Option<Literal>,
    conditions: Conditions,
    group_by: Vec<Literal>,
    order_by: Vec<Literal>,
    limit: Option<u64>,
    offset: Option<u64>,
    slimit: Option<u64>,
    soffset: Option<u64>,
    fill: Option<Fill>,
}

impl Select {
    /// Select `fields`. No fields selects `*`.
    pub fn new(fields: impl IntoIterator<Item = impl Into<Literal>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// The measurement to read.
    pub fn from(mut self, measurement: impl Into<Literal>) -> Self {
        self.measurement = Some(measurement.into());
        self
    }

    /// Qualify the measurement with a retention policy.
    pub fn retention_policy(mut self, rp: impl Into<Literal>) -> Self {
        self.retention_policy = Some(rp.into());
        self
    }

    /// Replace the GROUP BY terms. A duration groups by `time(<duration>)`.
    pub fn group_by(mut self, terms: impl IntoIterator<Item = impl Into<Literal>>) -> Self {
        self.group_by = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the ORDER BY terms.
    pub fn order_by(mut self, terms: impl IntoIterator<Item = impl Into<Literal>>) -> Self {
        self.order_by = terms.into_iter().map(Into::into).collect();
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Limit the number of series.
    pub fn slimit(mut self, n: u64) -> Self {
        self.slimit = Some(n);
        self
    }

    /// Skip series.
    pub fn soffset(mut self, n: u64) -> Self {
        self.soffset = Some(n);
        self
    }

    pub fn fill(mut self, fill: impl Into<Fill>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    fn compile(&self) -> QueryResult<String> {
        let measurement = self
            .measurement
            .as_ref()
            .ok_or_else(|| QueryError::missing_measurement("SELECT"))?;

        let data = SelectTemplate {
            measurement: measurement.to_influxql()?,
            retention_policy: compile_opt(self.retention_policy.as_ref())?,
            fields: compile_all(&self.fields)?,
            where_terms: self.conditions.compile()?,
            group_by: compile_all(&self.group_by)?,
            order_by: compile_all(&self.order_by)?,
            limit: self.limit,
            offset: self.offset,
            slimit: self.slimit,
            soffset: self.soffset,
            fill: self.fill.as_ref().map(Fill::checked).transpose()?,
        };

        Ok(data.render())
    }
}

impl_conditions!(Select);
impl_literal_from_node!(Select);

impl ToInfluxQl for Select {
    fn to_influxql(&self) -> QueryResult<String> {
        traced("SELECT", self.compile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{desc, mean};
    use crate::vals;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    #[test]
    fn test_fields_default_to_wildcard() {
        let q = Select::new(Vec::<Literal>::new()).from("bar");
        assert_eq!(q.to_influxql().unwrap(), r#"SELECT * FROM "bar""#);
    }

    #[test]
    fn test_missing_measurement() {
        let err = Select::new(["foo"]).to_influxql().unwrap_err();
        assert!(matches!(
            err,
            QueryError::MissingMeasurement { statement: "SELECT" }
        ));
    }

    #[test]
    fn test_or_as_first_condition() {
        let q = Select::new(["foo"]).from("bar").or("location", ["Toronto"]);
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"SELECT "foo" FROM "bar" WHERE "location" = 'Toronto'"#
        );
    }

    #[test]
    fn test_where_replaces_previous_conditions() {
        let q = Select::new(["foo"])
            .from("bar")
            .where_("a", [1])
            .and("b", [2])
            .where_("c", [3]);
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"SELECT "foo" FROM "bar" WHERE "c" = 3"#
        );
    }

    #[test]
    fn test_condition_failure_aborts_statement() {
        let q = Select::new(["foo"])
            .from("bar")
            .where_("location", ["Toronto"])
            .and("altitude >= x", [500]);
        assert!(matches!(
            q.to_influxql(),
            Err(QueryError::UnsupportedExpression(_))
        ));
    }

    #[test]
    fn test_group_by_time_and_tag() {
        let q = Select::new([mean("value")])
            .from("cpu")
            .group_by([Literal::from(Duration::from_secs(600)), "host".into()]);
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"SELECT MEAN("value") FROM "cpu" GROUP BY time(10m), "host""#
        );
    }

    #[test]
    fn test_everything() {
        let q = Select::new([mean("value")])
            .from("cpu")
            .retention_policy("week")
            .where_("time > now() - ?", vals![Duration::from_secs(86_400)])
            .and("host", ["server01"])
            .group_by([Duration::from_secs(3600)])
            .order_by([desc("time")])
            .limit(10)
            .offset(5)
            .slimit(1)
            .soffset(2)
            .fill(Fill::Previous);
        assert_eq!(
            q.to_influxql().unwrap(),
            r#"SELECT MEAN("value") FROM "week"."cpu" WHERE time > now() - 24h AND "host" = 'server01' GROUP BY time(1h) ORDER BY "time" DESC LIMIT 10 OFFSET 5 SLIMIT 1 SOFFSET 2 fill(previous)"#
        );
    }

    #[test]
    fn test_fill_values() {
        assert_eq!(Fill::from(0).to_string(), "0");
        assert_eq!(Fill::from(1.5).to_string(), "1.5");
        assert_eq!(Fill::from(None::<i64>), Fill::Null);
        assert_eq!(Fill::from(Some(3)), Fill::Number("3".into()));
        assert_eq!("none".parse::<Fill>().unwrap(), Fill::None);
        assert_eq!("NULL".parse::<Fill>().unwrap(), Fill::Null);
        assert_eq!("linear".parse::<Fill>().unwrap(), Fill::Linear);
        assert_eq!("-2".parse::<Fill>().unwrap(), Fill::Number("-2".into()));
        assert!(matches!("zero".parse::<Fill>(), Err(QueryError::InvalidFill(_))));
    }

    #[test]
    fn test_fill_rejects_non_finite_numbers() {
        for text in ["nan", "inf", "-inf", "infinity"] {
            assert!(
                matches!(text.parse::<Fill>(), Err(QueryError::InvalidFill(_))),
                "{text} should be rejected"
            );
        }

        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let q = Select::new(["x"]).from("m").fill(n);
            assert!(matches!(q.to_influxql(), Err(QueryError::InvalidFill(_))));
        }
    }
}
