//! Function call builders (MEAN, COUNT, DISTINCT, time(), ...).
//!
//! ```
//! use influxql::functions::{count, distinct, mean};
//! use influxql::ToInfluxQl;
//!
//! let f = count(distinct("level description"));
//! assert_eq!(f.to_influxql().unwrap(), r#"COUNT(DISTINCT("level description"))"#);
//!
//! let f = mean("water_level").alias("dream_name");
//! assert_eq!(f.to_influxql().unwrap(), r#"MEAN("water_level") AS "dream_name""#);
//! ```

use std::fmt;
use std::time::Duration;

use crate::ast::{Direction, Literal, Order, ToInfluxQl, compile_all, impl_literal_from_node};
use crate::duration::format_duration;
use crate::error::QueryResult;

/// A function call, optionally aliased.
#[derive(Debug)]
pub struct Call {
    name: String,
    args: Vec<Literal>,
    alias: Option<Literal>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Literal>) -> Self {
        Self {
            name: name.into(),
            args,
            alias: None,
        }
    }

    /// Add `AS <alias>`.
    pub fn alias(mut self, alias: impl Into<Literal>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

impl ToInfluxQl for Call {
    fn to_influxql(&self) -> QueryResult<String> {
        let args = compile_all(&self.args)?;
        let mut out = format!("{}({})", self.name, args.join(", "));

        if let Some(alias) = &self.alias {
            out.push_str(" AS ");
            out.push_str(&alias.to_influxql()?);
        }

        Ok(out)
    }
}

impl_literal_from_node!(Call);

macro_rules! unary_functions {
    ($($(#[$doc:meta])* $fn_name:ident => $sql:literal;)*) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(field: impl Into<Literal>) -> Call {
                Call::new($sql, vec![field.into()])
            }
        )*
    };
}

macro_rules! parameterized_functions {
    ($($(#[$doc:meta])* $fn_name:ident => $sql:literal;)*) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(field: impl Into<Literal>, n: impl fmt::Display) -> Call {
                Call::new($sql, vec![field.into(), Literal::raw(n.to_string())])
            }
        )*
    };
}

unary_functions! {
    /// MEAN(field)
    mean => "MEAN";
    /// MEDIAN(field)
    median => "MEDIAN";
    /// MODE(field)
    mode => "MODE";
    /// SPREAD(field)
    spread => "SPREAD";
    /// STDDEV(field)
    stddev => "STDDEV";
    /// SUM(field)
    sum => "SUM";
    /// COUNT(field)
    count => "COUNT";
    /// DISTINCT(field)
    distinct => "DISTINCT";
    /// INTEGRAL(field)
    integral => "INTEGRAL";
    /// MIN(field)
    min => "MIN";
    /// MAX(field)
    max => "MAX";
    /// FIRST(field)
    first => "FIRST";
    /// LAST(field)
    last => "LAST";
    /// DERIVATIVE(field)
    derivative => "DERIVATIVE";
    /// DIFFERENCE(field)
    difference => "DIFFERENCE";
}

parameterized_functions! {
    /// PERCENTILE(field, n)
    percentile => "PERCENTILE";
    /// TOP(field, n)
    top => "TOP";
    /// BOTTOM(field, n)
    bottom => "BOTTOM";
    /// MOVING_AVERAGE(field, n)
    moving_average => "MOVING_AVERAGE";
}

/// `time(<interval>)`, the GROUP BY time window.
pub fn time(interval: Duration) -> Call {
    Call::new("time", vec![Literal::raw(format_duration(interval))])
}

/// `time(<interval>, <offset>)`, a time window shifted by `offset`.
pub fn time_with_offset(interval: Duration, offset: Duration) -> Call {
    Call::new(
        "time",
        vec![
            Literal::raw(format_duration(interval)),
            Literal::raw(format_duration(offset)),
        ],
    )
}

/// `<field> ASC`
pub fn asc(field: impl Into<Literal>) -> Order {
    Order {
        field: field.into(),
        direction: Direction::Asc,
    }
}

/// `<field> DESC`
pub fn desc(field: impl Into<Literal>) -> Order {
    Order {
        field: field.into(),
        direction: Direction::Desc,
    }
}
