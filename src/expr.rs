//! Condition expressions.
//!
//! A condition is a string plus the values that fill it in. Three forms are
//! accepted:
//!
//! ```text
//! explicit    "location = ?"   ["Toronto"]  -> location = 'Toronto'
//! shorthand   "location"       ["Toronto"]  -> "location" = 'Toronto'
//! shorthand   "altitude >="    [500]        -> "altitude" >= 500
//! verbatim    "location != 'Toronto'"  []   -> location != 'Toronto'
//! ```
//!
//! Placeholders are positional only. Every `?` counts, including one inside a
//! quoted string, so literal question marks must go through a value.

use std::borrow::Cow;

use crate::ast::{ToInfluxQl, quote_identifier};
use crate::error::{QueryError, QueryResult};
use crate::value::Value;

const PLACEHOLDER: char = '?';

/// A condition string and its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    expr: String,
    values: Vec<Value>,
}

impl Expr {
    pub fn new(expr: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            expr: expr.into(),
            values,
        }
    }

    /// A condition with no values, used verbatim.
    pub fn raw(expr: impl Into<String>) -> Self {
        Self::new(expr, Vec::new())
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Rewrite shorthand into the explicit placeholder form, checking that
    /// placeholders and values line up.
    fn explicit_form(&self) -> QueryResult<Cow<'_, str>> {
        let placeholders = self.expr.matches(PLACEHOLDER).count();

        if placeholders > 0 {
            if placeholders != self.values.len() {
                return Err(QueryError::mismatch(placeholders, self.values.len()));
            }
            return Ok(Cow::Borrowed(&self.expr));
        }

        if self.values.is_empty() {
            return Ok(Cow::Borrowed(&self.expr));
        }

        let tokens: Vec<&str> = self.expr.split_whitespace().collect();
        let rewritten = match tokens.as_slice() {
            [] => return Err(QueryError::EmptyCondition),
            [name] => {
                self.expect_single_value()?;
                format!("{} = {}", quote_identifier(name), PLACEHOLDER)
            }
            [name, op] => {
                self.expect_single_value()?;
                format!("{} {} {}", quote_identifier(name), op, PLACEHOLDER)
            }
            _ => return Err(QueryError::UnsupportedExpression(self.expr.clone())),
        };

        Ok(Cow::Owned(rewritten))
    }

    fn expect_single_value(&self) -> QueryResult<()> {
        if self.values.len() != 1 {
            return Err(QueryError::ExpectedSingleValue);
        }
        Ok(())
    }
}

impl ToInfluxQl for Expr {
    fn to_influxql(&self) -> QueryResult<String> {
        let expr = self.explicit_form()?;

        let mut parts = expr.split(PLACEHOLDER);
        let mut out = String::with_capacity(expr.len() + 8 * self.values.len());
        out.push_str(parts.next().unwrap_or_default());

        for (part, value) in parts.zip(&self.values) {
            out.push_str(&value.to_influxql()?);
            out.push_str(part);
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vals;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn compile(expr: &str, values: Vec<Value>) -> QueryResult<String> {
        Expr::new(expr, values).to_influxql()
    }

    #[test]
    fn test_explicit_placeholder() {
        assert_eq!(
            compile("location = ?", vals!["Toronto"]).unwrap(),
            "location = 'Toronto'"
        );
        assert_eq!(
            compile("location != ?", vals!["Toronto"]).unwrap(),
            "location != 'Toronto'"
        );
    }

    #[test]
    fn test_values_fill_placeholders_in_order() {
        assert_eq!(
            compile(r#""location" = ? AND "altitude" >= ?"#, vals!["Toronto", 500]).unwrap(),
            r#""location" = 'Toronto' AND "altitude" >= 500"#
        );
        assert_eq!(compile("? ? ?", vals![1, 2, 3]).unwrap(), "1 2 3");
    }

    #[test]
    fn test_shorthand_name() {
        assert_eq!(
            compile("location", vals!["Toronto"]).unwrap(),
            r#""location" = 'Toronto'"#
        );
    }

    #[test]
    fn test_shorthand_name_and_operator() {
        assert_eq!(
            compile("altitude >=", vals![500]).unwrap(),
            r#""altitude" >= 500"#
        );
        assert_eq!(
            compile("  altitude \t\n >=  ", vals![500]).unwrap(),
            r#""altitude" >= 500"#
        );
    }

    #[test]
    fn test_shorthand_timestamp() {
        let t = Utc.with_ymd_and_hms(2015, 8, 18, 0, 0, 0).unwrap();
        assert_eq!(
            compile("time >", vals![t]).unwrap(),
            r#""time" > '2015-08-18T00:00:00Z'"#
        );
        assert_eq!(
            compile("time > ?", vals![t]).unwrap(),
            "time > '2015-08-18T00:00:00Z'"
        );
    }

    #[test]
    fn test_duration_value() {
        assert_eq!(
            compile("time > now() - ?", vals![Duration::from_secs(3600)]).unwrap(),
            "time > now() - 1h"
        );
    }

    #[test]
    fn test_verbatim_without_values() {
        assert_eq!(
            compile("location != 'Toronto'", vals![]).unwrap(),
            "location != 'Toronto'"
        );
        assert_eq!(Expr::raw("a b c d").to_influxql().unwrap(), "a b c d");
    }

    #[test]
    fn test_more_placeholders_than_values() {
        let err = compile(r#""location" = ? ?"#, vals!["Toronto"]).unwrap_err();
        assert!(matches!(
            err,
            QueryError::PlaceholderMismatch {
                placeholders: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn test_fewer_placeholders_than_values() {
        let err = compile("location = ?", vals!["Toronto", "Paris"]).unwrap_err();
        assert!(matches!(
            err,
            QueryError::PlaceholderMismatch {
                placeholders: 1,
                values: 2
            }
        ));
    }

    #[test]
    fn test_placeholder_without_values() {
        let err = compile("location = ?", vals![]).unwrap_err();
        assert!(matches!(
            err,
            QueryError::PlaceholderMismatch {
                placeholders: 1,
                values: 0
            }
        ));
    }

    #[test]
    fn test_three_token_shorthand_is_unsupported() {
        let err = compile("altitude >= x", vals![500]).unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedExpression(ref e) if e == "altitude >= x"));

        let err = compile("altitude >= x", vals![500, 600]).unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedExpression(_)));
    }

    #[test]
    fn test_shorthand_needs_exactly_one_value() {
        let err = compile("location", vals!["a", "b"]).unwrap_err();
        assert!(matches!(err, QueryError::ExpectedSingleValue));

        let err = compile("altitude >=", vals![1, 2]).unwrap_err();
        assert!(matches!(err, QueryError::ExpectedSingleValue));
    }

    #[test]
    fn test_blank_shorthand() {
        let err = compile("   ", vals![1]).unwrap_err();
        assert!(matches!(err, QueryError::EmptyCondition));
    }

    #[test]
    fn test_percent_signs_are_copied() {
        assert_eq!(
            compile("host =~ /%s/ AND cpu = ?", vals!["cpu0"]).unwrap(),
            "host =~ /%s/ AND cpu = 'cpu0'"
        );
    }

    #[test]
    fn test_compiling_twice_is_stable() {
        let e = Expr::new("location", vals!["Toronto"]);
        assert_eq!(e.to_influxql().unwrap(), e.to_influxql().unwrap());
        assert_eq!(e.expr(), "location");
        assert_eq!(e.values(), vec![Value::from("Toronto")].as_slice());
    }
}
