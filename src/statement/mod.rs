//! Statement builders.
//!
//! Each builder collects nodes through chained calls and compiles them into
//! a template record when `to_influxql` is called. Builders are nodes too, so
//! one can be nested wherever a literal is accepted.

mod database;
mod delete;
mod retention_policy;
mod select;
mod show;

pub use database::{CreateDatabase, DropDatabase, DropMeasurement};
pub use delete::Delete;
pub use retention_policy::{CreateRetentionPolicy, DropRetentionPolicy};
pub use select::{Fill, Select};
pub use show::{ShowDatabases, ShowFieldKeys, ShowMeasurements, ShowRetentionPolicies, ShowTagKeys};

use tracing::debug;

use crate::ast::{Keyword, ToInfluxQl, compile_all};
use crate::error::QueryResult;
use crate::expr::Expr;
use crate::value::Value;

/// WHERE terms: conditions interleaved with conjunction keywords.
#[derive(Debug, Default)]
pub(crate) struct Conditions(Vec<Box<dyn ToInfluxQl>>);

impl Conditions {
    /// Drop every existing term and start over with `expr`.
    pub fn replace(&mut self, expr: Expr) {
        self.0.clear();
        self.0.push(Box::new(expr));
    }

    /// Append `expr`, preceded by `keyword` unless it is the first term.
    pub fn join(&mut self, keyword: Keyword, expr: Expr) {
        if !self.0.is_empty() {
            self.0.push(Box::new(keyword));
        }
        self.0.push(Box::new(expr));
    }

    pub fn compile(&self) -> QueryResult<Vec<String>> {
        compile_all(&self.0)
    }
}

/// Build a condition from a string and any values convertible to [`Value`].
pub(crate) fn condition(
    expr: impl Into<String>,
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> Expr {
    Expr::new(expr, values.into_iter().map(Into::into).collect())
}

/// Log the outcome of compiling a statement and pass it through.
pub(crate) fn traced(statement: &'static str, result: QueryResult<String>) -> QueryResult<String> {
    match &result {
        Ok(query) => debug!(statement, %query, "compiled statement"),
        Err(err) => debug!(statement, error = %err, "statement rejected"),
    }
    result
}

/// Implement the WHERE/AND/OR methods for a builder with a `conditions` field.
macro_rules! impl_conditions {
    ($builder:ty) => {
        impl $builder {
            /// Replace the current conditions.
            pub fn where_(
                mut self,
                expr: impl Into<String>,
                values: impl IntoIterator<Item = impl Into<$crate::value::Value>>,
            ) -> Self {
                self.conditions
                    .replace($crate::statement::condition(expr, values));
                self
            }

            /// Add a conjunction to the list of conditions.
            pub fn and(
                mut self,
                expr: impl Into<String>,
                values: impl IntoIterator<Item = impl Into<$crate::value::Value>>,
            ) -> Self {
                self.conditions.join(
                    $crate::ast::Keyword::AND,
                    $crate::statement::condition(expr, values),
                );
                self
            }

            /// Add a disjunction to the list of conditions.
            pub fn or(
                mut self,
                expr: impl Into<String>,
                values: impl IntoIterator<Item = impl Into<$crate::value::Value>>,
            ) -> Self {
                self.conditions.join(
                    $crate::ast::Keyword::OR,
                    $crate::statement::condition(expr, values),
                );
                self
            }
        }
    };
}

pub(crate) use impl_conditions;
