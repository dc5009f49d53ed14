//! Fragment nodes.
//!
//! Every piece of a statement, from a bare keyword to a whole SELECT, is a
//! node that compiles to text or fails. Statement builders hold their parts
//! as nodes and only compile them when the statement itself is compiled.

use std::fmt;
use std::time::Duration;

use crate::error::QueryResult;
use crate::functions;

/// Trait for nodes that compile to InfluxQL text.
pub trait ToInfluxQl: fmt::Debug + Send {
    /// Compile this node to InfluxQL.
    fn to_influxql(&self) -> QueryResult<String>;
}

impl<T: ToInfluxQl + ?Sized> ToInfluxQl for Box<T> {
    fn to_influxql(&self) -> QueryResult<String> {
        (**self).to_influxql()
    }
}

/// A fixed keyword such as a conjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword(&'static str);

impl Keyword {
    pub const AND: Keyword = Keyword("AND");
    pub const OR: Keyword = Keyword("OR");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl ToInfluxQl for Keyword {
    fn to_influxql(&self) -> QueryResult<String> {
        Ok(self.as_str().to_string())
    }
}

/// A name, identifier or nested construct.
///
/// Plain names are double-quoted unless they already look qualified or
/// quoted: anything containing `"` or `.` passes through untouched, as does
/// the `*` wildcard. A name that really contains a dot therefore has to be
/// quoted by the caller.
#[derive(Debug)]
pub enum Literal {
    /// An identifier such as a measurement, field or tag name.
    Name(String),
    /// A time window, rendered as `time(<duration>)`.
    Duration(Duration),
    /// A nested node (function call, sub-statement), rendered as is.
    Node(Box<dyn ToInfluxQl>),
    /// Text emitted exactly as given, such as a numeric function parameter.
    Raw(String),
    /// Any other kind, double-quoted.
    Other(String),
}

impl Literal {
    /// Wrap any node.
    pub fn node(node: impl ToInfluxQl + 'static) -> Self {
        Literal::Node(Box::new(node))
    }

    /// Emit `text` without quoting.
    pub fn raw(text: impl Into<String>) -> Self {
        Literal::Raw(text.into())
    }
}

impl ToInfluxQl for Literal {
    fn to_influxql(&self) -> QueryResult<String> {
        match self {
            Literal::Node(node) => node.to_influxql(),
            Literal::Duration(d) => functions::time(*d).to_influxql(),
            Literal::Name(s) if s.contains(['"', '.']) || s == "*" => Ok(s.clone()),
            Literal::Name(s) => Ok(quote_identifier(s)),
            Literal::Raw(s) => Ok(s.clone()),
            Literal::Other(s) => Ok(format!("\"{}\"", s)),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Name(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Name(s)
    }
}

impl From<&String> for Literal {
    fn from(s: &String) -> Self {
        Literal::Name(s.clone())
    }
}

impl From<Duration> for Literal {
    fn from(d: Duration) -> Self {
        Literal::Duration(d)
    }
}

macro_rules! impl_literal_from_display {
    ($($t:ty),*) => {
        $(impl From<$t> for Literal {
            fn from(v: $t) -> Self {
                Literal::Other(v.to_string())
            }
        })*
    };
}

impl_literal_from_display!(i32, i64, u32, u64, usize, f64);

/// Implement `From<node> for Literal` so nodes can be passed wherever a name
/// is accepted.
macro_rules! impl_literal_from_node {
    ($($t:ty),* $(,)?) => {
        $(impl From<$t> for $crate::ast::Literal {
            fn from(node: $t) -> Self {
                $crate::ast::Literal::Node(Box::new(node))
            }
        })*
    };
}

pub(crate) use impl_literal_from_node;

impl_literal_from_node!(Order);

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// An ORDER BY term: a name and a direction.
#[derive(Debug)]
pub struct Order {
    pub field: Literal,
    pub direction: Direction,
}

impl ToInfluxQl for Order {
    fn to_influxql(&self) -> QueryResult<String> {
        let field = self.field.to_influxql()?;
        Ok(format!("{} {}", field, self.direction))
    }
}

/// Quote an identifier with double quotes, escaping `\` and `"`.
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('"');
    for c in name.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Compile every node in order. The first failure is returned and nothing
/// compiled so far is kept.
pub fn compile_all<N: ToInfluxQl>(nodes: &[N]) -> QueryResult<Vec<String>> {
    nodes.iter().map(ToInfluxQl::to_influxql).collect()
}

/// Compile an optional node.
pub fn compile_opt<N: ToInfluxQl>(node: Option<&N>) -> QueryResult<Option<String>> {
    node.map(ToInfluxQl::to_influxql).transpose()
}
