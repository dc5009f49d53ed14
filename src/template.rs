//! Statement templates.
//!
//! Builders compile their nodes into one of the flat records below and the
//! record renders the final text. Sections are joined with a single space and
//! absent optional sections leave no gap, so rendered statements never
//! contain runs of whitespace introduced by the template.

/// The sections of a statement, in order.
#[derive(Debug, Default)]
struct Sections(Vec<String>);

impl Sections {
    fn new(head: impl Into<String>) -> Self {
        Self(vec![head.into()])
    }

    fn push(&mut self, section: impl Into<String>) {
        let section = section.into();
        if !section.is_empty() {
            self.0.push(section);
        }
    }

    /// Push `<keyword> <value>` when the value is present.
    fn push_opt(&mut self, keyword: &str, value: Option<impl std::fmt::Display>) {
        if let Some(v) = value {
            self.0.push(format!("{} {}", keyword, v));
        }
    }

    /// Push `<keyword> <joined list>` when the list is not empty.
    fn push_list(&mut self, keyword: &str, items: &[String], separator: &str) {
        if !items.is_empty() {
            self.0.push(format!("{} {}", keyword, items.join(separator)));
        }
    }

    fn finish(self) -> String {
        self.0.join(" ")
    }
}

/// `<rp>.<measurement>`, or just the measurement.
fn qualified(retention_policy: Option<&str>, measurement: &str) -> String {
    match retention_policy {
        Some(rp) => format!("{}.{}", rp, measurement),
        None => measurement.to_string(),
    }
}

#[derive(Debug, Default)]
pub(crate) struct SelectTemplate {
    pub measurement: String,
    pub retention_policy: Option<String>,
    pub fields: Vec<String>,
    pub where_terms: Vec<String>,
    pub group_by: Vec<String>,
    pub order_by: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub slimit: Option<u64>,
    pub soffset: Option<u64>,
    pub fill: Option<String>,
}

impl SelectTemplate {
    pub fn render(&self) -> String {
        let mut s = Sections::new("SELECT");

        if self.fields.is_empty() {
            s.push("*");
        } else {
            s.push(self.fields.join(", "));
        }

        s.push_opt(
            "FROM",
            Some(qualified(self.retention_policy.as_deref(), &self.measurement)),
        );
        s.push_list("WHERE", &self.where_terms, " ");
        s.push_list("GROUP BY", &self.group_by, ", ");
        s.push_list("ORDER BY", &self.order_by, ", ");
        s.push_opt("LIMIT", self.limit);
        s.push_opt("OFFSET", self.offset);
        s.push_opt("SLIMIT", self.slimit);
        s.push_opt("SOFFSET", self.soffset);

        if let Some(fill) = &self.fill {
            s.push(format!("fill({})", fill));
        }

        s.finish()
    }
}

#[derive(Debug, Default)]
pub(crate) struct DeleteTemplate {
    pub measurement: String,
    pub where_terms: Vec<String>,
}

impl DeleteTemplate {
    pub fn render(&self) -> String {
        let mut s = Sections::new("DELETE FROM");
        s.push(self.measurement.as_str());
        s.push_list("WHERE", &self.where_terms, " ");
        s.finish()
    }
}

/// CREATE DATABASE, DROP DATABASE, DROP MEASUREMENT and
/// DROP RETENTION POLICY: a head, a name and an optional `ON <database>`.
#[derive(Debug, Default)]
pub(crate) struct ObjectTemplate {
    pub head: &'static str,
    pub name: String,
    pub database: Option<String>,
}

impl ObjectTemplate {
    pub fn render(&self) -> String {
        let mut s = Sections::new(self.head);
        s.push(self.name.as_str());
        s.push_opt("ON", self.database.as_deref());
        s.finish()
    }
}

#[derive(Debug, Default)]
pub(crate) struct RetentionPolicyTemplate {
    pub is_alter: bool,
    pub name: String,
    pub database: String,
    pub duration: String,
    pub replication: u32,
    pub shard_duration: Option<String>,
    pub is_default: bool,
}

impl RetentionPolicyTemplate {
    pub fn render(&self) -> String {
        let mut s = Sections::new(if self.is_alter { "ALTER" } else { "CREATE" });
        s.push_opt("RETENTION POLICY", Some(&self.name));
        s.push_opt("ON", Some(&self.database));
        s.push_opt("DURATION", Some(&self.duration));
        s.push_opt("REPLICATION", Some(self.replication));
        s.push_opt("SHARD DURATION", self.shard_duration.as_deref());
        if self.is_default {
            s.push("DEFAULT");
        }
        s.finish()
    }
}

/// Every SHOW statement: `SHOW <what> [ON <db>] [FROM [<rp>.]<measurement>]`.
#[derive(Debug, Default)]
pub(crate) struct ShowTemplate {
    pub what: &'static str,
    pub database: Option<String>,
    pub retention_policy: Option<String>,
    pub measurement: Option<String>,
}

impl ShowTemplate {
    pub fn render(&self) -> String {
        let mut s = Sections::new("SHOW");
        s.push(self.what);
        s.push_opt("ON", self.database.as_deref());
        s.push_opt(
            "FROM",
            self.measurement
                .as_deref()
                .map(|m| qualified(self.retention_policy.as_deref(), m)),
        );
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_minimal_select() {
        let t = SelectTemplate {
            measurement: r#""bar""#.into(),
            ..Default::default()
        };
        assert_eq!(t.render(), r#"SELECT * FROM "bar""#);
    }

    #[test]
    fn test_full_select() {
        let t = SelectTemplate {
            measurement: r#""cpu""#.into(),
            retention_policy: Some(r#""week""#.into()),
            fields: strings(&[r#"MEAN("value")"#, r#""host""#]),
            where_terms: strings(&[r#""region" = 'uswest'"#, "AND", "time > now() - 1h"]),
            group_by: strings(&["time(10m)", r#""host""#]),
            order_by: strings(&[r#""time" DESC"#]),
            limit: Some(10),
            offset: Some(0),
            slimit: Some(2),
            soffset: Some(1),
            fill: Some("null".into()),
        };
        assert_eq!(
            t.render(),
            r#"SELECT MEAN("value"), "host" FROM "week"."cpu" WHERE "region" = 'uswest' AND time > now() - 1h GROUP BY time(10m), "host" ORDER BY "time" DESC LIMIT 10 OFFSET 0 SLIMIT 2 SOFFSET 1 fill(null)"#
        );
    }

    #[test]
    fn test_delete() {
        let t = DeleteTemplate {
            measurement: r#""cpu""#.into(),
            where_terms: strings(&["time < '2015-08-18T00:00:00Z'"]),
        };
        assert_eq!(t.render(), r#"DELETE FROM "cpu" WHERE time < '2015-08-18T00:00:00Z'"#);
    }

    #[test]
    fn test_object() {
        let t = ObjectTemplate {
            head: "DROP RETENTION POLICY",
            name: r#""rp""#.into(),
            database: Some(r#""db""#.into()),
        };
        assert_eq!(t.render(), r#"DROP RETENTION POLICY "rp" ON "db""#);
    }

    #[test]
    fn test_retention_policy_sections() {
        let t = RetentionPolicyTemplate {
            is_alter: true,
            name: r#""name""#.into(),
            database: r#""db""#.into(),
            duration: "1h".into(),
            replication: 3,
            shard_duration: Some("1m".into()),
            is_default: true,
        };
        assert_eq!(
            t.render(),
            r#"ALTER RETENTION POLICY "name" ON "db" DURATION 1h REPLICATION 3 SHARD DURATION 1m DEFAULT"#
        );
    }

    #[test]
    fn test_show() {
        let t = ShowTemplate {
            what: "TAG KEYS",
            database: Some(r#""db""#.into()),
            retention_policy: Some(r#""week""#.into()),
            measurement: Some(r#""bar""#.into()),
        };
        assert_eq!(t.render(), r#"SHOW TAG KEYS ON "db" FROM "week"."bar""#);

        let t = ShowTemplate {
            what: "MEASUREMENTS",
            ..Default::default()
        };
        assert_eq!(t.render(), "SHOW MEASUREMENTS");
    }
}
