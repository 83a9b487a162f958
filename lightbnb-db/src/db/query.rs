//! Structured SELECT assembly with positional parameters
//!
//! A [`SelectStatement`] keeps its row-level predicates, its group-level
//! thresholds and its limit as typed values and renders them in one pass
//! into a [`sqlx::QueryBuilder`]. The builder numbers placeholders in bind
//! order, so the Nth `$N` in the text always binds the Nth entry of
//! [`SelectStatement::params`].
//!
//! Row predicates ([`Predicate`]) can only land in `WHERE`; aggregate
//! thresholds ([`AtLeast`]) can only land in `HAVING`.

use std::fmt;

use sqlx::{Postgres, QueryBuilder};

use crate::models::Limit;

/// Value bound to a positional placeholder, in the store's native type.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Int(i32),
    BigInt(i64),
    Float(f64),
}

impl Param {
    fn bind(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        match self {
            Self::Text(value) => builder.push_bind(value.clone()),
            Self::Int(value) => builder.push_bind(*value),
            Self::BigInt(value) => builder.push_bind(*value),
            Self::Float(value) => builder.push_bind(*value),
        };
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => write!(f, "{:?}", value),
            Self::Int(value) => write!(f, "{}", value),
            Self::BigInt(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Row-level predicate, evaluated before grouping.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column = value`
    Equals { column: &'static str, value: Param },
    /// `column LIKE '%needle%'`, with the needle matched literally
    Contains { column: &'static str, needle: String },
    /// `column > value`
    GreaterThan { column: &'static str, value: Param },
    /// `column < value`
    LessThan { column: &'static str, value: Param },
}

impl Predicate {
    pub fn column(&self) -> &'static str {
        match self {
            Self::Equals { column, .. }
            | Self::Contains { column, .. }
            | Self::GreaterThan { column, .. }
            | Self::LessThan { column, .. } => column,
        }
    }

    fn operator(&self) -> &'static str {
        match self {
            Self::Equals { .. } => " = ",
            Self::Contains { .. } => " LIKE ",
            Self::GreaterThan { .. } => " > ",
            Self::LessThan { .. } => " < ",
        }
    }

    /// The value bound for this predicate.
    pub fn param(&self) -> Param {
        match self {
            Self::Contains { needle, .. } => Param::Text(format!("%{}%", escape_like(needle))),
            Self::Equals { value, .. }
            | Self::GreaterThan { value, .. }
            | Self::LessThan { value, .. } => value.clone(),
        }
    }

    fn push_to(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        builder.push(self.column()).push(self.operator());
        self.param().bind(builder);
    }
}

/// Group-level threshold: `aggregate >= value`, evaluated after grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct AtLeast {
    pub aggregate: &'static str,
    pub value: Param,
}

impl AtLeast {
    pub fn new(aggregate: &'static str, value: Param) -> Self {
        Self { aggregate, value }
    }

    fn push_to(&self, builder: &mut QueryBuilder<'static, Postgres>) {
        builder.push(self.aggregate).push(" >= ");
        self.value.bind(builder);
    }
}

/// SELECT statement assembled from typed clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    select: &'static str,
    filters: Vec<Predicate>,
    group_by: Option<&'static str>,
    having: Vec<AtLeast>,
    order_by: Option<&'static str>,
    limit: Option<Limit>,
}

impl SelectStatement {
    /// Start from a `SELECT ... FROM ... [JOIN ...]` prefix.
    pub fn new(select: &'static str) -> Self {
        Self {
            select,
            filters: Vec::new(),
            group_by: None,
            having: Vec::new(),
            order_by: None,
            limit: None,
        }
    }

    /// Add a row-level predicate (ANDed with the others).
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    pub fn group_by(mut self, columns: &'static str) -> Self {
        self.group_by = Some(columns);
        self
    }

    /// Add a group-level threshold (ANDed with the others).
    pub fn having(mut self, threshold: AtLeast) -> Self {
        self.having.push(threshold);
        self
    }

    pub fn order_by(mut self, ordering: &'static str) -> Self {
        self.order_by = Some(ordering);
        self
    }

    pub fn limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Parameters in placeholder order (`$1` first).
    pub fn params(&self) -> Vec<Param> {
        self.filters
            .iter()
            .map(Predicate::param)
            .chain(self.having.iter().map(|threshold| threshold.value.clone()))
            .chain(self.limit.map(|limit| Param::BigInt(limit.get())))
            .collect()
    }

    /// Render into a query builder with every parameter bound.
    pub fn build(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(self.select);

        for (idx, predicate) in self.filters.iter().enumerate() {
            builder.push(if idx == 0 { " WHERE " } else { " AND " });
            predicate.push_to(&mut builder);
        }

        if let Some(group_by) = self.group_by {
            builder.push(" GROUP BY ").push(group_by);
        }

        for (idx, threshold) in self.having.iter().enumerate() {
            builder.push(if idx == 0 { " HAVING " } else { " AND " });
            threshold.push_to(&mut builder);
        }

        if let Some(order_by) = self.order_by {
            builder.push(" ORDER BY ").push(order_by);
        }

        if let Some(limit) = self.limit {
            builder.push(" LIMIT ");
            Param::BigInt(limit.get()).bind(&mut builder);
        }

        builder
    }

    /// Statement text with `$N` placeholders.
    pub fn sql(&self) -> String {
        self.build().sql().to_owned()
    }
}

/// Escape LIKE wildcards so user text matches literally.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use proptest::prelude::*;
    use regex::Regex;

    static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").unwrap());

    const SELECT: &str = "SELECT t.* FROM t";

    fn placeholders(sql: &str) -> Vec<usize> {
        PLACEHOLDER_RE
            .captures_iter(sql)
            .map(|cap| cap[1].parse().unwrap())
            .collect()
    }

    #[test]
    fn bare_select_has_no_clauses() {
        let stmt = SelectStatement::new(SELECT);
        assert_eq!(stmt.sql(), SELECT);
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn first_predicate_opens_where_rest_use_and() {
        let stmt = SelectStatement::new(SELECT)
            .filter(Predicate::Equals {
                column: "t.a",
                value: Param::Int(1),
            })
            .filter(Predicate::GreaterThan {
                column: "t.b",
                value: Param::Int(2),
            })
            .filter(Predicate::LessThan {
                column: "t.c",
                value: Param::Int(3),
            });

        assert_eq!(
            stmt.sql(),
            "SELECT t.* FROM t WHERE t.a = $1 AND t.b > $2 AND t.c < $3"
        );
        assert_eq!(
            stmt.params(),
            vec![Param::Int(1), Param::Int(2), Param::Int(3)]
        );
    }

    #[test]
    fn having_follows_group_by_and_numbering_continues() {
        let stmt = SelectStatement::new(SELECT)
            .filter(Predicate::GreaterThan {
                column: "t.cost",
                value: Param::Int(50),
            })
            .group_by("t.id")
            .having(AtLeast::new("avg(t.rating)", Param::Float(4.0)))
            .order_by("t.cost ASC")
            .limit(Limit::new(5).unwrap());

        assert_eq!(
            stmt.sql(),
            "SELECT t.* FROM t WHERE t.cost > $1 GROUP BY t.id \
             HAVING avg(t.rating) >= $2 ORDER BY t.cost ASC LIMIT $3"
        );
        assert_eq!(
            stmt.params(),
            vec![Param::Int(50), Param::Float(4.0), Param::BigInt(5)]
        );
    }

    #[test]
    fn contains_wraps_needle_in_wildcards() {
        let predicate = Predicate::Contains {
            column: "t.city",
            needle: "Van".to_string(),
        };
        assert_eq!(predicate.param(), Param::Text("%Van%".to_string()));
        assert_eq!(predicate.column(), "t.city");
    }

    #[test]
    fn contains_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        let predicate = Predicate::Contains {
            column: "t.city",
            needle: "a_b".to_string(),
        };
        assert_eq!(predicate.param(), Param::Text("%a\\_b%".to_string()));
    }

    #[test]
    fn values_never_appear_in_text() {
        let stmt = SelectStatement::new(SELECT).filter(Predicate::Contains {
            column: "t.city",
            needle: "'; DROP TABLE users; --".to_string(),
        });
        let sql = stmt.sql();
        assert!(!sql.contains("DROP"));
        assert_eq!(sql, "SELECT t.* FROM t WHERE t.city LIKE $1");
    }

    #[test]
    fn param_display() {
        assert_eq!(Param::Text("x".into()).to_string(), "\"x\"");
        assert_eq!(Param::Int(3).to_string(), "3");
        assert_eq!(Param::BigInt(10).to_string(), "10");
        assert_eq!(Param::Float(4.5).to_string(), "4.5");
    }

    fn arb_predicate() -> impl Strategy<Value = Predicate> {
        prop_oneof![
            any::<i32>().prop_map(|v| Predicate::Equals {
                column: "t.a",
                value: Param::Int(v)
            }),
            "[a-zA-Z%_$ ]{0,12}".prop_map(|needle| Predicate::Contains {
                column: "t.b",
                needle
            }),
            any::<i32>().prop_map(|v| Predicate::GreaterThan {
                column: "t.c",
                value: Param::Int(v)
            }),
            any::<i32>().prop_map(|v| Predicate::LessThan {
                column: "t.c",
                value: Param::Int(v)
            }),
        ]
    }

    proptest! {
        #[test]
        fn placeholders_match_params(
            filters in proptest::collection::vec(arb_predicate(), 0..6),
            thresholds in proptest::collection::vec(0.0f64..5.0, 0..3),
            limit in proptest::option::of(1i64..1000),
        ) {
            let mut stmt = SelectStatement::new(SELECT).group_by("t.id");
            for predicate in filters.iter().cloned() {
                stmt = stmt.filter(predicate);
            }
            for threshold in &thresholds {
                stmt = stmt.having(AtLeast::new("avg(t.r)", Param::Float(*threshold)));
            }
            if let Some(limit) = limit {
                stmt = stmt.limit(Limit::new(limit).unwrap());
            }

            let sql = stmt.sql();
            let params = stmt.params();
            let expected: Vec<usize> = (1..=params.len()).collect();
            prop_assert_eq!(placeholders(&sql), expected);
            prop_assert_eq!(
                params.len(),
                filters.len() + thresholds.len() + usize::from(limit.is_some())
            );

            prop_assert_eq!(sql.matches(" WHERE ").count(), usize::from(!filters.is_empty()));
            prop_assert_eq!(sql.matches(" HAVING ").count(), usize::from(!thresholds.is_empty()));
            if let Some(having) = sql.find(" HAVING ") {
                prop_assert!(sql.find(" GROUP BY ").unwrap() < having);
            }
        }
    }
}
