//! Compiled search predicates
//!
//! A [`Predicate`] is a list of [`FilterCondition`]s joined by one
//! [`Combinator`]. It renders to a `WHERE` clause with `?` placeholders and an
//! ordered list of values to bind; values never appear in the SQL text.
//!
//! # Example
//!
//! ```rust
//! use film_service::search::{FilterCondition, FilterValue, Predicate, SearchField};
//!
//! let predicate = Predicate::all_of(vec![
//!     FilterCondition::contains(SearchField::Title, "Matrix"),
//!     FilterCondition::eq(SearchField::Year, 1999),
//! ]);
//!
//! let (sql, values) = predicate.to_sql();
//! assert_eq!(sql, "WHERE 1=1 AND title LIKE ? AND year = ?");
//! assert_eq!(values, vec![&FilterValue::from("%Matrix%"), &FilterValue::Integer(1999)]);
//! ```

use std::fmt;

use super::SearchField;

/// Comparison used by a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to (=)
    Equal,
    /// Pattern matching (LIKE)
    Like,
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::Like => write!(f, "LIKE"),
        }
    }
}

/// A value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// String value
    String(String),
    /// 64-bit integer value
    Integer(i64),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

/// One column comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    /// Column being compared
    pub field: SearchField,
    /// Comparison operator
    pub operator: FilterOperator,
    /// Value bound to the placeholder
    pub value: FilterValue,
}

impl FilterCondition {
    /// Exact match
    pub fn eq(field: SearchField, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            operator: FilterOperator::Equal,
            value: value.into(),
        }
    }

    /// Substring match; the value is wrapped in `%` wildcards
    pub fn contains(field: SearchField, value: &str) -> Self {
        Self {
            field,
            operator: FilterOperator::Like,
            value: FilterValue::String(format!("%{value}%")),
        }
    }

    /// SQL fragment with a single `?` placeholder
    ///
    /// Integer columns are cast to text for `LIKE`.
    pub fn to_sql(&self) -> String {
        match (self.operator, self.field.is_numeric()) {
            (FilterOperator::Like, true) => {
                format!("CAST({} AS TEXT) {} ?", self.field.column(), self.operator)
            }
            _ => format!("{} {} ?", self.field.column(), self.operator),
        }
    }
}

/// How conditions are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Combinator {
    /// Every condition must hold
    #[default]
    And,
    /// At least one condition must hold
    Or,
}

/// A compiled `WHERE` clause
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Predicate {
    /// Join used between conditions
    pub combinator: Combinator,
    /// Conditions in bind order
    pub conditions: Vec<FilterCondition>,
}

impl Predicate {
    /// Matches every film
    pub fn everything() -> Self {
        Self::default()
    }

    /// Conditions joined with `AND`
    pub fn all_of(conditions: Vec<FilterCondition>) -> Self {
        Self {
            combinator: Combinator::And,
            conditions,
        }
    }

    /// Conditions joined with `OR`
    pub fn any_of(conditions: Vec<FilterCondition>) -> Self {
        Self {
            combinator: Combinator::Or,
            conditions,
        }
    }

    /// Whether the predicate places no restriction
    pub fn is_unrestricted(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Values to bind, in placeholder order
    pub fn values(&self) -> Vec<&FilterValue> {
        self.conditions.iter().map(|c| &c.value).collect()
    }

    /// Render the `WHERE` clause and its bind values
    ///
    /// `AND` predicates always start with `WHERE 1=1` so an empty predicate
    /// still yields valid SQL. An empty `OR` predicate renders as nothing.
    pub fn to_sql(&self) -> (String, Vec<&FilterValue>) {
        let fragments: Vec<String> = self.conditions.iter().map(FilterCondition::to_sql).collect();

        let sql = match self.combinator {
            Combinator::And => std::iter::once("WHERE 1=1".to_string())
                .chain(fragments.into_iter().map(|f| format!("AND {f}")))
                .collect::<Vec<_>>()
                .join(" "),
            Combinator::Or if fragments.is_empty() => String::new(),
            Combinator::Or => format!("WHERE {}", fragments.join(" OR ")),
        };

        (sql, self.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_sql() {
        assert_eq!(FilterCondition::eq(SearchField::Id, 3).to_sql(), "id = ?");
        assert_eq!(
            FilterCondition::contains(SearchField::Stars, "Reeves").to_sql(),
            "stars LIKE ?"
        );
        assert_eq!(
            FilterCondition::contains(SearchField::Year, "99").to_sql(),
            "CAST(year AS TEXT) LIKE ?"
        );
    }

    #[test]
    fn test_contains_wraps_value() {
        let condition = FilterCondition::contains(SearchField::Title, "Dune");
        assert_eq!(condition.value, FilterValue::from("%Dune%"));
    }

    #[test]
    fn test_everything() {
        let predicate = Predicate::everything();
        assert!(predicate.is_unrestricted());
        let (sql, values) = predicate.to_sql();
        assert_eq!(sql, "WHERE 1=1");
        assert!(values.is_empty());
    }

    #[test]
    fn test_or_predicate() {
        let predicate = Predicate::any_of(vec![
            FilterCondition::contains(SearchField::Title, "x"),
            FilterCondition::contains(SearchField::Director, "x"),
        ]);
        let (sql, values) = predicate.to_sql();
        assert_eq!(sql, "WHERE title LIKE ? OR director LIKE ?");
        assert_eq!(values.len(), 2);

        assert_eq!(Predicate::any_of(Vec::new()).to_sql().0, "");
    }
}
