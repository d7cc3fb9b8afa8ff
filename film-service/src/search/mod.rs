//! Search criteria and compiled predicates
//!
//! Request parameters are turned into a [`Predicate`] over a closed set of
//! [`SearchField`]s. Column names only ever come from that enum and values are
//! always bound to placeholders.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use film_service::search::search_predicate;
//!
//! let params = HashMap::from([
//!     ("query".to_string(), "1999".to_string()),
//!     ("type".to_string(), "Year".to_string()),
//! ]);
//!
//! let predicate = search_predicate(&params).unwrap();
//! assert_eq!(predicate.to_sql().0, "WHERE 1=1 AND year = ?");
//! ```

mod criteria;
mod field;
mod filter;

pub use criteria::{search_predicate, SearchCriteria, SearchType, QUERY_PARAM, TYPE_PARAM};
pub use field::SearchField;
pub use filter::{Combinator, FilterCondition, FilterOperator, FilterValue, Predicate};

use thiserror::Error;

/// Invalid search input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// An integer column was given a non-numeric value
    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber {
        /// Column the value was meant for
        field: SearchField,
        /// Raw value as received
        value: String,
    },
}
