//! Request parameters to predicates
//!
//! Two retrieval modes exist. Criteria search takes any of the whitelisted
//! parameters (`id`, `title`, `director`, `year`, `stars`) and ANDs them.
//! Free-text search takes one `query` and an optional `type` naming the
//! field to match against.

use std::collections::HashMap;

use super::{FilterCondition, Predicate, SearchError, SearchField};

/// Name of the free-text query parameter
pub const QUERY_PARAM: &str = "query";
/// Name of the free-text field selector parameter
pub const TYPE_PARAM: &str = "type";

fn parse_number(field: SearchField, value: &str) -> Result<i64, SearchError> {
    value.trim().parse().map_err(|_| SearchError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Whitelisted, trimmed, non-blank search parameters
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use film_service::search::{SearchCriteria, SearchField};
///
/// let params = HashMap::from([
///     ("title".to_string(), "  Matrix ".to_string()),
///     ("foo".to_string(), "bar".to_string()),
/// ]);
///
/// let criteria = SearchCriteria::from_params(&params);
/// assert_eq!(criteria.entries(), &[(SearchField::Title, "Matrix".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    entries: Vec<(SearchField, String)>,
}

impl SearchCriteria {
    /// Collect whitelisted parameters, skipping blank values
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let entries = SearchField::ALL
            .into_iter()
            .filter_map(|field| {
                let value = params.get(field.column())?.trim();
                (!value.is_empty()).then(|| (field, value.to_string()))
            })
            .collect();

        Self { entries }
    }

    /// Field/value pairs in compile order
    pub fn entries(&self) -> &[(SearchField, String)] {
        &self.entries
    }

    /// Whether no parameter was given
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build an `AND` predicate
    ///
    /// `id` and `year` must be integers and match exactly; the rest match
    /// by substring.
    pub fn compile(&self) -> Result<Predicate, SearchError> {
        let conditions = self
            .entries
            .iter()
            .map(|(field, value)| -> Result<FilterCondition, SearchError> {
                if field.is_numeric() {
                    Ok(FilterCondition::eq(*field, parse_number(*field, value)?))
                } else {
                    Ok(FilterCondition::contains(*field, value))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Predicate::all_of(conditions))
    }
}

/// Field selector for free-text search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Substring match across every searchable field
    All,
    /// Exact id
    Id,
    /// Title substring
    Title,
    /// Director substring
    Director,
    /// Exact year
    Year,
    /// Cast substring
    Stars,
}

impl SearchType {
    /// Case-sensitive lookup of a `type` parameter value
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "All" => Some(Self::All),
            "ID" => Some(Self::Id),
            "Title" => Some(Self::Title),
            "Director" => Some(Self::Director),
            "Year" => Some(Self::Year),
            "Stars" => Some(Self::Stars),
            _ => None,
        }
    }

    /// Predicate matching `query` for this selector
    pub fn predicate(&self, query: &str) -> Result<Predicate, SearchError> {
        let single = |field: SearchField| -> Result<Predicate, SearchError> {
            let condition = if field.is_numeric() {
                FilterCondition::eq(field, parse_number(field, query)?)
            } else {
                FilterCondition::contains(field, query)
            };
            Ok(Predicate::all_of(vec![condition]))
        };

        match self {
            Self::All => Ok(Predicate::any_of(
                [
                    SearchField::Id,
                    SearchField::Title,
                    SearchField::Director,
                    SearchField::Stars,
                    SearchField::Year,
                ]
                .into_iter()
                .map(|field| FilterCondition::contains(field, query))
                .collect(),
            )),
            Self::Id => single(SearchField::Id),
            Self::Title => single(SearchField::Title),
            Self::Director => single(SearchField::Director),
            Self::Year => single(SearchField::Year),
            Self::Stars => single(SearchField::Stars),
        }
    }
}

/// Predicate for the `/search` endpoint
///
/// With a non-empty `query`, a non-empty `type` selects the field and no
/// `type` means [`SearchType::All`]; an unrecognized `type` matches
/// everything. Without a `query` the whitelisted criteria parameters apply.
pub fn search_predicate(params: &HashMap<String, String>) -> Result<Predicate, SearchError> {
    let non_empty = |name: &str| params.get(name).map(String::as_str).filter(|v| !v.is_empty());

    let Some(query) = non_empty(QUERY_PARAM) else {
        return SearchCriteria::from_params(params).compile();
    };

    match non_empty(TYPE_PARAM) {
        None => SearchType::All.predicate(query),
        Some(kind) => match SearchType::parse(kind) {
            Some(search_type) => search_type.predicate(query),
            None => {
                tracing::debug!(kind, "unrecognized search type, matching everything");
                Ok(Predicate::everything())
            }
        },
    }
}
