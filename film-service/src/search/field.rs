//! Searchable film columns

use std::fmt;

/// A film column that may appear in a search predicate
///
/// This enum is the whitelist: it is the only source of column names that
/// reach SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// `id`, matched exactly
    Id,
    /// `title`, matched by substring
    Title,
    /// `director`, matched by substring
    Director,
    /// `year`, matched exactly
    Year,
    /// `stars`, matched by substring
    Stars,
}

impl SearchField {
    /// Every searchable field, in the order criteria are compiled
    pub const ALL: [SearchField; 5] = [
        SearchField::Id,
        SearchField::Title,
        SearchField::Director,
        SearchField::Year,
        SearchField::Stars,
    ];

    /// Column name, also the request parameter name
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Director => "director",
            Self::Year => "year",
            Self::Stars => "stars",
        }
    }

    /// Whether the column holds integers and is matched exactly
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Id | Self::Year)
    }

    /// Look up a field by request parameter name
    pub fn from_param(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == name)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
