//! Pagination and sorting parameters for list views.

/// Default page size when the request does not ask for one.
pub const DEFAULT_LIMIT: u16 = 20;
/// Largest page size a request may ask for.
pub const MAX_LIMIT: u16 = 250;

pub const PAGE_QUERY_KEY: &str = "page";
pub const LIMIT_QUERY_KEY: &str = "limit";
pub const SORT_BY_QUERY_KEY: &str = "sortBy";
pub const INCLUDE_ARCHIVED_QUERY_KEY: &str = "includeArchived";

/// Sort order on entity id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Filter applied to list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    pub page: u32,
    pub limit: u16,
    pub sort_by: SortDirection,
    pub include_archived: bool,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_by: SortDirection::Ascending,
            include_archived: false,
        }
    }
}

impl QueryFilter {
    /// Build a filter from raw query pairs.
    ///
    /// Unparsable values fall back to defaults rather than failing the request.
    pub fn from_pairs<'a, I>(pairs: I, default_limit: u16) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filter = Self {
            limit: default_limit.clamp(1, MAX_LIMIT),
            ..Self::default()
        };

        for (key, value) in pairs {
            match key {
                PAGE_QUERY_KEY => {
                    if let Ok(page) = value.parse::<u32>() {
                        filter.page = page.max(1);
                    }
                }
                LIMIT_QUERY_KEY => {
                    if let Ok(limit) = value.parse::<u16>() {
                        filter.limit = limit.clamp(1, MAX_LIMIT);
                    }
                }
                SORT_BY_QUERY_KEY => {
                    filter.sort_by = match value.to_ascii_lowercase().as_str() {
                        "desc" => SortDirection::Descending,
                        _ => SortDirection::Ascending,
                    };
                }
                INCLUDE_ARCHIVED_QUERY_KEY => {
                    filter.include_archived = matches!(value, "1" | "true" | "t");
                }
                _ => {}
            }
        }

        filter
    }

    /// Number of records to skip for the requested page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * self.limit as usize
    }
}
