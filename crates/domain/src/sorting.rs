use estatedesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Sort instruction for one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnSort {
    column_id: NonEmptyString,
    descending: bool,
}

impl ColumnSort {
    /// Creates a validated sort instruction.
    pub fn new(column_id: impl Into<String>, descending: bool) -> AppResult<Self> {
        Ok(Self {
            column_id: NonEmptyString::new(column_id)?,
            descending,
        })
    }

    /// Parses `column` or `column:asc|desc`.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.split_once(':') {
            None => Self::new(value.trim(), false),
            Some((column_id, "asc")) => Self::new(column_id.trim(), false),
            Some((column_id, "desc")) => Self::new(column_id.trim(), true),
            Some((_, direction)) => Err(AppError::Validation(format!(
                "unknown sort direction '{direction}'"
            ))),
        }
    }

    /// Returns the sorted column.
    #[must_use]
    pub fn column_id(&self) -> &str {
        self.column_id.as_str()
    }

    /// Returns whether the column sorts in descending order.
    #[must_use]
    pub fn descending(&self) -> bool {
        self.descending
    }

    /// Returns the transport direction value.
    #[must_use]
    pub fn direction(&self) -> &'static str {
        if self.descending { "desc" } else { "asc" }
    }
}

/// Ordered sort instructions. Replaced wholesale on every header click.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortingState(Vec<ColumnSort>);

impl SortingState {
    /// Creates a sorting state from ordered instructions.
    #[must_use]
    pub fn new(sorts: Vec<ColumnSort>) -> Self {
        Self(sorts)
    }

    /// Returns the ordered instructions.
    #[must_use]
    pub fn sorts(&self) -> &[ColumnSort] {
        self.0.as_slice()
    }

    /// Returns the highest-priority instruction.
    #[must_use]
    pub fn primary(&self) -> Option<&ColumnSort> {
        self.0.first()
    }

    /// Returns whether nothing is sorted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cycles a header through ascending, descending and unsorted.
    pub fn toggled(&self, column_id: &str) -> AppResult<Self> {
        let next = match self.primary() {
            Some(sort) if sort.column_id() == column_id && !sort.descending() => {
                vec![ColumnSort::new(column_id, true)?]
            }
            Some(sort) if sort.column_id() == column_id => Vec::new(),
            _ => vec![ColumnSort::new(column_id, false)?],
        };

        Ok(Self(next))
    }
}
