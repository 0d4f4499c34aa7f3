//! Column filter state and the reducer that flattens it into query fields.

use estatedesk_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Active filter of one column: the query key it targets and the selected values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFilterState {
    filter_by: NonEmptyString,
    values: Vec<String>,
}

impl ColumnFilterState {
    /// Creates a filter; duplicate values collapse to their first occurrence.
    pub fn new<I, S>(filter_by: impl Into<String>, values: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }

        Ok(Self {
            filter_by: NonEmptyString::new(filter_by)?,
            values: unique,
        })
    }

    /// Parses `key=v1,v2`; `key=` yields a filter with no values.
    pub fn parse(value: &str) -> AppResult<Self> {
        let (filter_by, values) = value.split_once('=').ok_or_else(|| {
            AppError::Validation(format!("column filter '{value}' must look like key=v1,v2"))
        })?;

        Self::new(
            filter_by.trim(),
            values
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty()),
        )
    }

    /// Returns the query key this filter targets.
    #[must_use]
    pub fn filter_by(&self) -> &str {
        self.filter_by.as_str()
    }

    /// Returns the selected values.
    #[must_use]
    pub fn values(&self) -> &[String] {
        self.values.as_slice()
    }

    /// Returns whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Flattened filters keyed by query field, in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColumnFilterMap(Vec<(String, Vec<String>)>);

impl ColumnFilterMap {
    /// Returns the values selected for `filter_by`.
    #[must_use]
    pub fn get(&self, filter_by: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(key, _)| key == filter_by)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns whether `filter_by` is constrained.
    #[must_use]
    pub fn contains_key(&self, filter_by: &str) -> bool {
        self.get(filter_by).is_some()
    }

    /// Returns the constrained keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates key/value pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Returns the number of constrained keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no key is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Flattens per-column filters into one mapping.
///
/// A repeated `filter_by` keeps the slot of its first occurrence and the values of
/// its last. Keys whose final value set is empty are dropped so the backend is
/// never sent an empty constraint.
#[must_use]
pub fn reduce_column_filters(filters: &[ColumnFilterState]) -> ColumnFilterMap {
    let mut entries: Vec<(String, Vec<String>)> = Vec::with_capacity(filters.len());

    for filter in filters {
        match entries
            .iter_mut()
            .find(|(key, _)| key.as_str() == filter.filter_by())
        {
            Some((_, values)) => *values = filter.values().to_vec(),
            None => entries.push((filter.filter_by().to_owned(), filter.values().to_vec())),
        }
    }

    entries.retain(|(_, values)| !values.is_empty());
    ColumnFilterMap(entries)
}

#[cfg(test)]
mod tests {
    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::{ColumnFilterState, reduce_column_filters};

    fn filter(key: &str, values: &[&str]) -> ColumnFilterState {
        ColumnFilterState::new(key, values.iter().copied()).unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn reducer_keys_values_by_filter_by() {
        let reduced = reduce_column_filters(&[
            filter("provinceCode", &["HN", "HCM"]),
            filter("districtCode", &["001"]),
        ]);

        assert_eq!(reduced.keys().collect::<Vec<_>>(), vec!["provinceCode", "districtCode"]);
        assert_eq!(
            reduced.get("provinceCode"),
            Some(&["HN".to_owned(), "HCM".to_owned()][..])
        );
    }

    #[test]
    fn cleared_filter_drops_its_key() {
        let reduced = reduce_column_filters(&[filter("provinceCode", &[])]);
        assert!(!reduced.contains_key("provinceCode"));
        assert!(reduced.is_empty());
    }

    #[test]
    fn repeated_key_keeps_first_slot_and_last_values() {
        let reduced = reduce_column_filters(&[
            filter("provinceCode", &["HN"]),
            filter("wardCode", &["27"]),
            filter("provinceCode", &["HCM"]),
        ]);

        assert_eq!(reduced.keys().collect::<Vec<_>>(), vec!["provinceCode", "wardCode"]);
        assert_eq!(reduced.get("provinceCode"), Some(&["HCM".to_owned()][..]));
    }

    #[test]
    fn values_behave_as_a_set() {
        let state = filter("provinceCode", &["HN", "HCM", "HN"]);
        assert_eq!(state.values(), &["HN".to_owned(), "HCM".to_owned()]);
    }

    #[test]
    fn parse_reads_key_and_comma_separated_values() {
        let state = ColumnFilterState::parse("provinceCode=HN, HCM").unwrap_or_else(|_| unreachable!());
        assert_eq!(state.filter_by(), "provinceCode");
        assert_eq!(state.values(), &["HN".to_owned(), "HCM".to_owned()]);
        assert!(ColumnFilterState::parse("provinceCode").is_err());
        assert!(ColumnFilterState::parse("provinceCode=").is_ok_and(|state| state.is_empty()));
    }

    fn any_filter() -> impl Strategy<Value = ColumnFilterState> {
        (
            prop_oneof![Just("provinceCode"), Just("districtCode"), Just("wardCode"), Just("categoryId")],
            vec(prop_oneof![Just("a"), Just("b"), Just("c")], 0..3),
        )
            .prop_map(|(key, values)| filter(key, &values))
    }

    proptest! {
        #[test]
        fn one_key_per_distinct_non_empty_filter(filters in vec(any_filter(), 0..8)) {
            let reduced = reduce_column_filters(&filters);

            let mut expected_order: Vec<&str> = Vec::new();
            for state in &filters {
                if !expected_order.contains(&state.filter_by()) {
                    expected_order.push(state.filter_by());
                }
            }
            let last_values = |key: &str| {
                filters
                    .iter()
                    .rev()
                    .find(|state| state.filter_by() == key)
                    .map(ColumnFilterState::values)
                    .unwrap_or_default()
            };
            expected_order.retain(|key| !last_values(key).is_empty());

            prop_assert_eq!(reduced.keys().collect::<Vec<_>>(), expected_order.clone());
            for key in expected_order {
                prop_assert_eq!(reduced.get(key), Some(last_values(key)));
            }
        }

        #[test]
        fn reducer_is_deterministic(filters in vec(any_filter(), 0..8)) {
            prop_assert_eq!(reduce_column_filters(&filters), reduce_column_filters(&filters));
        }
    }
}
