use std::collections::HashSet;
use std::sync::Arc;

use estatedesk_core::AppResult;
use estatedesk_domain::{ColumnFilterMeta, FilterOption, QueryParams};
use tracing::debug;

use crate::table_ports::AdminListGateway;

/// Loads the selectable values of filterable columns.
#[derive(Clone)]
pub struct FilterOptionService {
    gateway: Arc<dyn AdminListGateway>,
}

impl FilterOptionService {
    /// Creates a service from the list gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn AdminListGateway>) -> Self {
        Self { gateway }
    }

    /// Lists every record of the filter's option resource and maps it to options.
    ///
    /// Records without a value are skipped and repeated values keep their first label.
    pub async fn load_options(&self, filter: &ColumnFilterMeta) -> AppResult<Vec<FilterOption>> {
        let page = self
            .gateway
            .list_records(filter.options_resource, &QueryParams::unpaginated())
            .await?;

        let mut seen = HashSet::new();
        let options: Vec<FilterOption> = page
            .data
            .iter()
            .filter_map(|record| filter.option_from(record))
            .filter(|option| seen.insert(option.value.clone()))
            .collect();

        debug!(
            filter_by = %filter.filter_by,
            resource = %filter.options_resource,
            count = options.len(),
            "loaded filter options"
        );

        Ok(options)
    }

    /// Narrows loaded options to those whose label contains `search`, ignoring case.
    #[must_use]
    pub fn search(options: &[FilterOption], search: &str) -> Vec<FilterOption> {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return options.to_vec();
        }

        options
            .iter()
            .filter(|option| option.label.to_lowercase().contains(needle.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use tokio::sync::Mutex;

    use estatedesk_core::{AppError, AppResult};
    use estatedesk_domain::{AdminResource, ColumnFilterMeta, FilterOption, ListPage, QueryParams};

    use super::FilterOptionService;
    use crate::table_ports::AdminListGateway;

    struct FakeListGateway {
        rows: Vec<Value>,
        requests: Mutex<Vec<(AdminResource, QueryParams)>>,
    }

    #[async_trait]
    impl AdminListGateway for FakeListGateway {
        async fn list_records(
            &self,
            resource: AdminResource,
            params: &QueryParams,
        ) -> AppResult<ListPage<Value>> {
            self.requests.lock().await.push((resource, params.clone()));
            if self.rows.is_empty() {
                return Err(AppError::Internal("no rows configured".to_owned()));
            }

            Ok(ListPage {
                data: self.rows.clone(),
                meta: None,
            })
        }
    }

    fn province_filter() -> ColumnFilterMeta {
        ColumnFilterMeta::new("provinceCode", "code", AdminResource::Province)
            .map(|meta| meta.with_label_by("name").with_search_by("name"))
            .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn options_are_loaded_without_pagination_and_deduplicated() {
        let gateway = Arc::new(FakeListGateway {
            rows: vec![
                json!({"code": "01", "name": "Ha Noi"}),
                json!({"code": "79", "name": "Ho Chi Minh"}),
                json!({"code": "01", "name": "Duplicate"}),
                json!({"name": "No code"}),
            ],
            requests: Mutex::new(Vec::new()),
        });
        let service = FilterOptionService::new(gateway.clone());

        let options = service
            .load_options(&province_filter())
            .await
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            options,
            vec![
                FilterOption {
                    value: "01".to_owned(),
                    label: "Ha Noi".to_owned(),
                },
                FilterOption {
                    value: "79".to_owned(),
                    label: "Ho Chi Minh".to_owned(),
                },
            ]
        );
        let requests = gateway.requests.lock().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, AdminResource::Province);
        assert_eq!(requests[0].1.pagination(), None);
    }

    #[tokio::test]
    async fn gateway_errors_propagate() {
        let service = FilterOptionService::new(Arc::new(FakeListGateway {
            rows: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }));

        let result = service.load_options(&province_filter()).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn search_matches_labels_case_insensitively() {
        let options = vec![
            FilterOption {
                value: "01".to_owned(),
                label: "Ha Noi".to_owned(),
            },
            FilterOption {
                value: "48".to_owned(),
                label: "Da Nang".to_owned(),
            },
        ];

        let matches = FilterOptionService::search(&options, " noi ");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].value, "01");
        assert_eq!(FilterOptionService::search(&options, "").len(), 2);
    }
}
