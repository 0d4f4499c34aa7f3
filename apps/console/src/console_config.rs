use std::env;
use std::time::Duration;

use estatedesk_core::{AppError, AppResult, AuthTokens};
use estatedesk_domain::DEFAULT_PAGE_SIZE;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub backend_api_url: Url,
    pub access_tokens: Option<AuthTokens>,
    pub request_timeout: Duration,
    pub page_size: u32,
    pub reset_page_on_filter: bool,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let raw_url = required_env(&lookup, "BACKEND_API_URL")?;
        let backend_api_url = Url::parse(raw_url.as_str()).map_err(|error| {
            AppError::Validation(format!("invalid BACKEND_API_URL '{raw_url}': {error}"))
        })?;

        let access_tokens = optional_env(&lookup, "BACKEND_ACCESS_TOKEN")
            .map(|token| AuthTokens::new(token, None));

        let timeout_ms = parsed_env(&lookup, "BACKEND_TIMEOUT_MS")?.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(AppError::Validation(
                "BACKEND_TIMEOUT_MS must be greater than zero".to_owned(),
            ));
        }

        let page_size = parsed_env(&lookup, "TABLE_PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(AppError::Validation(
                "TABLE_PAGE_SIZE must be greater than zero".to_owned(),
            ));
        }

        let reset_page_on_filter = optional_env(&lookup, "TABLE_RESET_PAGE_ON_FILTER")
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        Ok(Self {
            backend_api_url,
            access_tokens,
            request_timeout: Duration::from_millis(timeout_ms),
            page_size,
            reset_page_on_filter,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<String> {
    optional_env(lookup, name).ok_or_else(|| AppError::Validation(format!("{name} is required")))
}

fn optional_env(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parsed_env<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> AppResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    optional_env(lookup, name)
        .map(|value| {
            value
                .parse::<T>()
                .map_err(|error| AppError::Validation(format!("invalid {name} '{value}': {error}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use estatedesk_core::AppError;

    use super::ConsoleConfig;

    fn load(values: &[(&str, &str)]) -> Result<ConsoleConfig, AppError> {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ConsoleConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_the_url_is_set() {
        let config = load(&[("BACKEND_API_URL", "https://api.example.com/")])
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(config.backend_api_url.as_str(), "https://api.example.com/");
        assert!(config.access_tokens.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 12);
        assert!(!config.reset_page_on_filter);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("BACKEND_API_URL", "http://localhost:4000/api/"),
            ("BACKEND_ACCESS_TOKEN", "secret"),
            ("BACKEND_TIMEOUT_MS", "5000"),
            ("TABLE_PAGE_SIZE", "25"),
            ("TABLE_RESET_PAGE_ON_FILTER", "TRUE"),
        ])
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            config.access_tokens.map(|tokens| tokens.bearer_header()),
            Some("Bearer secret".to_owned())
        );
        assert_eq!(config.request_timeout, Duration::from_millis(5000));
        assert_eq!(config.page_size, 25);
        assert!(config.reset_page_on_filter);
    }

    #[test]
    fn missing_or_invalid_values_are_validation_errors() {
        assert!(matches!(load(&[]), Err(AppError::Validation(_))));
        assert!(matches!(
            load(&[("BACKEND_API_URL", "not a url")]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[
                ("BACKEND_API_URL", "https://api.example.com/"),
                ("TABLE_PAGE_SIZE", "0"),
            ]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            load(&[
                ("BACKEND_API_URL", "https://api.example.com/"),
                ("BACKEND_TIMEOUT_MS", "soon"),
            ]),
            Err(AppError::Validation(_))
        ));
    }
}
