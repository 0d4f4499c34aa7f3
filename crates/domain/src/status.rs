use std::str::FromStr;

use estatedesk_core::AppError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a publishable listing (estate or post).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    /// Saved but never completed; nothing to publish yet.
    Draft,
    /// Completed but hidden from the public site.
    Unpublished,
    /// Live on the public site. Estate and post lists open on this tab.
    #[default]
    Published,
}

impl PublicationStatus {
    /// Returns the stable transport value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Unpublished => "unpublished",
            Self::Published => "published",
        }
    }

    /// Returns all known statuses.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PublicationStatus] = &[
            PublicationStatus::Draft,
            PublicationStatus::Unpublished,
            PublicationStatus::Published,
        ];

        ALL
    }

    /// Returns whether the listing has left the draft stage.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        !matches!(self, Self::Draft)
    }
}

impl std::fmt::Display for PublicationStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PublicationStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "draft" => Ok(Self::Draft),
            "unpublished" => Ok(Self::Unpublished),
            "published" => Ok(Self::Published),
            _ => Err(AppError::Validation(format!(
                "unknown publication status '{value}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::PublicationStatus;

    #[test]
    fn transport_values_round_trip() {
        for status in PublicationStatus::all() {
            let parsed = PublicationStatus::from_str(status.as_str());
            assert_eq!(parsed.ok(), Some(*status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(PublicationStatus::from_str("archived").is_err());
    }

    #[test]
    fn only_drafts_are_incomplete() {
        assert!(!PublicationStatus::Draft.is_completed());
        assert!(PublicationStatus::Unpublished.is_completed());
        assert!(PublicationStatus::Published.is_completed());
    }
}
