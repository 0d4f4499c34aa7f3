//! Admin resources and the REST path family each one exposes.

use std::str::FromStr;

use estatedesk_core::{AppError, AppResult};

use crate::RowAction;

/// Prefix shared by every admin endpoint.
pub const ADMIN_API_PREFIX: &str = "v1/admin";

/// Resource managed by the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminResource {
    /// Real-estate listings.
    Estate,
    /// Blog posts.
    Post,
    /// Listing categories.
    Category,
    /// Contact cards attached to listings.
    Contact,
    /// Provinces enabled for the website.
    Province,
    /// Districts enabled for the website.
    District,
    /// Wards enabled for the website.
    Ward,
}

impl AdminResource {
    /// Returns the stable command-line name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Estate => "estates",
            Self::Post => "posts",
            Self::Category => "categories",
            Self::Contact => "contacts",
            Self::Province => "provinces",
            Self::District => "districts",
            Self::Ward => "wards",
        }
    }

    /// Returns all known resources.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[AdminResource] = &[
            AdminResource::Estate,
            AdminResource::Post,
            AdminResource::Category,
            AdminResource::Contact,
            AdminResource::Province,
            AdminResource::District,
            AdminResource::Ward,
        ];

        ALL
    }

    /// Returns the collection path, relative to the backend base URL.
    #[must_use]
    pub fn collection_path(&self) -> String {
        let segment = match self {
            Self::Estate => "estates",
            Self::Post => "posts",
            Self::Category => "categories",
            Self::Contact => "contacts",
            Self::Province => "locations/provinces",
            Self::District => "locations/districts",
            Self::Ward => "locations/wards",
        };

        format!("{ADMIN_API_PREFIX}/{segment}")
    }

    /// Returns the path of one row. Locations are keyed by code, the rest by id.
    #[must_use]
    pub fn item_path(&self, row_id: &str) -> String {
        format!("{}/{row_id}", self.collection_path())
    }

    /// Returns the row field holding the identifier used in item paths.
    #[must_use]
    pub fn row_key(&self) -> &'static str {
        match self {
            Self::Estate | Self::Post | Self::Category | Self::Contact => "id",
            Self::Province => "provinceCode",
            Self::District => "districtCode",
            Self::Ward => "wardCode",
        }
    }

    /// Returns the row fields tried, in order, for a display title.
    #[must_use]
    pub fn title_paths(&self) -> &'static [&'static str] {
        match self {
            Self::Estate | Self::Post => &["title"],
            Self::Category | Self::Contact => &["name"],
            Self::Province => &["province.name", "name"],
            Self::District => &["district.name", "name"],
            Self::Ward => &["ward.name", "name"],
        }
    }

    /// Returns whether rows carry a publication status.
    #[must_use]
    pub fn is_publishable(&self) -> bool {
        matches!(self, Self::Estate | Self::Post)
    }

    /// Returns whether the backend exposes `action` for this resource.
    #[must_use]
    pub fn supports(&self, action: RowAction) -> bool {
        match action {
            RowAction::Edit | RowAction::Delete => true,
            RowAction::MoveToTop | RowAction::Publish | RowAction::Unpublish => {
                self.is_publishable()
            }
        }
    }

    /// Resolves the HTTP endpoint that performs `action` on `row_id`.
    pub fn action_endpoint(&self, action: RowAction, row_id: &str) -> AppResult<ActionEndpoint> {
        if !self.supports(action) {
            return Err(AppError::Validation(format!(
                "resource '{}' does not support action '{}'",
                self.as_str(),
                action.as_str()
            )));
        }

        let item_path = self.item_path(row_id);
        match action {
            RowAction::Edit => Err(AppError::Validation(
                "edit opens the modification form and has no endpoint".to_owned(),
            )),
            RowAction::Delete => Ok(ActionEndpoint::new(ActionMethod::Delete, item_path)),
            RowAction::Publish => Ok(ActionEndpoint::new(
                ActionMethod::Post,
                format!("{item_path}/publish"),
            )),
            RowAction::Unpublish => Ok(ActionEndpoint::new(
                ActionMethod::Post,
                format!("{item_path}/un-publish"),
            )),
            RowAction::MoveToTop => Ok(ActionEndpoint::new(
                ActionMethod::Post,
                format!("{item_path}/up-top"),
            )),
        }
    }
}

impl std::fmt::Display for AdminResource {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AdminResource {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|resource| resource.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown admin resource '{value}'")))
    }
}

/// HTTP method of a row action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMethod {
    /// `POST` with an empty body.
    Post,
    /// `DELETE`.
    Delete,
}

/// Method and relative path of a row action request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEndpoint {
    /// HTTP method.
    pub method: ActionMethod,
    /// Path relative to the backend base URL.
    pub path: String,
}

impl ActionEndpoint {
    fn new(method: ActionMethod, path: String) -> Self {
        Self { method, path }
    }
}
