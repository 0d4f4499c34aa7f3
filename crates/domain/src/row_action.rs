//! Row actions and the status-keyed lookup that decides which of them a row offers.

use std::str::FromStr;

use estatedesk_core::AppError;
use serde::{Deserialize, Serialize};

use crate::{AdminResource, PublicationStatus};

/// User-triggered mutation scoped to one list row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowAction {
    /// Bumps a live listing to the top of public lists.
    MoveToTop,
    /// Opens the modification form; handled by the owner, not over HTTP.
    Edit,
    /// Makes an unpublished listing live.
    Publish,
    /// Hides a live listing.
    Unpublish,
    /// Removes the listing.
    Delete,
}

impl RowAction {
    /// Returns the stable identifier used for menu keys and transport.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoveToTop => "moveToTop",
            Self::Edit => "edit",
            Self::Publish => "publish",
            Self::Unpublish => "unPublish",
            Self::Delete => "delete",
        }
    }

    /// Returns the i18n key of the menu label.
    #[must_use]
    pub fn label_key(&self) -> &'static str {
        match self {
            Self::MoveToTop => "table.action.moveToTop",
            Self::Edit => "table.action.edit",
            Self::Publish => "table.action.publish",
            Self::Unpublish => "table.action.unPublish",
            Self::Delete => "table.action.delete",
        }
    }

    /// Returns the icon name rendered next to the label.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self {
            Self::MoveToTop => "upload",
            Self::Edit => "edit",
            Self::Publish => "eye",
            Self::Unpublish => "eye-off",
            Self::Delete => "trash",
        }
    }

    /// Returns the visual tone of the menu entry.
    #[must_use]
    pub fn tone(&self) -> RowActionTone {
        match self {
            Self::Delete => RowActionTone::Danger,
            _ => RowActionTone::Normal,
        }
    }

    /// Returns the i18n keys of the success and failure toasts.
    #[must_use]
    pub fn notification_keys(&self) -> (&'static str, &'static str) {
        match self {
            Self::MoveToTop => ("notification.movedToTop", "notification.moveToTopFailed"),
            Self::Edit => ("notification.edited", "notification.editFailed"),
            Self::Publish => ("notification.published", "notification.publishFailed"),
            Self::Unpublish => ("notification.unPublished", "notification.unPublishFailed"),
            Self::Delete => ("notification.deleted", "notification.deleteFailed"),
        }
    }

    /// Returns whether the action must be confirmed in a modal before it runs.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Self::Publish | Self::Unpublish | Self::Delete)
    }

    /// Returns whether the action is a backend mutation rather than navigation.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Edit)
    }
}

impl std::fmt::Display for RowAction {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for RowAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "moveToTop" | "move-to-top" => Ok(Self::MoveToTop),
            "edit" => Ok(Self::Edit),
            "publish" => Ok(Self::Publish),
            "unPublish" | "unpublish" => Ok(Self::Unpublish),
            "delete" => Ok(Self::Delete),
            _ => Err(AppError::Validation(format!("unknown row action '{value}'"))),
        }
    }
}

/// Visual tone of a dropdown entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowActionTone {
    /// Default styling.
    Normal,
    /// Destructive styling.
    Danger,
}

/// One entry in a row's action dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMenuEntry {
    /// Clickable action.
    Action(RowAction),
    /// Visual separator.
    Divider,
}

impl RowMenuEntry {
    /// Returns the stable menu key of the entry.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Action(action) => action.as_str(),
            Self::Divider => "divider",
        }
    }
}

const DRAFT_ACTIONS: &[RowAction] = &[RowAction::Delete, RowAction::Edit];
const UNPUBLISHED_ACTIONS: &[RowAction] = &[RowAction::Edit, RowAction::Delete];
const PUBLISHED_ACTIONS: &[RowAction] =
    &[RowAction::MoveToTop, RowAction::Edit, RowAction::Unpublish];

/// Returns the actions a row in `status` offers, in dropdown order.
#[must_use]
pub fn permitted_actions(status: PublicationStatus) -> &'static [RowAction] {
    match status {
        PublicationStatus::Draft => DRAFT_ACTIONS,
        PublicationStatus::Unpublished => UNPUBLISHED_ACTIONS,
        PublicationStatus::Published => PUBLISHED_ACTIONS,
    }
}

/// Actions of rows without a publication status (categories, contacts, locations).
const STATUSLESS_ACTIONS: &[RowAction] = &[RowAction::Edit, RowAction::Delete];

/// Returns the actions a row in `status` reaches only through a confirmation modal.
///
/// A live listing can still be deleted; the entry follows its dropdown table and
/// goes through the completed-delete confirmation.
#[must_use]
pub fn confirmed_actions(status: PublicationStatus) -> &'static [RowAction] {
    match status {
        PublicationStatus::Published => &[RowAction::Delete],
        PublicationStatus::Draft | PublicationStatus::Unpublished => &[],
    }
}

/// Returns whether `action` may be triggered on a row in `status`.
///
/// Publishing an unpublished row is offered through its primary button, so it is
/// allowed here even though it is not a dropdown entry.
#[must_use]
pub fn is_action_permitted(status: PublicationStatus, action: RowAction) -> bool {
    permitted_actions(status).contains(&action)
        || confirmed_actions(status).contains(&action)
        || primary_action(status) == action
}

/// Returns the action bound to the full-width button beside the dropdown.
#[must_use]
pub fn primary_action(status: PublicationStatus) -> RowAction {
    match status {
        PublicationStatus::Draft => RowAction::Edit,
        PublicationStatus::Unpublished => RowAction::Publish,
        PublicationStatus::Published => RowAction::Unpublish,
    }
}

/// Builds the dropdown for a row in `status`, with a divider before `delete`.
#[must_use]
pub fn row_menu(status: PublicationStatus) -> Vec<RowMenuEntry> {
    menu_entries(
        permitted_actions(status)
            .iter()
            .chain(confirmed_actions(status)),
    )
}

/// Builds the dropdown for any row: status rows use the status table, the rest
/// get edit and delete.
#[must_use]
pub fn row_menu_for(
    resource: AdminResource,
    status: Option<PublicationStatus>,
) -> Vec<RowMenuEntry> {
    match status.filter(|_| resource.is_publishable()) {
        Some(status) => row_menu(status),
        None => menu_entries(STATUSLESS_ACTIONS.iter()),
    }
}

/// Returns the full-width button action of a row; statusless rows have none.
#[must_use]
pub fn primary_action_for(
    resource: AdminResource,
    status: Option<PublicationStatus>,
) -> Option<RowAction> {
    status
        .filter(|_| resource.is_publishable())
        .map(primary_action)
}

fn menu_entries<'a>(actions: impl Iterator<Item = &'a RowAction>) -> Vec<RowMenuEntry> {
    let mut entries = Vec::new();

    for (index, action) in actions.enumerate() {
        if *action == RowAction::Delete && index > 0 {
            entries.push(RowMenuEntry::Divider);
        }
        entries.push(RowMenuEntry::Action(*action));
    }

    entries
}

/// Confirmation flow a delete request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    /// Lightweight confirmation for discarding a draft.
    Draft,
    /// Heavier confirmation for removing a completed listing.
    Completed,
}

impl DeleteConfirmation {
    /// Picks the confirmation flow for a row in `status`.
    #[must_use]
    pub fn for_status(status: PublicationStatus) -> Self {
        if status.is_completed() {
            Self::Completed
        } else {
            Self::Draft
        }
    }

    /// Returns the i18n key of the modal title.
    #[must_use]
    pub fn title_key(&self) -> &'static str {
        match self {
            Self::Draft => "deletion.title.draft",
            Self::Completed => "deletion.title.completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use proptest::prelude::*;

    use super::{
        DeleteConfirmation, RowAction, RowActionTone, RowMenuEntry, confirmed_actions,
        is_action_permitted, permitted_actions, primary_action, primary_action_for, row_menu,
        row_menu_for,
    };
    use crate::{AdminResource, PublicationStatus};

    #[test]
    fn action_table_matches_each_status() {
        assert_eq!(
            permitted_actions(PublicationStatus::Draft),
            &[RowAction::Delete, RowAction::Edit]
        );
        assert_eq!(
            permitted_actions(PublicationStatus::Unpublished),
            &[RowAction::Edit, RowAction::Delete]
        );
        assert_eq!(
            permitted_actions(PublicationStatus::Published),
            &[RowAction::MoveToTop, RowAction::Edit, RowAction::Unpublish]
        );
    }

    #[test]
    fn published_rows_never_offer_publish() {
        assert!(!is_action_permitted(
            PublicationStatus::Published,
            RowAction::Publish
        ));
        assert!(!row_menu(PublicationStatus::Published)
            .contains(&RowMenuEntry::Action(RowAction::Publish)));
    }

    #[test]
    fn drafts_cannot_be_published_or_moved() {
        for action in [RowAction::Publish, RowAction::Unpublish, RowAction::MoveToTop] {
            assert!(!is_action_permitted(PublicationStatus::Draft, action));
        }
    }

    #[test]
    fn menu_places_divider_before_delete() {
        assert_eq!(
            row_menu(PublicationStatus::Unpublished),
            vec![
                RowMenuEntry::Action(RowAction::Edit),
                RowMenuEntry::Divider,
                RowMenuEntry::Action(RowAction::Delete),
            ]
        );
        assert_eq!(
            row_menu(PublicationStatus::Draft),
            vec![
                RowMenuEntry::Action(RowAction::Delete),
                RowMenuEntry::Action(RowAction::Edit),
            ]
        );
    }

    #[test]
    fn published_rows_end_with_confirmed_delete() {
        assert!(is_action_permitted(
            PublicationStatus::Published,
            RowAction::Delete
        ));
        assert_eq!(
            row_menu(PublicationStatus::Published),
            vec![
                RowMenuEntry::Action(RowAction::MoveToTop),
                RowMenuEntry::Action(RowAction::Edit),
                RowMenuEntry::Action(RowAction::Unpublish),
                RowMenuEntry::Divider,
                RowMenuEntry::Action(RowAction::Delete),
            ]
        );
        assert!(confirmed_actions(PublicationStatus::Draft).is_empty());
        assert!(confirmed_actions(PublicationStatus::Unpublished).is_empty());
    }

    #[test]
    fn statusless_rows_offer_edit_and_delete() {
        for resource in [
            AdminResource::Category,
            AdminResource::Contact,
            AdminResource::Province,
            AdminResource::District,
            AdminResource::Ward,
        ] {
            assert_eq!(
                row_menu_for(resource, None),
                vec![
                    RowMenuEntry::Action(RowAction::Edit),
                    RowMenuEntry::Divider,
                    RowMenuEntry::Action(RowAction::Delete),
                ]
            );
            assert_eq!(primary_action_for(resource, None), None);
        }

        assert_eq!(
            row_menu_for(AdminResource::Category, Some(PublicationStatus::Published)),
            row_menu_for(AdminResource::Category, None)
        );
        assert_eq!(
            row_menu_for(AdminResource::Estate, Some(PublicationStatus::Draft)),
            row_menu(PublicationStatus::Draft)
        );
        assert_eq!(
            primary_action_for(AdminResource::Post, Some(PublicationStatus::Unpublished)),
            Some(RowAction::Publish)
        );
    }

    #[test]
    fn primary_button_follows_status() {
        assert_eq!(primary_action(PublicationStatus::Draft), RowAction::Edit);
        assert_eq!(
            primary_action(PublicationStatus::Unpublished),
            RowAction::Publish
        );
        assert_eq!(
            primary_action(PublicationStatus::Published),
            RowAction::Unpublish
        );
    }

    #[test]
    fn delete_confirmation_distinguishes_drafts() {
        assert_eq!(
            DeleteConfirmation::for_status(PublicationStatus::Draft),
            DeleteConfirmation::Draft
        );
        assert_eq!(
            DeleteConfirmation::for_status(PublicationStatus::Published),
            DeleteConfirmation::Completed
        );
    }

    #[test]
    fn only_delete_is_dangerous() {
        assert_eq!(RowAction::Delete.tone(), RowActionTone::Danger);
        assert_eq!(RowAction::Edit.tone(), RowActionTone::Normal);
    }

    #[test]
    fn action_identifiers_parse_back() {
        assert_eq!(RowAction::from_str("move-to-top").ok(), Some(RowAction::MoveToTop));
        assert_eq!(RowAction::from_str("unPublish").ok(), Some(RowAction::Unpublish));
        assert!(RowAction::from_str("archive").is_err());
    }

    fn any_status() -> impl Strategy<Value = PublicationStatus> {
        prop_oneof![
            Just(PublicationStatus::Draft),
            Just(PublicationStatus::Unpublished),
            Just(PublicationStatus::Published),
        ]
    }

    proptest! {
        #[test]
        fn menu_actions_are_always_permitted(status in any_status()) {
            for entry in row_menu(status) {
                if let RowMenuEntry::Action(action) = entry {
                    prop_assert!(is_action_permitted(status, action));
                }
            }
        }

        #[test]
        fn confirmed_actions_stay_out_of_the_dropdown_table(status in any_status()) {
            for action in confirmed_actions(status) {
                prop_assert!(!permitted_actions(status).contains(action));
                prop_assert!(action.requires_confirmation());
            }
        }

        #[test]
        fn no_status_offers_its_own_transition_twice(status in any_status()) {
            let actions = permitted_actions(status);
            prop_assert!(!(actions.contains(&RowAction::Publish) && actions.contains(&RowAction::Unpublish)));
            if status == PublicationStatus::Published {
                prop_assert!(!actions.contains(&RowAction::Publish));
            }
            if status != PublicationStatus::Published {
                prop_assert!(!actions.contains(&RowAction::Unpublish));
                prop_assert!(!actions.contains(&RowAction::MoveToTop));
            }
        }
    }
}
