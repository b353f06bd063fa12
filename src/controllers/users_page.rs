use std::time::Instant;

use crate::api::{ApiError, UsersApi, NETWORK_ERROR_MESSAGE};
use crate::models::{Notification, UserRecord, UserUpdate};
use crate::validation::{join_roles, parse_roles};

pub const PERMISSION_DENIED: &str = "You do not have permission to view users.";
pub const FETCH_FAILED: &str = "Failed to fetch users.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
pub const USER_UPDATED: &str = "User updated successfully";
pub const UPDATE_FAILED: &str = "Update failed";
pub const USER_DELETED: &str = "User deleted";
pub const DELETE_FAILED: &str = "Delete failed";

/// Draft values of the edit dialog, keyed by the user being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDialog {
    pub user_id: String,
    pub username: String,
    pub email: String,
    /// Comma separated, as typed.
    pub roles: String,
}

/// State of the user management table.
#[derive(Debug, Clone, Default)]
pub struct UsersPage {
    pub users: Vec<UserRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub editing: Option<EditDialog>,
    pub pending_delete: Option<String>,
    pub notification: Option<Notification>,
    /// The API rejected the token; the caller should end the session.
    pub session_expired: bool,
    stale: bool,
}

impl UsersPage {
    pub fn new() -> Self {
        Self {
            stale: true,
            ..Self::default()
        }
    }

    /// Whether a change was made since the list was last fetched.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Fetch the list. Failures are folded into `error` with an empty table.
    pub async fn refresh<A: UsersApi + ?Sized>(&mut self, api: &A, token: &str) {
        self.loading = true;
        self.error = None;
        match api.list_users(token).await {
            Ok(users) => self.users = users,
            Err(e) => {
                self.users.clear();
                self.error = Some(match &e {
                    ApiError::Forbidden { .. } => PERMISSION_DENIED.to_string(),
                    ApiError::Unauthorized { .. } => {
                        self.session_expired = true;
                        SESSION_EXPIRED.to_string()
                    }
                    ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
                    // The server's detail is not shown for a failed listing.
                    _ => FETCH_FAILED.to_string(),
                });
                tracing::warn!(error = %e, "Failed to load users");
            }
        }
        self.loading = false;
        self.stale = false;
    }

    pub async fn refresh_if_stale<A: UsersApi + ?Sized>(&mut self, api: &A, token: &str) {
        if self.stale {
            self.refresh(api, token).await;
        }
    }

    pub fn find(&self, id: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Open the edit dialog pre-filled from the cached record.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(user) = self.find(id) else {
            return false;
        };
        self.editing = Some(EditDialog {
            user_id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            roles: join_roles(&user.roles),
        });
        true
    }

    /// Replace the draft values of an open dialog.
    pub fn set_edit_fields(&mut self, email: &str, roles: &str) {
        if let Some(dialog) = self.editing.as_mut() {
            dialog.email = email.to_string();
            dialog.roles = roles.to_string();
        }
    }

    pub fn close_edit(&mut self) {
        self.editing = None;
    }

    /// Submit the open dialog. Returns true when the API accepted it.
    pub async fn save_edit<A: UsersApi + ?Sized>(&mut self, api: &A, token: &str) -> bool {
        let Some(dialog) = self.editing.clone() else {
            return false;
        };
        let update = UserUpdate {
            email: dialog.email.trim().to_string(),
            roles: parse_roles(&dialog.roles),
        };
        match api.update_user(token, &dialog.user_id, &update).await {
            Ok(()) => {
                tracing::info!(user_id = %dialog.user_id, roles = ?update.roles, "User updated");
                self.notification = Some(Notification::success(USER_UPDATED));
                self.editing = None;
                self.stale = true;
                true
            }
            Err(e) => {
                tracing::warn!(user_id = %dialog.user_id, error = %e, "User update failed");
                self.note_auth_failure(&e);
                self.notification = Some(Notification::error(e.user_message(UPDATE_FAILED)));
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the user awaiting confirmation. Returns true on `204`.
    pub async fn confirm_delete<A: UsersApi + ?Sized>(&mut self, api: &A, token: &str) -> bool {
        let Some(id) = self.pending_delete.take() else {
            return false;
        };
        match api.delete_user(token, &id).await {
            Ok(()) => {
                tracing::info!(user_id = %id, "User deleted");
                self.notification = Some(Notification::success(USER_DELETED));
                self.stale = true;
                true
            }
            Err(e) => {
                tracing::warn!(user_id = %id, error = %e, "User delete failed");
                self.note_auth_failure(&e);
                self.notification = Some(Notification::error(e.user_message(DELETE_FAILED)));
                false
            }
        }
    }

    /// Hide the banner once its display time has passed.
    pub fn dismiss_expired(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
        }
    }

    fn note_auth_failure(&mut self, err: &ApiError) {
        if matches!(err, ApiError::Unauthorized { .. }) {
            self.session_expired = true;
        }
    }
}
