use std::time::Instant;

use askama::Template;

use crate::controllers::{EditDialog, UsersPage};
use crate::models::{Notification, UserRecord};
use crate::routes::NavItem;

/// Banner as rendered: the client hides it after `dismiss_ms`.
pub struct NotificationView {
    pub message: String,
    pub severity: &'static str,
    pub dismiss_ms: u128,
}

impl NotificationView {
    pub fn new(notification: &Notification, now: Instant) -> Self {
        Self {
            message: notification.message.clone(),
            severity: notification.severity.as_str(),
            dismiss_ms: notification.remaining(now).as_millis(),
        }
    }
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersPageTemplate<'a> {
    pub api_hostname: String,
    pub nav: &'static [NavItem],
    pub current_path: String,
    pub users: &'a [UserRecord],
    pub error: Option<&'a str>,
    pub editing: Option<&'a EditDialog>,
    pub pending_delete: Option<&'a UserRecord>,
    pub notification: Option<NotificationView>,
}

impl<'a> UsersPageTemplate<'a> {
    pub fn from_page(page: &'a UsersPage, api_hostname: String, nav: &'static [NavItem], current_path: String) -> Self {
        let now = Instant::now();
        Self {
            api_hostname,
            nav,
            current_path,
            users: &page.users,
            error: page.error.as_deref(),
            editing: page.editing.as_ref(),
            pending_delete: page.pending_delete.as_deref().and_then(|id| page.find(id)),
            notification: page.notification.as_ref().map(|n| NotificationView::new(n, now)),
        }
    }
}
