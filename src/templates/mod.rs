// Page templates, rendered with askama from the root `templates/` directory
pub mod auth_templates;
pub mod dashboard_template;
pub mod users_page_template;

pub use auth_templates::{LoginTemplate, RegisterTemplate, ResetConfirmTemplate, ResetPasswordTemplate};
pub use dashboard_template::{ComingSoonTemplate, DashboardTemplate};
pub use users_page_template::{NotificationView, UsersPageTemplate};
