use askama::Template;

use crate::models::CurrentUser;
use crate::routes::NavItem;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub api_hostname: String,
    pub nav: &'static [NavItem],
    pub current_path: String,
    pub current_user: Option<CurrentUser>,
}

#[derive(Template)]
#[template(path = "coming_soon.html")]
pub struct ComingSoonTemplate {
    pub api_hostname: String,
    pub nav: &'static [NavItem],
    pub current_path: String,
    pub feature_name: String,
}
