use crate::api::ApiClient;
use crate::services::NoticeStore;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub notices: NoticeStore,
    pub api_hostname: String,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        let api_hostname = crate::utils::hostname_from_url(api.base_url());
        Self {
            api,
            notices: NoticeStore::new(),
            api_hostname,
            custom_css: None,
        }
    }
}
