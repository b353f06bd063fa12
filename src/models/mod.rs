pub mod app_state;
pub mod current_user;
pub mod notification;
pub mod token_response;
pub mod user_record;

pub use app_state::AppState;
pub use current_user::CurrentUser;
pub use notification::{Notification, Severity};
pub use token_response::TokenResponse;
pub use user_record::{UserRecord, UserUpdate};
