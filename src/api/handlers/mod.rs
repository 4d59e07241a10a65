//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod urls;
pub mod users;

pub use health::{health_handler, ping_handler, root_handler};
pub use redirect::redirect_handler;
pub use urls::{
    delete_url_handler, list_all_urls_handler, list_my_urls_handler, list_user_urls_handler,
    shorten_handler,
};
pub use users::{
    forgot_password_handler, get_me_handler, get_user_handler, list_users_handler,
    lock_user_handler, login_handler, register_handler, reset_password_handler,
    unlock_user_handler, update_me_handler, update_user_handler,
};
