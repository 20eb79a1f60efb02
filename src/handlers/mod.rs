mod actions;
mod auth;
mod dashboard;

pub use actions::{create_entity, delete_entity, update_entity};
pub use auth::{
    handle_login, handle_logout, handle_register, serve_access_denied, serve_login_page,
    serve_sign_up_page,
};
pub use dashboard::{serve_dashboard, serve_entity_page};
