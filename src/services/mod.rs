mod api_client;
mod fetched;
mod login;

pub use api_client::ApiClient;
pub use fetched::Fetched;
