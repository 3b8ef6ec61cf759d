pub mod cookie_jar;
pub mod http_client_factory;
pub mod transport;

pub use http_client_factory::{http_client_factory, Session};
pub use transport::FetchError;
