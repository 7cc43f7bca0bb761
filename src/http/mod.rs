pub mod client;
pub mod context;
pub mod method;
pub mod request;
pub mod response;
