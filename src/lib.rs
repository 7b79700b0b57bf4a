pub mod config;
pub mod geolocation;
pub mod location;
pub mod server;
pub mod session;
