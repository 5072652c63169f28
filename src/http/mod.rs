pub mod acknowledgment;
pub mod server;
pub mod server_environment;
pub mod signature;
