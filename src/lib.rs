pub mod arguments;
pub mod command;
pub mod config;
pub mod errors;
pub mod gas;
pub mod logger;
pub mod poller;
pub mod rpc;
