pub mod http_server;
pub mod scripted;
