pub mod config;
pub mod logging;

pub mod batch;
pub mod fetcher;
pub mod naming;
pub mod navigator;
pub mod resolver;
pub mod session;
pub mod storage;
pub mod transport;

#[cfg(test)]
mod testing;
