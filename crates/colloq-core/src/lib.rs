//! Core colloq library (config, logging, sessions, exchange driver).

pub mod config;
pub mod exchange;
pub mod logging;
pub mod message;
pub mod session;
