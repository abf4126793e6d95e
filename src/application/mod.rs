pub mod audit;
pub mod commands;
pub mod context;
pub mod dto;
pub mod error;
pub mod identity;
pub mod ports;
pub mod queries;
pub mod services;

pub use error::ApplicationResult;
