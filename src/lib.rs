pub mod cli;
pub mod db;
pub mod error;
pub mod events;
pub mod models;
pub mod output;
pub mod query;
pub mod service;
