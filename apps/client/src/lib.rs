pub mod access;
pub mod api_client;
pub mod cli;
pub mod config;
pub mod errors;
pub mod filter;
pub mod matching;
pub mod models;
pub mod session;
pub mod state;
pub mod stats;
pub mod views;
