// Shared world state and listener fan-out
pub mod state;

// HTTP API
pub mod api;

// Configuration loading
pub mod config;
