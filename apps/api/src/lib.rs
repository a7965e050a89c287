//! Offense Meter: scores text for offensiveness through an LLM-backed
//! `/analyze` service, and keeps a bounded local history of results that can
//! be replayed without asking the service again.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod history;
pub mod llm_client;
pub mod routes;
pub mod state;
pub mod view;
