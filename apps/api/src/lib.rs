//! ATS matching service: scores a structured resume against a structured job
//! description and serves the engine, LLM extraction and match history over HTTP.

pub mod config;
pub mod db;
pub mod errors;
pub mod extraction;
pub mod history;
pub mod jd_library;
pub mod llm_client;
pub mod matching;
pub mod models;
pub mod routes;
pub mod state;
