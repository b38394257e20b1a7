//! ResearchFlow server - actor-backed REST API for academic writing
//!
//! This crate provides the backend service for ResearchFlow: the paper
//! dashboard, section drafts with version history, the source library
//! with citation formatting, and the AI writing actions.

pub mod actors;
pub mod ai;
pub mod api;
pub mod app_state;
pub mod bus;
pub mod citations;
pub mod editor;
pub mod sections;
pub mod store;
