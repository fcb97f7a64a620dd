//! levelmark-core — CEFR placement engine, scoring, and session state.
//!
//! This crate defines the fundamental data model, question selection,
//! scoring logic, and application state that the rest of levelmark builds on.

pub mod error;
pub mod events;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod recommend;
pub mod report;
pub mod score;
pub mod select;
pub mod session;
pub mod state;
