//! Roster: person and country records with field-aware search, stable
//! sorting and a cache-aside read path.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
