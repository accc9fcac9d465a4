//! Application services layer: query services, search and sort dispatch,
//! cache-aside decorators.

pub mod cache_aside;
pub mod countries;
pub mod error;
pub mod persons;
pub mod repos;
pub mod services;
