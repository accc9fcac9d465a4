mod cached;
pub mod filter;
mod service;
pub mod sort;
mod types;

pub use cached::CachedPersonsRepo;
pub use filter::{PersonMatcher, filter_persons, person_matcher};
pub use service::PersonService;
pub use sort::sort_persons;
pub use types::{PersonAddRequest, PersonResponse, PersonUpdateRequest};
