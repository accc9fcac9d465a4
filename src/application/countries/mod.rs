mod cached;
mod service;
mod types;

pub use cached::CachedCountriesService;
pub use service::{CountriesService, CountryService};
pub use types::{CountryAddRequest, CountryResponse};
