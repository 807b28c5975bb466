//! # Country Data Core
//!
//! Everything between the restcountries API and a rendered screen:
//!
//! ```text
//! fetch_all() ──▶ Vec<RawCountry> ──▶ filter(query) ──▶ CountryRow list
//!                                                            │ select
//!                                                            ▼
//! fetch_by_name(name) ──▶ RawCountry ──▶ normalize() ──▶ NormalizedCountry
//! ```
//!
//! ## Modules
//!
//! - [`types`]: wire-shaped and normalized record types
//! - [`repository`]: the HTTP client and its error taxonomy
//! - [`normalize`]: total defaulting of sparse records
//! - [`filter`]: pure in-memory search

pub mod filter;
pub mod normalize;
pub mod repository;
pub mod types;

pub use filter::filter;
pub use normalize::normalize;
pub use repository::{CountrySource, RepositoryError, RestCountriesClient};
pub use types::{CommonName, CountryRow, NormalizedCountry, RawCountry};
