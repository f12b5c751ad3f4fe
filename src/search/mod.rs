// src/search/mod.rs
//! The jobs search pipeline: filter state, query serialization,
//! client-side sorting, pagination and the debounced session.

pub mod filters;
pub mod pagination;
pub mod query;
pub mod session;
pub mod sort;

pub use filters::{FilterEdit, FilterState, SetField, TextField};
pub use pagination::{PaginationState, PAGE_SIZE};
pub use query::{Endpoint, JobsQuery};
pub use session::{FetchRequested, ResultsState, SearchSession, Transition};
pub use sort::{sorted, SortKey};
