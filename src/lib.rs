//! # pagekit
//!
//! A minimal, Rust-native toolkit for browsing and accumulating
//! remotely-paginated resource collections.
//!
//! ## Features
//!
//! - **Page browsing**: first/prev/next/arbitrary page navigation, search and
//!   column ordering, all funneled through one async fetch seam
//! - **Expansion**: infinite-scroll-style accumulation of successive pages into
//!   one growing, defensively-copied list
//! - **Filter contributors**: merge named query parameters from any number of
//!   serializable filter objects into the fetch request
//! - **HTTP fetcher**: a ready-made `reqwest`-based implementation of the fetch
//!   seam for JSON page endpoints
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagekit::{ExpansibleCollection, HttpFetcher, Resource, ResourceId, Result};
//!
//! #[derive(Clone, serde::Deserialize)]
//! struct User { id: u64, name: String }
//!
//! impl Resource for User {
//!     fn id(&self) -> Option<ResourceId> { Some(self.id) }
//!     fn tag(&self) -> &str { &self.name }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let fetcher = HttpFetcher::new("https://api.example.com/users")?;
//!     let mut users: ExpansibleCollection<User, _> = ExpansibleCollection::new(fetcher);
//!
//!     // Each call fetches one more page and grows the exposed list.
//!     users.expand().await?;
//!     users.expand().await?;
//!     println!("loaded {} users", users.items().len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │            ExpansibleCollection (accumulation)             │
//! │  expand()  update()  query_order_by()  query_to_first_page │
//! └────────────────────────────┬───────────────────────────────┘
//! ┌────────────────────────────┴───────────────────────────────┐
//! │              PageCollection (page browsing)                │
//! │  query_search  query_current_page  query_prev/next_page    │
//! └──────┬──────────────────────┬──────────────────────┬───────┘
//!        │                      │                      │
//!   ResourceStore           PageState            PageFetcher
//!   (item storage,       (page position,       (async fetch seam;
//!    filter params)       search, order)        HttpFetcher impl)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

/// Error types
pub mod error;

/// Identifiable resource contract and placeholder slots
pub mod resource;

/// Filter contributor contract and parameter merging
pub mod filter;

/// Generic ordered item store
pub mod store;

/// Page-by-page browsing over an abstract fetch
pub mod page;

/// Cumulative (infinite-scroll) expansion over page browsing
pub mod expand;

/// HTTP implementation of the fetch seam
pub mod http;

pub use error::{Error, Result};
pub use expand::ExpansibleCollection;
pub use filter::{merge_params, params_from, FilterParams};
pub use http::{HttpFetcher, HttpFetcherBuilder};
pub use page::{PageCollection, PageFetcher, PageRequest, PageResponse, PageState};
pub use resource::{Resource, ResourceId, Slot};
pub use store::ResourceStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
