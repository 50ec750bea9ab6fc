//! # client-paging
//!
//! Client-side pagination for ordered, in-memory record collections.
//!
//! ## Features
//!
//! - **Page State Machine**: current page and page size, clamped against the
//!   live collection length on every call
//! - **Shortcut Navigation**: `first`, `last`, `next`, `previous` targets
//!   alongside absolute page numbers
//! - **Visible Slices**: serialized records of the current page window
//! - **Synchronous Notifications**: `state-change:currentPage` and
//!   `state-change:perPage` delivered before each operation returns
//!
//! ## Quick Start
//!
//! ```rust
//! use client_paging::{Paginated, PagingOptions};
//! use serde_json::json;
//!
//! let records: Vec<_> = (0..25).map(|i| json!({ "id": i })).collect();
//! let mut paged = Paginated::new(records, &PagingOptions::default());
//!
//! paged.subscribe(|event| println!("{} -> {}", event.name(), event.value()));
//!
//! let page = paged.last_page();
//! assert_eq!(paged.current_page(), 3);
//! assert_eq!(page.len(), 5);
//!
//! let page = paged.set_page_size(5)?;
//! assert_eq!(page[0]["id"], 10);
//! # Ok::<(), client_paging::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────── Paginated<C> ─────────────────────────────┐
//! │                                                                       │
//! │   collection: C  ◄──── len() / slice() ────  paging: PagingController │
//! │   (host, owns records)                       (state + observers)      │
//! │                                                        │              │
//! └────────────────────────────────────────────────────────┼──────────────┘
//!                                                          ▼
//!                                  observers: state-change:currentPage
//!                                             state-change:perPage
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Host collection traits
pub mod collection;

/// Paging state machine and paginated collections
pub mod pagination;

/// Attach-time options
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use collection::{Collection, Record, SerdeRecord};
pub use config::{PagingOptions, StateOverride};
pub use error::{Error, Result};
pub use pagination::{
    EventKind, PageInfo, Paginated, PagingController, PagingEvent, PagingState, PerPage, Target,
};
pub use types::{JsonValue, VisibleSlice};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
