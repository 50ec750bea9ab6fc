//! Pagination module
//!
//! Client-side paging over an in-memory host collection.
//!
//! # Overview
//!
//! A [`PagingController`] tracks the current page and page size for one host
//! collection, resolves navigation targets (page numbers or the `first`,
//! `last`, `next`, `previous` shortcuts) into a clamped page, derives the
//! visible slice of serialized records, and notifies observers synchronously.
//! [`Paginated`] composes a collection with its controller.

mod controller;
mod types;

pub use controller::{Paginated, PagingController};
pub use types::{
    EventKind, ObserverId, PageInfo, PagingEvent, PagingState, PerPage, Target,
    DEFAULT_PER_PAGE, FIRST_PAGE,
};
