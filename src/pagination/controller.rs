//! Paging controller and the composed paginated collection
//!
//! The controller holds the paging state and observer list. It never owns
//! the host collection: every operation borrows the host and re-reads its
//! live length, so the host may grow or shrink between calls.

use super::types::{
    EventKind, ObserverId, PageInfo, PagingEvent, PagingState, PerPage, Target, FIRST_PAGE,
};
use crate::collection::{Collection, Record};
use crate::config::PagingOptions;
use crate::error::{Error, Result};
use crate::types::VisibleSlice;
use std::fmt;
use std::ops::Range;
use tracing::{debug, trace};

type Observer = Box<dyn Fn(&PagingEvent<'_>) + Send + Sync>;

struct Registration {
    id: ObserverId,
    /// `None` listens to every kind
    kind: Option<EventKind>,
    callback: Observer,
}

// ============================================================================
// Paging Controller
// ============================================================================

/// Page-state machine bound to one host collection
pub struct PagingController {
    state: PagingState,
    observers: Vec<Registration>,
    next_observer: u64,
}

impl fmt::Debug for PagingController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagingController")
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl PagingController {
    /// Attach a new controller to `host`
    ///
    /// State is seeded from the defaults, then the overrides in `options`.
    pub fn attach<C: Collection + ?Sized>(host: &C, options: &PagingOptions) -> Self {
        let state = merge_state(None, options, host.len());
        trace!(
            current_page = state.current_page(),
            per_page = state.per_page(),
            "paging controller attached"
        );
        Self {
            state,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Re-attach to `host`, keeping the current state beneath `options`
    ///
    /// Precedence, lowest to highest: defaults, retained state, overrides.
    /// Registered observers are kept. No notification is fired.
    pub fn reattach<C: Collection + ?Sized>(&mut self, host: &C, options: &PagingOptions) {
        self.state = merge_state(Some(self.state), options, host.len());
        trace!(
            current_page = self.state.current_page(),
            per_page = self.state.per_page(),
            "paging controller re-attached"
        );
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PagingState {
        self.state
    }

    /// Current 1-based page
    pub fn current_page(&self) -> usize {
        self.state.current_page()
    }

    /// Records per page
    pub fn per_page(&self) -> usize {
        self.state.per_page()
    }

    // ------------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------------

    /// Register an observer for every state change
    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&PagingEvent<'_>) + Send + Sync + 'static,
    {
        self.register(None, Box::new(callback))
    }

    /// Register an observer for one kind of state change
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> ObserverId
    where
        F: Fn(&PagingEvent<'_>) + Send + Sync + 'static,
    {
        self.register(Some(kind), Box::new(callback))
    }

    /// Remove an observer; returns `false` if it was not registered
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|r| r.id != id);
        self.observers.len() != before
    }

    fn register(&mut self, kind: Option<EventKind>, callback: Observer) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push(Registration { id, kind, callback });
        id
    }

    /// Deliver an event to matching observers, in registration order
    fn emit(&self, event: &PagingEvent<'_>) {
        let kind = event.kind();
        for registration in &self.observers {
            if registration.kind.map_or(true, |k| k == kind) {
                (registration.callback)(event);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// `ceil(len / per_page)`; 0 for an empty host
    pub fn max_pages<C: Collection + ?Sized>(&self, host: &C) -> usize {
        self.state.total_pages(host.len())
    }

    /// True iff the current page is past page 1
    pub fn has_previous(&self) -> bool {
        self.state.current_page() > FIRST_PAGE
    }

    /// True iff `current_page + 1 < max_pages`
    ///
    /// This reports no next page while still on the second-to-last page.
    /// Use [`PagingController::is_last_page`] for the exact answer.
    pub fn has_next<C: Collection + ?Sized>(&self, host: &C) -> bool {
        self.state.current_page() + 1 < self.max_pages(host)
    }

    /// True iff no page follows the current one
    pub fn is_last_page<C: Collection + ?Sized>(&self, host: &C) -> bool {
        self.state.current_page() >= self.max_pages(host)
    }

    /// Index window of the current page, truncated to the live length
    pub fn page_range<C: Collection + ?Sized>(&self, host: &C) -> Range<usize> {
        let len = host.len();
        let end = self.state.page_limit().min(len);
        self.state.page_start().min(end)..end
    }

    /// Serialized records of the current page, without navigating
    pub fn visible<C: Collection + ?Sized>(&self, host: &C) -> VisibleSlice {
        host.slice(self.state.page_start(), self.state.page_limit())
            .into_iter()
            .map(Record::to_json)
            .collect()
    }

    /// Summary of the current page against the live host
    pub fn page_info<C: Collection + ?Sized>(&self, host: &C) -> PageInfo {
        let range = self.page_range(host);
        PageInfo {
            current_page: self.current_page(),
            per_page: self.per_page(),
            total_pages: self.max_pages(host),
            total_records: host.len(),
            start: range.start,
            end: range.end,
            has_previous: self.has_previous(),
            has_next: self.has_next(host),
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Change the page size and re-resolve the current page under it
    ///
    /// A value that is not a positive integer is rejected with
    /// [`Error::InvalidArgument`] before anything changes. On success
    /// `state-change:currentPage` fires, then `state-change:perPage`.
    pub fn set_page_size<C, P>(&mut self, host: &C, per_page: P) -> Result<VisibleSlice>
    where
        C: Collection + ?Sized,
        P: TryInto<PerPage>,
        P::Error: Into<Error>,
    {
        let per_page: PerPage = per_page.try_into().map_err(Into::<Error>::into)?;
        self.state.per_page = per_page;
        debug!(per_page = per_page.get(), "page size changed");

        let current = Target::from(self.state.current_page());
        let slice = self.go_to(host, current);
        self.emit(&PagingEvent::PerPageChanged {
            slice: &slice,
            per_page: per_page.get(),
        });
        Ok(slice)
    }

    /// Navigate to `target` and return the visible slice
    ///
    /// Never fails: out-of-range pages clamp and unknown tokens resolve to
    /// the first page. Fires `state-change:currentPage` before returning.
    pub fn go_to<C, T>(&mut self, host: &C, target: T) -> VisibleSlice
    where
        C: Collection + ?Sized,
        T: Into<Target>,
    {
        let target = target.into();
        let page = self.resolve(host, target);
        self.state.current_page = page;

        let slice = self.visible(host);
        debug!(
            to = %target,
            current_page = page,
            per_page = self.state.per_page(),
            records = slice.len(),
            "page resolved"
        );
        self.emit(&PagingEvent::CurrentPageChanged {
            slice: &slice,
            current_page: page,
        });
        slice
    }

    /// Shorthand for `go_to(host, Target::First)`
    pub fn first_page<C: Collection + ?Sized>(&mut self, host: &C) -> VisibleSlice {
        self.go_to(host, Target::First)
    }

    /// Shorthand for `go_to(host, Target::Last)`
    pub fn last_page<C: Collection + ?Sized>(&mut self, host: &C) -> VisibleSlice {
        self.go_to(host, Target::Last)
    }

    /// Shorthand for `go_to(host, Target::Previous)`
    pub fn previous_page<C: Collection + ?Sized>(&mut self, host: &C) -> VisibleSlice {
        self.go_to(host, Target::Previous)
    }

    /// Shorthand for `go_to(host, Target::Next)`
    pub fn next_page<C: Collection + ?Sized>(&mut self, host: &C) -> VisibleSlice {
        self.go_to(host, Target::Next)
    }

    /// Page number `target` lands on, clamped into `[1, max(1, max_pages)]`
    fn resolve<C: Collection + ?Sized>(&self, host: &C, target: Target) -> usize {
        let current = self.state.current_page();
        let page = match target {
            Target::Absolute(page) if page < 1 => FIRST_PAGE,
            Target::Absolute(page) => usize::try_from(page).unwrap_or(usize::MAX),
            Target::First => FIRST_PAGE,
            Target::Last => self.max_pages(host),
            Target::Next if self.has_next(host) => current + 1,
            Target::Next => current,
            Target::Previous if self.has_previous() => current - 1,
            Target::Previous => FIRST_PAGE,
        };
        self.state.clamp_page(page, host.len())
    }
}

/// Merge defaults, retained state and overrides, clamping the page to `len`
fn merge_state(retained: Option<PagingState>, options: &PagingOptions, len: usize) -> PagingState {
    let base = retained.unwrap_or_default();
    let overrides = options.paging_state.unwrap_or_default();

    let per_page = overrides.per_page.unwrap_or(base.per_page);
    let current_page = overrides.current_page.unwrap_or(base.current_page);

    let state = PagingState::with(current_page, per_page);
    PagingState::with(state.clamp_page(state.current_page, len), per_page)
}

// ============================================================================
// Paginated Collection
// ============================================================================

/// A host collection composed with its paging controller
///
/// ```rust
/// use client_paging::pagination::{Paginated, Target};
/// use client_paging::config::PagingOptions;
/// use serde_json::json;
///
/// let records: Vec<_> = (0..25).map(|i| json!({ "id": i })).collect();
/// let mut paged = Paginated::new(records, &PagingOptions::default());
///
/// let last = paged.go_to(Target::Last);
/// assert_eq!(paged.current_page(), 3);
/// assert_eq!(last.len(), 5);
/// ```
#[derive(Debug)]
pub struct Paginated<C> {
    collection: C,
    paging: PagingController,
}

impl<C: Collection> Paginated<C> {
    /// Attach paging to `collection`
    pub fn new(collection: C, options: &PagingOptions) -> Self {
        let paging = PagingController::attach(&collection, options);
        Self { collection, paging }
    }

    /// Re-initialize paging, keeping current state beneath `options`
    pub fn initialize(&mut self, options: &PagingOptions) {
        self.paging.reattach(&self.collection, options);
    }

    /// The host collection
    pub fn collection(&self) -> &C {
        &self.collection
    }

    /// Mutable access to the host collection
    ///
    /// The current page is not adjusted until the next navigation call.
    pub fn collection_mut(&mut self) -> &mut C {
        &mut self.collection
    }

    /// The paging controller
    pub fn controller(&self) -> &PagingController {
        &self.paging
    }

    /// Split back into the collection and its controller
    pub fn into_parts(self) -> (C, PagingController) {
        (self.collection, self.paging)
    }

    /// See [`PagingController::state`]
    pub fn state(&self) -> PagingState {
        self.paging.state()
    }

    /// See [`PagingController::current_page`]
    pub fn current_page(&self) -> usize {
        self.paging.current_page()
    }

    /// See [`PagingController::per_page`]
    pub fn per_page(&self) -> usize {
        self.paging.per_page()
    }

    /// See [`PagingController::subscribe`]
    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&PagingEvent<'_>) + Send + Sync + 'static,
    {
        self.paging.subscribe(callback)
    }

    /// See [`PagingController::on`]
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> ObserverId
    where
        F: Fn(&PagingEvent<'_>) + Send + Sync + 'static,
    {
        self.paging.on(kind, callback)
    }

    /// See [`PagingController::unsubscribe`]
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.paging.unsubscribe(id)
    }

    /// See [`PagingController::max_pages`]
    pub fn max_pages(&self) -> usize {
        self.paging.max_pages(&self.collection)
    }

    /// See [`PagingController::has_previous`]
    pub fn has_previous(&self) -> bool {
        self.paging.has_previous()
    }

    /// See [`PagingController::has_next`]
    pub fn has_next(&self) -> bool {
        self.paging.has_next(&self.collection)
    }

    /// See [`PagingController::is_last_page`]
    pub fn is_last_page(&self) -> bool {
        self.paging.is_last_page(&self.collection)
    }

    /// See [`PagingController::page_range`]
    pub fn page_range(&self) -> Range<usize> {
        self.paging.page_range(&self.collection)
    }

    /// See [`PagingController::visible`]
    pub fn visible(&self) -> VisibleSlice {
        self.paging.visible(&self.collection)
    }

    /// See [`PagingController::page_info`]
    pub fn page_info(&self) -> PageInfo {
        self.paging.page_info(&self.collection)
    }

    /// See [`PagingController::set_page_size`]
    pub fn set_page_size<P>(&mut self, per_page: P) -> Result<VisibleSlice>
    where
        P: TryInto<PerPage>,
        P::Error: Into<Error>,
    {
        self.paging.set_page_size(&self.collection, per_page)
    }

    /// See [`PagingController::go_to`]
    pub fn go_to<T: Into<Target>>(&mut self, target: T) -> VisibleSlice {
        self.paging.go_to(&self.collection, target)
    }

    /// See [`PagingController::first_page`]
    pub fn first_page(&mut self) -> VisibleSlice {
        self.paging.first_page(&self.collection)
    }

    /// See [`PagingController::last_page`]
    pub fn last_page(&mut self) -> VisibleSlice {
        self.paging.last_page(&self.collection)
    }

    /// See [`PagingController::previous_page`]
    pub fn previous_page(&mut self) -> VisibleSlice {
        self.paging.previous_page(&self.collection)
    }

    /// See [`PagingController::next_page`]
    pub fn next_page(&mut self) -> VisibleSlice {
        self.paging.next_page(&self.collection)
    }
}
