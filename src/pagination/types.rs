//! Pagination types
//!
//! Defines the paging state, the typed inputs accepted by the controller,
//! and the notifications it publishes.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Page size used when nothing else is configured
pub const DEFAULT_PER_PAGE: usize = 10;

/// First page number; pages are 1-based
pub const FIRST_PAGE: usize = 1;

// ============================================================================
// Paging State
// ============================================================================

/// Current page and page size for one controller
///
/// `current_page` is always at least 1 and `per_page` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingState {
    pub(crate) current_page: usize,
    pub(crate) per_page: PerPage,
}

impl Default for PagingState {
    fn default() -> Self {
        Self {
            current_page: FIRST_PAGE,
            per_page: PerPage::default(),
        }
    }
}

impl PagingState {
    /// Create a new default state (page 1, 10 per page)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state for the given page and size
    pub fn with(current_page: usize, per_page: PerPage) -> Self {
        Self {
            current_page: current_page.max(FIRST_PAGE),
            per_page,
        }
    }

    /// Current 1-based page number
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Records per page
    pub fn per_page(&self) -> usize {
        self.per_page.get()
    }

    /// Number of pages needed for `total` records
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page())
    }

    /// Clamp a page number into `[1, max(1, total_pages)]`
    pub fn clamp_page(&self, page: usize, total: usize) -> usize {
        page.clamp(FIRST_PAGE, self.total_pages(total).max(FIRST_PAGE))
    }

    /// Index of the first record on the current page
    pub fn page_start(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.per_page())
    }

    /// Index one past the last record on the current page
    pub fn page_limit(&self) -> usize {
        self.page_start().saturating_add(self.per_page())
    }
}

// ============================================================================
// Page Size
// ============================================================================

/// A validated page size (integer, at least 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PerPage(NonZeroUsize);

impl PerPage {
    /// Create a page size, returning `None` for zero
    pub fn new(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Self)
    }

    /// The page size as a plain integer
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PerPage {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PER_PAGE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for PerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PerPage> for usize {
    fn from(value: PerPage) -> Self {
        value.get()
    }
}

fn per_page_error(message: impl Into<String>) -> Error {
    Error::invalid_argument("per_page", message)
}

impl TryFrom<usize> for PerPage {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value).ok_or_else(|| per_page_error("must be at least 1"))
    }
}

impl TryFrom<u32> for PerPage {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::try_from(value as usize)
    }
}

impl TryFrom<i32> for PerPage {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<i64> for PerPage {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        let value = usize::try_from(value)
            .map_err(|_| per_page_error(format!("must be at least 1, got {value}")))?;
        Self::try_from(value)
    }
}

impl TryFrom<u64> for PerPage {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        let value = usize::try_from(value)
            .map_err(|_| per_page_error(format!("{value} is out of range")))?;
        Self::try_from(value)
    }
}

impl TryFrom<f64> for PerPage {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(per_page_error(format!("must be an integer, got {value}")));
        }
        if value > u64::MAX as f64 {
            return Err(per_page_error(format!("{value} is out of range")));
        }
        if value < 0.0 {
            return Err(per_page_error(format!("must be at least 1, got {value}")));
        }
        Self::try_from(value as u64)
    }
}

impl TryFrom<&JsonValue> for PerPage {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Self::try_from(v)
                } else if let Some(v) = n.as_i64() {
                    Self::try_from(v)
                } else {
                    Self::try_from(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            other => Err(per_page_error(format!("must be a number, got {other}"))),
        }
    }
}

impl TryFrom<JsonValue> for PerPage {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        Self::try_from(&value)
    }
}

// ============================================================================
// Navigation Target
// ============================================================================

/// Where a navigation call should land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A specific page number, clamped into range
    Absolute(i64),
    /// Page 1
    First,
    /// The last page
    Last,
    /// One page forward, if `has_next()` allows it
    Next,
    /// One page back, or page 1
    Previous,
}

impl Target {
    /// Shortcut token for this target, if it has one
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Self::Absolute(_) => None,
            Self::First => Some("first"),
            Self::Last => Some("last"),
            Self::Next => Some("next"),
            Self::Previous => Some("previous"),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(page) => write!(f, "{page}"),
            other => f.write_str(other.token().unwrap_or_default()),
        }
    }
}

/// Tokens match exactly. Anything else falls back to [`Target::First`].
impl From<&str> for Target {
    fn from(token: &str) -> Self {
        match token {
            "last" => Self::Last,
            "next" => Self::Next,
            "previous" => Self::Previous,
            _ => Self::First,
        }
    }
}

impl From<i64> for Target {
    fn from(page: i64) -> Self {
        Self::Absolute(page)
    }
}

impl From<i32> for Target {
    fn from(page: i32) -> Self {
        Self::Absolute(i64::from(page))
    }
}

impl From<usize> for Target {
    fn from(page: usize) -> Self {
        Self::Absolute(i64::try_from(page).unwrap_or(i64::MAX))
    }
}

/// Rounds half away from zero; NaN is treated as an unrecognized target.
impl From<f64> for Target {
    fn from(page: f64) -> Self {
        if page.is_nan() {
            Self::First
        } else if page == f64::INFINITY {
            Self::Last
        } else if page == f64::NEG_INFINITY {
            Self::First
        } else {
            // `as` saturates at the i64 bounds
            Self::Absolute(page.round() as i64)
        }
    }
}

impl From<&JsonValue> for Target {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::Number(n) => match n.as_i64() {
                Some(page) => Self::Absolute(page),
                None => Self::from(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(token) => Self::from(token.as_str()),
            _ => Self::First,
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Kind of state change an observer can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The page size changed
    PerPage,
    /// The current page was (re)resolved
    CurrentPage,
}

impl EventKind {
    /// Event name as published to observers
    pub fn name(self) -> &'static str {
        match self {
            Self::PerPage => "state-change:perPage",
            Self::CurrentPage => "state-change:currentPage",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A state change, delivered with the visible slice it produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PagingEvent<'a> {
    /// `state-change:perPage`
    PerPageChanged {
        slice: &'a [JsonValue],
        per_page: usize,
    },
    /// `state-change:currentPage`
    CurrentPageChanged {
        slice: &'a [JsonValue],
        current_page: usize,
    },
}

impl PagingEvent<'_> {
    /// Kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PerPageChanged { .. } => EventKind::PerPage,
            Self::CurrentPageChanged { .. } => EventKind::CurrentPage,
        }
    }

    /// Event name (`state-change:perPage` or `state-change:currentPage`)
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Visible slice carried by the event
    pub fn slice(&self) -> &[JsonValue] {
        match self {
            Self::PerPageChanged { slice, .. } | Self::CurrentPageChanged { slice, .. } => slice,
        }
    }

    /// New value of the changed field
    pub fn value(&self) -> usize {
        match self {
            Self::PerPageChanged { per_page, .. } => *per_page,
            Self::CurrentPageChanged { current_page, .. } => *current_page,
        }
    }
}

/// Handle returned when registering an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

// ============================================================================
// Page Info
// ============================================================================

/// Summary of the current page against the live collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Current 1-based page
    pub current_page: usize,
    /// Records per page
    pub per_page: usize,
    /// `ceil(total_records / per_page)`, 0 for an empty collection
    pub total_pages: usize,
    /// Live collection length
    pub total_records: usize,
    /// Index of the first visible record
    pub start: usize,
    /// Index one past the last visible record
    pub end: usize,
    /// Result of `has_previous()`
    pub has_previous: bool,
    /// Result of `has_next()`
    pub has_next: bool,
}
