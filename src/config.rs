//! Attach-time options for a paging controller
//!
//! Options can be built in code or loaded from JSON or YAML:
//!
//! ```yaml
//! pagingState:
//!   currentPage: 2
//!   perPage: 25
//! ```

use crate::error::{Error, Result};
use crate::pagination::PerPage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options recognized when attaching paging to a collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingOptions {
    /// Overrides applied on top of default and retained state
    #[serde(default, alias = "paging_state", skip_serializing_if = "Option::is_none")]
    pub paging_state: Option<StateOverride>,
}

/// Partial paging state; unset fields keep the lower-precedence value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOverride {
    /// Page to start on (values below 1 become 1)
    #[serde(default, alias = "current_page", skip_serializing_if = "Option::is_none")]
    pub current_page: Option<usize>,

    /// Records per page (zero is rejected when parsing)
    #[serde(default, alias = "per_page", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<PerPage>,
}

impl PagingOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the starting page
    #[must_use]
    pub fn with_current_page(mut self, page: usize) -> Self {
        self.state_mut().current_page = Some(page);
        self
    }

    /// Override the page size
    #[must_use]
    pub fn with_per_page(mut self, per_page: PerPage) -> Self {
        self.state_mut().per_page = Some(per_page);
        self
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    #[must_use]
    pub fn merge(self, other: &PagingOptions) -> Self {
        let base = self.paging_state.unwrap_or_default();
        let top = other.paging_state.unwrap_or_default();
        let merged = StateOverride {
            current_page: top.current_page.or(base.current_page),
            per_page: top.per_page.or(base.per_page),
        };
        Self {
            paging_state: (self.paging_state.is_some() || other.paging_state.is_some())
                .then_some(merged),
        }
    }

    fn state_mut(&mut self) -> &mut StateOverride {
        self.paging_state.get_or_insert_with(StateOverride::default)
    }

    /// Parse options from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse options from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load options from a file
    ///
    /// `.yaml` and `.yml` files are parsed as YAML, anything else as JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::file_not_found(path.display().to_string())
            } else {
                Error::config(format!(
                    "Failed to read options file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }
}
