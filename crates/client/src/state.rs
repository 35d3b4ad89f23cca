//! Client state and its transitions.
//!
//! `CatalogState` is an immutable record: every change goes through
//! [`CatalogState::update`], which returns the next state and at most one
//! [`Command`] for the driver to execute.

use crate::api::ApiError;
use crate::model::{PageMeta, ProductPage, ProductResource};

pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not authorized to delete this product.";
pub const NETWORK_FAILURE_MESSAGE: &str = "Could not reach the catalog service. Please try again.";

/// One-shot feedback shown above the list after a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    pub items: Vec<ProductResource>,
    pub pagination: Option<PageMeta>,
    pub current_page: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<Notice>,
    /// Tag of the most recent fetch; results carrying an older tag are stale.
    pub generation: u64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            current_page: 1,
            loading: true,
            error: None,
            notice: None,
            generation: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Initial mount: fetch the current page.
    Mount,
    ChangePage(u64),
    FetchSucceeded { generation: u64, page: ProductPage },
    FetchFailed { generation: u64, message: String },
    Deleted { id: u64, message: String },
    DeleteFailed { message: String },
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fetch { page: u64, generation: u64 },
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_page(&self) -> Option<u64> {
        self.pagination.as_ref().map(|meta| meta.last_page)
    }

    pub fn find(&self, id: u64) -> Option<&ProductResource> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether `target` is a page this state would move to.
    pub fn accepts_page(&self, target: u64) -> bool {
        match self.last_page() {
            Some(last_page) => target >= 1 && target <= last_page && target != self.current_page,
            None => false,
        }
    }

    pub fn update(self, msg: Msg) -> (Self, Option<Command>) {
        match msg {
            Msg::Mount => {
                let page = self.current_page;
                self.begin_fetch(page)
            }
            Msg::ChangePage(target) => {
                if !self.accepts_page(target) {
                    tracing::debug!(target, current = self.current_page, "page change ignored");
                    return (self, None);
                }
                self.begin_fetch(target)
            }
            Msg::FetchSucceeded { generation, page } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "dropping stale page");
                    return (self, None);
                }
                let next = Self {
                    items: page.data,
                    pagination: Some(page.meta),
                    loading: false,
                    error: None,
                    ..self
                };
                (next, None)
            }
            Msg::FetchFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    return (self, None);
                }
                let next = Self {
                    loading: false,
                    error: Some(message),
                    ..self
                };
                (next, None)
            }
            Msg::Deleted { id, message } => {
                let items = self.items.into_iter().filter(|item| item.id != id).collect();
                let next = Self {
                    items,
                    notice: Some(Notice::Success(message)),
                    ..self
                };
                (next, None)
            }
            Msg::DeleteFailed { message } => {
                let next = Self {
                    notice: Some(Notice::Failure(message)),
                    ..self
                };
                (next, None)
            }
        }
    }

    fn begin_fetch(self, page: u64) -> (Self, Option<Command>) {
        let generation = self.generation + 1;
        let next = Self {
            current_page: page,
            loading: true,
            error: None,
            notice: None,
            generation,
            ..self
        };
        (next, Some(Command::Fetch { page, generation }))
    }
}

/// User-facing text for a failed delete.
pub fn delete_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 403, .. } => NOT_AUTHORIZED_MESSAGE.to_string(),
        ApiError::Status { status, message } => format!("Error {status}: {message}"),
        ApiError::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
        other => format!("Failed to delete the product: {other}"),
    }
}

/// User-facing text for a failed page fetch.
pub fn fetch_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
        other => other.to_string(),
    }
}
