//! The collaborators around the scheduling engine.
//!
//! This is used for feeding processes to the [`scheduler`] crate and for
//! presenting what it computes: a process store, the submission form, an
//! HTTP router and plain text rendering.

mod form;
mod format;
mod routes;
mod store;

pub use form::{FormError, Submission};
pub use format::{format_processes, format_schedule};
pub use routes::{Service, ServiceError};
pub use store::{ProcessStore, StoreError};
