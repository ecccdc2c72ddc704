//! The request–offer–contract lifecycle engine.
//!
//! Everything here is transport-agnostic: the actix handlers are thin glue
//! over these functions. Correctness under concurrent selection rests on the
//! storage layer's transaction isolation and the unique index on
//! `contracts.request_id`, not on in-process locking.

pub mod clock;
pub mod eligibility;
pub mod error;
pub mod events;
pub mod offers;
pub mod questions;
pub mod requests;
pub mod selection;

pub use error::LifecycleError;
