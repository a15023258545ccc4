//! Data models for the Raide API.
//!
//! This module contains the types callers use to describe an operation
//! (ticket references, requesters, search filters, new tickets) and the
//! response envelope every successful HTTP exchange is wrapped in.

mod envelope;
mod requester;
mod search;
mod ticket;

pub use envelope::*;
pub use requester::*;
pub use search::*;
pub use ticket::*;
