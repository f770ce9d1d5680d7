//! Domain logic for the Paradise edge service.
//!
//! Everything in this crate is runtime-agnostic: the calendar feed parser
//! and window selection are pure functions, and the cache and click-sink
//! traits describe seams the server crate fills in.

pub mod cache;
pub mod feed;
pub mod redirect;
