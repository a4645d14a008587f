//! Service Layer
//!
//! Runs the domain's probe offsets against the shared store.

pub mod membership_filter;

pub use membership_filter::MembershipFilter;
