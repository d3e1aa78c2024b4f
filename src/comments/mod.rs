//! Comment panel state management.
//!
//! One panel exists per selected post; fetching is gated on visibility so a
//! collapsed panel never hits the network. Mutations patch the local list
//! optimistically from the server's response (append on create, filter on
//! delete) with no further reconciliation.

mod controller;

pub use controller::CommentPanel;
