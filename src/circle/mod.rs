//! Circle membership management.
//!
//! A circle is the group of people a user shares posts with. This module
//! owns the client-side state behind the membership screen: the member
//! roster and the pending invitations the viewer has received.
//!
//! Invitation failures carry typed, pre-selected user-facing copy
//! ([`InviteError`]) keyed off the backend's rejection code.
//!
//! # Types
//!
//! - [`MembershipController`]: roster and invitation state
//! - [`InviteError`]: invitation failure with display copy

mod controller;
mod error;

pub use controller::MembershipController;
pub use error::InviteError;
