//! Feed state management.
//!
//! The feed shows one of two post collections ("own" vs "circle") and owns
//! that list exclusively. Sibling flows that change the underlying
//! collection publish on the [`RefreshBus`]; the feed subscribes instead of
//! exposing an imperative refresh handle.
//!
//! # Types
//!
//! - [`FeedController`]: fetch, view switching, delete, like toggling
//! - [`FeedView`] / [`FeedPhase`]: selected collection and loading state
//! - [`RefreshBus`] / [`RefreshEvent`]: collection-changed notifications

mod controller;
mod refresh;
pub mod timeline;
mod types;

pub use controller::FeedController;
pub use refresh::{RefreshBus, RefreshEvent};
pub use types::{FeedPhase, FeedView};
