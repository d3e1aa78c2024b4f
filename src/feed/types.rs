//! State types for the feed controller.

/// Which post collection the feed shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedView {
    /// The viewer's own posts.
    Mine,
    /// Posts from the viewer's circles, authored by others.
    #[default]
    Circle,
}

impl FeedView {
    /// Converts to a short label for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::Circle => "circle",
        }
    }
}

/// Loading phase of the feed.
///
/// Re-enters `Loading` on explicit refresh or view change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedPhase {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Ready,
    /// The last fetch failed; the previous post list is kept as-is.
    Errored(String),
}

impl FeedPhase {
    /// Returns whether a fetch is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_circle() {
        assert_eq!(FeedView::default(), FeedView::Circle);
    }

    #[test]
    fn view_labels() {
        assert_eq!(FeedView::Mine.as_str(), "mine");
        assert_eq!(FeedView::Circle.as_str(), "circle");
    }

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(FeedPhase::default(), FeedPhase::Idle);
    }

    #[test]
    fn loading_detection() {
        assert!(FeedPhase::Loading.is_loading());
        assert!(!FeedPhase::Ready.is_loading());
        assert!(!FeedPhase::Errored("x".to_string()).is_loading());
    }
}
