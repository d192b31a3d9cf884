/// Settings for a `SubscriptionTracker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Name attached to the tracker's log events, usually the owning component.
    pub label: Option<String>,
    /// Number of subscriptions the tracker reserves room for up front.
    pub capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            label: None,
            capacity: 16,
        }
    }
}

impl TrackerConfig {
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub(crate) fn name(&self) -> &str {
        self.label.as_deref().unwrap_or("tracker")
    }
}
