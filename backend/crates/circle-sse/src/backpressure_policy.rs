/// What `publish` does when a subscriber queue cannot take another item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackpressurePolicy {
    /// A full queue marks its owner as too slow: the subscriber is removed
    /// from the registry and its queue closed.
    EvictOnFull { capacity: usize },

    /// Latest wins: one stale pending item is discarded to make room for the
    /// new one. If there is still no room the new item is dropped. Subscribers
    /// are never evicted.
    DrainAndReplace { capacity: usize },
}

impl BackpressurePolicy {
    /// Generic event fan-out.
    pub const fn evict_on_full(capacity: usize) -> Self {
        Self::EvictOnFull { capacity }
    }

    /// Live frame streaming.
    pub const fn drain_and_replace(capacity: usize) -> Self {
        Self::DrainAndReplace { capacity }
    }

    pub const fn capacity(&self) -> usize {
        match self {
            Self::EvictOnFull { capacity } | Self::DrainAndReplace { capacity } => *capacity,
        }
    }
}

impl std::fmt::Display for BackpressurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EvictOnFull { capacity } => write!(f, "evict-on-full({})", capacity),
            Self::DrainAndReplace { capacity } => write!(f, "drain-and-replace({})", capacity),
        }
    }
}
