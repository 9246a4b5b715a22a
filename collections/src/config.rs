pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Construction-time settings for a [`BlockList`](crate::BlockList).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Number of node slots reserved up front. Must be non-zero.
    pub initial_capacity: usize,
}

impl ListConfig {
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
