//! Pool configuration.

/// Configuration for a [`BoundedPool`](crate::bounded::BoundedPool).
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of resources the pool can hold.
    ///
    /// Fixed for the pool's lifetime; there is no dynamic resizing.
    pub capacity: usize,

    /// Optional name included in log output for this pool.
    pub name: Option<String>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            name: None,
        }
    }
}

impl PoolConfig {
    /// Create a configuration with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Attach a name used in log output.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_style_configuration() {
        let config = PoolConfig::with_capacity(4).with_name("workers");
        assert_eq!(config.capacity, 4);
        assert_eq!(config.name.as_deref(), Some("workers"));
    }

    #[test]
    fn default_has_capacity() {
        assert!(PoolConfig::default().capacity > 0);
    }
}
