//! Client configuration.

use std::time::Duration;

/// Tunables for the worker client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline covering both the TCP connect and the coordinator's
    /// handshake ack. A connect that misses it counts as failed.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_connect_timeout_is_five_seconds() {
        assert_eq!(ClientConfig::default().connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn builder_overrides_timeout() {
        let config = ClientConfig::new().with_connect_timeout(Duration::from_millis(250));
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
    }
}
