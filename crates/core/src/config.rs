use crate::cache::{CacheError, Result};

/// Connection settings for the remote cache store.
///
/// Built once at startup and handed to whichever store needs it. Fields are
/// read-only after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    host: String,
    port: String,
    password: String,
    default_expiry_seconds: i64,
}

impl ConnectionConfig {
    /// Creates a configuration without a password or default expiry.
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            password: String::new(),
            default_expiry_seconds: 0,
        }
    }

    /// Sets the password. An empty password disables authentication.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Sets the default expiry callers may use when they have no TTL of their own.
    pub fn with_default_expiry_seconds(mut self, seconds: i64) -> Self {
        self.default_expiry_seconds = seconds;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    /// Returns the password, or `None` when authentication is disabled.
    pub fn password(&self) -> Option<&str> {
        (!self.password.is_empty()).then_some(self.password.as_str())
    }

    pub fn default_expiry_seconds(&self) -> i64 {
        self.default_expiry_seconds
    }

    /// Returns the `host:port` address of the store.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the port as a TCP port number.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the port is not a valid `u16`.
    pub fn port_number(&self) -> Result<u16> {
        self.port.trim().parse().map_err(|_| {
            CacheError::ConnectionFailed(format!("invalid port {:?}", self.port))
        })
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new("localhost", "6379")
    }
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &self.password().map(|_| "<redacted>"))
            .field("default_expiry_seconds", &self.default_expiry_seconds)
            .finish()
    }
}
