//! SASL PLAIN credentials for `connection.start-ok`.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Result;
use crate::field::LongString;

/// Default user and password of a stock broker.
pub const DEFAULT_USER: &str = "guest";
pub const DEFAULT_PASSWORD: &str = "guest";

/// User name and password for PLAIN authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login {
    user: String,
    password: String,
}

impl Login {
    /// SASL mechanism name sent in `connection.start-ok`.
    pub const MECHANISM: &'static str = "PLAIN";

    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Encode as `\0 user \0 password`.
    pub fn sasl_plain(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(2 + self.user.len() + self.password.len());
        buf.put_u8(0);
        buf.put_slice(self.user.as_bytes());
        buf.put_u8(0);
        buf.put_slice(self.password.as_bytes());
        buf.freeze()
    }

    /// SASL response as the long string `connection.start-ok` carries.
    pub fn response(&self) -> Result<LongString> {
        LongString::new(self.sasl_plain())
    }
}

impl Default for Login {
    fn default() -> Self {
        Self::new(DEFAULT_USER, DEFAULT_PASSWORD)
    }
}
