//! Lock ownership tokens
//!
//! The token is the lock key's value. Only the instance that wrote it can
//! delete the key, since release compares against it.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Token length in characters.
pub const TOKEN_LEN: usize = 16;

/// Opaque, fixed-length random identifier for one lock instance.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LockToken(String);

impl LockToken {
    /// Draw a token from the given random source.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let token = (0..TOKEN_LEN)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect();
        Self(token)
    }

    /// Draw a token from the calling thread's RNG.
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Debug prints a 4-character prefix only.
impl fmt::Debug for LockToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LockToken({}…)", &self.0[..self.0.len().min(4)])
    }
}
