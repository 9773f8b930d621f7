//! Zeroized secrets
//!
//! PINs typed at a prompt and the credential store passphrase live in a
//! [`SecureString`], which wipes its buffer when dropped and never prints
//! its contents.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secret() {
        let pin = SecureString::new("4821");
        assert_eq!(pin.as_str(), "4821");
        assert_eq!(format!("{:?}", pin), "SecureString(***)");
        assert!(SecureString::default().is_empty());
    }
}
