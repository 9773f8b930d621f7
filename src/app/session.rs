//! Session state
//!
//! A session is authenticated once a profile is enrolled, and verified once
//! the user passed a biometric or PIN check since the last lock.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// Credentials not loaded yet
    #[default]
    Loading,
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    pub status: AuthStatus,
    pub biometric_verified: bool,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    /// Both conditions for reaching the dashboard and deeper screens
    pub fn is_verified(&self) -> bool {
        self.is_authenticated() && self.biometric_verified
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.status = if authenticated {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        };
        if !authenticated {
            self.biometric_verified = false;
        }
    }

    pub fn verify(&mut self) {
        self.biometric_verified = true;
    }

    /// Drop verification but keep the enrolled profile
    pub fn lock(&mut self) {
        self.biometric_verified = false;
    }
}
