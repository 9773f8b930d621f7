//! Top-level screens
//!
//! Exactly one screen is active at a time. Screens that show a folder or an
//! item carry it, so there is no separate "selected folder" state to keep
//! in sync.

use std::fmt;

use crate::models::{Folder, Item};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Onboarding,
    SignUp,
    Auth,
    Dashboard,
    Settings,
    /// Browsing a folder's contents
    Folder { folder: Folder },
    FolderDetail { folder: Folder },
    Viewer { folder: Folder, item: Item },
    Activity,
    Storage,
}

impl Screen {
    /// Screens that need an authenticated, biometrically verified session
    pub fn requires_verified_session(&self) -> bool {
        !matches!(self, Self::Onboarding | Self::SignUp | Self::Auth)
    }

    /// The fixed back target, if the screen has one
    pub fn back(&self) -> Option<Screen> {
        match self {
            Self::Onboarding | Self::Dashboard => None,
            Self::SignUp | Self::Auth => Some(Self::Onboarding),
            Self::Settings
            | Self::Activity
            | Self::Storage
            | Self::Folder { .. }
            | Self::FolderDetail { .. } => Some(Self::Dashboard),
            Self::Viewer { folder, .. } => Some(Self::FolderDetail {
                folder: folder.clone(),
            }),
        }
    }

    /// Folder shown by this screen, if any
    pub fn folder(&self) -> Option<&Folder> {
        match self {
            Self::Folder { folder }
            | Self::FolderDetail { folder }
            | Self::Viewer { folder, .. } => Some(folder),
            _ => None,
        }
    }

    pub fn folder_mut(&mut self) -> Option<&mut Folder> {
        match self {
            Self::Folder { folder }
            | Self::FolderDetail { folder }
            | Self::Viewer { folder, .. } => Some(folder),
            _ => None,
        }
    }

    /// True on the two screens that list a folder's items
    pub fn lists_items(&self) -> bool {
        matches!(self, Self::Folder { .. } | Self::FolderDetail { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Onboarding => "Welcome",
            Self::SignUp => "Create profile",
            Self::Auth => "Sign in",
            Self::Dashboard => "Vault",
            Self::Settings => "Settings",
            Self::Folder { .. } => "Contents",
            Self::FolderDetail { .. } => "Folder",
            Self::Viewer { .. } => "Secure viewer",
            Self::Activity => "Login activity",
            Self::Storage => "Storage",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder { folder } | Self::FolderDetail { folder } => {
                write!(f, "{} / {}", self.title(), folder.name)
            }
            Self::Viewer { item, .. } => write!(f, "{} / {}", self.title(), item.title),
            _ => f.write_str(self.title()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FolderType;

    #[test]
    fn test_back_targets_are_fixed() {
        let folder = Folder::new("Finance", FolderType::Documentos);
        assert_eq!(Screen::Settings.back(), Some(Screen::Dashboard));
        assert_eq!(
            Screen::Folder {
                folder: folder.clone()
            }
            .back(),
            Some(Screen::Dashboard)
        );
        assert_eq!(Screen::SignUp.back(), Some(Screen::Onboarding));
        assert_eq!(Screen::Dashboard.back(), None);
    }

    #[test]
    fn test_verified_session_screens() {
        assert!(!Screen::Onboarding.requires_verified_session());
        assert!(!Screen::Auth.requires_verified_session());
        assert!(Screen::Dashboard.requires_verified_session());
        assert!(Screen::Storage.requires_verified_session());
    }
}
