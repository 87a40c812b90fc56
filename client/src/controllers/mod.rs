//! Screen controllers
//!
//! Each controller owns the state of one screen. Side effects the UI has to act
//! on (alerts, redirects) are queued in [`Feedback`] and drained by the view.

pub mod chat;
pub mod dashboard;
pub mod password;
pub mod profile_form;

pub use chat::ChatSimulator;
pub use dashboard::{DashboardController, DashboardSlice};
pub use password::PasswordChangeForm;
pub use profile_form::{
    CheckoutOutcome, FormMode, ProfileDraft, ProfileFormController, SaveOutcome, UploadOutcome,
};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Where the UI should go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Login,
    /// Leave the app for a hosted payment page
    ExternalCheckout(String),
    /// Public page of a business profile
    BusinessPage(String),
}

/// Queued notices and the pending navigation of a screen
#[derive(Debug, Default)]
pub struct Feedback {
    notices: Vec<Notice>,
    navigation: Option<Navigation>,
}

impl Feedback {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        self.navigation = Some(navigation);
    }

    /// Report a failed action; 401 additionally sends the user to sign in
    pub fn report(&mut self, err: &ClientError) {
        if err.is_unauthorized() {
            self.navigate(Navigation::Login);
        }
        let level = match err.kind() {
            crate::error::ErrorKind::Validation => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        self.push(level, err.user_message());
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.navigation.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_unauthorized_redirects() {
        let mut feedback = Feedback::default();
        feedback.report(&ClientError::Unauthorized);
        assert_eq!(feedback.navigation(), Some(&Navigation::Login));
        assert_eq!(feedback.notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_report_validation_is_warning() {
        let mut feedback = Feedback::default();
        feedback.report(&ClientError::ProfileRequired);
        assert!(feedback.navigation().is_none());
        let notices = feedback.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert!(feedback.notices().is_empty());
    }
}
