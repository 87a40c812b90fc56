//! Password change screen

use shared::{validate_password_change, ChangePasswordRequest};

use super::Feedback;
use crate::error::{ClientError, ClientResult};
use crate::external::MarketplaceApi;

pub struct PasswordChangeForm<A> {
    api: A,
    feedback: Feedback,
}

impl<A: MarketplaceApi> PasswordChangeForm<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            feedback: Feedback::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }

    /// Validate locally, then submit. A rule violation never reaches the backend.
    pub async fn submit(&mut self, current: &str, new: &str, confirm: &str) -> ClientResult<()> {
        if let Err(rule) = validate_password_change(current, new, confirm) {
            let err = ClientError::from(rule);
            self.feedback.report(&err);
            return Err(err);
        }

        let request = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: new.to_string(),
        };

        match self.api.change_password(&request).await {
            Ok(()) => {
                tracing::info!("Password changed");
                self.feedback.success("Password updated successfully");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Password change failed: {}", e);
                self.feedback.report(&e);
                Err(e)
            }
        }
    }
}
