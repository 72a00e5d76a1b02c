use crate::session::AppContext;
use crate::wizard::WizardStep;
use async_trait::async_trait;
use client_core::ClientError;
use serde::Deserialize;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(min = 1, max = 64, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 64, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

/// Personal-details step of the onboarding wizard.
pub struct ProfileStep {
    form: ProfileForm,
    context: Arc<AppContext>,
}

impl ProfileStep {
    pub fn new(form: ProfileForm, context: Arc<AppContext>) -> Self {
        Self { form, context }
    }
}

#[async_trait]
impl WizardStep for ProfileStep {
    fn name(&self) -> &str {
        "profile"
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        self.form.validate()
    }

    async fn save(&self) -> Result<(), ClientError> {
        let form = self.form.clone();
        self.context
            .update_profile(move |profile| {
                profile.first_name = Some(form.first_name.trim().to_string());
                profile.last_name = Some(form.last_name.trim().to_string());
                if form.email.is_some() {
                    profile.email = form.email;
                }
            })
            .await?;
        Ok(())
    }
}
