//! Multi-step forms driven by an explicit orchestrator.
//!
//! Each step validates and saves itself; the wizard only sequences them
//! and stops at the first step that fails.

use async_trait::async_trait;
use client_core::ClientError;
use thiserror::Error;
use validator::ValidationErrors;

#[async_trait]
pub trait WizardStep: Send + Sync {
    fn name(&self) -> &str;

    fn validate(&self) -> Result<(), ValidationErrors>;

    async fn save(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Error)]
pub enum StepError {
    #[error("Step '{step}' is invalid: {source}")]
    Invalid {
        step: String,
        #[source]
        source: ValidationErrors,
    },

    #[error("Step '{step}' could not be saved: {source}")]
    Save {
        step: String,
        #[source]
        source: ClientError,
    },
}

impl StepError {
    pub fn step(&self) -> &str {
        match self {
            StepError::Invalid { step, .. } | StepError::Save { step, .. } => step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardProgress {
    /// The named step is now current.
    Next(String),
    Completed,
}

#[derive(Default)]
pub struct Wizard {
    steps: Vec<Box<dyn WizardStep>>,
    position: usize,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: impl WizardStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.steps.len()
    }

    pub fn current(&self) -> Option<&dyn WizardStep> {
        self.steps.get(self.position).map(|step| step.as_ref())
    }

    /// Validate and save the current step, then move to the next one.
    /// On failure the wizard stays on the failing step.
    pub async fn advance(&mut self) -> Result<WizardProgress, StepError> {
        let Some(step) = self.steps.get(self.position) else {
            return Ok(WizardProgress::Completed);
        };

        step.validate().map_err(|source| StepError::Invalid {
            step: step.name().to_string(),
            source,
        })?;
        step.save().await.map_err(|source| StepError::Save {
            step: step.name().to_string(),
            source,
        })?;

        tracing::debug!(step = %step.name(), "Wizard step saved");
        self.position += 1;

        Ok(match self.current() {
            Some(next) => WizardProgress::Next(next.name().to_string()),
            None => WizardProgress::Completed,
        })
    }

    pub fn back(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Run every remaining step in order.
    pub async fn run(&mut self) -> Result<(), StepError> {
        while self.advance().await? != WizardProgress::Completed {}
        Ok(())
    }
}
