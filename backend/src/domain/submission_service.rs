//! Lead submission: validate, timestamp, store, confirm.

use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::commands::leads::{LeadForm, SubmitLeadCommand, SubmitLeadResult};
use crate::domain::intake_flow::{IntakeError, IntakeFlow, SimulatedLatency};
use crate::domain::validation::{FieldErrors, LeadValidator};
use crate::storage::SubmissionStorage;

#[derive(Debug, Error)]
pub enum SubmitLeadError {
    #[error("Lead rejected: {0}")]
    Validation(#[from] FieldErrors),
    #[error("Failed to store lead: {0}")]
    Storage(#[source] anyhow::Error),
    #[error(transparent)]
    Intake(#[from] IntakeError),
}

#[derive(Clone)]
pub struct SubmissionService {
    storage: Arc<dyn SubmissionStorage>,
    validator: LeadValidator,
    latency: SimulatedLatency,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn SubmissionStorage>, latency: SimulatedLatency) -> Self {
        Self {
            storage,
            validator: LeadValidator::new(),
            latency,
        }
    }

    pub fn with_validator(mut self, validator: LeadValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Timestamp assigned to a lead accepted right now
    fn acceptance_time() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }

    /// Check a form without storing anything
    pub fn validate(&self, form: &LeadForm) -> Result<(), FieldErrors> {
        self.validator.validate(form, Self::acceptance_time()).map(|_| ())
    }

    /// Validate and store a lead, then move the intake flow to its confirmation.
    ///
    /// Nothing is stored when validation fails. A storage failure is returned
    /// as-is; no retry is attempted.
    pub async fn submit_lead(
        &self,
        command: SubmitLeadCommand,
    ) -> Result<SubmitLeadResult, SubmitLeadError> {
        let kind = command.form.kind();
        let mut flow = IntakeFlow::new(self.latency);
        flow.select(kind)?;

        let lead = match self.validator.validate(&command.form, Self::acceptance_time()) {
            Ok(lead) => lead,
            Err(errors) => {
                info!("Rejected {} lead: {:?}", kind, errors.fields().collect::<Vec<_>>());
                return Err(errors.into());
            }
        };

        if let Err(e) = self.storage.append(&lead).await {
            warn!("❌ Failed to store {} lead: {:#}", kind, e);
            return Err(SubmitLeadError::Storage(e));
        }

        let confirmation = flow.submit().await?;
        info!("✅ Accepted {} lead from {}", kind, lead.summary().display_name);

        Ok(SubmitLeadResult { lead, confirmation })
    }
}
