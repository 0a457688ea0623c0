//! Intake flow state machine.
//!
//! ```text
//! Landing --select(kind)--> Form(kind) --submit--> Confirmation(kind)
//!    ^                          |                          |
//!    +----------back------------+                          |
//!    +----------------------restart------------------------+
//! ```
//!
//! Exactly one form is active at a time. Moving from a form to the
//! confirmation goes through a named simulated-latency step, kept apart from
//! the actual store write so it can be tuned or switched off.

use shared::LeadKind;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeState {
    Landing,
    Form(LeadKind),
    Confirmation(LeadKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Cannot {action} from {state:?}")]
    InvalidTransition {
        state: IntakeState,
        action: &'static str,
    },
}

/// Fixed pause standing in for network latency before the confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulatedLatency(Duration);

impl SimulatedLatency {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub async fn wait(&self) {
        if !self.0.is_zero() {
            debug!("Simulating {:?} of latency", self.0);
            tokio::time::sleep(self.0).await;
        }
    }
}

/// What the user sees after a successful submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationContent {
    pub kind: LeadKind,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub next_steps: &'static [&'static str],
}

impl ConfirmationContent {
    pub fn for_kind(kind: LeadKind) -> Self {
        match kind {
            LeadKind::Player => Self {
                kind,
                title: "You're on the waitlist!",
                subtitle: "We're building MIDDLO for cricketers like you.",
                next_steps: &[
                    "We'll notify you when we launch in your city",
                    "Early users get priority access",
                    "Share with your cricket buddies for faster launch",
                ],
            },
            LeadKind::Supply => Self {
                kind,
                title: "Welcome to the bowler network!",
                subtitle: "Get ready to earn by doing what you love.",
                next_steps: &[
                    "We'll review your profile",
                    "You'll be among our first supply partners",
                    "Set your rates and start earning soon",
                ],
            },
            LeadKind::Facility => Self {
                kind,
                title: "Partnership request received!",
                subtitle: "Let's fill those empty net hours together.",
                next_steps: &[
                    "Our team will reach out within 48 hours",
                    "We'll discuss partnership terms",
                    "Get listed before your competitors",
                ],
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntakeFlow {
    state: IntakeState,
    latency: SimulatedLatency,
}

impl IntakeFlow {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            state: IntakeState::Landing,
            latency,
        }
    }

    pub fn state(&self) -> IntakeState {
        self.state
    }

    /// The segment whose form is currently open, if any
    pub fn active_form(&self) -> Option<LeadKind> {
        match self.state {
            IntakeState::Form(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn select(&mut self, kind: LeadKind) -> Result<(), IntakeError> {
        match self.state {
            IntakeState::Landing => {
                self.state = IntakeState::Form(kind);
                Ok(())
            }
            state => Err(IntakeError::InvalidTransition { state, action: "select a segment" }),
        }
    }

    pub fn back(&mut self) -> Result<(), IntakeError> {
        match self.state {
            IntakeState::Form(_) => {
                self.state = IntakeState::Landing;
                Ok(())
            }
            state => Err(IntakeError::InvalidTransition { state, action: "go back" }),
        }
    }

    /// Complete the active form. Call only after the lead has been stored.
    pub async fn submit(&mut self) -> Result<ConfirmationContent, IntakeError> {
        let kind = match self.state {
            IntakeState::Form(kind) => kind,
            state => return Err(IntakeError::InvalidTransition { state, action: "submit" }),
        };

        self.latency.wait().await;
        self.state = IntakeState::Confirmation(kind);
        Ok(ConfirmationContent::for_kind(kind))
    }

    pub fn restart(&mut self) -> Result<(), IntakeError> {
        match self.state {
            IntakeState::Confirmation(_) => {
                self.state = IntakeState::Landing;
                Ok(())
            }
            state => Err(IntakeError::InvalidTransition { state, action: "restart" }),
        }
    }
}
