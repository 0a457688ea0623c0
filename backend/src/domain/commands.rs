//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod leads {
    use crate::domain::models::lead::DomainLead;
    use shared::{FacilityLeadForm, LeadKind, PlayerLeadForm, SupplyLeadForm};

    /// Raw form input for one of the three segments.
    #[derive(Debug, Clone, PartialEq)]
    pub enum LeadForm {
        Player(PlayerLeadForm),
        Supply(SupplyLeadForm),
        Facility(FacilityLeadForm),
    }

    impl LeadForm {
        pub fn kind(&self) -> LeadKind {
            match self {
                LeadForm::Player(_) => LeadKind::Player,
                LeadForm::Supply(_) => LeadKind::Supply,
                LeadForm::Facility(_) => LeadKind::Facility,
            }
        }
    }

    /// Input for submitting a lead.
    #[derive(Debug, Clone)]
    pub struct SubmitLeadCommand {
        pub form: LeadForm,
    }

    /// Query for the dashboard lead listing. `None` selects every kind.
    #[derive(Debug, Clone, Default)]
    pub struct LeadListQuery {
        pub kind: Option<LeadKind>,
    }

    /// Result of a successful submission.
    #[derive(Debug, Clone)]
    pub struct SubmitLeadResult {
        pub lead: DomainLead,
        pub confirmation: crate::domain::intake_flow::ConfirmationContent,
    }
}

pub mod export {
    use std::path::PathBuf;

    /// Input for writing the CSV export to disk.
    #[derive(Debug, Clone, Default)]
    pub struct ExportToPathCommand {
        pub custom_path: Option<String>,
    }

    /// A rendered CSV export, ready to be offered as a download.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CsvExport {
        pub content: String,
        pub filename: String,
        pub lead_count: usize,
    }

    /// Outcome of writing the export to disk.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ExportToPathResult {
        Written { file_path: PathBuf, lead_count: usize },
        NothingToExport,
        /// The requested directory is outside the export directory
        PathNotAllowed { requested: String },
    }
}
