use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Audience segment a lead belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadKind {
    /// Players (batsmen) looking for practice sessions
    Player,
    /// Bowlers offering their services
    Supply,
    /// Academies and grounds with free net hours
    Facility,
}

impl LeadKind {
    /// Every kind, in export order
    pub const ALL: [LeadKind; 3] = [LeadKind::Player, LeadKind::Supply, LeadKind::Facility];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadKind::Player => "player",
            LeadKind::Supply => "supply",
            LeadKind::Facility => "facility",
        }
    }
}

impl fmt::Display for LeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player" => Ok(LeadKind::Player),
            "supply" => Ok(LeadKind::Supply),
            "facility" => Ok(LeadKind::Facility),
            other => Err(format!("Unknown lead kind: {}", other)),
        }
    }
}

/// Raw player form input, exactly as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerLeadForm {
    pub name: String,
    pub city: String,
    pub playing_level: String,
    pub current_booking_method: String,
    pub biggest_problem: String,
    pub willingness_to_pay: String,
    pub whatsapp: String,
}

/// Raw bowler form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplyLeadForm {
    pub name: String,
    pub role: String,
    pub experience: String,
    pub city: String,
    /// Free-form rate input; non-digits are stripped during validation
    pub hourly_rate: String,
    pub availability: String,
    pub whatsapp: String,
}

/// Raw academy / ground form input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacilityLeadForm {
    pub academy_name: String,
    pub location: String,
    pub number_of_nets: String,
    pub free_hours: String,
    /// Free-form price input; non-digits are stripped during validation
    pub price_per_hour: String,
    pub contact_name: String,
    pub contact_phone: String,
}

/// An accepted player lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLead {
    pub name: String,
    pub city: String,
    pub playing_level: String,
    pub current_booking_method: String,
    pub biggest_problem: String,
    pub willingness_to_pay: String,
    pub whatsapp: String,
    /// ISO-8601 timestamp assigned when the lead was accepted
    pub submitted_at: String,
}

/// An accepted bowler lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyLead {
    pub name: String,
    pub role: String,
    pub experience: String,
    pub city: String,
    pub hourly_rate: String,
    pub availability: String,
    pub whatsapp: String,
    pub submitted_at: String,
}

/// An accepted academy / ground lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityLead {
    pub academy_name: String,
    pub location: String,
    pub number_of_nets: String,
    pub free_hours: String,
    pub price_per_hour: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub submitted_at: String,
}

/// Any accepted lead, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Lead {
    Player(PlayerLead),
    Supply(SupplyLead),
    Facility(FacilityLead),
}

impl Lead {
    pub fn kind(&self) -> LeadKind {
        match self {
            Lead::Player(_) => LeadKind::Player,
            Lead::Supply(_) => LeadKind::Supply,
            Lead::Facility(_) => LeadKind::Facility,
        }
    }
}

/// Segment-specific content shown after a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    pub kind: LeadKind,
    pub title: String,
    pub subtitle: String,
    pub next_steps: Vec<String>,
}

/// Response for a successfully stored lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitLeadResponse {
    pub lead: Lead,
    pub confirmation: Confirmation,
}

/// Field name -> human-readable message for every failing field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: BTreeMap<String, String>,
}

/// Result of a validation-only request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateLeadResponse {
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
}

/// Which leads the dashboard should show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadFilter {
    #[default]
    All,
    Player,
    Supply,
    Facility,
}

impl LeadFilter {
    /// The single kind this filter selects, or `None` for all kinds
    pub fn kind(&self) -> Option<LeadKind> {
        match self {
            LeadFilter::All => None,
            LeadFilter::Player => Some(LeadKind::Player),
            LeadFilter::Supply => Some(LeadKind::Supply),
            LeadFilter::Facility => Some(LeadKind::Facility),
        }
    }
}

/// One admin table row; facilities are listed under the academy name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRow {
    pub kind: LeadKind,
    pub display_name: String,
    pub location: String,
    pub phone: String,
    pub submitted_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadListResponse {
    pub filter: LeadFilter,
    pub leads: Vec<Lead>,
    /// Same leads, in the same order, as table rows
    pub rows: Vec<LeadRow>,
}

/// Per-kind submission counts for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub players: usize,
    pub supply: usize,
    pub facilities: usize,
}

/// One selectable value of an enumerated form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Options offered for one enumerated field of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    pub kind: LeadKind,
    pub field: String,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormOptionsResponse {
    pub fields: Vec<FieldOptions>,
}

/// Request to write the CSV export to a directory on disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Target directory; falls back to the configured export directory
    pub custom_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub lead_count: usize,
}

/// Generic error body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_is_tagged_by_kind() {
        let lead = Lead::Supply(SupplyLead {
            name: "Arjun".to_string(),
            role: "fast".to_string(),
            experience: "3-5".to_string(),
            city: "noida".to_string(),
            hourly_rate: "500".to_string(),
            availability: "weekends".to_string(),
            whatsapp: "9876543210".to_string(),
            submitted_at: "2025-01-15T10:30:00.000Z".to_string(),
        });

        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["kind"], "supply");
        assert_eq!(json["hourlyRate"], "500");
        assert_eq!(json["submittedAt"], "2025-01-15T10:30:00.000Z");
        assert_eq!(lead.kind(), LeadKind::Supply);
    }

    #[test]
    fn test_form_missing_fields_default_to_empty() {
        let form: PlayerLeadForm = serde_json::from_str(r#"{"name":"Ravi"}"#).unwrap();
        assert_eq!(form.name, "Ravi");
        assert!(form.whatsapp.is_empty());
        assert!(form.biggest_problem.is_empty());
    }

    #[test]
    fn test_lead_kind_parsing() {
        assert_eq!("player".parse::<LeadKind>().unwrap(), LeadKind::Player);
        assert_eq!(" Facility ".parse::<LeadKind>().unwrap(), LeadKind::Facility);
        assert!("batsman".parse::<LeadKind>().is_err());
    }

    #[test]
    fn test_filter_kind() {
        assert_eq!(LeadFilter::All.kind(), None);
        assert_eq!(LeadFilter::Supply.kind(), Some(LeadKind::Supply));
        assert_eq!(LeadFilter::default(), LeadFilter::All);
    }
}
