use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::LeadKind;

/// Timestamps are persisted as ISO-8601 UTC with millisecond precision
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainPlayerLead {
    pub name: String,
    pub city: String,
    pub playing_level: String,
    pub current_booking_method: String,
    pub biggest_problem: String,
    pub willingness_to_pay: String,
    pub whatsapp: String,
    #[serde(with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSupplyLead {
    pub name: String,
    pub role: String,
    pub experience: String,
    pub city: String,
    pub hourly_rate: String,
    pub availability: String,
    pub whatsapp: String,
    #[serde(with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainFacilityLead {
    pub academy_name: String,
    pub location: String,
    pub number_of_nets: String,
    pub free_hours: String,
    pub price_per_hour: String,
    pub contact_name: String,
    pub contact_phone: String,
    #[serde(with = "iso_millis")]
    pub submitted_at: DateTime<Utc>,
}

/// A validated, timestamped lead. This is the shape stored in the submissions slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DomainLead {
    Player(DomainPlayerLead),
    Supply(DomainSupplyLead),
    Facility(DomainFacilityLead),
}

impl DomainLead {
    pub fn kind(&self) -> LeadKind {
        match self {
            DomainLead::Player(_) => LeadKind::Player,
            DomainLead::Supply(_) => LeadKind::Supply,
            DomainLead::Facility(_) => LeadKind::Facility,
        }
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        match self {
            DomainLead::Player(lead) => lead.submitted_at,
            DomainLead::Supply(lead) => lead.submitted_at,
            DomainLead::Facility(lead) => lead.submitted_at,
        }
    }

    /// One dashboard row: who, where, how to reach them, and when
    pub fn summary(&self) -> LeadSummary<'_> {
        let (display_name, location, phone) = match self {
            DomainLead::Player(lead) => (&lead.name, &lead.city, &lead.whatsapp),
            DomainLead::Supply(lead) => (&lead.name, &lead.city, &lead.whatsapp),
            DomainLead::Facility(lead) => (&lead.academy_name, &lead.location, &lead.contact_phone),
        };
        LeadSummary {
            kind: self.kind(),
            display_name,
            location,
            phone,
            submitted_at: self.submitted_at(),
        }
    }
}

/// Kind-independent view of a lead, as listed on the admin dashboard.
/// Facilities are shown under the academy name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSummary<'a> {
    pub kind: LeadKind,
    pub display_name: &'a str,
    pub location: &'a str,
    pub phone: &'a str,
    pub submitted_at: DateTime<Utc>,
}
