use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::commands::leads::SubmitLeadResult;
use crate::domain::form_options::FieldChoices;
use crate::domain::intake_flow::ConfirmationContent;
use crate::domain::models::lead::{DomainLead, LeadSummary};
use shared::{
    Confirmation, FacilityLead, FieldOptions, FormOptionsResponse, Lead, LeadFilter,
    LeadListResponse, LeadRow, PlayerLead, SelectOption, SubmitLeadResponse, SupplyLead,
};

/// Mapper from domain leads to the shared lead DTOs.
pub struct LeadMapper;

impl LeadMapper {
    fn timestamp(value: DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn to_dto(domain: DomainLead) -> Lead {
        match domain {
            DomainLead::Player(lead) => Lead::Player(PlayerLead {
                name: lead.name,
                city: lead.city,
                playing_level: lead.playing_level,
                current_booking_method: lead.current_booking_method,
                biggest_problem: lead.biggest_problem,
                willingness_to_pay: lead.willingness_to_pay,
                whatsapp: lead.whatsapp,
                submitted_at: Self::timestamp(lead.submitted_at),
            }),
            DomainLead::Supply(lead) => Lead::Supply(SupplyLead {
                name: lead.name,
                role: lead.role,
                experience: lead.experience,
                city: lead.city,
                hourly_rate: lead.hourly_rate,
                availability: lead.availability,
                whatsapp: lead.whatsapp,
                submitted_at: Self::timestamp(lead.submitted_at),
            }),
            DomainLead::Facility(lead) => Lead::Facility(FacilityLead {
                academy_name: lead.academy_name,
                location: lead.location,
                number_of_nets: lead.number_of_nets,
                free_hours: lead.free_hours,
                price_per_hour: lead.price_per_hour,
                contact_name: lead.contact_name,
                contact_phone: lead.contact_phone,
                submitted_at: Self::timestamp(lead.submitted_at),
            }),
        }
    }

    pub fn to_confirmation_dto(content: ConfirmationContent) -> Confirmation {
        Confirmation {
            kind: content.kind,
            title: content.title.to_string(),
            subtitle: content.subtitle.to_string(),
            next_steps: content.next_steps.iter().map(|step| step.to_string()).collect(),
        }
    }

    pub fn to_submit_response(result: SubmitLeadResult) -> SubmitLeadResponse {
        SubmitLeadResponse {
            lead: Self::to_dto(result.lead),
            confirmation: Self::to_confirmation_dto(result.confirmation),
        }
    }

    pub fn to_row_dto(summary: LeadSummary<'_>) -> LeadRow {
        LeadRow {
            kind: summary.kind,
            display_name: summary.display_name.to_string(),
            location: summary.location.to_string(),
            phone: summary.phone.to_string(),
            submitted_at: Self::timestamp(summary.submitted_at),
        }
    }

    pub fn to_list_response(filter: LeadFilter, leads: Vec<DomainLead>) -> LeadListResponse {
        let rows = leads.iter().map(|lead| Self::to_row_dto(lead.summary())).collect();
        LeadListResponse {
            filter,
            leads: leads.into_iter().map(Self::to_dto).collect(),
            rows,
        }
    }

    pub fn to_form_options_response<'a>(
        choices: impl IntoIterator<Item = &'a FieldChoices>,
    ) -> FormOptionsResponse {
        FormOptionsResponse {
            fields: choices
                .into_iter()
                .map(|choice| FieldOptions {
                    kind: choice.kind,
                    field: choice.field.to_string(),
                    options: choice
                        .options
                        .iter()
                        .map(|(value, label)| SelectOption {
                            value: value.to_string(),
                            label: label.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::lead::DomainSupplyLead;
    use chrono::TimeZone;
    use shared::LeadKind;

    #[test]
    fn test_supply_lead_to_dto() {
        let submitted_at = Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap();
        let domain = DomainLead::Supply(DomainSupplyLead {
            name: "Arjun Singh".to_string(),
            role: "sidearm".to_string(),
            experience: "3-5".to_string(),
            city: "noida".to_string(),
            hourly_rate: "500".to_string(),
            availability: "evenings".to_string(),
            whatsapp: "9876543210".to_string(),
            submitted_at,
        });

        match LeadMapper::to_dto(domain) {
            Lead::Supply(lead) => {
                assert_eq!(lead.name, "Arjun Singh");
                assert_eq!(lead.hourly_rate, "500");
                assert_eq!(lead.submitted_at, "2025-06-01T10:30:00.000Z");
            }
            other => panic!("Expected a supply lead, got {:?}", other),
        }
    }

    #[test]
    fn test_confirmation_dto() {
        let content = ConfirmationContent::for_kind(LeadKind::Facility);
        let dto = LeadMapper::to_confirmation_dto(content);
        assert_eq!(dto.kind, LeadKind::Facility);
        assert_eq!(dto.title, "Partnership request received!");
        assert_eq!(dto.next_steps.len(), 3);
    }
}
