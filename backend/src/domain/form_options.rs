//! Values offered by the enumerated fields of each intake form.
//!
//! Validation only checks that a selection was made; these lists are what
//! clients render in their dropdowns.

use shared::LeadKind;

/// (value, label) pairs for one enumerated field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChoices {
    pub kind: LeadKind,
    pub field: &'static str,
    pub options: &'static [(&'static str, &'static str)],
}

const NCR_CITIES: &[(&str, &str)] = &[
    ("delhi", "Delhi"),
    ("noida", "Noida"),
    ("gurgaon", "Gurgaon"),
    ("faridabad", "Faridabad"),
    ("ghaziabad", "Ghaziabad"),
];

pub const FORM_CHOICES: &[FieldChoices] = &[
    FieldChoices {
        kind: LeadKind::Player,
        field: "city",
        options: NCR_CITIES,
    },
    FieldChoices {
        kind: LeadKind::Player,
        field: "playingLevel",
        options: &[
            ("beginner", "Beginner (Just started)"),
            ("club", "Club Level"),
            ("district", "District Level"),
            ("state", "State Level"),
            ("professional", "Professional"),
        ],
    },
    FieldChoices {
        kind: LeadKind::Player,
        field: "currentBookingMethod",
        options: &[
            ("whatsapp", "WhatsApp groups"),
            ("phone", "Direct phone calls"),
            ("walkin", "Walk-in at academy"),
            ("app", "Other apps/websites"),
            ("friends", "Through friends"),
        ],
    },
    FieldChoices {
        kind: LeadKind::Player,
        field: "willingnessToPay",
        options: &[
            ("200-400", "₹200 - ₹400"),
            ("400-600", "₹400 - ₹600"),
            ("600-800", "₹600 - ₹800"),
            ("800-1000", "₹800 - ₹1,000"),
            ("1000+", "₹1,000+"),
        ],
    },
    FieldChoices {
        kind: LeadKind::Supply,
        field: "role",
        options: &[
            ("fast", "Fast Bowler"),
            ("medium", "Medium Pacer"),
            ("spin-off", "Off Spinner"),
            ("spin-leg", "Leg Spinner"),
            ("sidearm", "Side-arm Specialist"),
            ("throwdown", "Throwdown Specialist"),
        ],
    },
    FieldChoices {
        kind: LeadKind::Supply,
        field: "experience",
        options: &[
            ("1-2", "1-2 years"),
            ("3-5", "3-5 years"),
            ("5-10", "5-10 years"),
            ("10+", "10+ years"),
            ("professional", "Professional / Ex-player"),
        ],
    },
    FieldChoices {
        kind: LeadKind::Supply,
        field: "city",
        options: NCR_CITIES,
    },
    FieldChoices {
        kind: LeadKind::Supply,
        field: "availability",
        options: &[
            ("weekends", "Weekends only"),
            ("evenings", "Evenings (after 5 PM)"),
            ("mornings", "Mornings (before 10 AM)"),
            ("flexible", "Flexible / Full-time"),
        ],
    },
    FieldChoices {
        kind: LeadKind::Facility,
        field: "location",
        options: &[
            ("delhi-north", "Delhi - North"),
            ("delhi-south", "Delhi - South"),
            ("delhi-east", "Delhi - East"),
            ("delhi-west", "Delhi - West"),
            ("noida", "Noida"),
            ("gurgaon", "Gurgaon"),
            ("faridabad", "Faridabad"),
            ("ghaziabad", "Ghaziabad"),
        ],
    },
    FieldChoices {
        kind: LeadKind::Facility,
        field: "numberOfNets",
        options: &[("1-2", "1-2"), ("3-5", "3-5"), ("6-10", "6-10"), ("10+", "10+")],
    },
    FieldChoices {
        kind: LeadKind::Facility,
        field: "freeHours",
        options: &[
            ("1-2", "1-2 hours"),
            ("3-4", "3-4 hours"),
            ("5-6", "5-6 hours"),
            ("6+", "6+ hours"),
        ],
    },
];

/// Choices for the enumerated fields of one kind, in form order
pub fn choices_for(kind: LeadKind) -> impl Iterator<Item = &'static FieldChoices> {
    FORM_CHOICES.iter().filter(move |choices| choices.kind == kind)
}
