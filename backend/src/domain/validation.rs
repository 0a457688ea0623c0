//! Lead validation for the waitlist intake forms.
//!
//! Every rule here is a pure function of the submitted values. A form is
//! checked field by field and all failures are collected in one pass, so the
//! caller can show every problem at once. A form either becomes a fully typed
//! [`DomainLead`] or yields a [`FieldErrors`] map, never both.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::domain::commands::leads::LeadForm;
use crate::domain::models::lead::{
    DomainFacilityLead, DomainLead, DomainPlayerLead, DomainSupplyLead,
};
use shared::{FacilityLeadForm, PlayerLeadForm, SupplyLeadForm};

pub const INVALID_MOBILE_MESSAGE: &str = "Enter valid 10-digit Indian mobile number";

/// Field name -> message for every field that failed validation
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

/// Inclusive length bounds for a free-text field, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    /// Person, academy and contact names
    pub name: LengthBounds,
    /// The player's description of their biggest practice problem
    pub problem_description: LengthBounds,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            name: LengthBounds { min: 2, max: 100 },
            problem_description: LengthBounds { min: 10, max: 500 },
        }
    }
}

/// Removes every character that is not an ASCII digit, e.g. `"₹ 1,500"` -> `"1500"`
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Indian mobile number: exactly 10 ASCII digits, the first one 6-9
pub fn is_valid_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10 && matches!(bytes[0], b'6'..=b'9') && bytes.iter().all(u8::is_ascii_digit)
}

/// Collects failures across all fields of one form
struct FieldCheck<'a> {
    rules: &'a ValidationRules,
    errors: FieldErrors,
}

impl<'a> FieldCheck<'a> {
    fn new(rules: &'a ValidationRules) -> Self {
        Self { rules, errors: FieldErrors::new() }
    }

    fn text(
        &mut self,
        field: &str,
        value: &str,
        bounds: LengthBounds,
        label: &str,
        too_short: &str,
    ) {
        let len = value.chars().count();
        if len < bounds.min {
            self.errors.insert(field, too_short);
        } else if len > bounds.max {
            self.errors
                .insert(field, format!("{} must be at most {} characters", label, bounds.max));
        }
    }

    fn name(&mut self, field: &str, value: &str, label: &str, too_short: &str) {
        let bounds = self.rules.name;
        self.text(field, value, bounds, label, too_short);
    }

    fn selected(&mut self, field: &str, value: &str, message: &str) {
        if value.is_empty() {
            self.errors.insert(field, message);
        }
    }

    fn mobile(&mut self, field: &str, value: &str) {
        if !is_valid_mobile(value) {
            self.errors.insert(field, INVALID_MOBILE_MESSAGE);
        }
    }

    /// Strips non-digits before checking presence; returns the stripped value
    fn numeric(&mut self, field: &str, raw: &str, message: &str) -> String {
        let digits = strip_non_digits(raw);
        if digits.is_empty() {
            self.errors.insert(field, message);
        }
        digits
    }

    fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validates raw form input and builds accepted leads
#[derive(Debug, Clone, Default)]
pub struct LeadValidator {
    rules: ValidationRules,
}

impl LeadValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Validate a form of any kind, stamping the accepted lead with `submitted_at`
    pub fn validate(
        &self,
        form: &LeadForm,
        submitted_at: DateTime<Utc>,
    ) -> Result<DomainLead, FieldErrors> {
        match form {
            LeadForm::Player(form) => {
                self.validate_player(form, submitted_at).map(DomainLead::Player)
            }
            LeadForm::Supply(form) => {
                self.validate_supply(form, submitted_at).map(DomainLead::Supply)
            }
            LeadForm::Facility(form) => {
                self.validate_facility(form, submitted_at).map(DomainLead::Facility)
            }
        }
    }

    pub fn validate_player(
        &self,
        form: &PlayerLeadForm,
        submitted_at: DateTime<Utc>,
    ) -> Result<DomainPlayerLead, FieldErrors> {
        let mut check = FieldCheck::new(&self.rules);
        check.name("name", &form.name, "Name", "Name must be at least 2 characters");
        check.selected("city", &form.city, "Please select a city");
        check.selected("playingLevel", &form.playing_level, "Please select your level");
        check.selected(
            "currentBookingMethod",
            &form.current_booking_method,
            "Please select a method",
        );
        check.text(
            "biggestProblem",
            &form.biggest_problem,
            self.rules.problem_description,
            "Problem description",
            "Please describe your problem (min 10 characters)",
        );
        check.selected("willingnessToPay", &form.willingness_to_pay, "Please select a range");
        check.mobile("whatsapp", &form.whatsapp);
        check.finish()?;

        Ok(DomainPlayerLead {
            name: form.name.clone(),
            city: form.city.clone(),
            playing_level: form.playing_level.clone(),
            current_booking_method: form.current_booking_method.clone(),
            biggest_problem: form.biggest_problem.clone(),
            willingness_to_pay: form.willingness_to_pay.clone(),
            whatsapp: form.whatsapp.clone(),
            submitted_at,
        })
    }

    pub fn validate_supply(
        &self,
        form: &SupplyLeadForm,
        submitted_at: DateTime<Utc>,
    ) -> Result<DomainSupplyLead, FieldErrors> {
        let mut check = FieldCheck::new(&self.rules);
        check.name("name", &form.name, "Name", "Name must be at least 2 characters");
        check.selected("role", &form.role, "Please select your role");
        check.selected("experience", &form.experience, "Please select your experience");
        check.selected("city", &form.city, "Please select a city");
        let hourly_rate = check.numeric("hourlyRate", &form.hourly_rate, "Please enter your rate");
        check.selected("availability", &form.availability, "Please select availability");
        check.mobile("whatsapp", &form.whatsapp);
        check.finish()?;

        Ok(DomainSupplyLead {
            name: form.name.clone(),
            role: form.role.clone(),
            experience: form.experience.clone(),
            city: form.city.clone(),
            hourly_rate,
            availability: form.availability.clone(),
            whatsapp: form.whatsapp.clone(),
            submitted_at,
        })
    }

    pub fn validate_facility(
        &self,
        form: &FacilityLeadForm,
        submitted_at: DateTime<Utc>,
    ) -> Result<DomainFacilityLead, FieldErrors> {
        let mut check = FieldCheck::new(&self.rules);
        check.name(
            "academyName",
            &form.academy_name,
            "Academy name",
            "Academy name must be at least 2 characters",
        );
        check.selected("location", &form.location, "Please select a location");
        check.selected("numberOfNets", &form.number_of_nets, "Please select number of nets");
        check.selected("freeHours", &form.free_hours, "Please select free hours");
        let price_per_hour =
            check.numeric("pricePerHour", &form.price_per_hour, "Please enter price");
        check.name("contactName", &form.contact_name, "Contact name", "Contact name is required");
        check.mobile("contactPhone", &form.contact_phone);
        check.finish()?;

        Ok(DomainFacilityLead {
            academy_name: form.academy_name.clone(),
            location: form.location.clone(),
            number_of_nets: form.number_of_nets.clone(),
            free_hours: form.free_hours.clone(),
            price_per_hour,
            contact_name: form.contact_name.clone(),
            contact_phone: form.contact_phone.clone(),
            submitted_at,
        })
    }
}
