//! Per-page field tables for the page-specific regime.
//!
//! Each plan lists its steps in the order the host page expects them to be
//! filled. Paths are dotted lookups into the value bag.

use std::collections::HashMap;

use autofill_core_types::bag::{as_text, first_truthy, is_truthy, lookup};
use autofill_core_types::{PageLabel, ValueBag};
use once_cell::sync::Lazy;
use serde_json::Value;

/// Where a step's value comes from.
#[derive(Clone, Copy, Debug)]
pub enum Source {
    Path(&'static str),
    /// First truthy value along the paths.
    Chain(&'static [&'static str]),
    /// [`Source::Chain`] with a literal used when nothing resolves.
    ChainOr(&'static [&'static str], &'static str),
    Literal(&'static str),
    /// `yes` when the path is truthy, `no` otherwise.
    YesNo(&'static str),
    /// `path`, read only when `guard` is truthy.
    Guarded {
        guard: &'static str,
        path: &'static str,
    },
    /// Lower-cased first and last name run together; absent unless both
    /// chains resolve.
    Username {
        first: &'static [&'static str],
        last: &'static [&'static str],
    },
}

impl Source {
    pub fn resolve(&self, bag: &ValueBag) -> Option<Value> {
        match self {
            Source::Path(path) => lookup(bag, path).cloned(),
            Source::Chain(paths) => first_truthy(bag, paths).cloned(),
            Source::ChainOr(paths, fallback) => Some(
                first_truthy(bag, paths)
                    .cloned()
                    .unwrap_or_else(|| Value::from(*fallback)),
            ),
            Source::Literal(text) => Some(Value::from(*text)),
            Source::YesNo(path) => {
                let truthy = lookup(bag, path).map(is_truthy).unwrap_or(false);
                Some(Value::from(if truthy { "yes" } else { "no" }))
            }
            Source::Guarded { guard, path } => {
                if lookup(bag, guard).map(is_truthy).unwrap_or(false) {
                    lookup(bag, path).cloned()
                } else {
                    None
                }
            }
            Source::Username { first, last } => {
                let first = first_truthy(bag, first).and_then(as_text)?;
                let last = first_truthy(bag, last).and_then(as_text)?;
                Some(Value::String(format!(
                    "{}{}",
                    first.to_lowercase(),
                    last.to_lowercase()
                )))
            }
        }
    }
}

/// One action of a plan.
#[derive(Clone, Copy, Debug)]
pub enum Step {
    /// Type-dispatched write.
    Text { id: &'static str, source: Source },
    /// Dropdown matched by option text.
    Select { id: &'static str, source: Source },
    Radio { group: &'static str, source: Source },
    /// Dropdown fed through the language table. With `fallback`, a missing
    /// value selects English instead of skipping the step.
    Language {
        id: &'static str,
        path: &'static str,
        fallback: bool,
    },
    /// Tick a fixed-id checkbox unless the bag says `decline_key: false`.
    Consent {
        checkbox_id: &'static str,
        decline_key: &'static str,
    },
    /// Check the first radio on the page carrying this value.
    PreferRadio { value: &'static str },
}

const fn text(id: &'static str, paths: &'static [&'static str]) -> Step {
    Step::Text {
        id,
        source: Source::Chain(paths),
    }
}

const fn select(id: &'static str, paths: &'static [&'static str]) -> Step {
    Step::Select {
        id,
        source: Source::Chain(paths),
    }
}

const FIRST_NAME: &[&str] = &["givenName", "atlas_first_name", "firstname"];
const LAST_NAME: &[&str] = &["surname", "atlas_last_name", "lastname"];

const APPLICANT_DETAILS: &[Step] = &[
    text("atlas_first_name", &["atlas_first_name"]),
    text("atlas_last_name", &["atlas_last_name"]),
    text(
        "atlas_birthdate_datepicker_description",
        &["atlas_birthdate_datepicker_description"],
    ),
    text("atlas_pob_country_temp", &["atlas_pob_country_temp"]),
    select("atlas_country", &["atlas_country"]),
    select("atlas_nationality", &["atlas_nationality"]),
    text("atlas_email", &["atlas_email"]),
    select(
        "atlas_home_phone_country_code",
        &["atlas_home_phone_country_code"],
    ),
    text("atlas_home_phone", &["atlas_home_phone"]),
    select(
        "atlas_mobile_phone_country_code",
        &["atlas_mobile_phone_country_code"],
    ),
    text("atlas_mobile_phone", &["atlas_mobile_phone"]),
    text("atlas_mailing_street", &["atlas_mailing_street"]),
    text("atlas_mailing_city", &["atlas_mailing_city"]),
    text("atlas_mailing_state", &["atlas_mailing_state"]),
    text("atlas_mailing_postal_code", &["atlas_mailing_postal_code"]),
    text("atlas_passport_number", &["atlas_passport_number"]),
    text(
        "atlas_passport_issuance_date_datepicker_description",
        &["atlas_passport_issuance_date_datepicker_description"],
    ),
    text("atlas_passport_place_of_issue", &["atlas_passport_place_of_issue"]),
    text(
        "atlas_passport_expiration_date_datepicker_description",
        &["atlas_passport_expiration_date_datepicker_description"],
    ),
    text("atlas_national_id", &["atlas_national_id"]),
];

const FAMILY_DETAILS: &[Step] = &[
    text("father_first_name", &["father.firstName"]),
    text("father_last_name", &["father.lastName"]),
    select("father_nationality", &["father.nationality"]),
    text("mother_first_name", &["mother.firstName"]),
    text("mother_last_name", &["mother.lastName"]),
    select("mother_nationality", &["mother.nationality"]),
    text("spouse_first_name", &["spouse.firstName"]),
    text("spouse_last_name", &["spouse.lastName"]),
    select("spouse_nationality", &["spouse.nationality"]),
];

const TRAVEL_INFO: &[Step] = &[
    text("purpose_of_trip", &["purposeOfTrip"]),
    text("intended_arrival_date", &["arrivalDate"]),
    text("intended_departure_date", &["departureDate"]),
    text("length_of_stay", &["lengthOfStay"]),
    Step::Radio {
        group: "previous_us_travel",
        source: Source::YesNo("previousUSTravel"),
    },
    Step::Text {
        id: "previous_visa_number",
        source: Source::Guarded {
            guard: "previousUSTravel",
            path: "previousVisaNumber",
        },
    },
    Step::Text {
        id: "previous_visa_issue_date",
        source: Source::Guarded {
            guard: "previousUSTravel",
            path: "previousVisaIssueDate",
        },
    },
];

const ADDRESS: &[Step] = &[
    text("address_line_1", &["homeAddress.street1"]),
    text("address_line_2", &["homeAddress.street2"]),
    text("city", &["homeAddress.city"]),
    text("state", &["homeAddress.state"]),
    text("postal_code", &["homeAddress.postalCode"]),
    select("country", &["homeAddress.country"]),
    text("us_address_line_1", &["usAddress.street1"]),
    text("us_address_line_2", &["usAddress.street2"]),
    text("us_city", &["usAddress.city"]),
    select("us_state", &["usAddress.state"]),
    text("us_zip_code", &["usAddress.zipCode"]),
];

const PASSPORT: &[Step] = &[
    text("passport_number", &["passport.number"]),
    select("passport_country", &["passport.issuingCountry"]),
    text("passport_issue_date", &["passport.issueDate"]),
    text("passport_expiry_date", &["passport.expiryDate"]),
    text("passport_issue_city", &["passport.issueCity"]),
];

// Password and account email are left for the user.
const SIGNUP: &[Step] = &[
    Step::Text {
        id: "signInName",
        source: Source::Username {
            first: FIRST_NAME,
            last: LAST_NAME,
        },
    },
    text("givenName", FIRST_NAME),
    text("surname", LAST_NAME),
    Step::Select {
        id: "extension_kbq1",
        source: Source::Literal("What is your mother's maiden name?"),
    },
    text("extension_kba1", &["extension_kba1"]),
    Step::Select {
        id: "extension_kbq2",
        source: Source::Literal("What is the name of the road/street you grew up on?"),
    },
    text("extension_kba2", &["extension_kba2"]),
    Step::Select {
        id: "extension_kbq3",
        source: Source::Literal("Where did you meet your spouse?"),
    },
    text("extension_kba3", &["extension_kba3"]),
];

// Amount, receipt and email fields are left for the user.
const PAYMENT: &[Step] = &[
    text("name_first", &["name_first", "atlas_first_name", "firstname"]),
    text("name_last", &["name_last", "atlas_last_name", "lastname"]),
    text("postal_code", &["postal_code", "atlas_mailing_postal_code"]),
    text("region", &["region", "atlas_mailing_state"]),
    text("city", &["city", "atlas_mailing_city"]),
    text("street", &["street", "atlas_mailing_street"]),
    text("street2", &["street2"]),
    text("phone", &["phone", "atlas_mobile_phone", "atlas_home_phone"]),
    Step::Consent {
        checkbox_id: "ckb_policy",
        decline_key: "accept_terms",
    },
    Step::Consent {
        checkbox_id: "chbx_confirm",
        decline_key: "confirm_details",
    },
];

const CONTACT_INFO: &[Step] = &[
    text("phone", &["phone"]),
    text("mobile", &["mobile"]),
    text("work_phone", &["workPhone"]),
    text("emergency_name", &["emergencyContact.name"]),
    text("emergency_phone", &["emergencyContact.phone"]),
    text("emergency_email", &["emergencyContact.email"]),
    text("emergency_relationship", &["emergencyContact.relationship"]),
];

const DOCUMENT_DELIVERY: &[Step] = &[
    text("DDAddress", &["DDAddress", "atlas_mailing_street", "street"]),
    text("DDAddress2", &["DDAddress2", "street2"]),
    text("DDAddress3", &["DDAddress3"]),
    text("DDCity", &["DDCity", "atlas_mailing_city", "city"]),
    text("DDState", &["DDState", "atlas_mailing_state", "region"]),
    text(
        "DDPostalCode",
        &["DDPostalCode", "atlas_mailing_postal_code", "postal_code"],
    ),
    Step::Select {
        id: "document_delivery_country",
        source: Source::ChainOr(&["document_delivery_country", "atlas_country"], "Japan"),
    },
    Step::PreferRadio { value: "premium" },
];

static PAGE_PLANS: Lazy<HashMap<PageLabel, &'static [Step]>> = Lazy::new(|| {
    HashMap::from([
        (PageLabel::Payment, PAYMENT),
        (PageLabel::Signup, SIGNUP),
        (PageLabel::ApplicantDetails, APPLICANT_DETAILS),
        (PageLabel::FamilyDetails, FAMILY_DETAILS),
        (PageLabel::TravelInfo, TRAVEL_INFO),
        (PageLabel::Address, ADDRESS),
        (PageLabel::Passport, PASSPORT),
        (PageLabel::ContactInfo, CONTACT_INFO),
        (PageLabel::DocumentDelivery, DOCUMENT_DELIVERY),
    ])
});

/// The plan for `label`, if the page has one.
pub fn plan_for(label: PageLabel) -> Option<&'static [Step]> {
    PAGE_PLANS.get(&label).copied()
}
