//! Field tables for the dependent-management pages.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::plans::{Source, Step};

/// Which dependent table a page gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DependentPage {
    Contact,
    Applicant,
    /// Unrecognised page: every known dependent field is tried by name.
    Generic,
}

impl DependentPage {
    pub fn route(url: &str, title: &str) -> Self {
        if url.contains("daddcontact")
            || title.contains("Dependent Contact")
            || title.contains("Contact Information")
        {
            DependentPage::Contact
        } else if url.contains("dep_applicant_add")
            || url.contains("dependent")
            || title.contains("Dependent Applicant")
            || title.contains("Dependent")
        {
            DependentPage::Applicant
        } else {
            DependentPage::Generic
        }
    }

    pub fn steps(&self) -> &'static [Step] {
        match self {
            DependentPage::Contact => CONTACT,
            DependentPage::Applicant => APPLICANT,
            DependentPage::Generic => GENERIC.as_slice(),
        }
    }
}

const fn text(id: &'static str) -> Step {
    Step::Text {
        id,
        source: Source::Path(id),
    }
}

const fn select(id: &'static str) -> Step {
    Step::Select {
        id,
        source: Source::Path(id),
    }
}

const LANGUAGE_FIELD: &str = "adx_preferredlanguageid";

const CONTACT: &[Step] = &[
    text("firstname"),
    text("lastname"),
    text("atlas_emailaddress1"),
    Step::Language {
        id: LANGUAGE_FIELD,
        path: LANGUAGE_FIELD,
        fallback: true,
    },
];

const APPLICANT: &[Step] = &[
    select("atlas_relation_to_applicant"),
    text("atlas_first_name"),
    text("atlas_last_name"),
    select("atlas_pob_country"),
    text("atlas_birthdate_datepicker_description"),
    select("atlas_nationality"),
    text("atlas_passport_number"),
    text("atlas_passport_issuance_date_datepicker_description"),
    text("atlas_passport_expiration_date_datepicker_description"),
    text("atlas_passport_place_of_issue"),
    select("atlas_home_phone_country_code"),
    text("atlas_home_phone"),
    select("atlas_mobile_phone_country_code"),
    text("atlas_mobile_phone"),
    text("atlas_email"),
    text("atlas_mailing_street"),
    text("atlas_mailing_city"),
    text("atlas_mailing_state"),
    text("atlas_mailing_postal_code"),
    text("atlas_national_id"),
];

const GENERIC_FIELDS: &[&str] = &[
    "firstname",
    "lastname",
    "atlas_first_name",
    "atlas_last_name",
    "atlas_emailaddress1",
    "atlas_email",
    "atlas_relation_to_applicant",
    "atlas_pob_country",
    "atlas_birthdate_datepicker_description",
    "atlas_nationality",
    "atlas_passport_number",
    "atlas_passport_issuance_date_datepicker_description",
    "atlas_passport_expiration_date_datepicker_description",
    "atlas_passport_place_of_issue",
    "atlas_home_phone_country_code",
    "atlas_home_phone",
    "atlas_mobile_phone_country_code",
    "atlas_mobile_phone",
    "atlas_mailing_street",
    "atlas_mailing_city",
    "atlas_mailing_state",
    "atlas_mailing_postal_code",
    "atlas_national_id",
    LANGUAGE_FIELD,
];

const GENERIC_DROPDOWN_MARKERS: &[&str] = &[
    "country",
    "nationality",
    "country_code",
    "preferredlanguageid",
    "relation",
];

static GENERIC: Lazy<Vec<Step>> = Lazy::new(|| {
    GENERIC_FIELDS
        .iter()
        .map(|&name| {
            if name == LANGUAGE_FIELD {
                Step::Language {
                    id: name,
                    path: name,
                    fallback: false,
                }
            } else if GENERIC_DROPDOWN_MARKERS
                .iter()
                .any(|marker| name.contains(marker))
            {
                Step::Select {
                    id: name,
                    source: Source::Path(name),
                }
            } else {
                Step::Text {
                    id: name,
                    source: Source::Path(name),
                }
            }
        })
        .collect()
});
