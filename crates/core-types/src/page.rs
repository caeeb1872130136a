use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Coarse classification of the page currently loaded in the tab.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PageLabel {
    Payment,
    Signup,
    ApplicantDetails,
    FamilyDetails,
    TravelInfo,
    Address,
    Passport,
    ContactInfo,
    DocumentDelivery,
    Appointment,
    Unknown,
}

impl PageLabel {
    pub const ALL: [PageLabel; 11] = [
        PageLabel::Payment,
        PageLabel::Signup,
        PageLabel::ApplicantDetails,
        PageLabel::FamilyDetails,
        PageLabel::TravelInfo,
        PageLabel::Address,
        PageLabel::Passport,
        PageLabel::ContactInfo,
        PageLabel::DocumentDelivery,
        PageLabel::Appointment,
        PageLabel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageLabel::Payment => "payment",
            PageLabel::Signup => "signup",
            PageLabel::ApplicantDetails => "applicant_details",
            PageLabel::FamilyDetails => "family_details",
            PageLabel::TravelInfo => "travel_info",
            PageLabel::Address => "address",
            PageLabel::Passport => "passport",
            PageLabel::ContactInfo => "contact_info",
            PageLabel::DocumentDelivery => "document_delivery",
            PageLabel::Appointment => "appointment",
            PageLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown page label: {0}")]
pub struct ParseLabelError(pub String);

impl FromStr for PageLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageLabel::ALL
            .iter()
            .copied()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| ParseLabelError(s.to_string()))
    }
}
