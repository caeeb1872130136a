//! Page classification from URL and title.
//!
//! Rules are evaluated in order and the first hit wins. Order encodes
//! priority: the payment domain is checked before generic substrings such as
//! `address`, which payment pages also carry.

use autofill_core_types::PageLabel;
use url::Url;

struct Rule {
    label: PageLabel,
    /// Substrings of the full URL.
    url: &'static [&'static str],
    /// Substrings of the URL path.
    path: &'static [&'static str],
    /// Substrings of the lower-cased title.
    title: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        label: PageLabel::Payment,
        url: &["ayobaspremium"],
        path: &["payment"],
        title: &["ayobas premium"],
    },
    Rule {
        label: PageLabel::Signup,
        url: &["atlasauth.b2clogin.com"],
        path: &[],
        title: &["user details"],
    },
    // Visa option pages have no plan but often say "applicant" in the title.
    // `visa_options` also covers `additional_visa_options`.
    Rule {
        label: PageLabel::Unknown,
        url: &[],
        path: &["visa_options"],
        title: &["visa options", "additional options"],
    },
    Rule {
        label: PageLabel::ApplicantDetails,
        url: &[],
        path: &["applicant_details"],
        title: &["applicant"],
    },
    Rule {
        label: PageLabel::FamilyDetails,
        url: &[],
        path: &["family"],
        title: &["family"],
    },
    Rule {
        label: PageLabel::TravelInfo,
        url: &[],
        path: &["travel"],
        title: &["travel"],
    },
    Rule {
        label: PageLabel::Address,
        url: &[],
        path: &["address"],
        title: &["address"],
    },
    Rule {
        label: PageLabel::Passport,
        url: &[],
        path: &["passport"],
        title: &["passport"],
    },
    Rule {
        label: PageLabel::ContactInfo,
        url: &[],
        path: &["contact"],
        title: &["contact"],
    },
    Rule {
        label: PageLabel::Appointment,
        url: &[],
        path: &["schedule"],
        title: &["appointment"],
    },
    Rule {
        label: PageLabel::DocumentDelivery,
        url: &[],
        path: &["document_delivery"],
        title: &["document delivery", "delivery options"],
    },
];

impl Rule {
    fn matches(&self, url: &str, path: &str, title: &str) -> bool {
        self.url.iter().any(|needle| url.contains(needle))
            || self.path.iter().any(|needle| path.contains(needle))
            || self.title.iter().any(|needle| title.contains(needle))
    }
}

/// Classify the current page. Pure; recompute after every navigation.
pub fn classify(url: &str, title: &str) -> PageLabel {
    let path = url_path(url);
    let title = title.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(url, &path, &title))
        .map(|rule| rule.label)
        .unwrap_or(PageLabel::Unknown)
}

/// Whether the page belongs to the dependent-management flow.
pub fn is_dependent_page(url: &str, title: &str) -> bool {
    ["manage_dependents", "daddcontact", "dep_applicant_add"]
        .iter()
        .any(|needle| url.contains(needle))
        || ["Dependent Contact", "Dependent Applicant"]
            .iter()
            .any(|needle| title.contains(needle))
}

fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}
