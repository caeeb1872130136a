//! Persons offered for filling, derived from a loaded value bag.

use autofill_core_types::bag::{as_text, is_truthy};
use autofill_core_types::ValueBag;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AutofillError, Result};

pub const MAIN_APPLICANT_ID: &str = "main_applicant";
const MAIN_APPLICANT_KIND: &str = "Main Applicant";
const DEFAULT_DEPENDENT_KIND: &str = "Dependent";

/// One additional person, snapshotted out of the bag at load time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DependentRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "displayName")]
    pub display_name: String,
    #[serde(flatten)]
    pub values: ValueBag,
}

impl DependentRecord {
    /// Build a record from one entry of the dependents array. `index` is the
    /// entry's position, used for the fallback id and name.
    pub fn from_entry(index: usize, entry: &ValueBag) -> Self {
        let id = text_of(entry, "id").unwrap_or_else(|| format!("dep_{index}"));
        let display_name = text_of(entry, "displayName")
            .or_else(|| joined_name(entry, &["firstname", "atlas_first_name"], &["lastname", "atlas_last_name"]))
            .unwrap_or_else(|| format!("Dependent {}", index + 1));
        let mut values = entry.clone();
        values.remove("id");
        values.remove("displayName");
        Self {
            id,
            display_name,
            values,
        }
    }

    pub fn kind(&self) -> String {
        text_of(&self.values, "atlas_relation_to_applicant")
            .unwrap_or_else(|| DEFAULT_DEPENDENT_KIND.to_string())
    }

    /// The record as a flat bag, identity fields included.
    pub fn to_bag(&self) -> ValueBag {
        let mut bag = self.values.clone();
        bag.insert("id".into(), Value::String(self.id.clone()));
        bag.insert("displayName".into(), Value::String(self.display_name.clone()));
        bag
    }
}

/// Snapshot every object entry of the dependents array under `key`.
pub fn extract_dependents(bag: &ValueBag, key: &str) -> Vec<DependentRecord> {
    let Some(Value::Array(entries)) = bag.get(key) else {
        return Vec::new();
    };
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            entry
                .as_object()
                .map(|entry| DependentRecord::from_entry(index, entry))
        })
        .collect()
}

/// One selectable entry of the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub is_main: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roster {
    pub persons: Vec<Person>,
    /// Filled leaves of the main applicant's bag.
    pub field_count: usize,
}

impl Roster {
    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn summary(&self) -> String {
        let count = self.persons.len();
        format!(
            "{} fields ready • {} person{} loaded",
            self.field_count,
            count,
            if count == 1 { "" } else { "s" }
        )
    }
}

/// The main applicant's bag: the `applicant` sub-bag when present, else the
/// whole bag.
pub fn applicant_bag(bag: &ValueBag) -> &ValueBag {
    match bag.get("applicant") {
        Some(Value::Object(applicant)) if !applicant.is_empty() => applicant,
        _ => bag,
    }
}

pub fn has_main_applicant(bag: &ValueBag) -> bool {
    ["applicant", "atlas_first_name", "firstName"]
        .iter()
        .any(|key| bag.get(*key).map(is_truthy).unwrap_or(false))
}

pub fn roster(bag: &ValueBag, dependents: &[DependentRecord]) -> Roster {
    let mut roster = Roster::default();
    if has_main_applicant(bag) {
        let applicant = applicant_bag(bag);
        let name = joined_name(applicant, &["atlas_first_name"], &["atlas_last_name"])
            .or_else(|| joined_name(applicant, &["firstName"], &["lastName"]))
            .unwrap_or_else(|| MAIN_APPLICANT_KIND.to_string());
        roster.persons.push(Person {
            id: MAIN_APPLICANT_ID.into(),
            name,
            kind: MAIN_APPLICANT_KIND.into(),
            is_main: true,
        });
        roster.field_count = count_fields(applicant);
    }
    roster
        .persons
        .extend(dependents.iter().map(|dependent| Person {
            id: dependent.id.clone(),
            name: dependent.display_name.clone(),
            kind: dependent.kind(),
            is_main: false,
        }));
    roster
}

/// Non-null leaves; nested bags are walked, arrays count as one leaf.
pub fn count_fields(bag: &ValueBag) -> usize {
    bag.values()
        .map(|value| match value {
            Value::Null => 0,
            Value::Object(nested) => count_fields(nested),
            _ => 1,
        })
        .sum()
}

/// Parse operator-pasted text into a value bag. Input is rejected wholesale
/// on any problem.
pub fn parse_value_bag(text: &str) -> Result<ValueBag> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AutofillError::invalid_input("Please paste your data first"));
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(bag)) => Ok(bag),
        Ok(_) | Err(_) => Err(AutofillError::invalid_input(
            "Invalid JSON format. Please check your data.",
        )),
    }
}

fn text_of(bag: &ValueBag, key: &str) -> Option<String> {
    bag.get(key).filter(|value| is_truthy(value)).and_then(as_text)
}

fn first_text(bag: &ValueBag, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_of(bag, key))
}

/// "first last", present when at least one half resolves.
fn joined_name(bag: &ValueBag, first: &[&str], last: &[&str]) -> Option<String> {
    match (first_text(bag, first), first_text(bag, last)) {
        (None, None) => None,
        (first, last) => Some(
            [first, last]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" "),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> ValueBag {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn dependents_get_fallback_ids_and_names() {
        let data = bag(json!({
            "dependents": [
                {"id": "kid", "displayName": "Ken Sato", "atlas_relation_to_applicant": "Child"},
                {"firstname": "Yui", "lastname": "Sato"},
                {},
                "not a record"
            ]
        }));
        let dependents = extract_dependents(&data, "dependents");
        assert_eq!(dependents.len(), 3);
        assert_eq!(dependents[0].id, "kid");
        assert_eq!(dependents[0].kind(), "Child");
        assert!(!dependents[0].values.contains_key("id"));
        assert_eq!(dependents[1].id, "dep_1");
        assert_eq!(dependents[1].display_name, "Yui Sato");
        assert_eq!(dependents[1].kind(), "Dependent");
        assert_eq!(dependents[2].display_name, "Dependent 3");
    }

    #[test]
    fn record_serializes_flat() {
        let record = DependentRecord::from_entry(0, &bag(json!({"id": "d1", "firstname": "Yui"})));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"id": "d1", "displayName": "Yui", "firstname": "Yui"}));
    }

    #[test]
    fn roster_lists_main_applicant_first() {
        let data = bag(json!({
            "applicant": {"atlas_first_name": "Jane", "atlas_last_name": "Doe", "passport": {"number": "X1", "expiry": null}},
            "dependents": [{"id": "d1", "displayName": "Tom Doe"}]
        }));
        let dependents = extract_dependents(&data, "dependents");
        let roster = roster(&data, &dependents);
        assert_eq!(roster.persons.len(), 2);
        assert_eq!(roster.persons[0].id, MAIN_APPLICANT_ID);
        assert_eq!(roster.persons[0].name, "Jane Doe");
        assert!(roster.persons[0].is_main);
        assert_eq!(roster.persons[1].name, "Tom Doe");
        assert_eq!(roster.field_count, 3);
        assert_eq!(roster.summary(), "3 fields ready • 2 persons loaded");
    }

    #[test]
    fn bag_without_person_data_has_no_main_applicant() {
        let data = bag(json!({"city": "Osaka"}));
        let roster = roster(&data, &[]);
        assert!(roster.is_empty());
        assert_eq!(roster.summary(), "0 fields ready • 0 persons loaded");
    }

    #[test]
    fn arrays_count_as_one_field() {
        let data = bag(json!({"a": [1, 2, 3], "b": {"c": "x", "d": null}, "e": false}));
        assert_eq!(count_fields(&data), 3);
    }

    #[test]
    fn pasted_text_is_validated() {
        assert_eq!(
            parse_value_bag("   ").unwrap_err(),
            AutofillError::invalid_input("Please paste your data first")
        );
        assert_eq!(
            parse_value_bag("{not json").unwrap_err(),
            AutofillError::invalid_input("Invalid JSON format. Please check your data.")
        );
        assert!(parse_value_bag("[1, 2]").is_err());
        let parsed = parse_value_bag(r#"{"atlas_first_name": "Jane"}"#).unwrap();
        assert_eq!(parsed["atlas_first_name"], json!("Jane"));
    }
}
