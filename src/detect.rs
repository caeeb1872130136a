//! Field detection: a description of every fillable control on the page, so
//! an operator can see which identifiers a bag should use.

use autofill_core_types::{ControlSnapshot, Document, SelectOption};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedOption {
    pub text: String,
    pub value: String,
}

impl From<SelectOption> for DetectedOption {
    fn from(option: SelectOption) -> Self {
        Self {
            text: option.text,
            value: option.value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub label: String,
    pub value: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<DetectedOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_count: Option<usize>,
}

/// Describe every visible control except hidden inputs and submit buttons.
/// Dropdowns list their first `preview` options.
pub fn detect_fields(doc: &dyn Document, preview: usize) -> Vec<DetectedField> {
    doc.controls()
        .into_iter()
        .filter_map(|handle| doc.snapshot(handle).map(|snapshot| (handle, snapshot)))
        .filter(|(_, snapshot)| {
            snapshot.visible && snapshot.input_type != "hidden" && snapshot.input_type != "submit"
        })
        .map(|(handle, snapshot)| {
            let (options, option_count) = if snapshot.tag == "select" {
                let options = doc.options(handle);
                let count = options.len();
                let shown = options
                    .into_iter()
                    .take(preview)
                    .map(DetectedOption::from)
                    .collect();
                (Some(shown), Some(count))
            } else {
                (None, None)
            };
            DetectedField {
                label: label_for(&snapshot),
                field_type: if snapshot.input_type.is_empty() {
                    snapshot.tag.clone()
                } else {
                    snapshot.input_type.clone()
                },
                id: snapshot.id,
                name: snapshot.name,
                value: snapshot.value,
                required: snapshot.required,
                options,
                option_count,
            }
        })
        .collect()
}

/// Human label of a control, falling back to its name and then its id.
pub fn label_for(snapshot: &ControlSnapshot) -> String {
    if let Some(text) = &snapshot.label_for {
        return text.trim().to_string();
    }
    if let Some(text) = &snapshot.enclosing_label {
        return text.replacen(snapshot.value.as_str(), "", 1).trim().to_string();
    }
    let non_empty = |text: &Option<String>| text.clone().filter(|text| !text.is_empty());
    non_empty(&snapshot.placeholder)
        .or_else(|| non_empty(&snapshot.aria_label))
        .or_else(|| snapshot.container_label.as_ref().map(|text| text.trim().to_string()))
        .or_else(|| Some(snapshot.name.clone()).filter(|name| !name.is_empty()))
        .unwrap_or_else(|| snapshot.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use autofill_core_types::{MemoryControl, MemoryDocument};

    #[test]
    fn hidden_and_submit_controls_are_left_out() {
        let doc = MemoryDocument::new("https://example.test/", "Form")
            .with_control(MemoryControl::text("visible_one"))
            .with_control(MemoryControl::typed("hidden", "token"))
            .with_control(MemoryControl::typed("submit", "go"))
            .with_control(MemoryControl::text("offscreen").hidden());
        let fields = detect_fields(&doc, 5);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id, "visible_one");
        assert_eq!(fields[0].field_type, "text");
    }

    #[test]
    fn dropdowns_report_a_preview_and_the_full_count() {
        let doc = MemoryDocument::new("https://example.test/", "Form").with_control(
            MemoryControl::select(
                "atlas_country",
                &[("Select", ""), ("Japan", "JP"), ("Kenya", "KE"), ("Peru", "PE")],
            )
            .required(),
        );
        let fields = detect_fields(&doc, 2);
        assert_eq!(fields[0].field_type, "select-one");
        assert_eq!(fields[0].option_count, Some(4));
        assert_eq!(fields[0].options.as_ref().map(Vec::len), Some(2));
        assert!(fields[0].required);

        let json = serde_json::to_value(&fields[0]).unwrap();
        assert_eq!(json["type"], "select-one");
        assert_eq!(json["optionCount"], 4);
    }

    #[test]
    fn text_fields_omit_option_keys() {
        let doc = MemoryDocument::new("https://example.test/", "Form")
            .with_control(MemoryControl::text("city"));
        let json = serde_json::to_value(detect_fields(&doc, 5)).unwrap();
        assert!(json[0].get("options").is_none());
        assert!(json[0].get("optionCount").is_none());
    }

    #[test]
    fn label_resolution_order() {
        let labelled = MemoryControl::text("a")
            .with_label(" First name ")
            .with_placeholder("ignored");
        assert_eq!(label_for(&labelled.snapshot), "First name");

        let wrapped = MemoryControl::text("b")
            .with_value("Jane")
            .with_enclosing_label("Name Jane");
        assert_eq!(label_for(&wrapped.snapshot), "Name");

        let aria = MemoryControl::text("c").with_aria_label("City");
        assert_eq!(label_for(&aria.snapshot), "City");

        let container = MemoryControl::text("d").with_container_label(" Postal code ");
        assert_eq!(label_for(&container.snapshot), "Postal code");

        let named = MemoryControl::text("e").with_name("street");
        assert_eq!(label_for(&named.snapshot), "street");

        let bare = MemoryControl::text("f");
        assert_eq!(label_for(&bare.snapshot), "f");
    }
}
