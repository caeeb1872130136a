//! Capability interface over the live document.
//!
//! The locator, the option matcher and the writer only ever talk to the page
//! through [`Document`]; a browser binding implements it against the real DOM,
//! tests implement it with [`crate::MemoryDocument`].

/// Opaque reference to a form control, valid for the lifetime of the page.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ControlHandle(pub usize);

/// How a control accepts a value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlKind {
    /// Single-choice dropdown.
    Selection,
    /// Checkbox.
    Toggle,
    /// Radio button, part of a group sharing a name.
    Exclusive,
    /// Text, date, number, textarea and the other value-assigned inputs.
    FreeText,
    /// Buttons, file pickers and other controls a value cannot be written to.
    Inert,
}

impl ControlKind {
    /// Classify from the control's `type` property (lower-cased).
    pub fn classify(input_type: &str) -> Self {
        match input_type {
            "select-one" => ControlKind::Selection,
            "checkbox" => ControlKind::Toggle,
            "radio" => ControlKind::Exclusive,
            "submit" | "button" | "reset" | "image" | "file" => ControlKind::Inert,
            _ => ControlKind::FreeText,
        }
    }
}

/// Read-only view of one control's attributes and rendering state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub id: String,
    pub name: String,
    /// Lower-cased tag name (`input`, `select`, `textarea`).
    pub tag: String,
    /// The `type` property: `text`, `select-one`, `checkbox`, `textarea`, ...
    pub input_type: String,
    pub value: String,
    pub checked: bool,
    /// Whether the control has an on-screen rendering box.
    pub visible: bool,
    pub required: bool,
    /// Text of a `<label for=id>` pointing at the control.
    pub label_for: Option<String>,
    /// Text of the `<label>` wrapping the control.
    pub enclosing_label: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    /// First label found inside the nearest form-group style container.
    pub container_label: Option<String>,
}

impl ControlSnapshot {
    pub fn kind(&self) -> ControlKind {
        ControlKind::classify(&self.input_type)
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub text: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// Notifications the host page's own scripts listen for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DomEvent {
    Input,
    Change,
    /// Synthetic activation, as produced by `element.click()`.
    Click,
}

pub trait Document {
    fn url(&self) -> String;

    fn title(&self) -> String;

    /// Every form control on the page, in document order.
    fn controls(&self) -> Vec<ControlHandle>;

    fn snapshot(&self, handle: ControlHandle) -> Option<ControlSnapshot>;

    /// Options of a selection control, in display order.
    fn options(&self, handle: ControlHandle) -> Vec<SelectOption>;

    fn set_value(&mut self, handle: ControlHandle, value: &str);

    fn set_checked(&mut self, handle: ControlHandle, checked: bool);

    fn dispatch(&mut self, handle: ControlHandle, event: DomEvent);

    /// First control in document order satisfying `predicate`.
    fn find_first(&self, predicate: &dyn Fn(&ControlSnapshot) -> bool) -> Option<ControlHandle> {
        self.controls().into_iter().find(|handle| {
            self.snapshot(*handle)
                .map(|snapshot| predicate(&snapshot))
                .unwrap_or(false)
        })
    }

    /// Every control satisfying `predicate`, in document order.
    fn find_all(&self, predicate: &dyn Fn(&ControlSnapshot) -> bool) -> Vec<ControlHandle> {
        self.controls()
            .into_iter()
            .filter(|handle| {
                self.snapshot(*handle)
                    .map(|snapshot| predicate(&snapshot))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<ControlHandle> {
        if id.is_empty() {
            return None;
        }
        self.find_first(&|snapshot| snapshot.id == id)
    }
}
