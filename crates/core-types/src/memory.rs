//! In-memory document used to exercise the engine without a browser.

use crate::dom::{ControlHandle, ControlSnapshot, Document, DomEvent, SelectOption};

/// A control plus, for dropdowns, its option list.
#[derive(Clone, Debug, Default)]
pub struct MemoryControl {
    pub snapshot: ControlSnapshot,
    pub options: Vec<SelectOption>,
}

impl MemoryControl {
    fn input(input_type: &str) -> Self {
        Self {
            snapshot: ControlSnapshot {
                tag: "input".into(),
                input_type: input_type.into(),
                visible: true,
                ..Default::default()
            },
            options: Vec::new(),
        }
    }

    /// `<input type=text id=...>`
    pub fn text(id: &str) -> Self {
        Self::input("text").with_id(id)
    }

    /// `<input type=... id=...>` for any other input type.
    pub fn typed(input_type: &str, id: &str) -> Self {
        Self::input(input_type).with_id(id)
    }

    pub fn textarea(id: &str) -> Self {
        let mut control = Self::input("textarea").with_id(id);
        control.snapshot.tag = "textarea".into();
        control
    }

    /// `<select id=...>` with `(text, value)` options.
    pub fn select(id: &str, options: &[(&str, &str)]) -> Self {
        let mut control = Self::input("select-one").with_id(id);
        control.snapshot.tag = "select".into();
        control.options = options
            .iter()
            .map(|(text, value)| SelectOption::new(*text, *value))
            .collect();
        control.snapshot.value = control
            .options
            .first()
            .map(|option| option.value.clone())
            .unwrap_or_default();
        control
    }

    pub fn checkbox(id: &str) -> Self {
        Self::input("checkbox").with_id(id)
    }

    /// `<input type=radio name=... value=...>`
    pub fn radio(name: &str, value: &str) -> Self {
        Self::input("radio").with_name(name).with_value(value)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.snapshot.id = id.into();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.snapshot.name = name.into();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.snapshot.value = value.into();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.snapshot.label_for = Some(label.into());
        self
    }

    pub fn with_enclosing_label(mut self, label: &str) -> Self {
        self.snapshot.enclosing_label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.snapshot.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_aria_label(mut self, label: &str) -> Self {
        self.snapshot.aria_label = Some(label.into());
        self
    }

    pub fn with_container_label(mut self, label: &str) -> Self {
        self.snapshot.container_label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.snapshot.required = true;
        self
    }

    /// Rendered without a layout box (`display: none`, detached, ...).
    pub fn hidden(mut self) -> Self {
        self.snapshot.visible = false;
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryDocument {
    url: String,
    title: String,
    controls: Vec<MemoryControl>,
    events: Vec<(ControlHandle, DomEvent)>,
}

impl MemoryDocument {
    pub fn new(url: &str, title: &str) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_control(mut self, control: MemoryControl) -> Self {
        self.push(control);
        self
    }

    pub fn push(&mut self, control: MemoryControl) -> ControlHandle {
        self.controls.push(control);
        ControlHandle(self.controls.len() - 1)
    }

    pub fn handle_of(&self, id: &str) -> Option<ControlHandle> {
        self.element_by_id(id)
    }

    pub fn value_of(&self, id: &str) -> Option<&str> {
        let handle = self.handle_of(id)?;
        Some(self.controls[handle.0].snapshot.value.as_str())
    }

    pub fn is_checked(&self, handle: ControlHandle) -> bool {
        self.controls
            .get(handle.0)
            .map(|control| control.snapshot.checked)
            .unwrap_or(false)
    }

    /// Events fired on `handle`, oldest first.
    pub fn events_for(&self, handle: ControlHandle) -> Vec<DomEvent> {
        self.events
            .iter()
            .filter(|(target, _)| *target == handle)
            .map(|(_, event)| *event)
            .collect()
    }

    pub fn events(&self) -> &[(ControlHandle, DomEvent)] {
        &self.events
    }

    fn check_exclusive(&mut self, handle: ControlHandle) {
        let group = self.controls[handle.0].snapshot.name.clone();
        for (index, control) in self.controls.iter_mut().enumerate() {
            let same_group = control.snapshot.input_type == "radio"
                && !group.is_empty()
                && control.snapshot.name == group;
            if index == handle.0 {
                control.snapshot.checked = true;
            } else if same_group {
                control.snapshot.checked = false;
            }
        }
    }
}

impl Document for MemoryDocument {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn controls(&self) -> Vec<ControlHandle> {
        (0..self.controls.len()).map(ControlHandle).collect()
    }

    fn snapshot(&self, handle: ControlHandle) -> Option<ControlSnapshot> {
        self.controls
            .get(handle.0)
            .map(|control| control.snapshot.clone())
    }

    fn options(&self, handle: ControlHandle) -> Vec<SelectOption> {
        self.controls
            .get(handle.0)
            .map(|control| control.options.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, handle: ControlHandle, value: &str) {
        let Some(control) = self.controls.get_mut(handle.0) else {
            return;
        };
        if control.snapshot.input_type == "select-one" {
            // A dropdown only takes values one of its options carries.
            let known = control.options.iter().any(|option| option.value == value);
            control.snapshot.value = if known { value.to_string() } else { String::new() };
        } else {
            control.snapshot.value = value.to_string();
        }
    }

    fn set_checked(&mut self, handle: ControlHandle, checked: bool) {
        let Some(control) = self.controls.get_mut(handle.0) else {
            return;
        };
        if checked && control.snapshot.input_type == "radio" {
            self.check_exclusive(handle);
        } else {
            control.snapshot.checked = checked;
        }
    }

    fn dispatch(&mut self, handle: ControlHandle, event: DomEvent) {
        if handle.0 >= self.controls.len() {
            return;
        }
        if event == DomEvent::Click {
            let input_type = self.controls[handle.0].snapshot.input_type.clone();
            match input_type.as_str() {
                "radio" => self.check_exclusive(handle),
                "checkbox" => {
                    let control = &mut self.controls[handle.0].snapshot;
                    control.checked = !control.checked;
                }
                _ => {}
            }
        }
        self.events.push((handle, event));
    }
}
