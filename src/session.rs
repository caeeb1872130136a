//! Long-lived holder of the loaded value bag.
//!
//! One instance per operator session. It owns the bag, the dependent
//! snapshots taken at load time and the storage handle.

use std::sync::Arc;

use autofill_core_types::ValueBag;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::FillerConfig;
use crate::errors::{AutofillError, Result};
use crate::roster::{self, DependentRecord, Roster, MAIN_APPLICANT_ID};
use crate::storage::StoragePort;

const SELECTED_PERSON_KEY: &str = "selectedPersonId";

pub struct AutofillSession {
    config: Arc<FillerConfig>,
    storage: Arc<dyn StoragePort>,
    data: Option<ValueBag>,
    dependents: Vec<DependentRecord>,
}

impl AutofillSession {
    pub fn new(config: Arc<FillerConfig>, storage: Arc<dyn StoragePort>) -> Self {
        Self {
            config,
            storage,
            data: None,
            dependents: Vec::new(),
        }
    }

    /// Parse operator-pasted JSON, persist it and snapshot the dependents.
    /// Nothing changes when the text is rejected.
    pub async fn load_text(&mut self, text: &str) -> Result<Roster> {
        let bag = roster::parse_value_bag(text)?;
        self.load_bag(bag).await
    }

    pub async fn load_bag(&mut self, bag: ValueBag) -> Result<Roster> {
        self.storage
            .set(&self.config.storage_key, Value::Object(bag.clone()))
            .await?;
        self.install(bag);
        let roster = self.roster();
        info!(summary = %roster.summary(), "value bag loaded");
        Ok(roster)
    }

    /// Restore the bag saved by an earlier load. Returns whether one was
    /// found.
    pub async fn load_from_storage(&mut self) -> Result<bool> {
        match self.storage.get(&self.config.storage_key).await? {
            Some(Value::Object(bag)) => {
                self.install(bag);
                debug!(dependents = self.dependents.len(), "restored value bag");
                Ok(true)
            }
            Some(_) => Err(AutofillError::Storage(format!(
                "'{}' does not hold an object",
                self.config.storage_key
            ))),
            None => Ok(false),
        }
    }

    pub async fn clear(&mut self) -> Result<()> {
        self.storage.remove(&self.config.storage_key).await?;
        self.storage.remove(SELECTED_PERSON_KEY).await?;
        self.data = None;
        self.dependents.clear();
        Ok(())
    }

    pub fn data(&self) -> Option<&ValueBag> {
        self.data.as_ref()
    }

    pub fn dependents(&self) -> &[DependentRecord] {
        &self.dependents
    }

    pub fn dependent(&self, id: &str) -> Option<&DependentRecord> {
        self.dependents.iter().find(|dependent| dependent.id == id)
    }

    pub fn roster(&self) -> Roster {
        match &self.data {
            Some(bag) => roster::roster(bag, &self.dependents),
            None => Roster::default(),
        }
    }

    /// The bag to fill for one roster entry.
    pub fn person_bag(&self, person_id: &str) -> Result<ValueBag> {
        let data = self
            .data
            .as_ref()
            .ok_or_else(|| AutofillError::NotFound("No data loaded".into()))?;
        if person_id == MAIN_APPLICANT_ID {
            return Ok(roster::applicant_bag(data).clone());
        }
        self.dependent(person_id)
            .map(DependentRecord::to_bag)
            .ok_or_else(|| AutofillError::NotFound("Person data not found".into()))
    }

    /// Remember the operator's roster choice across restarts.
    pub async fn select_person(&self, person_id: &str) -> Result<()> {
        self.storage
            .set(SELECTED_PERSON_KEY, Value::String(person_id.to_string()))
            .await
    }

    pub async fn selected_person(&self) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(SELECTED_PERSON_KEY)
            .await?
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    fn install(&mut self, bag: ValueBag) {
        self.dependents = roster::extract_dependents(&bag, &self.config.dependents_key);
        self.data = Some(bag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn session(storage: &MemoryStorage) -> AutofillSession {
        AutofillSession::new(
            Arc::new(FillerConfig::default()),
            Arc::new(storage.clone()),
        )
    }

    const DATA: &str = r#"{
        "applicant": {"atlas_first_name": "Jane", "atlas_last_name": "Doe"},
        "dependents": [
            {"id": "d1", "displayName": "Tom Doe", "atlas_first_name": "Tom"}
        ]
    }"#;

    #[tokio::test]
    async fn loaded_text_is_persisted_and_restorable() {
        let storage = MemoryStorage::new();
        let roster = session(&storage).load_text(DATA).await.unwrap();
        assert_eq!(roster.persons.len(), 2);

        let mut restored = session(&storage);
        assert!(restored.load_from_storage().await.unwrap());
        assert_eq!(restored.dependents().len(), 1);
        assert_eq!(
            restored.person_bag("main_applicant").unwrap()["atlas_first_name"],
            json!("Jane")
        );
        let dependent = restored.person_bag("d1").unwrap();
        assert_eq!(dependent["atlas_first_name"], json!("Tom"));
        assert_eq!(dependent["displayName"], json!("Tom Doe"));
    }

    #[tokio::test]
    async fn rejected_text_leaves_state_untouched() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session.load_text(DATA).await.unwrap();
        let err = session.load_text("{oops").await.unwrap_err();
        assert!(matches!(err, AutofillError::InvalidInput(_)));
        assert_eq!(session.dependents().len(), 1);
    }

    #[tokio::test]
    async fn dependents_are_snapshots() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session.load_text(DATA).await.unwrap();
        storage
            .set("visaData", json!({"dependents": []}))
            .await
            .unwrap();
        assert!(session.dependent("d1").is_some());
    }

    #[tokio::test]
    async fn unknown_person_is_not_found() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        assert!(session.person_bag("main_applicant").is_err());
        session.load_text(DATA).await.unwrap();
        assert_eq!(
            session.person_bag("nobody").unwrap_err(),
            AutofillError::NotFound("Person data not found".into())
        );
    }

    #[tokio::test]
    async fn clear_forgets_data_and_selection() {
        let storage = MemoryStorage::new();
        let mut session = session(&storage);
        session.load_text(DATA).await.unwrap();
        session.select_person("d1").await.unwrap();
        assert_eq!(session.selected_person().await.unwrap().as_deref(), Some("d1"));
        session.clear().await.unwrap();
        assert!(session.data().is_none());
        assert!(storage.is_empty());
        assert!(!session.load_from_storage().await.unwrap());
    }
}
