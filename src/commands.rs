//! Inbound command set.
//!
//! A controller talks to the page through named actions; every request gets
//! exactly one response. Field-level problems never surface here.

use autofill_core_types::{Document, PageLabel, ValueBag};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::classifier;
use crate::detect::{self, DetectedField};
use crate::orchestrator::{FillReport, FormFiller};
use crate::roster::DependentRecord;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    FillForm {
        #[serde(default)]
        data: Option<ValueBag>,
    },
    DetectFields,
    GetPageInfo,
    FillDependentData {
        #[serde(default)]
        dependent: Option<DependentRecord>,
    },
}

impl Request {
    pub fn action(&self) -> &'static str {
        match self {
            Request::FillForm { .. } => "fillForm",
            Request::DetectFields => "detectFields",
            Request::GetPageInfo => "getPageInfo",
            Request::FillDependentData { .. } => "fillDependentData",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub url: String,
    pub title: String,
    pub page_type: PageLabel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Fields { fields: Vec<DetectedField> },
    PageInfo(PageInfo),
    Ack(Ack),
}

/// Serves requests against one page.
pub struct PageAgent<D: Document> {
    doc: D,
    filler: FormFiller,
    last_report: Option<FillReport>,
}

impl<D: Document> PageAgent<D> {
    pub fn new(doc: D, filler: FormFiller) -> Self {
        Self {
            doc,
            filler,
            last_report: None,
        }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    /// Swap in the document of a freshly navigated page.
    pub fn navigate(&mut self, doc: D) -> D {
        std::mem::replace(&mut self.doc, doc)
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    /// Report of the most recent fill, if any.
    pub fn last_report(&self) -> Option<&FillReport> {
        self.last_report.as_ref()
    }

    pub fn handle(&mut self, request: Request) -> Response {
        debug!(action = request.action(), "handling request");
        match request {
            Request::FillForm { data } => {
                match data {
                    Some(bag) => {
                        let label = self.page_label();
                        self.last_report = Some(self.filler.fill(&mut self.doc, label, &bag));
                    }
                    None => debug!("no data to fill"),
                }
                Response::Ack(Ack::ok())
            }
            Request::DetectFields => Response::Fields {
                fields: detect::detect_fields(&self.doc, self.filler.config().detect_option_preview),
            },
            Request::GetPageInfo => Response::PageInfo(PageInfo {
                url: self.doc.url(),
                title: self.doc.title(),
                page_type: self.page_label(),
            }),
            Request::FillDependentData { dependent } => match dependent {
                Some(record) => {
                    self.last_report = Some(self.filler.fill_dependent(&mut self.doc, &record));
                    Response::Ack(Ack::ok())
                }
                None => Response::Ack(Ack::failed("No dependent data provided")),
            },
        }
    }

    /// Decode a raw JSON request and handle it.
    pub fn handle_value(&mut self, raw: Value) -> Response {
        match serde_json::from_value::<Request>(raw) {
            Ok(request) => self.handle(request),
            Err(err) => {
                warn!(error = %err, "rejected malformed request");
                Response::Ack(Ack::failed(format!("Unsupported request: {err}")))
            }
        }
    }

    fn page_label(&self) -> PageLabel {
        classifier::classify(&self.doc.url(), &self.doc.title())
    }
}
