//! Bulk campaigns: recipients, templates, personalization and the batch run

mod builder;
mod errors;
mod pacer;
mod personalize;
mod recipients;
mod report;
mod service;
mod templates;

pub use builder::{MessageBuilder, Sender};
pub use errors::{DeliveryError, LoadError, MessageError};
pub use pacer::{Pacer, TokioPacer};
pub use personalize::{render, SENDER_NAME_PLACEHOLDER};
pub use recipients::{RecipientRecord, RecipientSource, ADDRESS_FIELD};
pub use report::{RunReport, CONNECT_FAILURE, LOAD_FAILURE};
pub use service::CampaignService;
pub use templates::{Template, TemplateSource};
