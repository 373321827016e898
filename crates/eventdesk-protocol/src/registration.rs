//! Registrations: one participant signed up for one event.

use serde::{Deserialize, Serialize};

use crate::{Extra, Reference, ResourceId};

/// A participant's registration.
///
/// Status values (`pending`, `confirmed`, `waitlisted`, `cancelled`,
/// `attended`) and payment states (`pending`, `paid`, `refunded`) are
/// decided by the server; the client only displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Registration {
    #[serde(rename = "_id")]
    pub id: ResourceId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<Participant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_in: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// The person behind a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Participant {
    /// "First Last" with missing parts skipped; empty if neither is set.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

serde_with_id!(Registration, "_id");
