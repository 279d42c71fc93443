//! Visitor pass artifact handed to the pass renderer

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::visitor::Visitor;

/// Printable pass for one visit
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitorPass {
    pub id: String,
    pub name: String,
    pub cnic: String,
    pub contact: String,
    pub house_number: String,
    pub resident_name: String,
    pub purpose: String,
    pub check_in_time: DateTime<Utc>,
    pub photo: String,
    /// Payload of the scannable code; presented back at check-out
    pub qr_payload: String,
}

impl From<&Visitor> for VisitorPass {
    fn from(visitor: &Visitor) -> Self {
        Self {
            id: visitor.id.clone(),
            name: visitor.name.clone(),
            cnic: visitor.cnic.clone(),
            contact: visitor.contact.clone(),
            house_number: visitor.house_number.clone(),
            resident_name: visitor.resident_name.clone(),
            purpose: visitor.purpose.clone(),
            check_in_time: visitor.check_in_time,
            photo: visitor.photo.clone(),
            qr_payload: visitor.id.clone(),
        }
    }
}
