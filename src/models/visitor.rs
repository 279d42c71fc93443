//! Visitor model
//!
//! One record per visit: a returning person gets a new record (and a new
//! pass id) on every visit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Lifecycle state of a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum VisitorStatus {
    /// Inside the society
    CheckedIn,
    /// Left the society; terminal
    CheckedOut,
    /// Expected visitor registered ahead of arrival
    PreApproved,
}

impl VisitorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorStatus::CheckedIn => "checked-in",
            VisitorStatus::CheckedOut => "checked-out",
            VisitorStatus::PreApproved => "pre-approved",
        }
    }
}

impl std::fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visitor record, as persisted in the visitor collection slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    /// Pass id, also the QR payload (e.g. VIS1760601512000)
    pub id: String,
    pub name: String,
    /// National identity card number
    pub cnic: String,
    pub contact: String,
    pub purpose: String,
    pub house_number: String,
    pub resident_name: String,
    /// Encoded image captured at the gate; empty for pre-approvals
    #[serde(default)]
    pub photo: String,
    pub status: VisitorStatus,
    pub check_in_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pre_approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
}

impl Visitor {
    /// Build the patch for the `checked-in -> checked-out` transition.
    ///
    /// A visitor already checked out keeps its first check-out time; the
    /// second attempt is rejected. Pre-approved visitors have no arrival
    /// step yet, so they cannot be checked out either.
    pub fn check_out_patch(&self, at: DateTime<Utc>) -> AppResult<VisitorPatch> {
        match self.status {
            VisitorStatus::CheckedIn => Ok(VisitorPatch {
                status: Some(VisitorStatus::CheckedOut),
                check_out_time: Some(at),
                ..Default::default()
            }),
            VisitorStatus::CheckedOut => Err(AppError::Conflict(
                "This visitor has already checked out".to_string(),
            )),
            VisitorStatus::PreApproved => Err(AppError::Conflict(
                "Pre-approved visitor has not checked in yet".to_string(),
            )),
        }
    }

    /// Minutes between check-in and check-out, truncated toward zero
    pub fn stay_minutes(&self) -> Option<i64> {
        self.check_out_time
            .map(|out| (out - self.check_in_time).num_minutes())
    }
}

/// Field-level patch merged into a stored visitor.
///
/// `id` and `check_in_time` are absent on purpose: neither may change after
/// creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitorPatch {
    pub name: Option<String>,
    pub cnic: Option<String>,
    pub contact: Option<String>,
    pub purpose: Option<String>,
    pub house_number: Option<String>,
    pub resident_name: Option<String>,
    pub photo: Option<String>,
    pub status: Option<VisitorStatus>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub pre_approved: Option<bool>,
    pub approved_by: Option<String>,
}

impl VisitorPatch {
    /// Shallow overwrite: every field set in the patch replaces the stored one
    pub fn apply_to(&self, visitor: &mut Visitor) {
        if let Some(ref v) = self.name {
            visitor.name = v.clone();
        }
        if let Some(ref v) = self.cnic {
            visitor.cnic = v.clone();
        }
        if let Some(ref v) = self.contact {
            visitor.contact = v.clone();
        }
        if let Some(ref v) = self.purpose {
            visitor.purpose = v.clone();
        }
        if let Some(ref v) = self.house_number {
            visitor.house_number = v.clone();
        }
        if let Some(ref v) = self.resident_name {
            visitor.resident_name = v.clone();
        }
        if let Some(ref v) = self.photo {
            visitor.photo = v.clone();
        }
        if let Some(v) = self.status {
            visitor.status = v;
        }
        if let Some(v) = self.check_out_time {
            visitor.check_out_time = Some(v);
        }
        if let Some(v) = self.pre_approved {
            visitor.pre_approved = v;
        }
        if let Some(ref v) = self.approved_by {
            visitor.approved_by = Some(v.clone());
        }
    }
}

/// Register visitor request (walk-in at the gate)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitor {
    #[validate(length(min = 1, message = "Visitor name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "CNIC is required"))]
    pub cnic: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact: String,
    #[validate(length(min = 1, message = "Purpose of visit is required"))]
    pub purpose: String,
    #[validate(length(min = 1, message = "House number is required"))]
    pub house_number: String,
    #[validate(length(min = 1, message = "Resident name is required"))]
    pub resident_name: String,
    /// Encoded image from the gate camera
    #[validate(length(min = 1, message = "Please capture visitor photo"))]
    #[serde(default)]
    pub photo: String,
}

impl CreateVisitor {
    /// Trim surrounding whitespace so blank fields fail validation
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            cnic: self.cnic.trim().to_string(),
            contact: self.contact.trim().to_string(),
            purpose: self.purpose.trim().to_string(),
            house_number: self.house_number.trim().to_string(),
            resident_name: self.resident_name.trim().to_string(),
            photo: self.photo.trim().to_string(),
        }
    }
}

/// Pre-approve visitor request (resident expecting a guest)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreApproval {
    #[validate(length(min = 1, message = "Visitor name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "CNIC is required"))]
    pub cnic: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact: String,
    #[validate(length(min = 1, message = "House number is required"))]
    pub house_number: String,
    #[validate(length(min = 1, message = "Resident name is required"))]
    pub resident_name: String,
    /// Name of the person approving the visit
    #[validate(length(min = 1, message = "Approver name is required"))]
    pub approved_by: String,
}

impl CreatePreApproval {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            cnic: self.cnic.trim().to_string(),
            contact: self.contact.trim().to_string(),
            house_number: self.house_number.trim().to_string(),
            resident_name: self.resident_name.trim().to_string(),
            approved_by: self.approved_by.trim().to_string(),
        }
    }
}

/// Status filter of the visitor log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    CheckedIn,
    CheckedOut,
    PreApproved,
}

impl StatusFilter {
    pub fn matches(self, status: VisitorStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::CheckedIn => status == VisitorStatus::CheckedIn,
            StatusFilter::CheckedOut => status == VisitorStatus::CheckedOut,
            StatusFilter::PreApproved => status == VisitorStatus::PreApproved,
        }
    }
}

/// Query parameters for the visitor log and CSV export
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct VisitorQuery {
    /// Matches name, house number and pass id (case-insensitive) or CNIC (exact substring)
    pub search: Option<String>,
    /// Status filter (all, checked-in, checked-out, pre-approved)
    pub status: Option<StatusFilter>,
}
