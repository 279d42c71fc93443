//! Visitor flows: registration, pre-approval, check-out, log and export

use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult, StorageError},
    export,
    models::{
        visitor::{CreatePreApproval, CreateVisitor, Visitor, VisitorQuery, VisitorStatus},
        VisitorPass,
    },
    repository::Repository,
    search,
};

/// Pass id prefix of walk-in registrations
pub const VISITOR_ID_PREFIX: &str = "VIS";
/// Pass id prefix of pre-approvals
pub const PRE_APPROVAL_ID_PREFIX: &str = "PRE";
/// Purpose recorded on pre-approved visits
pub const PRE_APPROVED_PURPOSE: &str = "Pre-approved visit";

/// Issues `<prefix><epoch millis>` pass ids.
///
/// The millisecond part never repeats within a process: a second request in
/// the same millisecond gets the next value.
#[derive(Debug, Default)]
pub struct PassIdGenerator {
    last_millis: AtomicI64,
}

impl PassIdGenerator {
    pub fn next_id(&self, prefix: &str, now: DateTime<Utc>) -> String {
        let wanted = now.timestamp_millis();
        let mut last = self.last_millis.load(Ordering::Acquire);
        loop {
            let next = wanted.max(last + 1);
            match self.last_millis.compare_exchange_weak(
                last,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return format!("{}{}", prefix, next),
                Err(current) => last = current,
            }
        }
    }
}

/// Filtered visitor log
#[derive(Debug, Serialize, ToSchema)]
pub struct VisitorLog {
    /// Matching visitors, newest first
    pub visitors: Vec<Visitor>,
    /// Number of matching visitors
    pub showing: usize,
    /// Number of visitors in the whole collection
    pub total: usize,
}

#[derive(Clone)]
pub struct VisitorsService {
    repository: Repository,
    ids: Arc<PassIdGenerator>,
}

impl VisitorsService {
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            ids: Arc::new(PassIdGenerator::default()),
        }
    }

    /// Register a walk-in visitor; the record starts checked in at `now`
    pub fn register(&self, data: CreateVisitor, now: DateTime<Utc>) -> AppResult<Visitor> {
        let data = data.normalized();
        data.validate()?;

        let visitor = Visitor {
            id: self.ids.next_id(VISITOR_ID_PREFIX, now),
            name: data.name,
            cnic: data.cnic,
            contact: data.contact,
            purpose: data.purpose,
            house_number: data.house_number,
            resident_name: data.resident_name,
            photo: data.photo,
            status: VisitorStatus::CheckedIn,
            check_in_time: now,
            check_out_time: None,
            pre_approved: false,
            approved_by: None,
        };

        self.repository.visitors.create(&visitor)?;
        tracing::info!(id = %visitor.id, house = %visitor.house_number, "Visitor registered");
        Ok(visitor)
    }

    /// Register an expected visitor ahead of arrival, without a photo
    pub fn pre_approve(&self, data: CreatePreApproval, now: DateTime<Utc>) -> AppResult<Visitor> {
        let data = data.normalized();
        data.validate()?;

        let visitor = Visitor {
            id: self.ids.next_id(PRE_APPROVAL_ID_PREFIX, now),
            name: data.name,
            cnic: data.cnic,
            contact: data.contact,
            purpose: PRE_APPROVED_PURPOSE.to_string(),
            house_number: data.house_number,
            resident_name: data.resident_name,
            photo: String::new(),
            status: VisitorStatus::PreApproved,
            check_in_time: now,
            check_out_time: None,
            pre_approved: true,
            approved_by: Some(data.approved_by),
        };

        self.repository.visitors.create(&visitor)?;
        tracing::info!(
            id = %visitor.id,
            approved_by = visitor.approved_by.as_deref().unwrap_or_default(),
            "Visitor pre-approved"
        );
        Ok(visitor)
    }

    /// Look a visitor up by pass id
    pub fn get(&self, id: &str) -> AppResult<Visitor> {
        self.repository
            .visitors
            .get_by_id(id)
            .ok_or_else(|| AppError::NotFound("Visitor not found. Please check the pass ID".to_string()))
    }

    /// Check out the visitor holding the presented pass id
    pub fn check_out(&self, pass_id: &str, now: DateTime<Utc>) -> AppResult<Visitor> {
        let pass_id = pass_id.trim();
        if pass_id.is_empty() {
            return Err(AppError::Validation("Please enter a pass ID".to_string()));
        }

        // Status is checked against the record as stored at write time
        let updated = self
            .repository
            .visitors
            .update_with(pass_id, |visitor| {
                visitor.check_out_patch(now).map_err(|e| {
                    tracing::warn!(id = %visitor.id, status = %visitor.status, "Check-out rejected");
                    e
                })
            })?
            .ok_or_else(|| AppError::NotFound("Visitor not found. Please check the pass ID".to_string()))?;

        tracing::info!(id = %updated.id, "Visitor checked out");
        Ok(updated)
    }

    /// Pass artifact for printing
    pub fn pass(&self, id: &str) -> AppResult<VisitorPass> {
        self.get(id).map(|v| VisitorPass::from(&v))
    }

    /// Visitor log: search and status filter, newest first
    pub fn log(&self, query: &VisitorQuery) -> VisitorLog {
        let all = self.repository.visitors.list();
        let total = all.len();
        let visitors = search::newest_first(Self::filtered(&all, query));
        VisitorLog {
            showing: visitors.len(),
            total,
            visitors,
        }
    }

    /// Pre-approved visitors that have not left yet
    pub fn pending_pre_approvals(&self) -> Vec<Visitor> {
        search::pending_pre_approvals(&self.repository.visitors.list())
    }

    /// CSV of the filtered log, newest first, timestamps in server local time
    pub fn export_csv(&self, query: &VisitorQuery) -> String {
        let all = self.repository.visitors.list();
        let rows = search::newest_first(Self::filtered(&all, query));
        export::visitors_to_csv(&rows, &Local)
    }

    /// Erase every visitor record
    pub fn clear(&self) -> AppResult<()> {
        self.repository.visitors.clear()?;
        tracing::warn!("All visitor data cleared");
        Ok(())
    }

    /// Whether the visitor slot can be read
    pub fn check_storage(&self) -> Result<(), StorageError> {
        self.repository.visitors.check_readable()
    }

    fn filtered(all: &[Visitor], query: &VisitorQuery) -> Vec<Visitor> {
        search::filter_visitors(
            all,
            query.search.as_deref().unwrap_or_default(),
            query.status.unwrap_or_default(),
        )
    }
}
