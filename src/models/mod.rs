//! Data models for Smart VMS

pub mod pass;
pub mod visitor;

// Re-export commonly used types
pub use pass::VisitorPass;
pub use visitor::{
    CreatePreApproval, CreateVisitor, StatusFilter, Visitor, VisitorPatch, VisitorQuery,
    VisitorStatus,
};
