//! Backend endpoints.

mod cache;
pub mod endpoints;
mod school;

pub use cache::ReferenceCache;
pub use school::{
    AttendanceDetailsQuery, AttendanceSummaryQuery, EnrollmentQuery, ExamSessionQuery, SchoolApi,
};
