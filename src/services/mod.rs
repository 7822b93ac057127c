// src/services/mod.rs

//! Course data source abstraction and its catalog-backed implementation.

pub mod catalog;
pub mod wire;

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Course;

// Re-export for convenience
pub use catalog::CatalogClient;

/// Trait for anything that can produce course snapshots.
///
/// Implementations are stateless per call and safe to share across
/// concurrently running monitor loops.
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Fetch the current snapshot of one course offering.
    ///
    /// Issues exactly one request, no retries. Zero matching records yield
    /// `CourseNotFound`; a failed or malformed remote call surfaces as a
    /// transport/parse error instead.
    async fn fetch_course(&self, course_code: &str, semester: &str) -> Result<Course>;

    /// Fetch all courses for the configured scope, keyed by composite key.
    ///
    /// When `wanted` is present and non-empty, the reply is filtered locally
    /// to those composite keys; otherwise everything is returned.
    async fn fetch_all(&self, wanted: Option<&HashSet<String>>)
        -> Result<HashMap<String, Course>>;

    /// Check that a (course, semester, activity) tuple exists before polling.
    ///
    /// Re-raises `CourseNotFound` verbatim; a missing activity surfaces as
    /// `InvalidActivity`.
    async fn validate_target(
        &self,
        course_code: &str,
        semester: &str,
        activity: &str,
    ) -> Result<()> {
        let course = self.fetch_course(course_code, semester).await?;
        course.get_activity(activity)?;
        Ok(())
    }
}
