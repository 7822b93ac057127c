// src/services/catalog.rs

//! Catalog-backed course source.
//!
//! Speaks the timetable search API: one JSON POST per fetch, parsed into
//! domain `Course` snapshots. Retry policy belongs to callers.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{CatalogConfig, Course};
use crate::services::wire::{SearchReply, SearchRequest};
use crate::services::CourseSource;
use crate::utils::http;

/// Course source backed by the remote timetable catalog.
pub struct CatalogClient {
    config: CatalogConfig,
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = http::create_client(&config)?;
        Ok(Self { config, client })
    }

    /// Issue one search request and decode the reply.
    ///
    /// Empty `course_code` and `semester` query the whole catalog.
    async fn search(&self, course_code: &str, semester: &str) -> Result<SearchReply> {
        let request = SearchRequest::new(course_code, semester, &self.config);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Accept", "application/json, text/plain, */*")
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let reply: SearchReply = serde_json::from_str(&body)?;
        Ok(reply)
    }
}

#[async_trait]
impl CourseSource for CatalogClient {
    async fn fetch_course(&self, course_code: &str, semester: &str) -> Result<Course> {
        let reply = self.search(course_code, semester).await?;

        let record = reply
            .payload
            .pageable_course
            .courses
            .into_iter()
            .next()
            .ok_or_else(|| AppError::course_not_found(course_code, semester))?;

        Ok(record.into_course())
    }

    async fn fetch_all(
        &self,
        wanted: Option<&HashSet<String>>,
    ) -> Result<HashMap<String, Course>> {
        let reply = self.search("", "").await?;

        // An empty wanted set means "no filter", same as absent
        let filter = wanted.filter(|keys| !keys.is_empty());

        let mut courses = HashMap::new();
        for record in reply.payload.pageable_course.courses {
            let course = record.into_course();
            let key = course.composite_key();
            if filter.is_none_or(|keys| keys.contains(&key)) {
                courses.insert(key, course);
            }
        }
        Ok(courses)
    }
}
