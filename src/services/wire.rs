// src/services/wire.rs

//! Wire-format types for the timetable catalog API.
//!
//! The reply nests course records under `payload.pageableCourse.courses`.
//! Only the fields the monitor needs are declared; everything else in the
//! reply is ignored.

use serde::{Deserialize, Serialize};

use crate::models::{Activity, CatalogConfig, Course};

/// Search request body, built fresh per call.
///
/// The catalog expects every filter key to be present even when empty, so the
/// unused ones serialize as empty lists/strings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    course_code_and_title_props: CourseCodeAndTitleProps,
    department_props: Vec<String>,
    campuses: Vec<String>,
    sessions: Vec<String>,
    requirement_props: Vec<String>,
    instructor: String,
    course_levels: Vec<String>,
    delivery_modes: Vec<String>,
    day_preferences: Vec<String>,
    time_preferences: Vec<String>,
    divisions: Vec<String>,
    credit_weights: Vec<String>,
    page: u32,
    page_size: u32,
    direction: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseCodeAndTitleProps {
    course_code: String,
    course_title: String,
    course_section_code: String,
    search_course_description: bool,
}

impl SearchRequest {
    /// Build a request scoped to one course code and semester.
    ///
    /// Empty `course_code` and `semester` mean "the whole catalog for the
    /// configured sessions".
    pub fn new(course_code: &str, semester: &str, config: &CatalogConfig) -> Self {
        Self {
            course_code_and_title_props: CourseCodeAndTitleProps {
                course_code: course_code.to_string(),
                course_title: String::new(),
                course_section_code: semester.to_string(),
                search_course_description: false,
            },
            department_props: Vec::new(),
            campuses: Vec::new(),
            sessions: config.sessions.clone(),
            requirement_props: Vec::new(),
            instructor: String::new(),
            course_levels: Vec::new(),
            delivery_modes: Vec::new(),
            day_preferences: Vec::new(),
            time_preferences: Vec::new(),
            divisions: config.divisions.clone(),
            credit_weights: Vec::new(),
            page: 1,
            page_size: config.page_size,
            direction: "asc".to_string(),
        }
    }
}

/// Top-level search reply.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchReply {
    pub payload: Payload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub pageable_course: PageableCourse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageableCourse {
    #[serde(default)]
    pub courses: Vec<CourseRecord>,
}

/// One course record in a reply.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub name: String,
    pub code: String,
    pub section_code: String,
    #[serde(default)]
    pub sections: Vec<SectionRecord>,
}

/// One section record in a course.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    pub name: String,
    pub current_enrolment: u32,
    pub max_enrolment: u32,

    /// "N" means enrollment is not gated; any other value means it is
    pub open_limit_ind: String,

    /// Absent in some replies, which means nobody is waitlisted
    #[serde(default)]
    pub current_waitlist: u32,
}

impl CourseRecord {
    /// Build a domain `Course` from this record.
    pub fn into_course(self) -> Course {
        let mut course = Course::new(self.name, self.code, self.section_code);
        for section in self.sections {
            course.add_activity(Activity::new(
                section.name,
                section.current_enrolment,
                section.max_enrolment,
                section.open_limit_ind != "N",
                section.current_waitlist,
            ));
        }
        course
    }
}
