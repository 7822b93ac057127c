//! Course and activity snapshot structures.
//!
//! A `Course` is one point-in-time snapshot of a catalog reply. Snapshots are
//! never mutated after construction; each poll cycle builds a fresh one.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Category of a course section, parsed once from the section name prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Lecture,
    Tutorial,
    Practical,
    /// Section types the catalog may add later (e.g. labs)
    Other(String),
}

impl ActivityKind {
    /// Classify a section name by its known prefix.
    ///
    /// Falls back to `Other` with the leading alphabetic run so that new
    /// section types still round-trip through listings.
    pub fn from_section_name(name: &str) -> Self {
        if name.starts_with("LEC") {
            ActivityKind::Lecture
        } else if name.starts_with("TUT") {
            ActivityKind::Tutorial
        } else if name.starts_with("PRA") {
            ActivityKind::Practical
        } else {
            let prefix: String = name.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
            ActivityKind::Other(prefix)
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Lecture => write!(f, "lecture"),
            ActivityKind::Tutorial => write!(f, "tutorial"),
            ActivityKind::Practical => write!(f, "practical"),
            ActivityKind::Other(prefix) => write!(f, "other({prefix})"),
        }
    }
}

/// One schedulable section of a course at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Section name, unique within its course (e.g. "LEC0101")
    pub name: String,

    /// Section category, derived from the name at construction time
    pub kind: ActivityKind,

    /// Enrolled student count; may transiently exceed `max_enrollment`
    pub current_enrollment: u32,

    /// Seat capacity
    pub max_enrollment: u32,

    /// Enrollment is gated by an external approval process
    pub enrollment_controls_active: bool,

    /// Queued admissions; non-zero means seats are spoken for
    pub waitlist_count: u32,
}

impl Activity {
    pub fn new(
        name: impl Into<String>,
        current_enrollment: u32,
        max_enrollment: u32,
        enrollment_controls_active: bool,
        waitlist_count: u32,
    ) -> Self {
        let name = name.into();
        let kind = ActivityKind::from_section_name(&name);
        Self {
            name,
            kind,
            current_enrollment,
            max_enrollment,
            enrollment_controls_active,
            waitlist_count,
        }
    }

    /// Whether a seat can actually be taken right now.
    ///
    /// All three gates are independent: a numeric opening counts for nothing
    /// while enrollment controls are active or anyone is waitlisted.
    pub fn has_open_seat(&self) -> bool {
        self.current_enrollment < self.max_enrollment
            && !self.enrollment_controls_active
            && self.waitlist_count == 0
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {}/{} - {} waitlisted",
            self.name,
            self.kind,
            self.current_enrollment,
            self.max_enrollment,
            self.waitlist_count
        )
    }
}

/// One course offering and its sections, as of a single catalog reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Human-readable course title
    pub name: String,

    /// Course code (e.g. "CSC309H1")
    pub code: String,

    /// Semester / section code (e.g. "F")
    pub semester: String,

    /// Sections keyed by name, catalog order preserved
    activities: IndexMap<String, Activity>,
}

impl Course {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        semester: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            semester: semester.into(),
            activities: IndexMap::new(),
        }
    }

    /// Composite key identifying this offering (code + semester).
    pub fn composite_key(&self) -> String {
        format!("{}{}", self.code, self.semester)
    }

    /// Add a section during construction. Replaces any previous section with
    /// the same name.
    pub fn add_activity(&mut self, activity: Activity) {
        self.activities.insert(activity.name.clone(), activity);
    }

    /// Look up a section by its exact name.
    pub fn get_activity(&self, name: &str) -> Result<&Activity> {
        self.activities.get(name).ok_or_else(|| {
            AppError::invalid_activity(&self.code, &self.semester, name)
        })
    }

    /// Names of all sections, in catalog order.
    pub fn activity_names(&self) -> Vec<&str> {
        self.activities.keys().map(String::as_str).collect()
    }

    /// Names of all sections of the given kind.
    pub fn names_by_kind(&self, kind: &ActivityKind) -> Vec<&str> {
        self.activities
            .values()
            .filter(|a| a.kind == *kind)
            .map(|a| a.name.as_str())
            .collect()
    }

    /// Names of all sections whose name contains `pattern`.
    ///
    /// Substring variant kept for section types the catalog has not grown yet.
    pub fn names_matching(&self, pattern: &str) -> Vec<&str> {
        self.activities
            .keys()
            .filter(|name| name.contains(pattern))
            .map(String::as_str)
            .collect()
    }

    /// Iterate all sections in catalog order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.values()
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} - {} activities",
            self.name,
            self.code,
            self.semester,
            self.activities.len()
        )
    }
}
