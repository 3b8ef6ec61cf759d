use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Payload of `/direct/assignment/my.json`.
#[derive(Deserialize, Clone, Debug)]
pub struct AssignmentCollection {
    pub assignment_collection: Vec<RawAssignment>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RawAssignment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub instructions: Option<String>,
    /// lesson (site) the assignment belongs to
    pub context: String,
    #[serde(rename = "dueTime")]
    pub due_time: EpochTime,
    #[serde(rename = "closeTime")]
    pub close_time: EpochTime,
}

/// Sakai time object, `time` is milliseconds since the unix epoch.
///
/// Values outside the range `chrono` can represent fail to decode.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct EpochTime {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub time: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FlatAssignment {
    pub assignment_id: String,
    pub assignment_name: String,
    pub lesson_id: String,
    pub instructions: String,
    /// RFC 3339, UTC
    pub due_time: String,
    /// milliseconds since the unix epoch
    pub close_time: i64,
}

impl FlatAssignment {
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.due_time)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    pub fn close_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.close_time)
    }
}

impl From<RawAssignment> for FlatAssignment {
    fn from(value: RawAssignment) -> Self {
        Self {
            assignment_id: value.id,
            assignment_name: value.title,
            lesson_id: value.context,
            instructions: value.instructions.unwrap_or_default(),
            due_time: value
                .due_time
                .time
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            close_time: value.close_time.time.timestamp_millis(),
        }
    }
}

/// Lesson identifiers in first-seen order, each one once.
pub fn distinct_lesson_ids(assignments: &[FlatAssignment]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut lesson_ids = Vec::new();

    for assignment in assignments {
        if seen.insert(assignment.lesson_id.as_str()) {
            lesson_ids.push(assignment.lesson_id.clone());
        }
    }

    lesson_ids
}

/// Normalised assignments along with the lessons they reference.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AssignmentReport {
    pub assignments: Vec<FlatAssignment>,
    pub lesson_ids: Vec<String>,
}

impl AssignmentReport {
    pub fn assignments_for<'a>(
        &'a self,
        lesson_id: &'a str,
    ) -> impl Iterator<Item = &'a FlatAssignment> + 'a {
        self.assignments
            .iter()
            .filter(move |a| a.lesson_id == lesson_id)
    }

    pub fn into_parts(self) -> (Vec<FlatAssignment>, Vec<String>) {
        (self.assignments, self.lesson_ids)
    }
}

impl From<AssignmentCollection> for AssignmentReport {
    fn from(value: AssignmentCollection) -> Self {
        let assignments: Vec<FlatAssignment> = value
            .assignment_collection
            .into_iter()
            .map(FlatAssignment::from)
            .collect();
        let lesson_ids = distinct_lesson_ids(&assignments);

        Self {
            assignments,
            lesson_ids,
        }
    }
}
