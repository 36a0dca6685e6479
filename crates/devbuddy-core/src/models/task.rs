//! Task model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::category::DEFAULT_CATEGORY_ID;
use crate::storage::{
    lenient_bool, lenient_string_list, lenient_text, lenient_timestamp, lenient_value_list,
};
use crate::util::{generate_id, normalize_text_option, parse_iso_datetime};

/// Task priority, lowest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Every priority in ascending order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            other => Err(Error::InvalidInput(format!(
                "Unknown priority '{other}' (expected low, medium, high or urgent)"
            ))),
        }
    }
}

/// A to-do item filed under one category.
///
/// The `category` field mirrors the file the task lives in and is rewritten
/// on every load. A record without an `id` deserializes with an empty id;
/// the tasks service assigns one and writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TaskRecord")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub priority: Priority,
    pub category: String,
    /// ISO date or date-time
    pub due_date: Option<String>,
    /// Opaque reminder payloads
    pub reminders: Vec<serde_json::Value>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a new, incomplete task. `category` is the resolved target.
    #[must_use]
    pub fn from_input(input: NewTask, category: String) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: input.title.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            completed: false,
            priority: input.priority.unwrap_or_default(),
            category,
            due_date: normalize_text_option(input.due_date),
            reminders: input.reminders,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Parsed due date; date-only values are midnight UTC.
    #[must_use]
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(parse_iso_datetime)
    }

    /// Incomplete and due strictly before `now`.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_at().is_some_and(|due| due < now)
    }

    /// Incomplete and due on the UTC calendar day of `now`.
    #[must_use]
    pub fn is_due_today_at(&self, now: DateTime<Utc>) -> bool {
        let today = now.format("%Y-%m-%d").to_string();
        !self.completed
            && self
                .due_date
                .as_deref()
                .is_some_and(|due| due.starts_with(&today))
    }
}

/// Input for creating a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    /// Target category; `general` when absent
    pub category: Option<String>,
    pub due_date: Option<String>,
    #[serde(default)]
    pub reminders: Vec<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTask {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Requested category id, defaulting to `general`.
    #[must_use]
    pub fn category_id(&self) -> String {
        normalize_text_option(self.category.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY_ID.to_string())
    }
}

/// Partial update of a task.
///
/// `due_date` distinguishes "leave unchanged" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub due_date: Option<Option<String>>,
    pub reminders: Option<Vec<serde_json::Value>>,
    pub tags: Option<Vec<String>>,
}

impl TaskUpdate {
    /// Apply every field except `category`, which the service resolves.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = normalize_text_option(due_date);
        }
        if let Some(reminders) = self.reminders {
            task.reminders = reminders;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        task.updated_at = Utc::now();
    }
}

/// Aggregate counters over every task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
    pub due_today: usize,
    /// Rounded percentage of completed tasks, 0 when there are none
    pub completion_rate: u32,
    pub total_categories: usize,
}

impl TaskStats {
    /// Compute stats for `tasks` as of `now`.
    #[must_use]
    pub fn collect(tasks: &[Task], total_categories: usize, now: DateTime<Utc>) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total,
            completed,
            pending: total - completed,
            overdue: tasks.iter().filter(|task| task.is_overdue_at(now)).count(),
            due_today: tasks.iter().filter(|task| task.is_due_today_at(now)).count(),
            completion_rate: completion_rate(completed, total),
            total_categories,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    completed: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_value_list")]
    reminders: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        let now = Utc::now();
        Self {
            id: normalize_text_option(record.id).unwrap_or_default(),
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            completed: record.completed,
            priority: record
                .priority
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
            category: normalize_text_option(record.category)
                .unwrap_or_else(|| DEFAULT_CATEGORY_ID.to_string()),
            due_date: normalize_text_option(record.due_date),
            reminders: record.reminders,
            tags: record.tags,
            created_at: record.created_at.unwrap_or(now),
            updated_at: record.updated_at.unwrap_or(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn task_due(due: Option<&str>, completed: bool) -> Task {
        let mut task = Task::from_input(
            NewTask {
                due_date: due.map(str::to_string),
                ..NewTask::titled("Ship")
            },
            "general".to_string(),
        );
        task.completed = completed;
        task
    }

    fn noon(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("critical".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn from_input_applies_defaults() {
        let task = Task::from_input(NewTask::default(), "general".to_string());
        assert_eq!(task.title, "");
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
        assert_eq!(task.due_date, None);
        assert!(task.reminders.is_empty());
    }

    #[test]
    fn overdue_requires_past_due_and_incomplete() {
        assert!(task_due(Some("2024-05-01"), false).is_overdue_at(noon(2)));
        assert!(!task_due(Some("2024-05-01"), true).is_overdue_at(noon(2)));
        assert!(!task_due(Some("2024-05-03"), false).is_overdue_at(noon(2)));
        assert!(!task_due(None, false).is_overdue_at(noon(2)));
        assert!(!task_due(Some("someday"), false).is_overdue_at(noon(2)));
    }

    #[test]
    fn date_only_due_today_is_already_overdue_after_midnight() {
        let task = task_due(Some("2024-05-02"), false);
        assert!(task.is_due_today_at(noon(2)));
        assert!(task.is_overdue_at(noon(2)));
    }

    #[test]
    fn due_today_matches_date_prefix() {
        assert!(task_due(Some("2024-05-02T18:00:00.000Z"), false).is_due_today_at(noon(2)));
        assert!(!task_due(Some("2024-05-03"), false).is_due_today_at(noon(2)));
        assert!(!task_due(Some("2024-05-02"), true).is_due_today_at(noon(2)));
    }

    #[test]
    fn update_can_clear_due_date() {
        let mut task = task_due(Some("2024-05-02"), false);
        TaskUpdate {
            due_date: Some(None),
            completed: Some(true),
            ..TaskUpdate::default()
        }
        .apply_to(&mut task);
        assert_eq!(task.due_date, None);
        assert!(task.completed);
        assert_eq!(task.title, "Ship");
    }

    #[test]
    fn deserialize_repairs_bad_values() {
        let task: Task = serde_yaml::from_str(
            "title: Fix build\npriority: critical\ncompleted: 'yes'\nreminders: soon\ndueDate: ''\n",
        )
        .unwrap();
        assert!(task.id.is_empty());
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
        assert!(task.reminders.is_empty());
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn stats_round_completion_rate() {
        let mut tasks = (0..10).map(|_| task_due(None, false)).collect::<Vec<_>>();
        for task in tasks.iter_mut().take(4) {
            task.completed = true;
        }
        let stats = TaskStats::collect(&tasks, 2, noon(2));
        assert_eq!(stats.total, 10);
        assert_eq!(stats.completed, 4);
        assert_eq!(stats.pending, 6);
        assert_eq!(stats.completion_rate, 40);
        assert_eq!(stats.total_categories, 2);

        assert_eq!(TaskStats::collect(&[], 1, noon(2)).completion_rate, 0);
    }

    #[test]
    fn stats_serialize_camel_case() {
        let json = serde_json::to_value(TaskStats::default()).unwrap();
        assert!(json.get("dueToday").is_some());
        assert!(json.get("completionRate").is_some());
        assert!(json.get("totalCategories").is_some());
    }
}
