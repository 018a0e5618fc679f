use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Numeric rank for sorting: higher means more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

/// Invariant: `completed_at` is set iff `status == Done`. Status only changes
/// through `set_status`/`mark_done`/`mark_pending`, which keep the pair
/// coupled and bump `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Marking an already-done task done again keeps the original
    /// `completed_at`; only `updated_at` moves.
    pub fn mark_done(&mut self, now: DateTime<Utc>) {
        if self.status != TaskStatus::Done {
            self.completed_at = Some(now);
        }
        self.status = TaskStatus::Done;
        self.updated_at = now;
    }

    pub fn mark_pending(&mut self, now: DateTime<Utc>) {
        self.set_status(TaskStatus::Pending, now);
    }

    pub fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        match status {
            TaskStatus::Done => self.mark_done(now),
            other => {
                self.completed_at = None;
                self.status = other;
                self.updated_at = now;
            }
        }
    }
}

/// Fields the caller supplies at creation. Status is not among them: every
/// task starts `pending`.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub tags: Vec<String>,
}

impl Default for NewTask {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            priority: TaskPriority::Medium,
            due_date: None,
            tags: Vec::new(),
        }
    }
}

/// Partial update. Outer `None` leaves a field unchanged; for clearable
/// fields, `Some(None)` clears.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn status_only(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.tags.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Task {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        Task {
            id: "01ARZ3NDEKTSV4RRFFQ69G5FAV".into(),
            owner_id: "alice".into(),
            title: "Write report".into(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
            tags: vec![],
            created_at: t0,
            updated_at: t0,
            completed_at: None,
        }
    }

    fn coupled(t: &Task) -> bool {
        t.completed_at.is_some() == (t.status == TaskStatus::Done)
    }

    #[test]
    fn test_mark_done_sets_completed_at() {
        let mut t = sample();
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
        t.mark_done(now);
        assert_eq!(t.status, TaskStatus::Done);
        assert_eq!(t.completed_at, Some(now));
        assert_eq!(t.updated_at, now);
        assert!(coupled(&t));
    }

    #[test]
    fn test_mark_done_twice_keeps_original_completion_time() {
        let mut t = sample();
        let first = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2026, 1, 3, 9, 0, 0).unwrap();
        t.mark_done(first);
        t.mark_done(second);
        assert_eq!(t.completed_at, Some(first));
        assert_eq!(t.updated_at, second);
        assert!(coupled(&t));
    }

    #[test]
    fn test_mark_pending_clears_completed_at() {
        let mut t = sample();
        let done_at = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
        let undone_at = Utc.with_ymd_and_hms(2026, 1, 2, 10, 0, 0).unwrap();
        t.mark_done(done_at);
        t.mark_pending(undone_at);
        assert_eq!(t.status, TaskStatus::Pending);
        assert_eq!(t.completed_at, None);
        assert_eq!(t.updated_at, undone_at);
        assert!(coupled(&t));
    }

    #[test]
    fn test_in_progress_leaves_done_and_clears_completion() {
        let mut t = sample();
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 9, 0, 0).unwrap();
        t.mark_done(now);
        t.set_status(TaskStatus::InProgress, now);
        assert_eq!(t.status, TaskStatus::InProgress);
        assert_eq!(t.completed_at, None);
        assert!(coupled(&t));
    }

    #[test]
    fn test_status_round_trip_strings() {
        for s in ["pending", "in_progress", "done"] {
            assert_eq!(TaskStatus::from_str(s).unwrap().as_str(), s);
        }
        assert!(TaskStatus::from_str("archived").is_none());
        for p in ["low", "medium", "high"] {
            assert_eq!(TaskPriority::from_str(p).unwrap().as_str(), p);
        }
        assert!(TaskPriority::from_str("urgent").is_none());
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(TaskPriority::High.rank() > TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() > TaskPriority::Low.rank());
    }
}
