use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::models::{Task, TaskPriority, TaskStatus};

/// Optional predicates applied to one owner's task collection. Every field
/// unset means "no filtering on that axis"; `tags` left empty means the same.
///
/// Tag matching is match-any: a task passes if its tag set intersects the
/// requested set. Match-all was considered and rejected as the more
/// surprising default for multi-tag queries.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_after: Option<NaiveDate>,
    pub due_before: Option<NaiveDate>,
    pub tags: Vec<String>,
}

/// Filter then sort. The output order is deterministic: priority descending,
/// then due date ascending with undated tasks last, then creation time
/// ascending as the stable tiebreak.
pub fn apply(tasks: Vec<Task>, filter: &TaskFilter) -> Vec<Task> {
    let mut out: Vec<Task> = tasks.into_iter().filter(|t| matches(t, filter)).collect();
    sort_tasks(&mut out);
    out
}

fn matches(task: &Task, filter: &TaskFilter) -> bool {
    if let Some(status) = filter.status {
        if task.status != status {
            return false;
        }
    }

    // A task with no due date cannot satisfy a due-date window, so either
    // bound being present excludes undated tasks.
    if filter.due_after.is_some() || filter.due_before.is_some() {
        let Some(due) = task.due_date else {
            return false;
        };
        if let Some(after) = filter.due_after {
            if due < after {
                return false;
            }
        }
        if let Some(before) = filter.due_before {
            if due > before {
                return false;
            }
        }
    }

    if let Some(priority) = filter.priority {
        if task.priority != priority {
            return false;
        }
    }

    if !filter.tags.is_empty()
        && !filter.tags.iter().any(|want| task.tags.iter().any(|have| have == want))
    {
        return false;
    }

    true
}

pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| cmp_due_nulls_last(a.due_date, b.due_date))
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

fn cmp_due_nulls_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn task(title: &str, seq: u32) -> Task {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, seq).unwrap();
        Task {
            id: format!("task-{seq}"),
            owner_id: "alice".into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            due_date: None,
            tags: vec![],
            created_at: created,
            updated_at: created,
            completed_at: None,
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_no_filter_returns_everything() {
        let tasks = vec![task("a", 1), task("b", 2)];
        assert_eq!(apply(tasks, &TaskFilter::default()).len(), 2);
    }

    #[test]
    fn test_status_filter() {
        let mut done = task("done", 1);
        done.set_status(TaskStatus::Done, done.created_at);
        let tasks = vec![done, task("p1", 2), task("p2", 3), task("p3", 4)];

        let filter = TaskFilter {
            status: Some(TaskStatus::Pending),
            ..TaskFilter::default()
        };
        let out = apply(tasks, &filter);
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|t| t.status == TaskStatus::Pending));
    }

    #[test]
    fn test_due_window_excludes_undated_tasks() {
        let mut dated = task("dated", 1);
        dated.due_date = Some(date("2026-03-10"));
        let undated = task("undated", 2);

        let filter = TaskFilter {
            due_before: Some(date("2026-04-01")),
            ..TaskFilter::default()
        };
        let out = apply(vec![dated, undated], &filter);
        assert_eq!(titles(&out), vec!["dated"]);
    }

    #[test]
    fn test_due_window_bounds_are_inclusive() {
        let mut t = task("edge", 1);
        t.due_date = Some(date("2026-03-10"));
        let filter = TaskFilter {
            due_after: Some(date("2026-03-10")),
            due_before: Some(date("2026-03-10")),
            ..TaskFilter::default()
        };
        assert_eq!(apply(vec![t], &filter).len(), 1);
    }

    #[test]
    fn test_due_window_rejects_outside_range() {
        let mut early = task("early", 1);
        early.due_date = Some(date("2026-01-05"));
        let mut late = task("late", 2);
        late.due_date = Some(date("2026-06-05"));
        let mut inside = task("inside", 3);
        inside.due_date = Some(date("2026-03-05"));

        let filter = TaskFilter {
            due_after: Some(date("2026-02-01")),
            due_before: Some(date("2026-04-01")),
            ..TaskFilter::default()
        };
        let out = apply(vec![early, late, inside], &filter);
        assert_eq!(titles(&out), vec!["inside"]);
    }

    #[test]
    fn test_undated_tasks_pass_without_date_filter() {
        let undated = task("undated", 1);
        assert_eq!(apply(vec![undated], &TaskFilter::default()).len(), 1);
    }

    #[test]
    fn test_priority_filter() {
        let mut high = task("high", 1);
        high.priority = TaskPriority::High;
        let medium = task("medium", 2);

        let filter = TaskFilter {
            priority: Some(TaskPriority::High),
            ..TaskFilter::default()
        };
        let out = apply(vec![high, medium], &filter);
        assert_eq!(titles(&out), vec!["high"]);
    }

    #[test]
    fn test_tag_filter_match_any() {
        let mut work = task("work", 1);
        work.tags = vec!["work".into(), "urgent".into()];
        let mut personal = task("personal", 2);
        personal.tags = vec!["personal".into()];
        let untagged = task("untagged", 3);

        let filter = TaskFilter {
            tags: vec!["work".into()],
            ..TaskFilter::default()
        };
        let out = apply(vec![work, personal, untagged], &filter);
        assert_eq!(titles(&out), vec!["work"]);
    }

    #[test]
    fn test_tag_filter_any_of_several() {
        let mut a = task("a", 1);
        a.tags = vec!["home".into()];
        let mut b = task("b", 2);
        b.tags = vec!["work".into()];
        let c = task("c", 3);

        let filter = TaskFilter {
            tags: vec!["home".into(), "work".into()],
            ..TaskFilter::default()
        };
        assert_eq!(apply(vec![a, b, c], &filter).len(), 2);
    }

    #[test]
    fn test_sort_priority_descending() {
        let mut low = task("low", 1);
        low.priority = TaskPriority::Low;
        let mut high = task("high", 2);
        high.priority = TaskPriority::High;
        let medium = task("medium", 3);

        let out = apply(vec![low, high, medium], &TaskFilter::default());
        assert_eq!(titles(&out), vec!["high", "medium", "low"]);
    }

    #[test]
    fn test_sort_due_date_ascending_nulls_last() {
        let mut soon = task("soon", 1);
        soon.due_date = Some(date("2026-02-01"));
        let mut later = task("later", 2);
        later.due_date = Some(date("2026-05-01"));
        let undated = task("undated", 3);

        let out = apply(vec![undated, later, soon], &TaskFilter::default());
        assert_eq!(titles(&out), vec!["soon", "later", "undated"]);
    }

    #[test]
    fn test_sort_created_at_breaks_ties() {
        let first = task("first", 1);
        let second = task("second", 2);
        let out = apply(vec![second, first], &TaskFilter::default());
        assert_eq!(titles(&out), vec!["first", "second"]);
    }
}
