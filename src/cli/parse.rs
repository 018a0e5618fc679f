use chrono::NaiveDate;

use crate::error::TodoqError;
use crate::models::{TaskPriority, TaskStatus};

pub fn status(s: &str) -> Result<TaskStatus, TodoqError> {
    TaskStatus::from_str(s).ok_or_else(|| {
        TodoqError::validation(format!(
            "Invalid status '{s}': expected pending, in_progress, or done"
        ))
    })
}

pub fn priority(s: &str) -> Result<TaskPriority, TodoqError> {
    TaskPriority::from_str(s).ok_or_else(|| {
        TodoqError::validation(format!("Invalid priority '{s}': expected low, medium, or high"))
    })
}

pub fn date(field: &str, s: &str) -> Result<NaiveDate, TodoqError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| TodoqError::validation(format!("Invalid {field} '{s}': expected YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_status() {
        assert_eq!(status("in_progress").unwrap(), TaskStatus::InProgress);
        assert_eq!(status("started").unwrap_err().code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!(priority("high").unwrap(), TaskPriority::High);
        assert_eq!(priority("urgent").unwrap_err().code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_parse_date() {
        assert!(date("due date", "2026-03-10").is_ok());
        let err = date("due date", "10/03/2026").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("due date"));
    }
}
