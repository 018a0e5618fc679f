use crate::models::Task;

fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length.saturating_sub(3)).collect();
    format!("{cut}...")
}

pub fn print_task(t: &Task) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", t.status.as_str());
    println!("  Priority: {}", t.priority.as_str());
    if let Some(due) = t.due_date {
        println!("  Due: {due}");
    }
    if !t.tags.is_empty() {
        println!("  Tags: {}", t.tags.join(", "));
    }
    println!("  Created: {}", t.created_at.format("%Y-%m-%d %H:%M"));
    if let Some(completed) = t.completed_at {
        println!("  Completed: {}", completed.format("%Y-%m-%d %H:%M"));
    }
}

pub fn print_task_table(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let header = format!(
        "{:<8} | {:<30} | {:<11} | {:<6} | {:<10}",
        "ID", "Title", "Status", "Pri", "Due"
    );
    let separator = "-".repeat(header.len());
    println!("{header}");
    println!("{separator}");

    for t in tasks {
        let id = &t.id[..std::cmp::min(8, t.id.len())];
        let due = t.due_date.map(|d| d.to_string()).unwrap_or_default();
        println!(
            "{:<8} | {:<30} | {:<11} | {:<6} | {:<10}",
            id,
            truncate(&t.title, 30),
            t.status.as_str(),
            t.priority.as_str(),
            due
        );
    }
}
