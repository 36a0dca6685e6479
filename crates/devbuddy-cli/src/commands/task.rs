use devbuddy_core::models::{NewTask, TaskUpdate};
use devbuddy_core::{Error, Priority, Task, TasksService};

use crate::cli::{TaskCommands, TaskStatus};
use crate::commands::common::{
    format_task_lines, format_timestamp, normalize_content, normalize_identifier, print_json,
    print_lines, render_tags,
};
use crate::error::CliError;

pub fn run_task(command: TaskCommands, tasks: &TasksService) -> Result<(), CliError> {
    match command {
        TaskCommands::List {
            category,
            priority,
            status,
            json,
        } => {
            let listed = list_tasks(
                tasks,
                category.as_deref(),
                priority.map(Priority::from),
                status,
            )?;
            if json {
                print_json(&listed)?;
            } else {
                print_lines(&format_task_lines(&listed));
            }
        }
        TaskCommands::Show { id, json } => {
            let id = normalize_identifier(&id, "Task ID")?;
            let task = tasks
                .get_task(&id)?
                .ok_or_else(|| CliError::from(Error::TaskNotFound(id)))?;
            if json {
                print_json(&task)?;
            } else {
                println!("{}", render_task(&task));
            }
        }
        TaskCommands::Add {
            title,
            description,
            priority,
            category,
            due,
            tags,
            json,
        } => {
            let title = normalize_content(&title.join(" ")).ok_or(CliError::EmptyTitle)?;
            let task = tasks.create_task(NewTask {
                title: Some(title),
                description,
                priority: priority.map(Priority::from),
                category,
                due_date: due,
                reminders: Vec::new(),
                tags,
            })?;
            print_task(&task, json)?;
        }
        TaskCommands::Update {
            id,
            title,
            description,
            priority,
            category,
            due,
            clear_due,
            tags,
            json,
        } => {
            let id = normalize_identifier(&id, "Task ID")?;
            let update = TaskUpdate {
                title,
                description,
                completed: None,
                priority: priority.map(Priority::from),
                category,
                due_date: due_date_update(due, clear_due),
                reminders: None,
                tags,
            };
            let task = tasks.update_task(&id, update)?;
            print_task(&task, json)?;
        }
        TaskCommands::Toggle { id } => {
            let id = normalize_identifier(&id, "Task ID")?;
            let task = tasks.toggle_task_complete(&id)?;
            let state = if task.completed { "done" } else { "pending" };
            println!("{} {state}", task.id);
        }
        TaskCommands::Delete { id } => {
            let id = normalize_identifier(&id, "Task ID")?;
            tasks.delete_task(&id)?;
            println!("{id}");
        }
        TaskCommands::Priorities => {
            for priority in TasksService::priorities() {
                println!("{priority}");
            }
        }
    }

    Ok(())
}

/// Tasks matching every supplied filter.
pub fn list_tasks(
    tasks: &TasksService,
    category: Option<&str>,
    priority: Option<Priority>,
    status: Option<TaskStatus>,
) -> Result<Vec<Task>, CliError> {
    let mut listed = match (status, category, priority) {
        (Some(TaskStatus::Completed), _, _) => tasks.get_completed_tasks()?,
        (Some(TaskStatus::Pending), _, _) => tasks.get_pending_tasks()?,
        (Some(TaskStatus::Overdue), _, _) => tasks.get_overdue_tasks()?,
        (Some(TaskStatus::DueToday), _, _) => tasks.get_tasks_due_today()?,
        (None, Some(category), _) => tasks.get_tasks_by_category(category)?,
        (None, None, Some(priority)) => tasks.get_tasks_by_priority(priority)?,
        (None, None, None) => tasks.get_all_tasks()?,
    };

    if let Some(category) = category {
        listed.retain(|task| task.category == category);
    }
    if let Some(priority) = priority {
        listed.retain(|task| task.priority == priority);
    }
    Ok(listed)
}

/// `--clear-due` wins; otherwise a supplied date replaces the current one.
pub fn due_date_update(due: Option<String>, clear_due: bool) -> Option<Option<String>> {
    if clear_due {
        Some(None)
    } else {
        due.map(Some)
    }
}

fn print_task(task: &Task, as_json: bool) -> Result<(), CliError> {
    if as_json {
        print_json(task)
    } else {
        println!("{}", task.id);
        Ok(())
    }
}

pub fn render_task(task: &Task) -> String {
    let mut lines = vec![
        format!("{} [{}]", task.title, if task.completed { "done" } else { "pending" }),
        format!("id:       {}", task.id),
        format!("priority: {}", task.priority),
        format!("category: {}", task.category),
    ];
    if let Some(due) = task.due_date.as_deref() {
        lines.push(format!("due:      {due}"));
    }
    let tags = render_tags(&task.tags);
    if !tags.is_empty() {
        lines.push(format!("tags:     {tags}"));
    }
    lines.push(format!("updated:  {}", format_timestamp(task.updated_at)));
    if !task.description.is_empty() {
        lines.push(String::new());
        lines.push(task.description.clone());
    }
    lines.join("\n")
}
