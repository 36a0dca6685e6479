//! Task categories and the tasks filed under them.
//!
//! Layout under the tasks root:
//!
//! ```text
//! index.yml                  category list
//! categories/<category>.yml  tasks of one category
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::{
    Category, CategoryUpdate, NewCategory, NewTask, Priority, Task, TaskStats, TaskUpdate,
    DEFAULT_CATEGORY_ID,
};
use crate::storage::{ensure_dir, read_yaml, write_yaml};
use crate::util::{generate_id, normalize_text_option, validate_path_id};

const INDEX_FILE: &str = "index.yml";
const CATEGORIES_DIR: &str = "categories";

/// File-backed task store.
#[derive(Debug, Clone)]
pub struct TasksService {
    root: PathBuf,
}

impl TasksService {
    /// Open the store rooted at `root`, creating its directories if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = std::path::absolute(root.as_ref())?;
        ensure_dir(&root.join(CATEGORIES_DIR))?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The fixed set of priorities, lowest first.
    #[must_use]
    pub const fn priorities() -> [Priority; 4] {
        Priority::ALL
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    /// Every task, grouped by category in category order.
    pub fn get_all_tasks(&self) -> Result<Vec<Task>> {
        let mut tasks = Vec::new();
        for category in self.get_categories()? {
            match self.load_category_tasks(&category.id) {
                Ok(category_tasks) => tasks.extend(category_tasks),
                Err(error) => {
                    tracing::warn!("Skipping tasks of category {}: {error}", category.id);
                }
            }
        }
        Ok(tasks)
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.get_all_tasks()?.into_iter().find(|task| task.id == id))
    }

    /// Create a task. Unknown categories fall back to `general`.
    pub fn create_task(&self, input: NewTask) -> Result<Task> {
        let category = self.resolve_category(&input.category_id())?;
        let task = Task::from_input(input, category.clone());

        let mut tasks = self.load_category_tasks(&category)?;
        tasks.push(task.clone());
        self.save_category_tasks(&category, &tasks)?;
        Ok(task)
    }

    /// Update a task, moving it between category files when its category
    /// changes.
    ///
    /// A move to a category that does not exist files the task under
    /// `general` instead.
    pub fn update_task(&self, id: &str, mut update: TaskUpdate) -> Result<Task> {
        let existing = self
            .get_task(id)?
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let current = existing.category.clone();
        let requested =
            normalize_text_option(update.category.take()).unwrap_or_else(|| current.clone());

        if requested == current {
            let mut tasks = self.load_category_tasks(&current)?;
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
            update.apply_to(task);
            let updated = task.clone();
            self.save_category_tasks(&current, &tasks)?;
            return Ok(updated);
        }

        let target = self.resolve_category(&requested)?;

        let remaining = self
            .load_category_tasks(&current)?
            .into_iter()
            .filter(|task| task.id != id)
            .collect::<Vec<_>>();
        self.save_category_tasks(&current, &remaining)?;

        let mut updated = existing;
        update.apply_to(&mut updated);
        updated.category.clone_from(&target);

        let mut tasks = self.load_category_tasks(&target)?;
        tasks.push(updated.clone());
        self.save_category_tasks(&target, &tasks)?;
        tracing::debug!("Moved task {id} from {current} to {target}");
        Ok(updated)
    }

    pub fn delete_task(&self, id: &str) -> Result<()> {
        let task = self
            .get_task(id)?
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let remaining = self
            .load_category_tasks(&task.category)?
            .into_iter()
            .filter(|candidate| candidate.id != id)
            .collect::<Vec<_>>();
        self.save_category_tasks(&task.category, &remaining)?;
        tracing::info!("Deleted task {id}");
        Ok(())
    }

    /// Flip the completion flag.
    pub fn toggle_task_complete(&self, id: &str) -> Result<Task> {
        let task = self
            .get_task(id)?
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        self.update_task(
            id,
            TaskUpdate {
                completed: Some(!task.completed),
                ..TaskUpdate::default()
            },
        )
    }

    pub fn get_tasks_by_category(&self, category_id: &str) -> Result<Vec<Task>> {
        self.load_category_tasks(category_id)
    }

    pub fn get_tasks_by_priority(&self, priority: Priority) -> Result<Vec<Task>> {
        self.filter_tasks(|task| task.priority == priority)
    }

    pub fn get_completed_tasks(&self) -> Result<Vec<Task>> {
        self.filter_tasks(|task| task.completed)
    }

    pub fn get_pending_tasks(&self) -> Result<Vec<Task>> {
        self.filter_tasks(|task| !task.completed)
    }

    /// Incomplete tasks due before now.
    pub fn get_overdue_tasks(&self) -> Result<Vec<Task>> {
        self.get_overdue_tasks_at(Utc::now())
    }

    pub fn get_overdue_tasks_at(&self, now: DateTime<Utc>) -> Result<Vec<Task>> {
        self.filter_tasks(|task| task.is_overdue_at(now))
    }

    /// Incomplete tasks due on today's UTC date.
    pub fn get_tasks_due_today(&self) -> Result<Vec<Task>> {
        self.get_tasks_due_today_at(Utc::now())
    }

    pub fn get_tasks_due_today_at(&self, now: DateTime<Utc>) -> Result<Vec<Task>> {
        self.filter_tasks(|task| task.is_due_today_at(now))
    }

    pub fn get_stats(&self) -> Result<TaskStats> {
        self.get_stats_at(Utc::now())
    }

    pub fn get_stats_at(&self, now: DateTime<Utc>) -> Result<TaskStats> {
        let categories = self.get_categories()?;
        let tasks = self.get_all_tasks()?;
        Ok(TaskStats::collect(&tasks, categories.len(), now))
    }

    fn filter_tasks(&self, predicate: impl Fn(&Task) -> bool) -> Result<Vec<Task>> {
        Ok(self
            .get_all_tasks()?
            .into_iter()
            .filter(|task| predicate(task))
            .collect())
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    /// List categories, seeding the default category on first run.
    pub fn get_categories(&self) -> Result<Vec<Category>> {
        let index = self.index_path();
        if !index.exists() {
            let defaults = vec![Category::default_category()];
            self.save_categories(&defaults)?;
            return Ok(defaults);
        }

        match read_yaml::<Vec<Category>>(&index) {
            Ok(Some(categories)) => Ok(categories),
            Ok(None) => Ok(vec![Category::default_category()]),
            Err(error) => {
                tracing::warn!("Failed to load categories from {}: {error}", index.display());
                Ok(vec![Category::default_category()])
            }
        }
    }

    pub fn get_category_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .get_categories()?
            .into_iter()
            .map(|category| category.id)
            .collect())
    }

    /// Create a category with an empty task file.
    pub fn create_category(&self, input: NewCategory) -> Result<Category> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput("Category name cannot be empty".to_string()));
        }

        let mut categories = self.get_categories()?;
        if categories.iter().any(|category| category.has_name(&name)) {
            return Err(Error::DuplicateCategory(name));
        }

        let category = Category::from_input(name, input);
        validate_path_id(&category.id, "Category")?;
        if categories.iter().any(|existing| existing.id == category.id) {
            return Err(Error::DuplicateCategoryId(category.id));
        }

        categories.push(category.clone());
        self.save_categories(&categories)?;
        self.save_category_tasks(&category.id, &[])?;
        tracing::info!("Created category {} ({})", category.id, category.name);
        Ok(category)
    }

    pub fn update_category(&self, id: &str, update: CategoryUpdate) -> Result<Category> {
        let mut categories = self.get_categories()?;
        let index = categories
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| Error::CategoryNotFound(id.to_string()))?;

        if let Some(name) = update.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            let taken = categories
                .iter()
                .any(|category| category.id != id && category.has_name(name));
            if taken {
                return Err(Error::DuplicateCategory(name.to_string()));
            }
        }

        update.apply_to(&mut categories[index]);
        self.save_categories(&categories)?;
        Ok(categories.swap_remove(index))
    }

    /// Delete a category together with its task file.
    pub fn delete_category(&self, id: &str) -> Result<()> {
        if id == DEFAULT_CATEGORY_ID {
            return Err(Error::ProtectedCategory);
        }

        let categories = self.get_categories()?;
        let remaining = categories
            .iter()
            .filter(|category| category.id != id)
            .cloned()
            .collect::<Vec<_>>();
        if remaining.len() == categories.len() {
            return Err(Error::CategoryNotFound(id.to_string()));
        }
        self.save_categories(&remaining)?;

        match fs::remove_file(self.category_file(id)?) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::NotFound => {}
            Err(error) => return Err(error.into()),
        }
        tracing::info!("Deleted category {id}");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// `requested` when it names an existing category, otherwise `general`.
    fn resolve_category(&self, requested: &str) -> Result<String> {
        let known = self
            .get_categories()?
            .iter()
            .any(|category| category.id == requested);
        if known {
            Ok(requested.to_string())
        } else {
            tracing::warn!("Unknown category {requested}, filing task under {DEFAULT_CATEGORY_ID}");
            Ok(DEFAULT_CATEGORY_ID.to_string())
        }
    }

    /// Tasks of one category. A missing or unreadable file reads as empty.
    fn load_category_tasks(&self, category_id: &str) -> Result<Vec<Task>> {
        let path = self.category_file(category_id)?;
        let tasks = match read_yaml::<Vec<Task>>(&path) {
            Ok(tasks) => tasks.unwrap_or_default(),
            Err(error) => {
                tracing::warn!("Failed to load tasks from {}: {error}", path.display());
                Vec::new()
            }
        };
        let mut tasks = tasks
            .into_iter()
            .map(|mut task| {
                category_id.clone_into(&mut task.category);
                task
            })
            .collect::<Vec<_>>();

        // Records stored without an id get one, persisted immediately.
        let mut repaired = false;
        for task in tasks.iter_mut().filter(|task| task.id.is_empty()) {
            task.id = generate_id();
            repaired = true;
        }
        if repaired {
            match self.save_category_tasks(category_id, &tasks) {
                Ok(()) => tracing::info!("Assigned missing task ids in {}", path.display()),
                Err(error) => {
                    tracing::warn!("Failed to persist task ids for {}: {error}", path.display());
                }
            }
        }
        Ok(tasks)
    }

    fn save_category_tasks(&self, category_id: &str, tasks: &[Task]) -> Result<()> {
        write_yaml(&self.category_file(category_id)?, tasks)
    }

    fn save_categories(&self, categories: &[Category]) -> Result<()> {
        write_yaml(&self.index_path(), categories)
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn category_file(&self, category_id: &str) -> Result<PathBuf> {
        validate_path_id(category_id, "Category")?;
        Ok(self
            .root
            .join(CATEGORIES_DIR)
            .join(format!("{category_id}.yml")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn service() -> (TempDir, TasksService) {
        let dir = tempfile::tempdir().unwrap();
        let service = TasksService::open(dir.path().join("tasks")).unwrap();
        (dir, service)
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap()
    }

    fn due(title: &str, due_date: &str) -> NewTask {
        NewTask {
            due_date: Some(due_date.to_string()),
            ..NewTask::titled(title)
        }
    }

    #[test]
    fn first_run_seeds_general_category() {
        let (_dir, service) = service();
        let categories = service.get_categories().unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, "general");
        assert_eq!(categories[0].icon, "📋");
        assert_eq!(service.get_category_ids().unwrap(), vec!["general"]);
        assert!(service.root().join("index.yml").exists());
    }

    #[test]
    fn create_task_defaults_to_general() {
        let (_dir, service) = service();
        let task = service.create_task(NewTask::titled("Write docs")).unwrap();

        assert_eq!(task.category, "general");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(service.get_task(&task.id).unwrap(), Some(task));
    }

    #[test]
    fn create_task_for_unknown_category_falls_back_to_general() {
        let (_dir, service) = service();
        let task = service
            .create_task(NewTask {
                category: Some("ghost".to_string()),
                ..NewTask::titled("Orphan")
            })
            .unwrap();

        assert_eq!(task.category, "general");
        assert!(!service.root().join("categories/ghost.yml").exists());
    }

    #[test]
    fn update_in_place_keeps_category() {
        let (_dir, service) = service();
        let task = service.create_task(NewTask::titled("Draft")).unwrap();

        let updated = service
            .update_task(
                &task.id,
                TaskUpdate {
                    title: Some("Final".to_string()),
                    priority: Some(Priority::Urgent),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.priority, Priority::Urgent);
        assert_eq!(service.get_tasks_by_category("general").unwrap(), vec![updated]);
    }

    #[test]
    fn update_moves_task_between_category_files() {
        let (_dir, service) = service();
        let work = service.create_category(NewCategory::named("Work")).unwrap();
        let task = service.create_task(NewTask::titled("Review PR")).unwrap();

        let moved = service
            .update_task(
                &task.id,
                TaskUpdate {
                    category: Some(work.id.clone()),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(moved.category, "work");
        assert!(service.get_tasks_by_category("general").unwrap().is_empty());
        assert_eq!(service.get_tasks_by_category("work").unwrap().len(), 1);
    }

    #[test]
    fn moving_to_missing_category_files_under_general() {
        let (_dir, service) = service();
        let task = service.create_task(NewTask::titled("Keep me")).unwrap();

        let updated = service
            .update_task(
                &task.id,
                TaskUpdate {
                    category: Some("ghost".to_string()),
                    ..TaskUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(updated.category, "general");
        let general = service.get_tasks_by_category("general").unwrap();
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].id, task.id);
    }

    #[test]
    fn update_and_delete_unknown_task_are_not_found() {
        let (_dir, service) = service();
        assert!(matches!(
            service.update_task("nope", TaskUpdate::default()).unwrap_err(),
            Error::TaskNotFound(_)
        ));
        assert!(matches!(
            service.delete_task("nope").unwrap_err(),
            Error::TaskNotFound(_)
        ));
        assert!(matches!(
            service.toggle_task_complete("nope").unwrap_err(),
            Error::TaskNotFound(_)
        ));
    }

    #[test]
    fn toggle_flips_completion() {
        let (_dir, service) = service();
        let task = service.create_task(NewTask::titled("Ship")).unwrap();

        assert!(service.toggle_task_complete(&task.id).unwrap().completed);
        assert!(!service.toggle_task_complete(&task.id).unwrap().completed);
    }

    #[test]
    fn delete_task_removes_it_from_its_file() {
        let (_dir, service) = service();
        let keep = service.create_task(NewTask::titled("Keep")).unwrap();
        let drop = service.create_task(NewTask::titled("Drop")).unwrap();

        service.delete_task(&drop.id).unwrap();

        let ids = service
            .get_all_tasks()
            .unwrap()
            .into_iter()
            .map(|task| task.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![keep.id]);
    }

    #[test]
    fn derived_queries_filter_tasks() {
        let (_dir, service) = service();
        service.create_task(due("Yesterday", "2024-05-01")).unwrap();
        service
            .create_task(due("Tonight", "2024-05-02T20:00:00.000Z"))
            .unwrap();
        service.create_task(due("Later", "2024-06-01")).unwrap();
        let done = service
            .create_task(NewTask {
                priority: Some(Priority::High),
                ..due("Done", "2024-04-01")
            })
            .unwrap();
        service.toggle_task_complete(&done.id).unwrap();

        let overdue = service.get_overdue_tasks_at(noon()).unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].title, "Yesterday");

        let today = service.get_tasks_due_today_at(noon()).unwrap();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].title, "Tonight");

        assert_eq!(service.get_completed_tasks().unwrap().len(), 1);
        assert_eq!(service.get_pending_tasks().unwrap().len(), 3);
        assert_eq!(service.get_tasks_by_priority(Priority::High).unwrap().len(), 1);
        assert_eq!(service.get_tasks_by_priority(Priority::Medium).unwrap().len(), 3);
    }

    #[test]
    fn stats_report_completion_rate() {
        let (_dir, service) = service();
        service.create_category(NewCategory::named("Work")).unwrap();
        for index in 0..10 {
            let task = service
                .create_task(NewTask::titled(format!("Task {index}")))
                .unwrap();
            if index < 4 {
                service.toggle_task_complete(&task.id).unwrap();
            }
        }

        let stats = service.get_stats_at(noon()).unwrap();
        assert_eq!(stats.total, 10);
        assert_eq!(stats.completed, 4);
        assert_eq!(stats.pending, 6);
        assert_eq!(stats.completion_rate, 40);
        assert_eq!(stats.total_categories, 2);
    }

    #[test]
    fn empty_store_has_zero_completion_rate() {
        let (_dir, service) = service();
        let stats = service.get_stats().unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completion_rate, 0);
        assert_eq!(stats.total_categories, 1);
    }

    #[test]
    fn create_category_slugifies_and_creates_task_file() {
        let (_dir, service) = service();
        let category = service
            .create_category(NewCategory::named("Side Projects"))
            .unwrap();

        assert_eq!(category.id, "side-projects");
        assert_eq!(category.icon, "📁");
        assert!(service
            .root()
            .join("categories/side-projects.yml")
            .exists());
    }

    #[test]
    fn duplicate_category_name_is_rejected() {
        let (_dir, service) = service();
        service.create_category(NewCategory::named("Work")).unwrap();

        let error = service
            .create_category(NewCategory::named("work"))
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "A category with the name \"work\" already exists"
        );
    }

    #[test]
    fn category_id_collision_is_rejected() {
        let (_dir, service) = service();
        service.create_category(NewCategory::named("Work")).unwrap();

        let error = service
            .create_category(NewCategory::named("Work!"))
            .unwrap_err();
        assert!(matches!(error, Error::DuplicateCategoryId(id) if id == "work"));
    }

    #[test]
    fn update_category_checks_name_conflicts() {
        let (_dir, service) = service();
        let work = service.create_category(NewCategory::named("Work")).unwrap();

        let error = service
            .update_category(
                &work.id,
                CategoryUpdate {
                    name: Some("General".to_string()),
                    ..CategoryUpdate::default()
                },
            )
            .unwrap_err();
        assert!(matches!(error, Error::DuplicateCategory(_)));

        let updated = service
            .update_category(
                &work.id,
                CategoryUpdate {
                    description: Some("Day job".to_string()),
                    ..CategoryUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, "work");
        assert_eq!(updated.description, "Day job");
    }

    #[test]
    fn general_category_is_protected() {
        let (_dir, service) = service();
        assert!(matches!(
            service.delete_category("general").unwrap_err(),
            Error::ProtectedCategory
        ));
        assert!(matches!(
            service.delete_category("ghost").unwrap_err(),
            Error::CategoryNotFound(_)
        ));
    }

    #[test]
    fn delete_category_removes_task_file() {
        let (_dir, service) = service();
        let work = service.create_category(NewCategory::named("Work")).unwrap();
        service
            .create_task(NewTask {
                category: Some(work.id.clone()),
                ..NewTask::titled("Gone")
            })
            .unwrap();

        service.delete_category(&work.id).unwrap();

        assert!(!service.root().join("categories/work.yml").exists());
        assert_eq!(service.get_category_ids().unwrap(), vec!["general"]);
        assert!(service.get_all_tasks().unwrap().is_empty());
    }

    #[test]
    fn loaded_tasks_take_category_from_their_file() {
        let (_dir, service) = service();
        service.get_categories().unwrap();
        fs::write(
            service.root().join("categories/general.yml"),
            "- id: hand-made\n  title: Edited by hand\n  category: elsewhere\n  priority: bogus\n",
        )
        .unwrap();

        let task = service.get_task("hand-made").unwrap().unwrap();
        assert_eq!(task.category, "general");
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn task_stored_without_id_keeps_its_repaired_id() {
        let (_dir, service) = service();
        service.get_categories().unwrap();
        fs::write(
            service.root().join("categories/general.yml"),
            "- title: No id here\n",
        )
        .unwrap();

        let listed = service.get_all_tasks().unwrap();
        assert_eq!(listed.len(), 1);
        let id = listed[0].id.clone();
        assert!(!id.is_empty());
        assert_eq!(service.get_all_tasks().unwrap()[0].id, id);

        let toggled = service.toggle_task_complete(&id).unwrap();
        assert!(toggled.completed);
        assert_eq!(toggled.title, "No id here");

        service.delete_task(&id).unwrap();
        assert!(service.get_all_tasks().unwrap().is_empty());
    }

    #[test]
    fn priorities_are_listed_lowest_first() {
        assert_eq!(
            TasksService::priorities(),
            [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent]
        );
    }
}
