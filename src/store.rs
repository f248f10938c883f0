use crate::models::{Task, TaskCategory, TaskStatus};

/// Client-side narrowing of the collection: exact status and category match,
/// case-insensitive substring match on the name.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub search: String,
    pub category: Option<TaskCategory>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status {
            if task.task_status != status {
                return false;
            }
        }
        if let Some(category) = self.category {
            if task.task_category != category {
                return false;
            }
        }
        if !self.search.is_empty()
            && !task
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }
        true
    }
}

/// What a drag gesture carries from the source column to the drop target.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSource {
    pub id: String,
    pub status: TaskStatus,
}

impl DragSource {
    /// Dropping a card back on its own column is a no-op.
    pub fn drops_on(&self, target: TaskStatus) -> bool {
        self.status != target
    }
}

/// In-memory working copy of the signed-in user's tasks. Order is the fetch
/// order from the last refresh; the remote store is the source of truth and
/// the collection is fully rebuilt by replace().
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    selection: Vec<String>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        // Drop selected ids that vanished on the server side.
        self.selection
            .retain(|id| self.tasks.iter().any(|t| &t.id == id));
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Optimistic local patch after a successful updateTaskStatus call.
    pub fn apply_status(&mut self, id: &str, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.task_status = status;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.selection.retain(|s| s != id);
        self.tasks.len() != before
    }

    pub fn filtered(&self, filter: &TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Tasks for one status group, in collection order, honoring the search
    /// and category parts of the filter.
    pub fn by_status(&self, status: TaskStatus, filter: &TaskFilter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.task_status == status && filter.matches(t))
            .collect()
    }

    pub fn status_count(&self, status: TaskStatus) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.task_status == status)
            .count()
    }

    pub fn toggle_selected(&mut self, id: &str) {
        if let Some(pos) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(pos);
        } else if self.tasks.iter().any(|t| t.id == id) {
            self.selection.push(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s == id)
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Hand the selected ids to a bulk action and clear the selection.
    pub fn take_selection(&mut self) -> Vec<String> {
        std::mem::take(&mut self.selection)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, name: &str, status: TaskStatus, category: TaskCategory) -> Task {
        Task {
            id: id.to_string(),
            name: name.to_string(),
            date: "2024-01-01".to_string(),
            description: "desc".to_string(),
            task_status: status,
            task_category: category,
            file_url: None,
        }
    }

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.replace(vec![
            task("1", "Buy milk", TaskStatus::ToDo, TaskCategory::Personal),
            task("2", "Ship report", TaskStatus::InProgress, TaskCategory::Work),
            task("3", "Milk the data", TaskStatus::Completed, TaskCategory::Work),
        ]);
        store
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let store = sample_store();
        let filter = TaskFilter {
            search: "MILK".to_string(),
            ..Default::default()
        };
        let hits: Vec<&str> = store
            .filtered(&filter)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(hits, vec!["1", "3"]);
    }

    #[test]
    fn status_and_category_filters_are_exact() {
        let store = sample_store();
        let filter = TaskFilter {
            status: Some(TaskStatus::InProgress),
            ..Default::default()
        };
        assert_eq!(store.filtered(&filter).len(), 1);

        let filter = TaskFilter {
            category: Some(TaskCategory::Work),
            ..Default::default()
        };
        assert_eq!(store.filtered(&filter).len(), 2);
    }

    #[test]
    fn by_status_keeps_collection_order() {
        let mut store = sample_store();
        store.push(task("4", "Also todo", TaskStatus::ToDo, TaskCategory::Work));
        let group = store.by_status(TaskStatus::ToDo, &TaskFilter::default());
        let ids: Vec<&str> = group.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn status_patch_moves_task_between_groups() {
        let mut store = sample_store();
        assert!(store.apply_status("1", TaskStatus::Completed));
        assert_eq!(store.status_count(TaskStatus::ToDo), 0);
        assert_eq!(store.status_count(TaskStatus::Completed), 2);
        assert_eq!(
            store.get("1").unwrap().task_status,
            TaskStatus::Completed
        );
        assert!(!store.apply_status("missing", TaskStatus::ToDo));
    }

    #[test]
    fn remove_drops_task_and_its_selection() {
        let mut store = sample_store();
        store.toggle_selected("2");
        assert!(store.remove("2"));
        assert!(store.get("2").is_none());
        assert!(store.selection().is_empty());
        assert!(!store.remove("2"));
    }

    #[test]
    fn selection_toggles_and_clears_after_bulk_take() {
        let mut store = sample_store();
        store.toggle_selected("1");
        store.toggle_selected("3");
        store.toggle_selected("nope");
        assert_eq!(
            store.selection().to_vec(),
            vec!["1".to_string(), "3".to_string()]
        );

        store.toggle_selected("1");
        assert_eq!(store.selection().to_vec(), vec!["3".to_string()]);

        let ids = store.take_selection();
        assert_eq!(ids, vec!["3".to_string()]);
        assert!(store.selection().is_empty());
    }

    #[test]
    fn replace_prunes_stale_selection() {
        let mut store = sample_store();
        store.toggle_selected("1");
        store.replace(vec![task(
            "2",
            "Ship report",
            TaskStatus::ToDo,
            TaskCategory::Work,
        )]);
        assert!(store.selection().is_empty());
    }

    #[test]
    fn drop_on_own_column_is_a_no_op() {
        let drag = DragSource {
            id: "1".to_string(),
            status: TaskStatus::ToDo,
        };
        assert!(!drag.drops_on(TaskStatus::ToDo));
        assert!(drag.drops_on(TaskStatus::Completed));
    }
}
