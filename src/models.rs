use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "TO-DO")]
    ToDo,
    #[serde(rename = "IN-PROGRESS")]
    InProgress,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::ToDo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "TO-DO",
            TaskStatus::InProgress => "IN-PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s.to_uppercase().as_str() {
            "TO-DO" | "TODO" => Some(TaskStatus::ToDo),
            "IN-PROGRESS" | "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "COMPLETED" | "DONE" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCategory {
    #[serde(rename = "WORK")]
    Work,
    #[serde(rename = "PERSONAL")]
    Personal,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 2] = [TaskCategory::Work, TaskCategory::Personal];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "WORK",
            TaskCategory::Personal => "PERSONAL",
        }
    }

    pub fn parse(s: &str) -> Option<TaskCategory> {
        match s.to_uppercase().as_str() {
            "WORK" => Some(TaskCategory::Work),
            "PERSONAL" => Some(TaskCategory::Personal),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task record as stored remotely. The id is assigned by the server and
/// never generated on this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub date: String,
    pub description: String,
    #[serde(rename = "taskStatus")]
    pub task_status: TaskStatus,
    #[serde(rename = "taskCategory")]
    pub task_category: TaskCategory,
    #[serde(rename = "fileUrl", default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// The editable fields of a task, without the server-assigned id. Used for
/// both create and update submissions.
#[derive(Debug, Clone, Serialize)]
pub struct TaskFields {
    pub name: String,
    pub date: String,
    pub description: String,
    #[serde(rename = "taskStatus")]
    pub task_status: TaskStatus,
    #[serde(rename = "taskCategory")]
    pub task_category: TaskCategory,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewTab {
    List,
    Board,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PopupMode {
    None,
    TaskForm,
    StatusPick,
    ConfirmDelete,
}
