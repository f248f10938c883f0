use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::api::Attachment;
use crate::models::{Task, TaskCategory, TaskFields, TaskStatus};

pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Date,
    Status,
    Category,
    Attachment,
}

impl FormField {
    pub const ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Description,
        FormField::Date,
        FormField::Status,
        FormField::Category,
        FormField::Attachment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Title",
            FormField::Description => "Description",
            FormField::Date => "Due date (YYYY-MM-DD)",
            FormField::Status => "Status",
            FormField::Category => "Category",
            FormField::Attachment => "Attachment path",
        }
    }
}

/// Modal create/edit form. Editing an existing record keeps its id around so
/// submission becomes an update instead of a create; everything else is the
/// same field set the remote store expects.
#[derive(Debug, Default)]
pub struct TaskForm {
    pub editing_id: Option<String>,
    pub name: String,
    pub description: String,
    pub date: String,
    pub status: Option<TaskStatus>,
    pub category: Option<TaskCategory>,
    pub attachment_path: String,
    pub attachment: Option<Attachment>,
    pub existing_file_url: Option<String>,
    pub focus: usize,
    pub errors: Vec<FormField>,
    pub submitting: bool,
    pub message: Option<String>,
}

impl TaskForm {
    pub fn create() -> Self {
        TaskForm::default()
    }

    pub fn edit(task: &Task) -> Self {
        TaskForm {
            editing_id: Some(task.id.clone()),
            name: task.name.clone(),
            description: task.description.clone(),
            date: task.date.clone(),
            status: Some(task.task_status),
            category: Some(task.task_category),
            existing_file_url: task.file_url.clone(),
            ..TaskForm::default()
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn focused(&self) -> FormField {
        FormField::ORDER[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ORDER.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = if self.focus == 0 {
            FormField::ORDER.len() - 1
        } else {
            self.focus - 1
        };
    }

    pub fn input(&mut self, c: char) {
        // Typing into a field clears its error marker.
        let field = self.focused();
        self.errors.retain(|f| *f != field);
        match field {
            FormField::Name => self.name.push(c),
            FormField::Description => self.description.push(c),
            FormField::Date => self.date.push(c),
            FormField::Attachment => self.attachment_path.push(c),
            FormField::Status | FormField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focused() {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
            FormField::Attachment => {
                self.attachment_path.pop();
                self.attachment = None;
            }
            FormField::Status | FormField::Category => {}
        }
    }

    /// Step the status/category selector on the focused field.
    pub fn cycle(&mut self, step: isize) {
        let field = self.focused();
        self.errors.retain(|f| *f != field);
        match field {
            FormField::Status => {
                self.status = Some(cycle_choice(&TaskStatus::ALL, self.status, step));
            }
            FormField::Category => {
                self.category = Some(cycle_choice(&TaskCategory::ALL, self.category, step));
            }
            _ => {}
        }
    }

    pub fn is_errored(&self, field: FormField) -> bool {
        self.errors.contains(&field)
    }

    /// Check every required field, marking the empty ones. A date that does
    /// not parse as a calendar date counts as missing.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        if self.name.trim().is_empty() {
            self.errors.push(FormField::Name);
        }
        if self.description.trim().is_empty() {
            self.errors.push(FormField::Description);
        }
        if NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            self.errors.push(FormField::Date);
        }
        if self.status.is_none() {
            self.errors.push(FormField::Status);
        }
        if self.category.is_none() {
            self.errors.push(FormField::Category);
        }
        self.errors.is_empty()
    }

    /// Validate and produce the submission payload. None means the form stays
    /// open with errors marked and no network call happens.
    pub fn submit_fields(&mut self) -> Option<TaskFields> {
        if !self.validate() {
            self.message = Some("please fill in all fields".to_string());
            return None;
        }
        self.message = None;
        Some(TaskFields {
            name: self.name.trim().to_string(),
            date: self.date.trim().to_string(),
            description: self.description.trim().to_string(),
            task_status: self.status.expect("validated"),
            task_category: self.category.expect("validated"),
        })
    }

    /// Vet and load the file named in the attachment field. Rejections leave
    /// the form open with a message and no attachment kept.
    pub fn take_attachment_from_path(&mut self) -> bool {
        let path = self.attachment_path.trim().to_string();
        if path.is_empty() {
            self.attachment = None;
            return true;
        }
        match load_attachment(Path::new(&path)) {
            Ok(att) => {
                self.attachment = Some(att);
                true
            }
            Err(msg) => {
                self.attachment = None;
                self.message = Some(msg);
                false
            }
        }
    }
}

fn cycle_choice<T: Copy + PartialEq>(all: &[T], current: Option<T>, step: isize) -> T {
    match current {
        None => {
            if step < 0 {
                all[all.len() - 1]
            } else {
                all[0]
            }
        }
        Some(value) => {
            let i = all.iter().position(|v| *v == value).unwrap_or(0) as isize;
            let n = all.len() as isize;
            all[((i + step).rem_euclid(n)) as usize]
        }
    }
}

/// Client-side attachment rules: must look like an image and stay within the
/// 5 MiB cap. Checked before any bytes go near the network.
pub fn load_attachment(path: &Path) -> Result<Attachment, String> {
    let mime = match image_mime(path) {
        Some(mime) => mime,
        None => return Err("only image files are allowed".to_string()),
    };
    let meta =
        fs::metadata(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    if meta.len() > MAX_ATTACHMENT_BYTES {
        return Err("file size should not exceed 5MB".to_string());
    }
    let bytes =
        fs::read(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());
    Ok(Attachment {
        file_name,
        mime: mime.to_string(),
        bytes,
    })
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn empty_fields_block_submission_and_are_marked() {
        let mut form = TaskForm::create();
        assert!(form.submit_fields().is_none());
        for field in [
            FormField::Name,
            FormField::Description,
            FormField::Date,
            FormField::Status,
            FormField::Category,
        ] {
            assert!(form.is_errored(field), "{:?} should be errored", field);
        }
        assert!(!form.is_errored(FormField::Attachment));
    }

    #[test]
    fn only_empty_fields_are_marked() {
        let mut form = TaskForm::create();
        form.name = "Buy milk".to_string();
        form.date = "2024-01-01".to_string();
        form.status = Some(TaskStatus::ToDo);
        assert!(form.submit_fields().is_none());
        assert!(!form.is_errored(FormField::Name));
        assert!(!form.is_errored(FormField::Date));
        assert!(form.is_errored(FormField::Description));
        assert!(form.is_errored(FormField::Category));
    }

    #[test]
    fn garbage_date_is_errored() {
        let mut form = TaskForm::create();
        form.date = "next tuesday".to_string();
        assert!(form.submit_fields().is_none());
        assert!(form.is_errored(FormField::Date));
    }

    #[test]
    fn complete_form_produces_fields() {
        let mut form = TaskForm::create();
        form.name = "Buy milk".to_string();
        form.description = "corner shop".to_string();
        form.date = "2024-01-01".to_string();
        form.status = Some(TaskStatus::ToDo);
        form.category = Some(TaskCategory::Personal);
        let fields = form.submit_fields().expect("valid form");
        assert_eq!(fields.name, "Buy milk");
        assert_eq!(fields.task_status, TaskStatus::ToDo);
        assert!(form.errors.is_empty());
    }

    #[test]
    fn edit_prefills_from_record() {
        let task = Task {
            id: "65a1f0".to_string(),
            name: "Ship report".to_string(),
            date: "2024-02-02".to_string(),
            description: "quarterly".to_string(),
            task_status: TaskStatus::InProgress,
            task_category: TaskCategory::Work,
            file_url: Some("http://localhost:5000/files/abc".to_string()),
        };
        let form = TaskForm::edit(&task);
        assert!(form.is_edit());
        assert_eq!(form.name, "Ship report");
        assert_eq!(form.status, Some(TaskStatus::InProgress));
        assert_eq!(
            form.existing_file_url.as_deref(),
            Some("http://localhost:5000/files/abc")
        );
    }

    #[test]
    fn status_selector_cycles_through_all_values() {
        let mut form = TaskForm::create();
        form.focus = 3; // Status
        form.cycle(1);
        assert_eq!(form.status, Some(TaskStatus::ToDo));
        form.cycle(1);
        assert_eq!(form.status, Some(TaskStatus::InProgress));
        form.cycle(-1);
        assert_eq!(form.status, Some(TaskStatus::ToDo));
        form.cycle(-1);
        assert_eq!(form.status, Some(TaskStatus::Completed));
    }

    #[test]
    fn non_image_attachment_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();
        let err = load_attachment(&path).unwrap_err();
        assert!(err.contains("image"));
    }

    #[test]
    fn oversize_attachment_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        let file = File::create(&path).unwrap();
        file.set_len(MAX_ATTACHMENT_BYTES + 1).unwrap();
        let err = load_attachment(&path).unwrap_err();
        assert!(err.contains("5MB"));
    }

    #[test]
    fn small_image_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        fs::write(&path, b"\x89PNG fake").unwrap();
        let att = load_attachment(&path).unwrap();
        assert_eq!(att.mime, "image/png");
        assert_eq!(att.file_name, "shot.png");

        let mut form = TaskForm::create();
        form.attachment_path = path.to_string_lossy().into_owned();
        assert!(form.take_attachment_from_path());
        assert!(form.attachment.is_some());
    }
}
