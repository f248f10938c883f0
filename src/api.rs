use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Task, TaskFields, TaskStatus};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not logged in, please log in again")]
    Unauthorized,
    #[error("{message}")]
    Server { message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Payload attached to a create/update submission. Callers validate and read
/// the file up front so the client only deals with bytes.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct StatusBody {
    #[serde(rename = "taskStatus")]
    task_status: TaskStatus,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Deserialize)]
struct ListEnvelope {
    data: Option<Vec<Task>>,
}

#[derive(Deserialize)]
struct SaveEnvelope {
    success: bool,
    #[serde(rename = "newTask")]
    new_task: Option<Task>,
}

#[derive(Deserialize)]
struct LoginEnvelope {
    token: String,
}

#[derive(Deserialize)]
struct MessageEnvelope {
    message: Option<String>,
}

/// Client for the remote task store. Every task operation requires the bearer
/// token issued at login; none of them retries on failure.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        ApiClient {
            http: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Base URL from TASKBUDDY_API_URL, falling back to the local default.
    pub fn base_url_from_env() -> String {
        std::env::var("TASKBUDDY_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    fn bearer(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::Unauthorized)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        log::debug!("logging in as {}", username);
        let resp = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&Credentials { username, password })
            .send()
            .await?;
        let body: LoginEnvelope = check(resp).await?.json().await?;
        Ok(body.token)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(format!("{}/register", self.base_url))
            .json(&Credentials { username, password })
            .send()
            .await?;
        let body: MessageEnvelope = check(resp).await?.json().await?;
        Ok(body
            .message
            .unwrap_or_else(|| "registration successful".to_string()))
    }

    /// Fetch the signed-in user's tasks, optionally narrowed server-side by
    /// status. The server omits `data` when the user has no tasks yet.
    pub async fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>, ApiError> {
        log::debug!("fetching tasks from {}", self.base_url);
        let mut req = self
            .http
            .get(format!("{}/getTask", self.base_url))
            .bearer_auth(self.bearer()?);
        if let Some(status) = status {
            req = req.query(&[("status", status.as_str())]);
        }
        let resp = req.send().await?;
        let body: ListEnvelope = check(resp).await?.json().await?;
        Ok(body.data.unwrap_or_default())
    }

    /// Create a task. The server assigns the id and returns the stored record.
    pub async fn create_task(
        &self,
        fields: &TaskFields,
        attachment: Option<Attachment>,
    ) -> Result<Task, ApiError> {
        let url = format!("{}/saveUserData", self.base_url);
        let req = self.http.post(&url).bearer_auth(self.bearer()?);
        let req = match attachment {
            Some(att) => req.multipart(multipart_form(fields, att)?),
            None => req.json(fields),
        };
        let resp = req.send().await?;
        let body: SaveEnvelope = check(resp).await?.json().await?;
        match body.new_task {
            Some(task) if body.success => Ok(task),
            _ => Err(ApiError::Server {
                message: "server did not return the created task".to_string(),
            }),
        }
    }

    /// Replace all editable fields of an existing task.
    pub async fn update_task(
        &self,
        id: &str,
        fields: &TaskFields,
        attachment: Option<Attachment>,
    ) -> Result<(), ApiError> {
        let url = format!("{}/updateTask/{}", self.base_url, id);
        let req = self.http.put(&url).bearer_auth(self.bearer()?);
        let req = match attachment {
            Some(att) => req.multipart(multipart_form(fields, att)?),
            None => req.json(fields),
        };
        check(req.send().await?).await?;
        Ok(())
    }

    pub async fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<(), ApiError> {
        let url = format!("{}/updateTaskStatus/{}", self.base_url, id);
        let resp = self
            .http
            .put(&url)
            .bearer_auth(self.bearer()?)
            .json(&StatusBody {
                task_status: status,
            })
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/deleteTask/{}", self.base_url, id);
        let resp = self
            .http
            .delete(&url)
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Multipart encoding mirrors the form the web client posts: one text part per
/// field plus the file part.
fn multipart_form(
    fields: &TaskFields,
    att: Attachment,
) -> Result<reqwest::multipart::Form, ApiError> {
    let part = reqwest::multipart::Part::bytes(att.bytes)
        .file_name(att.file_name)
        .mime_str(&att.mime)?;
    Ok(reqwest::multipart::Form::new()
        .text("name", fields.name.clone())
        .text("date", fields.date.clone())
        .text("description", fields.description.clone())
        .text("taskStatus", fields.task_status.as_str())
        .text("taskCategory", fields.task_category.as_str())
        .part("file", part))
}

/// Map a response onto the error taxonomy: 401 means the token was missing or
/// rejected, any other non-2xx carries the server's `error` message when one
/// is present.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("server returned {}", status));
    log::warn!("request failed: {}", message);
    Err(ApiError::Server { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskCategory;

    #[test]
    fn list_envelope_with_tasks() {
        let json = r#"{
            "success": true,
            "data": [{
                "id": "65a1f0",
                "userId": "aravind",
                "name": "Buy milk",
                "date": "2024-01-01",
                "description": "from the corner shop",
                "taskStatus": "TO-DO",
                "taskCategory": "PERSONAL",
                "fileUrl": "http://localhost:5000/files/default"
            }]
        }"#;
        let body: ListEnvelope = serde_json::from_str(json).unwrap();
        let tasks = body.data.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "65a1f0");
        assert_eq!(tasks[0].task_status, TaskStatus::ToDo);
        assert_eq!(tasks[0].task_category, TaskCategory::Personal);
    }

    #[test]
    fn list_envelope_with_null_data() {
        let body: ListEnvelope =
            serde_json::from_str(r#"{"success":true,"data":null}"#).unwrap();
        assert!(body.data.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{
            "id": "1", "name": "x", "date": "2024-01-01", "description": "y",
            "taskStatus": "ARCHIVED", "taskCategory": "WORK"
        }"#;
        assert!(serde_json::from_str::<Task>(json).is_err());
    }

    #[test]
    fn status_body_wire_name() {
        let body = StatusBody {
            task_status: TaskStatus::Completed,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"taskStatus":"COMPLETED"}"#
        );
    }

    #[test]
    fn save_envelope_carries_new_task() {
        let json = r#"{
            "success": true,
            "message": "Data saved successfully",
            "fileUrl": "http://localhost:5000/files/abc",
            "newTask": {
                "id": "65a1f1", "name": "Ship report", "date": "2024-02-02",
                "description": "quarterly", "taskStatus": "IN-PROGRESS",
                "taskCategory": "WORK", "fileUrl": "http://localhost:5000/files/abc"
            }
        }"#;
        let body: SaveEnvelope = serde_json::from_str(json).unwrap();
        assert!(body.success);
        assert_eq!(body.new_task.unwrap().task_status, TaskStatus::InProgress);
    }
}
