//! API coordinator for wiring the TUI to the remote task service.
//!
//! This module bridges the synchronous TUI event loop (crossterm
//! poll-based) with the async HTTP client. It spawns a background tokio
//! task and communicates with the main thread via [`ApiCommand`] /
//! [`ApiEvent`] channels.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── ApiEvent ───  tokio background task
//!                     ─── ApiCommand →
//! ```
//!
//! The main thread sends [`ApiCommand`]s (e.g., create a task) and drains
//! [`ApiEvent`]s (e.g., task list loaded) on each tick of the poll-based
//! event loop. Commands carrying a task body are only dispatched after the
//! record passed validation; nothing unvalidated reaches this layer.

use serde::Deserialize;
use tokio::sync::mpsc;

use taskdeck_core::credentials::{LoginCredentials, RegisterCredentials};
use taskdeck_core::task::{RawTask, Task};

/// Commands sent from the TUI main loop to the API background task.
#[derive(Debug)]
pub enum ApiCommand {
    /// Log in with validated credentials.
    Login(LoginCredentials),
    /// Register a new account with validated credentials.
    Register(RegisterCredentials),
    /// Fetch the full task list.
    FetchTasks,
    /// Create a validated task.
    CreateTask(Task),
    /// Update an existing task with a validated replacement.
    UpdateTask {
        /// Server-assigned task id.
        id: String,
        /// Replacement task body.
        task: Task,
    },
    /// Delete a task.
    DeleteTask {
        /// Server-assigned task id.
        id: String,
    },
    /// Gracefully shut down the background task.
    Shutdown,
}

/// Events sent from the API background task to the TUI main loop.
#[derive(Debug)]
pub enum ApiEvent {
    /// Login succeeded; the token should be persisted by the caller.
    LoggedIn {
        /// Bearer token issued by the server.
        token: String,
    },
    /// Registration succeeded; the user should proceed to login.
    Registered,
    /// The task list was (re)loaded.
    TasksLoaded(Vec<Task>),
    /// A task was created; carries the server-assigned record.
    TaskCreated(Task),
    /// A task was updated.
    TaskUpdated(Task),
    /// A task was deleted.
    TaskDeleted {
        /// Id of the removed task.
        id: String,
    },
    /// A request failed; `context` names the attempted operation.
    Failed {
        /// Operation that failed (e.g., "login", "create task").
        context: &'static str,
        /// Human-readable message for the status line.
        message: String,
    },
}

/// Configuration for the API layer.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the task API (e.g., `https://api.example.com`).
    pub api_url: String,
    /// Bearer token from a previous session, if any.
    pub token: Option<String>,
    /// Timeout applied to each HTTP request.
    pub request_timeout: std::time::Duration,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,
}

/// Errors from the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, bad body).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request; carries its message.
    #[error("{0}")]
    Rejected(String),

    /// A task operation was attempted without a session token.
    #[error("not logged in")]
    NotAuthenticated,
}

/// `{ "data": … }` envelope used by list and auth responses.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Token payload inside the login response envelope.
#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

/// Error payload shape for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Spawn the API background task and return channel handles.
///
/// The background task owns an [`ApiClient`] and serially executes
/// [`ApiCommand`]s, emitting one [`ApiEvent`] per command. There is no
/// connection handshake; the first request surfaces any reachability
/// problem as a [`ApiEvent::Failed`].
///
/// # Errors
///
/// Returns [`ApiError::Http`] if the HTTP client cannot be constructed.
pub fn spawn_api(
    config: ApiConfig,
) -> Result<(mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>), ApiError> {
    let client = ApiClient::new(&config)?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>(config.channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<ApiEvent>(config.channel_capacity);

    tokio::spawn(async move {
        command_handler(client, cmd_rx, evt_tx).await;
    });

    Ok((cmd_tx, evt_rx))
}

/// Background task: handle commands from the TUI main loop.
///
/// Executes each command against the remote API and forwards the outcome
/// as an [`ApiEvent`]. A successful login updates the client's bearer
/// token for subsequent task requests.
async fn command_handler(
    mut client: ApiClient,
    mut cmd_rx: mpsc::Receiver<ApiCommand>,
    evt_tx: mpsc::Sender<ApiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let event = match cmd {
            ApiCommand::Login(creds) => match client.login(&creds).await {
                Ok(token) => {
                    client.set_token(token.clone());
                    ApiEvent::LoggedIn { token }
                }
                Err(e) => failed("login", &e),
            },
            ApiCommand::Register(creds) => match client.register(&creds).await {
                Ok(()) => ApiEvent::Registered,
                Err(e) => failed("registration", &e),
            },
            ApiCommand::FetchTasks => match client.fetch_tasks().await {
                Ok(tasks) => ApiEvent::TasksLoaded(tasks),
                Err(e) => failed("loading tasks", &e),
            },
            ApiCommand::CreateTask(task) => match client.create_task(&task).await {
                Ok(created) => ApiEvent::TaskCreated(created),
                Err(e) => failed("creating task", &e),
            },
            ApiCommand::UpdateTask { id, task } => match client.update_task(&id, &task).await {
                Ok(updated) => ApiEvent::TaskUpdated(updated),
                Err(e) => failed("updating task", &e),
            },
            ApiCommand::DeleteTask { id } => match client.delete_task(&id).await {
                Ok(()) => ApiEvent::TaskDeleted { id },
                Err(e) => failed("deleting task", &e),
            },
            ApiCommand::Shutdown => {
                tracing::info!("api command handler shutting down");
                break;
            }
        };

        if evt_tx.send(event).await.is_err() {
            // TUI dropped; exit.
            break;
        }
    }
}

/// Build a `Failed` event, logging the underlying error.
fn failed(context: &'static str, error: &ApiError) -> ApiEvent {
    tracing::warn!(context, error = %error, "api request failed");
    ApiEvent::Failed {
        context,
        message: error.to_string(),
    }
}

/// HTTP client for the remote task API.
///
/// Thin wrapper over reqwest: one method per endpoint, bearer token on
/// every task request, `{ "data": … }` envelopes unwrapped here.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Replace the session token used for task requests.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    fn tasks_url(&self) -> String {
        format!("{}/primary/tasks", self.base_url)
    }

    fn bearer(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    /// `POST /primary/auth/login` — returns the issued bearer token.
    async fn login(&self, creds: &LoginCredentials) -> Result<String, ApiError> {
        let resp = self
            .client
            .post(format!("{}/primary/auth/login", self.base_url))
            .json(creds)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let envelope: DataEnvelope<TokenData> = resp.json().await?;
        Ok(envelope.data.token)
    }

    /// `POST /primary/auth/register`.
    async fn register(&self, creds: &RegisterCredentials) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(format!("{}/primary/auth/register", self.base_url))
            .json(creds)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }

    /// `GET /primary/tasks` — returns the ingested task list.
    ///
    /// Records missing required fields degrade to exclusion rather than
    /// failing the whole response.
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let resp = self
            .client
            .get(self.tasks_url())
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let envelope: DataEnvelope<Vec<RawTask>> = resp.json().await?;
        Ok(ingest_tasks(envelope.data))
    }

    /// `POST /primary/tasks` — returns the created task.
    async fn create_task(&self, task: &Task) -> Result<Task, ApiError> {
        let resp = self
            .client
            .post(self.tasks_url())
            .bearer_auth(self.bearer()?)
            .json(task)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// `PUT /primary/tasks/{id}` — returns the updated task.
    async fn update_task(&self, id: &str, task: &Task) -> Result<Task, ApiError> {
        let resp = self
            .client
            .put(format!("{}/{id}", self.tasks_url()))
            .bearer_auth(self.bearer()?)
            .json(task)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// `DELETE /primary/tasks/{id}` — no response body.
    async fn delete_task(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(format!("{}/{id}", self.tasks_url()))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        check_status(resp).await?;
        Ok(())
    }
}

/// Pass a successful response through; turn a non-2xx response into
/// [`ApiError::Rejected`] carrying the server's message.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Rejected(rejection_message(status.as_u16(), &body)))
}

/// Extract the `message` field from an error body, falling back to the
/// HTTP status when the body is not the expected shape.
fn rejection_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| format!("request failed with status {status}"),
        |parsed| parsed.message,
    )
}

/// Convert raw wire records into typed tasks, dropping malformed ones.
fn ingest_tasks(raw: Vec<RawTask>) -> Vec<Task> {
    let total = raw.len();
    let tasks: Vec<Task> = raw.into_iter().filter_map(RawTask::into_task).collect();
    if tasks.len() < total {
        tracing::warn!(
            dropped = total - tasks.len(),
            kept = tasks.len(),
            "excluded malformed task records from response"
        );
    }
    tasks
}
