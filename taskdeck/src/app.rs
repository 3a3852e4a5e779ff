//! Application state and event handling.
//!
//! `App` owns the task list and all form state. Key handling returns an
//! optional [`ApiCommand`] for the main loop to dispatch; API responses
//! come back through [`App::apply_event`]. Validation and filtering are
//! delegated to `taskdeck-core` — the app never sends an unvalidated
//! draft and never mutates the list while filtering it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use taskdeck_core::credentials::{LoginCredentials, RegisterCredentials};
use taskdeck_core::dates::{date_input_value, end_of_day_utc};
use taskdeck_core::filter::{StatusFilter, filter_tasks};
use taskdeck_core::task::{Task, TaskDraft, TaskStatus};
use taskdeck_core::validate::{FieldErrors, validate_login, validate_register, validate_task};

use crate::api::{ApiCommand, ApiEvent};

/// Which screen is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login form.
    Login,
    /// Registration form.
    Register,
    /// Task dashboard.
    Dashboard,
}

/// Modal overlay on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// No modal; the list has focus.
    None,
    /// Add/edit task form.
    TaskForm,
    /// Read-only task detail view.
    TaskDetail,
}

/// Which dashboard element receives text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    /// Task list navigation.
    List,
    /// Search box.
    Search,
}

/// Login form state.
#[derive(Debug, Default)]
pub struct LoginForm {
    /// Email-or-username field.
    pub email_or_username: String,
    /// Password field.
    pub password: String,
    /// Focused field index (0 = identifier, 1 = password).
    pub focus: usize,
    /// Validation errors from the last submit attempt.
    pub errors: FieldErrors,
}

/// Registration form state.
#[derive(Debug, Default)]
pub struct RegisterForm {
    /// Username field.
    pub username: String,
    /// Email field.
    pub email: String,
    /// Password field.
    pub password: String,
    /// Focused field index (0 = username, 1 = email, 2 = password).
    pub focus: usize,
    /// Validation errors from the last submit attempt.
    pub errors: FieldErrors,
}

/// Add/edit task form state.
#[derive(Debug, Default)]
pub struct TaskForm {
    /// Title field.
    pub title: String,
    /// Description field.
    pub description: String,
    /// Calendar date field (`YYYY-MM-DD`).
    pub due_date: String,
    /// Status selection.
    pub status: TaskStatus,
    /// Focused field index (0 = title, 1 = description, 2 = due date,
    /// 3 = status).
    pub focus: usize,
    /// Index into `App::tasks` when editing; `None` when adding.
    pub editing_index: Option<usize>,
    /// Validation errors from the last submit attempt.
    pub errors: FieldErrors,
}

/// Number of focusable fields per form.
const LOGIN_FIELDS: usize = 2;
const REGISTER_FIELDS: usize = 3;
const TASK_FORM_FIELDS: usize = 4;

/// Main application state.
pub struct App {
    /// Current screen.
    pub screen: Screen,
    /// Active dashboard modal.
    pub modal: Modal,
    /// Login form.
    pub login: LoginForm,
    /// Registration form.
    pub register: RegisterForm,
    /// Add/edit task form.
    pub task_form: TaskForm,
    /// Full in-memory task list, in server order.
    pub tasks: Vec<Task>,
    /// Free-text search term.
    pub search: String,
    /// Status filter selection.
    pub status_filter: StatusFilter,
    /// Selected position within the visible (filtered) list.
    pub selected: usize,
    /// Dashboard input focus.
    pub focus: DashboardFocus,
    /// One-line status message for the status bar.
    pub status_message: Option<String>,
    /// Whether an API backend is configured.
    pub online: bool,
    /// Whether a session token is active.
    pub logged_in: bool,
    /// Set when the user logs out; main clears the stored token.
    pub logout_requested: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create an online app starting at the login screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
            modal: Modal::None,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            task_form: TaskForm::default(),
            tasks: Vec::new(),
            search: String::new(),
            status_filter: StatusFilter::All,
            selected: 0,
            focus: DashboardFocus::List,
            status_message: None,
            online: true,
            logged_in: false,
            logout_requested: false,
            should_quit: false,
        }
    }

    /// Resume a stored session: start on the dashboard, already logged in.
    #[must_use]
    pub fn with_session(mut self) -> Self {
        self.logged_in = true;
        self.screen = Screen::Dashboard;
        self
    }

    /// Create an offline demo app seeded with sample tasks.
    #[must_use]
    pub fn offline_demo() -> Self {
        let mut app = Self::new();
        app.online = false;
        app.logged_in = true;
        app.screen = Screen::Dashboard;
        app.tasks = sample_tasks();
        app.status_message = Some("Offline demo mode — changes are not saved".to_string());
        app
    }

    /// Tasks matching the current search term and status filter, in
    /// original order.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, &self.search, self.status_filter)
    }

    /// Indices into `tasks` for the current visible list.
    fn visible_indices(&self) -> Vec<usize> {
        let needle = self.search.to_lowercase();
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| {
                let matches_search =
                    needle.is_empty() || task.title.to_lowercase().contains(&needle);
                matches_search && self.status_filter.matches(task.status)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// The selected task, if the visible list is non-empty.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        let indices = self.visible_indices();
        indices.get(self.selected).map(|&i| &self.tasks[i])
    }

    /// Set the status line message.
    pub fn push_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    // -----------------------------------------------------------------
    // Key handling
    // -----------------------------------------------------------------

    /// Handle a key event.
    ///
    /// Returns `Some(ApiCommand)` when the action requires a network
    /// dispatch (submitting a form, deleting a task, refreshing).
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        // Ctrl-C quits from anywhere.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Register => self.handle_register_key(key),
            Screen::Dashboard => match self.modal {
                Modal::None => self.handle_dashboard_key(key),
                Modal::TaskForm => self.handle_task_form_key(key),
                Modal::TaskDetail => {
                    if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                        self.modal = Modal::None;
                    }
                    None
                }
            },
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.screen = Screen::Register;
            return None;
        }
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.login.focus = (self.login.focus + 1) % LOGIN_FIELDS;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.login.focus = (self.login.focus + LOGIN_FIELDS - 1) % LOGIN_FIELDS;
                None
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Char(c) => {
                self.login_field_mut().push(c);
                None
            }
            KeyCode::Backspace => {
                self.login_field_mut().pop();
                None
            }
            _ => None,
        }
    }

    fn login_field_mut(&mut self) -> &mut String {
        if self.login.focus == 0 {
            &mut self.login.email_or_username
        } else {
            &mut self.login.password
        }
    }

    fn submit_login(&mut self) -> Option<ApiCommand> {
        let creds = LoginCredentials {
            email_or_username: self.login.email_or_username.clone(),
            password: self.login.password.clone(),
        };
        match validate_login(&creds) {
            Err(errors) => {
                self.login.errors = errors;
                None
            }
            Ok(()) => {
                self.login.errors = FieldErrors::default();
                if self.online {
                    self.push_status("Logging in...");
                    Some(ApiCommand::Login(creds))
                } else {
                    self.logged_in = true;
                    self.screen = Screen::Dashboard;
                    None
                }
            }
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Login;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.register.focus = (self.register.focus + 1) % REGISTER_FIELDS;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.register.focus = (self.register.focus + REGISTER_FIELDS - 1) % REGISTER_FIELDS;
                None
            }
            KeyCode::Enter => self.submit_register(),
            KeyCode::Char(c) => {
                self.register_field_mut().push(c);
                None
            }
            KeyCode::Backspace => {
                self.register_field_mut().pop();
                None
            }
            _ => None,
        }
    }

    fn register_field_mut(&mut self) -> &mut String {
        match self.register.focus {
            0 => &mut self.register.username,
            1 => &mut self.register.email,
            _ => &mut self.register.password,
        }
    }

    fn submit_register(&mut self) -> Option<ApiCommand> {
        let creds = RegisterCredentials {
            username: self.register.username.clone(),
            email: self.register.email.clone(),
            password: self.register.password.clone(),
        };
        match validate_register(&creds) {
            Err(errors) => {
                self.register.errors = errors;
                None
            }
            Ok(()) => {
                self.register.errors = FieldErrors::default();
                if self.online {
                    self.push_status("Registering...");
                    Some(ApiCommand::Register(creds))
                } else {
                    self.screen = Screen::Login;
                    None
                }
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        if self.focus == DashboardFocus::Search {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.focus = DashboardFocus::List,
                KeyCode::Char(c) => {
                    self.search.push(c);
                    self.selected = 0;
                }
                KeyCode::Backspace => {
                    self.search.pop();
                    self.selected = 0;
                }
                _ => {}
            }
            return None;
        }

        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.logout();
            return None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('/') => {
                self.focus = DashboardFocus::Search;
                None
            }
            KeyCode::Char('f') => {
                self.status_filter = self.status_filter.next();
                self.selected = 0;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let visible = self.visible_indices().len();
                if self.selected + 1 < visible {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Char('a' | 'n') => {
                self.open_add_form();
                None
            }
            KeyCode::Char('e') => {
                self.open_edit_form();
                None
            }
            KeyCode::Enter => {
                if self.selected_task().is_some() {
                    self.modal = Modal::TaskDetail;
                }
                None
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('r') => {
                if self.online {
                    self.push_status("Refreshing tasks...");
                    Some(ApiCommand::FetchTasks)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn open_add_form(&mut self) {
        self.task_form = TaskForm::default();
        self.modal = Modal::TaskForm;
    }

    fn open_edit_form(&mut self) {
        let indices = self.visible_indices();
        let Some(&index) = indices.get(self.selected) else {
            return;
        };
        let task = &self.tasks[index];
        self.task_form = TaskForm {
            title: task.title.clone(),
            description: task.description.clone(),
            // Pre-fill with the calendar-day portion; the raw value is
            // shown when the stored date does not parse.
            due_date: date_input_value(&task.due_date).unwrap_or_else(|| task.due_date.clone()),
            status: task.status,
            focus: 0,
            editing_index: Some(index),
            errors: FieldErrors::default(),
        };
        self.modal = Modal::TaskForm;
    }

    fn delete_selected(&mut self) -> Option<ApiCommand> {
        let indices = self.visible_indices();
        let &index = indices.get(self.selected)?;
        if self.online {
            let Some(id) = self.tasks[index].id.clone() else {
                self.push_status("Task has no server id; refresh and retry");
                return None;
            };
            self.push_status("Deleting task...");
            Some(ApiCommand::DeleteTask { id })
        } else {
            self.tasks.remove(index);
            self.clamp_selection();
            None
        }
    }

    fn handle_task_form_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Esc => {
                self.modal = Modal::None;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.task_form.focus = (self.task_form.focus + 1) % TASK_FORM_FIELDS;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.task_form.focus =
                    (self.task_form.focus + TASK_FORM_FIELDS - 1) % TASK_FORM_FIELDS;
                None
            }
            KeyCode::Enter => self.submit_task_form(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.task_form.focus == 3 =>
            {
                self.task_form.status = match self.task_form.status {
                    TaskStatus::Pending => TaskStatus::Completed,
                    TaskStatus::Completed => TaskStatus::Pending,
                };
                None
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.task_form_field_mut() {
                    field.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(field) = self.task_form_field_mut() {
                    field.pop();
                }
                None
            }
            _ => None,
        }
    }

    fn task_form_field_mut(&mut self) -> Option<&mut String> {
        match self.task_form.focus {
            0 => Some(&mut self.task_form.title),
            1 => Some(&mut self.task_form.description),
            2 => Some(&mut self.task_form.due_date),
            _ => None, // status is toggled, not typed
        }
    }

    fn submit_task_form(&mut self) -> Option<ApiCommand> {
        // Normalize the calendar date to end-of-day UTC before it leaves
        // the form boundary; an unparsable value flows through raw so the
        // validator reports it against the dueDate field.
        let normalized = end_of_day_utc(&self.task_form.due_date)
            .unwrap_or_else(|| self.task_form.due_date.clone());
        let draft = TaskDraft {
            title: self.task_form.title.clone(),
            description: self.task_form.description.clone(),
            due_date: normalized,
            status: Some(self.task_form.status.to_string()),
        };

        match validate_task(&draft) {
            Err(errors) => {
                self.task_form.errors = errors;
                None
            }
            Ok(()) => {
                let editing = self.task_form.editing_index;
                let id = editing.and_then(|i| self.tasks.get(i).and_then(|t| t.id.clone()));
                let task = draft.into_task(id.clone());
                self.modal = Modal::None;

                match (self.online, editing) {
                    (true, Some(_)) => {
                        let Some(id) = id else {
                            self.push_status("Task has no server id; refresh and retry");
                            return None;
                        };
                        self.push_status("Saving task...");
                        Some(ApiCommand::UpdateTask { id, task })
                    }
                    (true, None) => {
                        self.push_status("Saving task...");
                        Some(ApiCommand::CreateTask(task))
                    }
                    (false, Some(index)) => {
                        if let Some(slot) = self.tasks.get_mut(index) {
                            *slot = task;
                        }
                        None
                    }
                    (false, None) => {
                        self.tasks.push(task);
                        None
                    }
                }
            }
        }
    }

    fn logout(&mut self) {
        self.logged_in = false;
        self.logout_requested = true;
        self.screen = Screen::Login;
        self.modal = Modal::None;
        self.tasks.clear();
        self.search.clear();
        self.status_filter = StatusFilter::All;
        self.selected = 0;
        self.login = LoginForm::default();
        self.push_status("Logged out");
    }

    fn clamp_selection(&mut self) {
        let visible = self.visible_indices().len();
        if self.selected >= visible {
            self.selected = visible.saturating_sub(1);
        }
    }

    // -----------------------------------------------------------------
    // API event handling
    // -----------------------------------------------------------------

    /// Fold an API event into the application state.
    ///
    /// Returns a follow-up command when one is implied (a fresh login
    /// triggers the initial task fetch).
    pub fn apply_event(&mut self, event: ApiEvent) -> Option<ApiCommand> {
        match event {
            ApiEvent::LoggedIn { .. } => {
                self.logged_in = true;
                self.screen = Screen::Dashboard;
                self.login = LoginForm::default();
                self.push_status("Logged in");
                Some(ApiCommand::FetchTasks)
            }
            ApiEvent::Registered => {
                self.screen = Screen::Login;
                self.register = RegisterForm::default();
                self.push_status("Registration successful — please log in");
                None
            }
            ApiEvent::TasksLoaded(tasks) => {
                self.tasks = tasks;
                self.clamp_selection();
                self.push_status(format!("Loaded {} tasks", self.tasks.len()));
                None
            }
            ApiEvent::TaskCreated(task) => {
                self.tasks.push(task);
                self.push_status("Task created");
                None
            }
            ApiEvent::TaskUpdated(task) => {
                if let Some(slot) = self
                    .tasks
                    .iter_mut()
                    .find(|t| t.id.is_some() && t.id == task.id)
                {
                    *slot = task;
                }
                self.push_status("Task updated");
                None
            }
            ApiEvent::TaskDeleted { id } => {
                self.tasks.retain(|t| t.id.as_deref() != Some(id.as_str()));
                self.clamp_selection();
                self.push_status("Task deleted");
                None
            }
            ApiEvent::Failed { context, message } => {
                self.push_status(format!("Error {context}: {message}"));
                None
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample tasks for offline demo mode (the dashboard's original seed list).
fn sample_tasks() -> Vec<Task> {
    let seed = [
        ("Task 1", "Description 1", "2023-10-01", TaskStatus::Pending),
        (
            "Task 2",
            "Description 2",
            "2023-10-02",
            TaskStatus::Completed,
        ),
        ("Task 3", "Description 3", "2023-10-03", TaskStatus::Pending),
        (
            "Task 4",
            "Description 4",
            "2023-10-04",
            TaskStatus::Completed,
        ),
        ("Task 5", "Description 5", "2023-10-05", TaskStatus::Pending),
        (
            "Task 6",
            "Description 6",
            "2023-10-06",
            TaskStatus::Completed,
        ),
    ];
    seed.into_iter()
        .map(|(title, description, day, status)| Task {
            id: None,
            title: title.to_string(),
            description: description.to_string(),
            due_date: end_of_day_utc(day).unwrap_or_else(|| day.to_string()),
            status,
        })
        .collect()
}
