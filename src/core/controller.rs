use crate::core::filter::apply_filter;
use crate::core::validator::{parse_draft, FieldErrors};
use crate::domain::model::{
    DeveloperDraft, DeveloperRecord, FilterState, FormField, ParseRoleError, Role, RoleFilter,
};
use crate::domain::ports::DirectoryStore;
use crate::utils::error::{DirectoryError, Result};
use std::collections::VecDeque;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch developers";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add developer";
pub const ADD_SUCCEEDED_MESSAGE: &str = "Developer added successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Identifies one fetch. Only the most recently issued ticket may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Carries the persisted record when the store's reply could be read.
    Added(Option<DeveloperRecord>),
    Invalid(FieldErrors),
    Rejected(String),
}

/// 目錄狀態的唯一擁有者：集合、篩選條件、載入狀態、表單與通知
pub struct DirectoryController<S: DirectoryStore> {
    store: S,
    developers: Vec<DeveloperRecord>,
    visible: Vec<DeveloperRecord>,
    filter: FilterState,
    fetch_state: FetchState,
    issued_fetches: u64,
    form: DeveloperDraft,
    form_errors: FieldErrors,
    notifications: VecDeque<Notification>,
}

impl<S: DirectoryStore> DirectoryController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            developers: Vec::new(),
            visible: Vec::new(),
            filter: FilterState::default(),
            fetch_state: FetchState::Idle,
            issued_fetches: 0,
            form: DeveloperDraft::default(),
            form_errors: FieldErrors::new(),
            notifications: VecDeque::new(),
        }
    }

    /// Initial load.
    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let result = self.store.list_all().await;
        self.complete_fetch(ticket, result);
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued_fetches += 1;
        self.fetch_state = FetchState::Loading;
        tracing::debug!("Starting fetch #{}", self.issued_fetches);
        FetchTicket(self.issued_fetches)
    }

    /// Applies a finished fetch. Returns false when a newer fetch was issued
    /// after `ticket`, in which case the result is dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<DeveloperRecord>>,
    ) -> bool {
        if ticket.0 != self.issued_fetches {
            tracing::debug!(
                "Discarding stale fetch #{} (latest is #{})",
                ticket.0,
                self.issued_fetches
            );
            return false;
        }

        match result {
            Ok(developers) => {
                tracing::info!("Loaded {} developers", developers.len());
                self.developers = developers;
                self.fetch_state = FetchState::Idle;
                self.recompute_visible();
            }
            Err(e) => {
                // 保留既有集合，畫面不清空
                tracing::error!("❌ Error fetching developers: {}", e);
                self.fetch_state = FetchState::Error(e.user_friendly_message());
                self.notify(NotificationLevel::Error, FETCH_FAILED_MESSAGE);
            }
        }
        true
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
        self.recompute_visible();
    }

    pub fn set_role_filter(&mut self, role_filter: RoleFilter) {
        self.filter.role_filter = role_filter;
        self.recompute_visible();
    }

    /// Validates `draft` and submits it. Never touches the controller's form.
    pub async fn add_developer(&mut self, draft: &DeveloperDraft) -> AddOutcome {
        let new_developer = match parse_draft(draft) {
            Ok(new_developer) => new_developer,
            Err(errors) => {
                tracing::debug!("Draft rejected locally with {} field errors", errors.len());
                return AddOutcome::Invalid(errors);
            }
        };

        match self.store.create(&new_developer).await {
            Ok(created) => {
                match &created {
                    Some(record) => {
                        tracing::info!("✅ Developer {} created with id {}", record.name, record.id)
                    }
                    None => tracing::info!("✅ Developer {} created", new_developer.name),
                }
                self.notify(NotificationLevel::Success, ADD_SUCCEEDED_MESSAGE);
                self.refresh().await;
                AddOutcome::Added(created)
            }
            Err(e) => {
                tracing::warn!("Create failed: {}", e);
                let message = match e {
                    DirectoryError::Rejected { message } => message,
                    _ => ADD_FAILED_MESSAGE.to_string(),
                };
                self.notify(NotificationLevel::Error, message.clone());
                AddOutcome::Rejected(message)
            }
        }
    }

    /// Submits the controller-held form. The form is reset only on success.
    pub async fn submit_form(&mut self) -> AddOutcome {
        let draft = self.form.clone();
        let outcome = self.add_developer(&draft).await;
        match &outcome {
            AddOutcome::Added(_) => {
                self.form = DeveloperDraft::default();
                self.form_errors.clear();
            }
            AddOutcome::Invalid(errors) => self.form_errors = errors.clone(),
            AddOutcome::Rejected(_) => {}
        }
        outcome
    }

    /// 更新欄位並清除該欄位先前的錯誤
    pub fn set_form_field(
        &mut self,
        field: FormField,
        value: &str,
    ) -> std::result::Result<(), ParseRoleError> {
        match field {
            FormField::Name => self.form.name = value.to_string(),
            FormField::Role => self.form.role = value.parse::<Role>()?,
            FormField::TechStack => self.form.tech_stack = value.to_string(),
            FormField::Experience => self.form.experience = value.to_string(),
        }
        self.form_errors.remove(field);
        Ok(())
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn developers(&self) -> &[DeveloperRecord] {
        &self.developers
    }

    pub fn visible(&self) -> &[DeveloperRecord] {
        &self.visible
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch_state
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_state == FetchState::Loading
    }

    pub fn form(&self) -> &DeveloperDraft {
        &self.form
    }

    pub fn form_errors(&self) -> &FieldErrors {
        &self.form_errors
    }

    fn recompute_visible(&mut self) {
        self.visible = apply_filter(&self.developers, &self.filter)
            .into_iter()
            .cloned()
            .collect();
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push_back(Notification {
            level,
            message: message.into(),
        });
    }
}
