//! The widget session: one event loop owning all mutable state.
//!
//! The host view renders from the session and feeds user input back in as
//! `Action`s. Every mutation (user actions, countdown ticks, deletion
//! grace expiries, debounced geometry writes) happens on the single task
//! inside `run`, so none of the state needs locking.

use crate::clipboard::ClipboardAccess;
use crate::grace::GraceQueue;
use crate::platform::{
    AppController, BreakNotifier, DisplayEnumerator, WindowEvent, WindowHandle,
};
use crate::window_state::WindowStateService;
use perch_core::AppConfig;
use perch_domain::{FocusTimer, TickOutcome, TodoId, TodoList};
use perch_persistence::{read_or_default, write_value, KeyValueStore, TODO_ITEMS_KEY};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Message shown by the break notification when a countdown finishes.
pub const BREAK_MESSAGE: &str = "Time for a break!";

/// User-driven inputs forwarded by the host view.
#[derive(Debug, Clone)]
pub enum Action {
    AddTodo { text: String },
    BeginEdit { id: TodoId },
    CommitEdit { id: TodoId, text: String },
    CancelEdit,
    RequestDelete { id: TodoId },
    CancelDelete { id: TodoId },
    CopyTodoText { id: TodoId },
    ToggleTimer,
    AdjustTimer { delta: i32 },
    Quit,
}

/// What the edit field currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// An existing item being reworded.
    Existing(TodoId),
    /// The synthetic new-item row shown right after an add, so the user can
    /// keep typing entries.
    Draft,
}

/// Senders the host shell uses to feed the running session.
#[derive(Debug, Clone)]
pub struct SessionChannels {
    pub actions: mpsc::UnboundedSender<Action>,
    pub window_events: mpsc::UnboundedSender<WindowEvent>,
}

enum Wake {
    Second,
    Action(Action),
    DeletionElapsed(TodoId),
    Window(WindowEvent),
    PersistDue,
    Detached,
}

pub struct WidgetSession {
    todos: TodoList,
    editing: Option<EditTarget>,
    /// The one item currently in the pending-deletion visual state.
    deleting: Option<TodoId>,
    timer: FocusTimer,
    grace: GraceQueue,
    window_state: WindowStateService,
    actions: mpsc::UnboundedReceiver<Action>,
    window_events: mpsc::UnboundedReceiver<WindowEvent>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn BreakNotifier>,
    controller: Arc<dyn AppController>,
    clipboard: Arc<dyn ClipboardAccess>,
    should_quit: bool,
}

impl WidgetSession {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
        window: Arc<dyn WindowHandle>,
        displays: Arc<dyn DisplayEnumerator>,
        notifier: Arc<dyn BreakNotifier>,
        controller: Arc<dyn AppController>,
        clipboard: Arc<dyn ClipboardAccess>,
    ) -> (Self, SessionChannels) {
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        let (window_tx, window_rx) = mpsc::unbounded_channel();

        let window_state = WindowStateService::new(
            store.clone(),
            window,
            displays,
            config.effective_settle_delay(),
            config.effective_geometry_debounce(),
        );

        let session = Self {
            todos: TodoList::new(),
            editing: None,
            deleting: None,
            timer: FocusTimer::with_minutes(config.effective_focus_minutes()),
            grace: GraceQueue::new(config.effective_delete_grace()),
            window_state,
            actions: actions_rx,
            window_events: window_rx,
            store,
            notifier,
            controller,
            clipboard,
            should_quit: false,
        };

        (
            session,
            SessionChannels {
                actions: actions_tx,
                window_events: window_tx,
            },
        )
    }

    pub fn todos(&self) -> &TodoList {
        &self.todos
    }

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn editing(&self) -> Option<EditTarget> {
        self.editing
    }

    pub fn deleting(&self) -> Option<TodoId> {
        self.deleting
    }

    /// Drive the session until `Action::Quit` arrives or every action sender
    /// is dropped.
    pub async fn run(mut self) -> anyhow::Result<()> {
        self.todos = read_or_default(self.store.as_ref(), TODO_ITEMS_KEY).await;
        tracing::info!("loaded {} todos", self.todos.len());

        self.window_state.restore().await;
        // Placement events raised while restoring are not user-driven.
        while self.window_events.try_recv().is_ok() {}

        let mut tick = tokio::time::interval(Duration::from_secs(1));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // An interval yields immediately on its first tick; swallow it so
        // the countdown starts a full second out.
        tick.tick().await;

        while !self.should_quit {
            let wake = tokio::select! {
                _ = tick.tick() => Wake::Second,
                action = self.actions.recv() => match action {
                    Some(action) => Wake::Action(action),
                    None => Wake::Detached,
                },
                Some(id) = self.grace.expired() => Wake::DeletionElapsed(id),
                Some(event) = self.window_events.recv() => Wake::Window(event),
                Some(()) = self.window_state.persist_due() => Wake::PersistDue,
            };

            match wake {
                Wake::Second => self.on_second(),
                Wake::Action(action) => self.apply(action).await,
                Wake::DeletionElapsed(id) => self.on_deletion_elapsed(id).await,
                Wake::Window(event) => self.window_state.handle_event(event),
                Wake::PersistDue => self.window_state.persist_now().await,
                Wake::Detached => {
                    tracing::debug!("all action senders dropped, shutting down");
                    self.should_quit = true;
                }
            }
        }

        self.teardown();
        Ok(())
    }

    /// Apply one user action.
    pub async fn apply(&mut self, action: Action) {
        match action {
            Action::AddTodo { text } => self.add_todo(&text).await,
            Action::BeginEdit { id } => self.begin_edit(id),
            Action::CommitEdit { id, text } => self.commit_edit(id, &text).await,
            Action::CancelEdit => self.editing = None,
            Action::RequestDelete { id } => self.request_delete(id).await,
            Action::CancelDelete { id } => self.cancel_delete(id).await,
            Action::CopyTodoText { id } => self.copy_todo_text(id),
            Action::ToggleTimer => self.timer.toggle(),
            Action::AdjustTimer { delta } => self.timer.adjust(delta),
            Action::Quit => self.should_quit = true,
        }
    }

    async fn add_todo(&mut self, text: &str) {
        let Some(id) = self.todos.add(text) else {
            return;
        };
        tracing::debug!(%id, "added todo");
        self.editing = Some(EditTarget::Draft);
        self.persist_todos().await;
    }

    fn begin_edit(&mut self, id: TodoId) {
        if self.todos.get(id).is_some() {
            self.editing = Some(EditTarget::Existing(id));
        }
    }

    async fn commit_edit(&mut self, id: TodoId, text: &str) {
        if self.todos.edit(id, text) {
            self.editing = None;
            self.persist_todos().await;
        }
    }

    /// Check an item off and start its deletion grace timer. Only one item
    /// is ever pending: requesting a second one restores the first and
    /// cancels its timer.
    async fn request_delete(&mut self, id: TodoId) {
        if self.todos.get(id).is_none() {
            return;
        }
        if let Some(prev) = self.deleting.take() {
            if prev != id {
                self.grace.cancel(prev);
                self.todos.set_completed(prev, false);
                tracing::debug!(%prev, "pending deletion replaced, restoring item");
            }
        }
        self.todos.set_completed(id, true);
        self.deleting = Some(id);
        self.grace.schedule(id);
        self.persist_todos().await;
    }

    async fn cancel_delete(&mut self, id: TodoId) {
        if self.deleting != Some(id) {
            return;
        }
        if self.grace.cancel(id) {
            self.deleting = None;
            self.todos.set_completed(id, false);
            tracing::debug!(%id, "deletion undone within grace period");
            self.persist_todos().await;
        }
    }

    async fn on_deletion_elapsed(&mut self, id: TodoId) {
        if self.deleting != Some(id) {
            tracing::debug!(%id, "grace expiry for an item no longer pending");
            return;
        }
        self.deleting = None;
        if self.editing == Some(EditTarget::Existing(id)) {
            self.editing = None;
        }
        if self.todos.remove(id).is_some() {
            tracing::info!(%id, "todo removed after grace period");
            self.persist_todos().await;
        }
    }

    fn copy_todo_text(&self, id: TodoId) {
        let Some(item) = self.todos.get(id) else {
            return;
        };
        if let Err(e) = self.clipboard.set_text(&item.text) {
            tracing::warn!(error = %e, "clipboard copy failed");
        }
    }

    fn on_second(&mut self) {
        if self.timer.tick() == TickOutcome::Completed {
            tracing::info!("countdown finished");
            if let Err(e) = self.notifier.show_break_notification(BREAK_MESSAGE) {
                tracing::warn!(error = %e, "break notification failed");
            }
        }
    }

    async fn persist_todos(&self) {
        if let Err(e) = write_value(self.store.as_ref(), TODO_ITEMS_KEY, &self.todos).await {
            tracing::warn!(error = %e, "failed to persist todos");
        }
    }

    fn teardown(&mut self) {
        self.grace.shutdown();
        self.window_state.shutdown();
        self.controller.exit();
    }
}
