//! End-to-end session behavior for the todo list and the focus timer,
//! driven through the action channel against recording fakes.

use async_trait::async_trait;
use perch_core::{AppConfig, PerchResult};
use perch_domain::{MonitorBounds, TodoId, TodoList, WidgetGeometry};
use perch_persistence::{read_or_default, write_value, KeyValueStore, TODO_ITEMS_KEY};
use perch_shell::{
    Action, AppController, BreakNotifier, ClipboardAccess, DisplayEnumerator, SessionChannels,
    WidgetSession, WindowHandle, BREAK_MESSAGE,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

#[derive(Default)]
struct MemoryStore {
    values: Mutex<HashMap<String, Vec<u8>>>,
    writes: Mutex<HashMap<String, usize>>,
}

impl MemoryStore {
    fn write_count(&self, key: &str) -> usize {
        *self.writes.lock().unwrap().get(key).unwrap_or(&0)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> PerchResult<Option<Vec<u8>>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> PerchResult<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        *self
            .writes
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_insert(0) += 1;
        Ok(())
    }

    async fn remove(&self, key: &str) -> PerchResult<()> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }

    fn path(&self) -> &Path {
        Path::new("memory")
    }
}

struct NullWindow;

impl WindowHandle for NullWindow {
    fn outer_position(&self) -> PerchResult<(i32, i32)> {
        Ok((0, 0))
    }

    fn inner_size(&self) -> PerchResult<(u32, u32)> {
        Ok((320, 480))
    }

    fn apply_geometry(&self, _geometry: &WidgetGeometry) -> PerchResult<()> {
        Ok(())
    }
}

struct SingleDisplay;

impl DisplayEnumerator for SingleDisplay {
    fn monitors(&self) -> PerchResult<Vec<MonitorBounds>> {
        Ok(vec![MonitorBounds {
            x: 0,
            y: 0,
            width: 1920,
            height: 1080,
        }])
    }
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl BreakNotifier for RecordingNotifier {
    fn show_break_notification(&self, message: &str) -> PerchResult<()> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct ExitFlag(AtomicBool);

impl AppController for ExitFlag {
    fn exit(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct CapturingClipboard(Mutex<Option<String>>);

impl ClipboardAccess for CapturingClipboard {
    fn set_text(&self, text: &str) -> std::io::Result<()> {
        *self.0.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

struct Fixture {
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    controller: Arc<ExitFlag>,
    clipboard: Arc<CapturingClipboard>,
    channels: SessionChannels,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

fn launch(config: AppConfig, store: Arc<MemoryStore>) -> Fixture {
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = Arc::new(ExitFlag::default());
    let clipboard = Arc::new(CapturingClipboard::default());

    let (session, channels) = WidgetSession::new(
        &config,
        store.clone(),
        Arc::new(NullWindow),
        Arc::new(SingleDisplay),
        notifier.clone(),
        controller.clone(),
        clipboard.clone(),
    );
    let handle = tokio::spawn(session.run());

    Fixture {
        store,
        notifier,
        controller,
        clipboard,
        channels,
        handle,
    }
}

impl Fixture {
    fn send(&self, action: Action) {
        self.channels.actions.send(action).unwrap();
    }

    async fn quit(self) -> (Arc<MemoryStore>, Arc<RecordingNotifier>, Arc<ExitFlag>) {
        self.send(Action::Quit);
        self.handle.await.unwrap().unwrap();
        (self.store, self.notifier, self.controller)
    }

    async fn stored_todos(&self) -> TodoList {
        read_or_default(self.store.as_ref(), TODO_ITEMS_KEY).await
    }
}

async fn seeded_store(texts: &[&str]) -> (Arc<MemoryStore>, Vec<TodoId>) {
    let store = Arc::new(MemoryStore::default());
    let mut list = TodoList::new();
    let ids = texts
        .iter()
        .map(|text| list.add(text).unwrap())
        .collect::<Vec<_>>();
    write_value(store.as_ref(), TODO_ITEMS_KEY, &list)
        .await
        .unwrap();
    (store, ids)
}

#[tokio::test(start_paused = true)]
async fn added_todo_is_persisted_and_exit_collaborator_runs() {
    let fixture = launch(AppConfig::default(), Arc::new(MemoryStore::default()));
    fixture.send(Action::AddTodo {
        text: "water the plants".to_string(),
    });

    let (store, _, controller) = fixture.quit().await;

    let todos: TodoList = read_or_default(store.as_ref(), TODO_ITEMS_KEY).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos.items()[0].text, "water the plants");
    assert!(!todos.items()[0].completed);
    assert!(controller.0.load(Ordering::SeqCst), "quit exits the app");
}

#[tokio::test(start_paused = true)]
async fn blank_todo_is_ignored() {
    let fixture = launch(AppConfig::default(), Arc::new(MemoryStore::default()));
    fixture.send(Action::AddTodo {
        text: "   ".to_string(),
    });

    let (store, _, _) = fixture.quit().await;

    let todos: TodoList = read_or_default(store.as_ref(), TODO_ITEMS_KEY).await;
    assert!(todos.is_empty());
    assert_eq!(store.write_count(TODO_ITEMS_KEY), 0);
}

#[tokio::test(start_paused = true)]
async fn edit_rewords_an_item_in_place() {
    let (store, ids) = seeded_store(&["draft wording", "second"]).await;
    let fixture = launch(AppConfig::default(), store);
    fixture.send(Action::CommitEdit {
        id: ids[0],
        text: "final wording".to_string(),
    });

    let (store, _, _) = fixture.quit().await;

    let todos: TodoList = read_or_default(store.as_ref(), TODO_ITEMS_KEY).await;
    let texts: Vec<_> = todos.items().iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["final wording", "second"]);
}

#[tokio::test(start_paused = true)]
async fn edit_with_unknown_id_changes_nothing() {
    let (store, _) = seeded_store(&["only item"]).await;
    let fixture = launch(AppConfig::default(), store);
    fixture.send(Action::CommitEdit {
        id: TodoId::new_v4(),
        text: "ghost".to_string(),
    });

    let (store, _, _) = fixture.quit().await;

    let todos: TodoList = read_or_default(store.as_ref(), TODO_ITEMS_KEY).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos.items()[0].text, "only item");
}

#[tokio::test(start_paused = true)]
async fn delete_then_undo_restores_the_item_unchanged() {
    let (store, ids) = seeded_store(&["keep me"]).await;
    let fixture = launch(AppConfig::default(), store);
    fixture.send(Action::RequestDelete { id: ids[0] });
    fixture.send(Action::CancelDelete { id: ids[0] });

    let (store, _, _) = fixture.quit().await;

    let todos: TodoList = read_or_default(store.as_ref(), TODO_ITEMS_KEY).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos.items()[0].text, "keep me");
    assert!(!todos.items()[0].completed, "undo unchecks the item");
}

#[tokio::test(start_paused = true)]
async fn uncancelled_delete_removes_the_item_after_grace() {
    let (store, ids) = seeded_store(&["doomed"]).await;
    let fixture = launch(AppConfig::default(), store);
    fixture.send(Action::RequestDelete { id: ids[0] });

    // item is checked off but still present during the grace period
    sleep(Duration::from_secs(5)).await;
    let during = fixture.stored_todos().await;
    assert_eq!(during.len(), 1);
    assert!(during.items()[0].completed);

    // grace period (15s) elapses without an undo
    sleep(Duration::from_secs(12)).await;
    let after = fixture.stored_todos().await;
    assert!(after.is_empty());

    fixture.quit().await;
}

#[tokio::test(start_paused = true)]
async fn second_delete_request_restores_the_first_item() {
    let (store, ids) = seeded_store(&["first", "second"]).await;
    let fixture = launch(AppConfig::default(), store);

    fixture.send(Action::RequestDelete { id: ids[0] });
    sleep(Duration::from_secs(5)).await;
    fixture.send(Action::RequestDelete { id: ids[1] });
    sleep(Duration::from_secs(1)).await;

    // the first item came back unchecked; only the second is pending
    let during = fixture.stored_todos().await;
    assert_eq!(during.len(), 2);
    assert!(!during.items()[0].completed);
    assert!(during.items()[1].completed);

    // the first item's original deadline (t=15) must not fire
    sleep(Duration::from_secs(18)).await;
    let after = fixture.stored_todos().await;
    assert_eq!(after.len(), 1);
    assert_eq!(after.items()[0].text, "first");
    assert!(!after.items()[0].completed);

    fixture.quit().await;
}

#[tokio::test(start_paused = true)]
async fn countdown_completion_notifies_exactly_once() {
    let config = AppConfig {
        focus_minutes: Some(1),
        ..AppConfig::default()
    };
    let fixture = launch(config, Arc::new(MemoryStore::default()));
    fixture.send(Action::ToggleTimer);

    sleep(Duration::from_secs(65)).await;
    assert_eq!(fixture.notifier.count(), 1);
    assert_eq!(
        fixture.notifier.messages.lock().unwrap()[0],
        BREAK_MESSAGE
    );

    // idle ticks after completion never notify again
    sleep(Duration::from_secs(120)).await;
    assert_eq!(fixture.notifier.count(), 1);

    fixture.quit().await;
}

#[tokio::test(start_paused = true)]
async fn paused_countdown_does_not_complete() {
    let config = AppConfig {
        focus_minutes: Some(1),
        ..AppConfig::default()
    };
    let fixture = launch(config, Arc::new(MemoryStore::default()));
    fixture.send(Action::ToggleTimer);
    sleep(Duration::from_secs(30)).await;
    fixture.send(Action::ToggleTimer);

    sleep(Duration::from_secs(300)).await;
    assert_eq!(fixture.notifier.count(), 0);

    fixture.quit().await;
}

#[tokio::test(start_paused = true)]
async fn copy_sends_item_text_to_the_clipboard() {
    let (store, ids) = seeded_store(&["buy milk"]).await;
    let fixture = launch(AppConfig::default(), store);
    fixture.send(Action::CopyTodoText { id: ids[0] });
    sleep(Duration::from_secs(1)).await;

    assert_eq!(
        fixture.clipboard.0.lock().unwrap().as_deref(),
        Some("buy milk")
    );

    fixture.quit().await;
}

#[tokio::test(start_paused = true)]
async fn malformed_stored_list_degrades_to_empty() {
    let store = Arc::new(MemoryStore::default());
    store.set(TODO_ITEMS_KEY, b"{ not a list").await.unwrap();

    let fixture = launch(AppConfig::default(), store);
    fixture.send(Action::AddTodo {
        text: "fresh start".to_string(),
    });

    let (store, _, _) = fixture.quit().await;

    let todos: TodoList = read_or_default(store.as_ref(), TODO_ITEMS_KEY).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos.items()[0].text, "fresh start");
}
