// Second screen: the trending list on the left, details and AI insight on
// the right
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashMap;
use tracing::{debug, warn};
use trendscout_core::RepositoryRecord;

use crate::detail;
use crate::event::{is_ctrl_c, is_quit_key, Command, Message};
use crate::item::{AiStatus, ListItem};
use crate::layout::PaneLayout;
use crate::list::SelectionList;
use crate::tasks::{AnalysisResult, Delivery, DeliveryState, TaskRunner};

/// Per-URL bookkeeping for AI requests
#[derive(Debug, Default)]
struct AiSlot {
    /// Bumped on every launch; wake-ups for older ones are ignored
    generation: u64,
    pending: Option<Delivery<AnalysisResult>>,
}

pub struct BrowseView {
    list: SelectionList,
    slots: HashMap<String, AiSlot>,
    detail: String,
    layout: PaneLayout,
    filtering: bool,
    filter_input: String,
    fetched_at: DateTime<Local>,
    tasks: TaskRunner,
}

impl BrowseView {
    pub fn new(records: Vec<RepositoryRecord>, tasks: TaskRunner, layout: PaneLayout) -> Self {
        let items: Vec<ListItem> = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| ListItem::new(i, record))
            .collect();

        let slots = items
            .iter()
            .map(|item| (item.url().to_string(), AiSlot::default()))
            .collect();

        debug!(count = items.len(), "browse view ready");

        let mut view = Self {
            list: SelectionList::new(items),
            slots,
            detail: String::new(),
            layout,
            filtering: false,
            filter_input: String::new(),
            fetched_at: Local::now(),
            tasks,
        };
        view.render_detail();
        view
    }

    pub fn update(&mut self, msg: Message) -> Option<Command> {
        match msg {
            Message::Key(key) if self.filtering => self.on_filter_key(key),
            Message::Key(key) => self.on_key(key),
            Message::Resize { width, height } => {
                self.layout = PaneLayout::new(width, height);
                self.render_detail();
                None
            }
            Message::AiFinished { url, generation } => {
                self.on_ai_finished(&url, generation);
                None
            }
            Message::QuitRepoView => {
                self.teardown();
                Some(Command::Emit(Message::Restart))
            }
            _ => None,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<Command> {
        if is_quit_key(&key) {
            return Some(Command::Emit(Message::QuitRepoView));
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.cursor_up();
                self.refresh_selected();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.cursor_down();
                self.refresh_selected();
            }
            KeyCode::Enter => self.analyze_selected(),
            KeyCode::Char('/') => {
                self.filtering = true;
                self.filter_input = self.list.filter().to_string();
            }
            _ => {}
        }
        None
    }

    fn on_filter_key(&mut self, key: KeyEvent) -> Option<Command> {
        if is_ctrl_c(&key) {
            return Some(Command::Emit(Message::QuitRepoView));
        }

        match key.code {
            KeyCode::Char(c) => {
                self.filter_input.push(c);
                self.list.set_filter(&self.filter_input);
            }
            KeyCode::Backspace => {
                self.filter_input.pop();
                self.list.set_filter(&self.filter_input);
            }
            KeyCode::Enter => {
                self.filtering = false;
            }
            KeyCode::Esc => {
                self.filtering = false;
                self.filter_input.clear();
                self.list.clear_filter();
            }
            _ => return None,
        }
        self.refresh_selected();
        None
    }

    fn analyze_selected(&mut self) {
        let Some(index) = self.list.index() else {
            debug!("enter on an empty list, nothing to analyze");
            return;
        };
        let Some(mut item) = self.list.get(index).cloned() else {
            return;
        };

        if !item.begin_analysis() {
            debug!(url = item.url(), status = ?item.ai_status, "analysis already running or done");
            return;
        }

        let url = item.url().to_string();
        let slot = self.slots.entry(url.clone()).or_default();
        slot.generation += 1;
        // Replacing the delivery drops the old receiver, so a stale task
        // just finds nobody listening
        slot.pending = Some(self.tasks.spawn_analysis(url, slot.generation));

        self.list.set_item(index, item);
        self.render_detail();
    }

    fn on_ai_finished(&mut self, url: &str, generation: u64) {
        let current = self.slots.get(url).map(|slot| slot.generation);
        if current != Some(generation) {
            debug!(url, generation, ?current, "stale ai wake-up, ignoring");
            return;
        }

        let Some(index) = self.list.position_of(url) else {
            return;
        };
        if self.poll(index) && self.list.index() == Some(index) {
            self.render_detail();
        }
    }

    fn refresh_selected(&mut self) {
        if let Some(index) = self.list.index() {
            self.poll(index);
        }
        self.render_detail();
    }

    /// Move an in-progress item along if its result has arrived.
    /// Returns whether the item changed.
    fn poll(&mut self, index: usize) -> bool {
        let Some(mut item) = self.list.get(index).cloned() else {
            return false;
        };
        if item.ai_status != AiStatus::InProgress {
            return false;
        }
        let Some(slot) = self.slots.get_mut(item.url()) else {
            return false;
        };
        let Some(pending) = slot.pending.as_mut() else {
            return false;
        };

        match pending.try_take() {
            DeliveryState::Pending => return false,
            DeliveryState::Ready(Ok(answer)) => {
                debug!(url = item.url(), "ai answer attached");
                item.complete(answer);
            }
            DeliveryState::Ready(Err(e)) => {
                warn!(url = item.url(), error = %e, "ai analysis failed");
                item.fail();
            }
            DeliveryState::Abandoned => {
                warn!(url = item.url(), "ai task ended without a result");
                item.fail();
            }
        }
        slot.pending = None;

        self.list.set_item(index, item);
        true
    }

    fn render_detail(&mut self) {
        self.detail = self
            .list
            .selected()
            .map(|item| detail::render(item, self.layout.detail_width()))
            .unwrap_or_default();
    }

    fn teardown(&mut self) {
        let in_flight = self
            .slots
            .values()
            .filter(|slot| slot.pending.is_some())
            .count();
        debug!(in_flight, "leaving browse view, dropping ai slots");
        self.slots.clear();
    }

    pub fn list(&self) -> &SelectionList {
        &self.list
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn layout(&self) -> PaneLayout {
        self.layout
    }

    pub fn filtering(&self) -> bool {
        self.filtering
    }

    pub fn filter_input(&self) -> &str {
        &self.filter_input
    }

    pub fn fetched_at(&self) -> DateTime<Local> {
        self.fetched_at
    }
}
