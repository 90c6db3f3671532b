// First screen: pick a language, watch the scrape, or sit still and get
// auto-quit when the countdown runs out
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, warn};
use trendscout_core::config::UiConfig;
use trendscout_core::Language;

use crate::easing::{advance_frame, loading_progress};
use crate::event::{is_quit_key, Command, Message};
use crate::tasks::{Delivery, DeliveryState, FetchResult, TaskRunner};

pub struct FetchView {
    choice: usize,
    chosen: bool,
    ticks: u32,
    frames: u32,
    progress: f64,
    loaded: bool,
    result_count: usize,
    error: Option<String>,
    quitting: bool,
    error_countdown: u32,
    pending: Option<Delivery<FetchResult>>,
    tasks: TaskRunner,
}

impl FetchView {
    pub fn new(tasks: TaskRunner, ui: &UiConfig) -> Self {
        Self {
            choice: 0,
            chosen: false,
            ticks: ui.countdown_secs,
            frames: 0,
            progress: 0.0,
            loaded: false,
            result_count: 0,
            error: None,
            quitting: false,
            error_countdown: ui.error_countdown_secs,
            pending: None,
            tasks,
        }
    }

    /// Starts the countdown
    pub fn init(&self) -> Option<Command> {
        Some(Command::Tick)
    }

    pub fn update(&mut self, msg: Message) -> Option<Command> {
        match msg {
            Message::Key(key) => self.on_key(key),
            Message::Tick => self.on_tick(),
            Message::Frame => self.on_frame(),
            _ => None,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<Command> {
        if is_quit_key(&key) {
            return Some(self.teardown());
        }

        if self.chosen {
            return None;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.choice + 1 < Language::ALL.len() {
                    self.choice += 1;
                }
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.choice = self.choice.saturating_sub(1);
                None
            }
            KeyCode::Enter => {
                self.chosen = true;
                let language = self.language();
                debug!(%language, "language chosen, starting crawl");
                self.pending = Some(self.tasks.spawn_fetch(language));
                Some(Command::Frame)
            }
            _ => None,
        }
    }

    fn on_tick(&mut self) -> Option<Command> {
        // Loading pauses the countdown; the timer restarts only if the crawl fails
        if self.chosen && self.error.is_none() {
            return None;
        }

        self.ticks = self.ticks.saturating_sub(1);
        if self.ticks == 0 {
            debug!("countdown finished");
            self.quitting = true;
            return Some(Command::Quit);
        }
        Some(Command::Tick)
    }

    fn on_frame(&mut self) -> Option<Command> {
        if self.loaded || self.error.is_some() {
            return None;
        }
        let pending = self.pending.as_mut()?;

        self.frames = advance_frame(self.frames);

        match pending.try_take() {
            DeliveryState::Ready(Ok(records)) => {
                self.pending = None;
                self.progress = 1.0;
                self.loaded = true;
                self.result_count = records.len();
                Some(Command::Emit(Message::CrawlDone(records)))
            }
            DeliveryState::Ready(Err(e)) => Some(self.fail(e.to_string())),
            DeliveryState::Abandoned => Some(self.fail("crawl ended without a result".to_string())),
            DeliveryState::Pending => {
                self.progress = loading_progress(self.progress, self.frames);
                Some(Command::Frame)
            }
        }
    }

    fn fail(&mut self, error: String) -> Command {
        warn!(%error, "crawl failed, counting down to exit");
        self.pending = None;
        self.error = Some(error);
        self.ticks = self.error_countdown;
        Command::Tick
    }

    fn teardown(&mut self) -> Command {
        if self.pending.take().is_some() {
            debug!("dropping in-flight crawl");
        }
        self.quitting = true;
        Command::Quit
    }

    pub fn language(&self) -> Language {
        Language::ALL[self.choice]
    }

    pub fn choice(&self) -> usize {
        self.choice
    }

    pub fn chosen(&self) -> bool {
        self.chosen
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn result_count(&self) -> usize {
        self.result_count
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn quitting(&self) -> bool {
        self.quitting
    }
}
