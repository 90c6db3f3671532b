// Message pump between the terminal and the app: queues emitted messages
// and keeps the tick/frame timers
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::app::App;
use crate::event::{Command, Message};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Poll timeout when no timer is pending
const IDLE_TIMEOUT: Duration = Duration::from_millis(250);

pub struct Program {
    app: App,
    queue: VecDeque<Message>,
    tick_at: Option<Instant>,
    frame_at: Option<Instant>,
    frame_interval: Duration,
    quit: bool,
}

impl Program {
    pub fn new(app: App, frame_rate: u32) -> Self {
        Self {
            app,
            queue: VecDeque::new(),
            tick_at: None,
            frame_at: None,
            frame_interval: Duration::from_secs(1) / frame_rate.max(1),
            quit: false,
        }
    }

    /// Run the app's startup command
    pub fn start(&mut self, now: Instant) {
        if let Some(cmd) = self.app.init() {
            self.apply(cmd, now);
        }
    }

    /// Feed one message in, then drain whatever it emitted
    pub fn dispatch(&mut self, msg: Message, now: Instant) {
        self.queue.push_back(msg);

        while let Some(msg) = self.queue.pop_front() {
            if self.quit {
                self.queue.clear();
                break;
            }
            if let Some(cmd) = self.app.update(msg) {
                self.apply(cmd, now);
            }
        }
    }

    fn apply(&mut self, cmd: Command, now: Instant) {
        match cmd {
            Command::Quit => self.quit = true,
            // One pending deadline per timer; a new request replaces it
            Command::Tick => self.tick_at = Some(now + TICK_INTERVAL),
            Command::Frame => self.frame_at = Some(now + self.frame_interval),
            Command::Emit(msg) => self.queue.push_back(msg),
        }
    }

    /// Deliver timers whose deadline has passed
    pub fn fire_due(&mut self, now: Instant) {
        if self.frame_at.is_some_and(|at| at <= now) {
            self.frame_at = None;
            self.dispatch(Message::Frame, now);
        }
        if self.tick_at.is_some_and(|at| at <= now) {
            self.tick_at = None;
            self.dispatch(Message::Tick, now);
        }
    }

    /// How long the loop may block waiting for input
    pub fn next_timeout(&self, now: Instant) -> Duration {
        [self.tick_at, self.frame_at]
            .into_iter()
            .flatten()
            .min()
            .map(|at| at.saturating_duration_since(now))
            .unwrap_or(IDLE_TIMEOUT)
            .min(IDLE_TIMEOUT)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn app(&self) -> &App {
        &self.app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewState;
    use crate::event::key;
    use crate::item::record;
    use crate::layout::PaneLayout;
    use crate::tasks::mocks::{self, MockAnalyst, MockTrending};
    use crossterm::event::KeyCode;
    use trendscout_core::config::UiConfig;

    fn program(trending: MockTrending) -> Program {
        let app = App::new(
            mocks::runner(trending, MockAnalyst::new()),
            UiConfig::default(),
            PaneLayout::default(),
        );
        Program::new(app, 60)
    }

    #[tokio::test]
    async fn test_start_schedules_tick() {
        let mut p = program(MockTrending::new());
        let now = Instant::now();
        p.start(now);

        assert_eq!(p.next_timeout(now), IDLE_TIMEOUT);
        // nothing fires early
        p.fire_due(now + Duration::from_millis(500));
        assert!(p.tick_at.is_some());

        p.fire_due(now + TICK_INTERVAL);
        assert!(p.tick_at.is_some());
        let ViewState::Fetching(fetch) = p.app().view() else {
            panic!("expected the picker");
        };
        assert_eq!(fetch.ticks(), 29);
    }

    #[tokio::test]
    async fn test_countdown_quits_program() {
        let mut p = program(MockTrending::new());
        let mut now = Instant::now();
        p.start(now);

        for _ in 0..30 {
            now += TICK_INTERVAL;
            p.fire_due(now);
        }
        assert!(p.should_quit());
    }

    #[tokio::test]
    async fn test_emitted_messages_are_drained() {
        let mut p = program(MockTrending::new());
        let now = Instant::now();
        p.dispatch(Message::CrawlDone(vec![record("a/one")]), now);

        // q -> QuitRepoView -> Restart, all in one dispatch
        p.dispatch(key(KeyCode::Char('q')), now);
        assert!(matches!(p.app().view(), ViewState::Fetching(_)));
        assert!(p.tick_at.is_some());
        assert!(!p.should_quit());
    }

    #[tokio::test]
    async fn test_frame_timer_runs_crawl() {
        let mut trending = MockTrending::new();
        trending.expect_fetch().returning(|_| Ok(vec![record("a/one"), record("b/two")]));
        let mut p = program(trending);
        let mut now = Instant::now();
        p.start(now);

        p.dispatch(key(KeyCode::Enter), now);
        assert!(p.frame_at.is_some());
        assert!(p.next_timeout(now) <= Duration::from_millis(17));

        for _ in 0..50 {
            if p.frame_at.is_none() {
                break;
            }
            mocks::settle().await;
            now += Duration::from_millis(17);
            p.fire_due(now);
        }

        let ViewState::Browsing(browse) = p.app().view() else {
            panic!("crawl never landed");
        };
        assert_eq!(browse.list().len(), 2);
    }

    #[tokio::test]
    async fn test_quit_drops_remaining_messages() {
        let mut p = program(MockTrending::new());
        let now = Instant::now();
        p.dispatch(key(KeyCode::Esc), now);
        assert!(p.should_quit());

        p.dispatch(Message::Restart, now);
        assert!(p.tick_at.is_none());
    }
}
