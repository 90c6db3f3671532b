// TUI application state: which screen is up and how big the terminal is
use tracing::debug;
use trendscout_core::config::UiConfig;

use crate::browse::BrowseView;
use crate::event::{Command, Message};
use crate::fetch::FetchView;
use crate::layout::PaneLayout;
use crate::tasks::TaskRunner;

pub enum ViewState {
    Fetching(FetchView),
    Browsing(BrowseView),
}

pub struct App {
    view: ViewState,
    layout: PaneLayout,
    tasks: TaskRunner,
    ui: UiConfig,
}

impl App {
    pub fn new(tasks: TaskRunner, ui: UiConfig, layout: PaneLayout) -> Self {
        let view = ViewState::Fetching(FetchView::new(tasks.clone(), &ui));
        Self {
            view,
            layout,
            tasks,
            ui,
        }
    }

    /// Command the first screen wants run at startup
    pub fn init(&self) -> Option<Command> {
        match &self.view {
            ViewState::Fetching(fetch) => fetch.init(),
            ViewState::Browsing(_) => None,
        }
    }

    pub fn update(&mut self, msg: Message) -> Option<Command> {
        match msg {
            Message::Restart => {
                debug!("restarting at the language picker");
                let fetch = FetchView::new(self.tasks.clone(), &self.ui);
                let cmd = fetch.init();
                self.view = ViewState::Fetching(fetch);
                cmd
            }
            Message::CrawlDone(records) => {
                debug!(count = records.len(), "crawl done, switching to browse");
                self.view =
                    ViewState::Browsing(BrowseView::new(records, self.tasks.clone(), self.layout));
                None
            }
            Message::Resize { width, height } => {
                self.layout = PaneLayout::new(width, height);
                self.forward(Message::Resize { width, height })
            }
            other => self.forward(other),
        }
    }

    fn forward(&mut self, msg: Message) -> Option<Command> {
        match &mut self.view {
            ViewState::Fetching(fetch) => fetch.update(msg),
            ViewState::Browsing(browse) => browse.update(msg),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn layout(&self) -> PaneLayout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::key;
    use crate::item::{record, AiStatus};
    use crate::tasks::mocks::{self, MockAnalyst, MockTrending};
    use crossterm::event::KeyCode;
    use trendscout_core::Language;

    fn app(trending: MockTrending) -> App {
        App::new(
            mocks::runner(trending, MockAnalyst::new()),
            UiConfig::default(),
            PaneLayout::default(),
        )
    }

    #[tokio::test]
    async fn test_starts_fetching() {
        let app = app(MockTrending::new());
        assert!(matches!(app.view(), ViewState::Fetching(_)));
        assert_eq!(app.init(), Some(Command::Tick));
    }

    #[tokio::test]
    async fn test_go_crawl_lands_in_browse() {
        let mut trending = MockTrending::new();
        trending
            .expect_fetch()
            .withf(|lang| *lang == Language::Go)
            .times(1)
            .returning(|_| Ok(vec![record("a/one"), record("b/two"), record("c/three")]));
        let mut app = app(trending);

        app.update(key(KeyCode::Char('j')));
        let mut cmd = app.update(key(KeyCode::Enter));
        while cmd == Some(Command::Frame) {
            mocks::settle().await;
            cmd = app.update(Message::Frame);
        }

        let done = match cmd {
            Some(Command::Emit(done)) => done,
            other => panic!("expected CrawlDone, got {:?}", other),
        };
        assert_eq!(app.update(done), None);

        let ViewState::Browsing(browse) = app.view() else {
            panic!("still fetching");
        };
        assert_eq!(browse.list().len(), 3);
        assert_eq!(browse.list().index(), Some(0));
        assert!(browse
            .list()
            .visible_items()
            .all(|item| item.ai_status == AiStatus::Ready));
    }

    #[tokio::test]
    async fn test_restart_returns_to_picker() {
        let mut app = app(MockTrending::new());
        app.update(Message::CrawlDone(vec![record("a/one")]));
        assert!(matches!(app.view(), ViewState::Browsing(_)));

        let cmd = app.update(Message::QuitRepoView);
        assert_eq!(cmd, Some(Command::Emit(Message::Restart)));
        assert_eq!(app.update(Message::Restart), Some(Command::Tick));

        let ViewState::Fetching(fetch) = app.view() else {
            panic!("expected the picker");
        };
        assert!(!fetch.chosen());
        assert_eq!(fetch.ticks(), 30);
    }

    #[tokio::test]
    async fn test_resize_updates_layout_and_view() {
        let mut app = app(MockTrending::new());
        app.update(Message::CrawlDone(vec![record("a/one")]));
        app.update(Message::Resize { width: 90, height: 30 });

        assert_eq!(app.layout(), PaneLayout::new(90, 30));
        let ViewState::Browsing(browse) = app.view() else {
            panic!("expected browse");
        };
        assert_eq!(browse.layout(), PaneLayout::new(90, 30));

        // new views pick up the current size
        app.update(Message::CrawlDone(vec![record("b/two")]));
        let ViewState::Browsing(browse) = app.view() else {
            panic!("expected browse");
        };
        assert_eq!(browse.layout().width, 90);
    }
}
