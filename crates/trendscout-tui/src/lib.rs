// Terminal UI implementation using ratatui
// The pretty face of trendscout

pub mod app;
pub mod browse;
pub mod detail;
pub mod easing;
pub mod event;
pub mod fetch;
pub mod item;
pub mod layout;
pub mod list;
pub mod program;
pub mod runner;
pub mod tasks;
pub mod ui;

pub use app::{App, ViewState};
pub use event::{Command, Message};
pub use item::{AiStatus, ListItem};
pub use layout::PaneLayout;
pub use runner::run_tui;
pub use tasks::TaskRunner;
