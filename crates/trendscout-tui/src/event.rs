// Messages flowing into the views, and commands flowing back out
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use trendscout_core::RepositoryRecord;

/// Everything a view can be asked to handle
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    /// Countdown clock, once per second
    Tick,
    /// Progress animation clock
    Frame,
    /// Scrape finished, switch to browsing
    CrawlDone(Vec<RepositoryRecord>),
    /// A background analysis delivered its result
    AiFinished { url: String, generation: u64 },
    /// User left the list
    QuitRepoView,
    /// Back to the language picker with a clean slate
    Restart,
}

/// Side effects a view asks the program loop to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Quit,
    /// Deliver a `Tick` one second from now
    Tick,
    /// Deliver a `Frame` one frame from now
    Frame,
    /// Feed a message back through the dispatcher
    Emit(Message),
}

/// q, esc and ctrl+c
pub fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
pub(crate) fn key(code: KeyCode) -> Message {
    Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
}
