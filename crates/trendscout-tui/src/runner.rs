// TUI event loop and terminal management
use crate::app::App;
use crate::event::Message;
use crate::program::Program;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Instant;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Take over the terminal and run until a view asks to quit
///
/// `wake` carries messages posted by background tasks. The terminal is
/// restored even when the loop fails.
pub fn run_tui(
    app: App,
    frame_rate: u32,
    wake: &mut UnboundedReceiver<Message>,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut program = Program::new(app, frame_rate);
    let result = event_loop(&mut terminal, &mut program, wake);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Term,
    program: &mut Program,
    wake: &mut UnboundedReceiver<Message>,
) -> anyhow::Result<()> {
    if let Ok(size) = terminal.size() {
        program.dispatch(
            Message::Resize {
                width: size.width,
                height: size.height,
            },
            Instant::now(),
        );
    }
    program.start(Instant::now());

    loop {
        terminal.draw(|f| crate::ui::render(f, program.app()))?;

        if program.should_quit() {
            debug!("program asked to quit");
            return Ok(());
        }

        let timeout = program.next_timeout(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    program.dispatch(Message::Key(key), Instant::now());
                }
                Event::Resize(width, height) => {
                    program.dispatch(Message::Resize { width, height }, Instant::now());
                }
                _ => {}
            }
        }

        while let Ok(msg) = wake.try_recv() {
            program.dispatch(msg, Instant::now());
        }

        program.fire_due(Instant::now());
    }
}
