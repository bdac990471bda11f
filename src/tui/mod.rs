mod app;
mod ui;

use crate::api::RecipeSource;
use anyhow::Result;
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub fn run(source: Arc<dyn RecipeSource>, initial_query: Option<String>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Clear the terminal to prevent any artifacts from previous content
    terminal.clear()?;

    let mut app = App::new(source, initial_query);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        // Settle debounced input and apply completed fetches (non-blocking)
        app.tick();

        terminal.draw(|f| ui::draw(f, app))?;

        // Poll for events with timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            // Only handle key press events, not release or repeat
            // This fixes duplicate keypresses on Windows where both press and release are reported
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Global keybindings
                match (key.modifiers, key.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),
                    (KeyModifiers::CONTROL, KeyCode::Char('q')) => return Ok(()),
                    _ => {}
                }

                match (key.modifiers, key.code) {
                    (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                        KeyCode::Esc => {
                            if !app.has_any_input() {
                                return Ok(());
                            }
                            app.clear();
                        }
                        KeyCode::Tab => app.focus_next(),
                        KeyCode::BackTab => app.focus_prev(),
                        KeyCode::Enter => app.submit(),
                        KeyCode::Up => app.select_prev(),
                        KeyCode::Down => app.select_next(),
                        KeyCode::PageUp => app.select_page_up(),
                        KeyCode::PageDown => app.select_page_down(),
                        KeyCode::Home => app.select_first(),
                        KeyCode::End => app.select_last(),
                        KeyCode::Left => app.cycle_option(false),
                        KeyCode::Right => app.cycle_option(true),
                        KeyCode::Char(c) => app.push_char(c),
                        KeyCode::Backspace => app.backspace(),
                        _ => {}
                    },
                    _ => {}
                }
            }
        }
    }
}
