use std::io;

use anyhow::Result;
use crossterm::event;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use crossterm::execute;
use crossterm::terminal;
use ratatui::backend::Backend;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Margin;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Message;
use crate::domain::models::TextArea;
use crate::domain::services::AppState;
use crate::infrastructure::backends::BackendManager;

/// Restores the terminal to a usable state when a panic fires mid-render.
pub fn destruct_terminal_for_panic() {
    terminal::disable_raw_mode().unwrap();
    execute!(
        io::stdout(),
        terminal::LeaveAlternateScreen,
        DisableMouseCapture
    )
    .unwrap();
    execute!(io::stdout(), crossterm::cursor::Show).unwrap();
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let loading = Loading::default();
    let mut textarea = TextArea::build(app_state.attach_context);

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Max(4)].as_ref())
                .split(frame.size());

            if layout[0].width != app_state.last_known_width
                || layout[0].height != app_state.last_known_height
            {
                app_state.set_rect(layout[0]);
            }

            app_state
                .bubble_list
                .render(frame, layout[0], app_state.scroll.position);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if app_state.waiting_for_backend {
                loading.render(frame, layout[1]);
            } else {
                frame.render_widget(textarea.widget(), layout[1]);
            }
        })?;

        // A single request is in flight at a time. Input is paused until the
        // reply lands in the transcript.
        if app_state.waiting_for_backend {
            match rx.recv().await {
                Some(Event::BackendMessage(message)) => {
                    app_state.handle_backend_message(message);
                }
                None => {
                    return Ok(());
                }
            }
            continue;
        }

        match event::read()? {
            CrosstermEvent::Key(key) => match key.code {
                KeyCode::Up => {
                    app_state.scroll.up();
                }
                KeyCode::Down => {
                    app_state.scroll.down();
                }
                KeyCode::PageUp => {
                    app_state.scroll.up_page();
                }
                KeyCode::PageDown => {
                    app_state.scroll.down_page();
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app_state.scroll.up_page();
                }
                KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app_state.scroll.down_page();
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Enter => {
                    let input_str = textarea.lines().join("\n");
                    if input_str.trim().is_empty() {
                        continue;
                    }

                    app_state.add_message(Message::new(Author::User, &input_str));

                    let (should_break, should_continue) =
                        app_state.handle_slash_commands(&input_str);

                    // Rebuilt after slash commands so a context toggle shows
                    // up in the input title immediately.
                    textarea = TextArea::build(app_state.attach_context);

                    if should_break {
                        return Ok(());
                    }
                    if should_continue {
                        continue;
                    }

                    app_state.waiting_for_backend = true;
                    tx.send(Action::BackendRequest(BackendPrompt::compose(
                        &input_str,
                        app_state.attach_context,
                        app_state.table.as_ref(),
                    )))?;
                }
                _ => {
                    textarea.input(key);
                }
            },
            CrosstermEvent::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollUp => {
                    app_state.scroll.up();
                }
                MouseEventKind::ScrollDown => {
                    app_state.scroll.down();
                }
                _ => {}
            },
            _ => {}
        }
    }
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let backend_name = Config::get(ConfigKey::Backend).parse::<BackendName>()?;
    let backend = BackendManager::get(backend_name)?;
    let mut app_state = AppState::new(&backend).await?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = start_loop(&mut terminal, &mut app_state, tx, rx).await;

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        terminal::LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return res;
}
