use std::io::{self, Stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use engine_logging::{engine_debug, engine_info};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::text::Text;
use ratatui::{Frame, Terminal};
use summary_core::{update, AppState, AppViewModel, Msg, Panel};
use summary_engine::{layout_markdown, EngineHandle};

use super::clipboard::SystemClipboard;
use super::effects::EffectRunner;
use super::input::InputLine;
use super::ui;
use crate::config::AppConfig;

const TICK_INTERVAL: Duration = Duration::from_millis(75);
const INPUT_POLL: Duration = Duration::from_millis(50);
const SCROLL_PAGE: u16 = 10;

pub fn run_app(config: &AppConfig) -> Result<()> {
    let engine = EngineHandle::new(config.client_settings())
        .with_context(|| format!("cannot use summary server {}", config.server_url))?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, Box::new(SystemClipboard::default()), msg_tx.clone());

    // Drives the debounce deadline and the spinner.
    let tick_tx = msg_tx.clone();
    thread::spawn(move || {
        while tick_tx.send(Msg::Tick { now: Instant::now() }).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    let mut screen = TerminalGuard::enter()?;
    let mut app = App::new(
        AppState::with_debounce(config.debounce()),
        runner,
        msg_tx,
        msg_rx,
    );
    let result = app.run(&mut screen.terminal);
    app.dispatch(Msg::Shutdown);
    engine_info!("Terminal UI closed");
    result
}

/// Raw mode plus the alternate screen, restored on drop.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("cannot switch the terminal to raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

struct App {
    state: AppState,
    runner: EffectRunner,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    input: InputLine,
    view: AppViewModel,
    summary: Text<'static>,
    /// Summary panel area as of the last draw.
    panel_area: Rect,
    scroll: u16,
    max_scroll: u16,
    spinner_frame: usize,
    should_quit: bool,
}

impl App {
    fn new(
        state: AppState,
        runner: EffectRunner,
        msg_tx: mpsc::Sender<Msg>,
        msg_rx: mpsc::Receiver<Msg>,
    ) -> Self {
        let view = state.view();
        Self {
            state,
            runner,
            msg_tx,
            msg_rx,
            input: InputLine::default(),
            view,
            summary: Text::default(),
            panel_area: Rect::default(),
            scroll: 0,
            max_scroll: 0,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let _ = self.msg_tx.send(Msg::Started);
        while !self.should_quit {
            self.process_pending_messages();
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(INPUT_POLL)? {
                self.handle_event(event::read()?);
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let panel_area = ui::layout::split(frame.area()).panel;
        if panel_area != self.panel_area {
            self.panel_area = panel_area;
            self.refresh_max_scroll();
        }
        let ctx = ui::render::RenderContext {
            input_cursor: self.input.cursor(),
            spinner_frame: self.spinner_frame,
            scroll: self.scroll,
            summary: &self.summary,
        };
        ui::render::render(frame, &self.view, &ctx);
    }

    fn process_pending_messages(&mut self) {
        let inbox: Vec<Msg> = self.msg_rx.try_iter().collect();
        for msg in inbox {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if matches!(msg, Msg::Tick { .. }) && self.view.panel == Panel::Spinner {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            let view = state.view();
            if view.panel != self.view.panel {
                self.panel_changed(&view.panel);
            }
            self.view = view;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn panel_changed(&mut self, panel: &Panel) {
        self.scroll = 0;
        self.summary = match panel {
            Panel::Summary(markdown) => ui::theme::styled_text(&layout_markdown(markdown)),
            _ => Text::default(),
        };
        self.refresh_max_scroll();
    }

    fn refresh_max_scroll(&mut self) {
        self.max_scroll = ui::render::summary_max_scroll(&self.summary, self.panel_area);
        self.scroll = self.scroll.min(self.max_scroll);
    }

    fn send(&self, msg: Msg) {
        let _ = self.msg_tx.send(msg);
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => {
                self.input.insert_str(&text);
                self.input_edited();
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.view.notice.is_some() {
            self.send(Msg::NoticeDismissed);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Enter => {
                // Enter is implicit submission; it does nothing while the button is disabled.
                if self.view.submit_enabled {
                    self.send(Msg::SubmitPressed);
                }
            }
            KeyCode::Char('y') if ctrl => self.send(Msg::CopyPressed),
            KeyCode::Char('r') if ctrl => self.send(Msg::RecheckBackend),
            KeyCode::PageUp => self.scroll_by(-i32::from(SCROLL_PAGE)),
            KeyCode::PageDown => self.scroll_by(i32::from(SCROLL_PAGE)),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            _ => {
                if self.input.handle_key(key) {
                    self.input_edited();
                }
            }
        }
    }

    /// Scrolls the summary by wrapped rows, stopping once its last row is in view.
    fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll));
        self.scroll = u16::try_from(next).unwrap_or(self.max_scroll);
    }

    fn input_edited(&mut self) {
        engine_debug!("input edited len={}", self.input.text().len());
        self.send(Msg::InputEdited {
            text: self.input.text().to_string(),
            at: Instant::now(),
        });
    }
}
