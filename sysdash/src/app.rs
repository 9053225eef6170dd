//! Terminal front end: input handling, driving the dashboard between frames, and drawing.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

use crate::client::MetricsSource;
use crate::refresh::Dashboard;
use crate::ui::{
    self,
    overlays::{draw_confirm, ThresholdForm},
    processes::{processes_handle_key, processes_handle_mouse},
    screen::Screen,
    Mode, UiState,
};
use crate::view::SortKey;

// Upper bound on how long input waits while requests and timers run.
const FRAME: Duration = Duration::from_millis(100);

pub struct App<C: MetricsSource + 'static> {
    dash: Dashboard<C, Screen>,
    ui: UiState,
    should_quit: bool,
}

impl<C: MetricsSource + 'static> App<C> {
    pub fn new(dash: Dashboard<C, Screen>) -> Self {
        Self {
            dash,
            ui: UiState::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // First cycle right away, then on the timer
        self.dash.trigger_once();
        let interval = self.dash.interval();
        self.dash.start(interval);

        let res = self.event_loop(&mut terminal).await;

        self.dash.stop();
        info!(cycles = self.dash.cycles_completed(), "dashboard stopped");

        // Teardown
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::ZERO)? {
                match event::read()? {
                    Event::Key(k) if k.kind == KeyEventKind::Press => self.on_key(terminal, k),
                    Event::Mouse(m) => self.on_mouse(m),
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            // Let ticks, responses and banner timeouts land until the frame is due
            let frame_end = Instant::now() + FRAME;
            while timeout_at(frame_end, self.dash.step()).await.is_ok() {}

            self.ui.interval = self.dash.interval();
            let screen = self.dash.renderer();
            let state = &mut self.ui;
            terminal.draw(|f| ui::draw(f, screen, state))?;
        }
        Ok(())
    }

    fn on_key<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>, k: KeyEvent) {
        match self.ui.mode {
            Mode::Search => self.on_search_key(k),
            Mode::Thresholds => self.on_thresholds_key(k),
            Mode::Normal => self.on_normal_key(terminal, k),
        }
    }

    fn on_normal_key<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        k: KeyEvent,
    ) {
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.dash.manual_refresh(),
            KeyCode::Char('s') => self.dash.cycle_sort_key(),
            KeyCode::Char('c') => self.dash.set_sort_key(SortKey::Cpu),
            KeyCode::Char('m') => self.dash.set_sort_key(SortKey::Memory),
            KeyCode::Char('n') => self.dash.set_sort_key(SortKey::Name),
            KeyCode::Char('p') => self.dash.set_sort_key(SortKey::Pid),
            KeyCode::Char('/') => {
                self.ui.search_input = self.dash.view().search_term().to_string();
                self.ui.mode = Mode::Search;
            }
            KeyCode::Char('t') => {
                self.dash.toggle_theme();
            }
            KeyCode::Char('T') => self.ui.mode = Mode::Thresholds,
            KeyCode::Char('+') | KeyCode::Char('=') => self.dash.step_interval(true),
            KeyCode::Char('-') | KeyCode::Char('_') => self.dash.step_interval(false),
            KeyCode::Char('k') | KeyCode::Delete => self.kill_selected(terminal),
            _ => {
                let rows = self.dash.renderer().table.rows.len();
                // page size = visible rows (borders (2) + header (1))
                let page = self
                    .ui
                    .procs_area
                    .map(|a| a.height.saturating_sub(3).max(1) as usize)
                    .unwrap_or(1);
                processes_handle_key(&mut self.ui.table, k, page, rows);
            }
        }
    }

    fn on_search_key(&mut self, k: KeyEvent) {
        match k.code {
            KeyCode::Enter => self.ui.mode = Mode::Normal,
            KeyCode::Esc => {
                self.ui.search_input.clear();
                self.dash.set_search_term("");
                self.ui.mode = Mode::Normal;
            }
            KeyCode::Backspace => {
                self.ui.search_input.pop();
                self.dash.set_search_term(self.ui.search_input.clone());
            }
            KeyCode::Char(c) => {
                self.ui.search_input.push(c);
                self.dash.set_search_term(self.ui.search_input.clone());
            }
            _ => {}
        }
    }

    fn on_thresholds_key(&mut self, k: KeyEvent) {
        let form: &mut ThresholdForm = &mut self.ui.thresholds;
        match k.code {
            KeyCode::Esc => self.ui.mode = Mode::Normal,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.push(c),
            KeyCode::Enter => match form.parse() {
                Ok(t) => {
                    self.dash.update_thresholds(t);
                    self.ui.mode = Mode::Normal;
                }
                Err(msg) => self.dash.report_error(msg),
            },
            _ => {}
        }
    }

    fn on_mouse(&mut self, m: MouseEvent) {
        if self.ui.mode != Mode::Normal {
            return;
        }
        let Some(area) = self.ui.procs_area else { return };
        let rows = self.dash.renderer().table.rows.len();
        if let Some(key) = processes_handle_mouse(&mut self.ui.table, m, area, rows) {
            self.dash.set_sort_key(key);
        }
    }

    fn kill_selected<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) {
        let table = &self.dash.renderer().table;
        let Some(row) = self.ui.table.selected().and_then(|i| table.rows.get(i)) else {
            return;
        };
        let (pid, name) = (row.pid, row.full_name.clone());

        // The modal blocks the loop; it draws over a snapshot of the current frame.
        let backdrop = self.dash.renderer().clone();
        let state = self.ui.clone();
        let mut ask = |prompt: &str| match confirm_modal(terminal, &backdrop, &state, prompt) {
            Ok(yes) => yes,
            Err(e) => {
                warn!(error = %e, "confirmation prompt failed");
                false
            }
        };
        self.dash.kill_process(pid, &name, &mut ask);
    }
}

fn confirm_modal<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    backdrop: &Screen,
    state: &UiState,
    prompt: &str,
) -> io::Result<bool> {
    let mut state = state.clone();
    terminal.draw(|f| {
        ui::draw(f, backdrop, &mut state);
        draw_confirm(f, backdrop.theme, prompt);
    })?;
    loop {
        if let Event::Key(k) = event::read()? {
            if k.kind != KeyEventKind::Press {
                continue;
            }
            match k.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => {
                    return Ok(false)
                }
                _ => {}
            }
        }
    }
}
