//! App state and main loop: input handling, spawning poll cycles, applying
//! their results, and drawing.

use std::{io, time::Duration};

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::dashboard::{run_cycle, CycleReport, DashboardState};
use crate::events::LogLevel;
use crate::fetch::Fetcher;
use crate::prefs::{save_prefs, Preferences};
use crate::scheduler::RefreshScheduler;
use crate::startup::{StartupRetry, StartupStep};
use crate::ui::{
    cpu::{draw_cpu, draw_cpu_history},
    header::{draw_banner, draw_footer, draw_header},
    info::{draw_server_info, draw_sources_plugins},
    log::draw_log,
    mem::{draw_mem, draw_mem_history},
    players::draw_players,
    theme::Palette,
    View,
};

const REDRAW_EVERY: Duration = Duration::from_millis(250);

pub struct App {
    state: DashboardState,
    scheduler: RefreshScheduler,
    fetcher: Fetcher,
    prefs: Preferences,
    server: String,

    startup: StartupRetry,

    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig, fetcher: Fetcher, prefs: Preferences) -> Self {
        Self {
            state: DashboardState::new(config.connection.max_retries),
            scheduler: RefreshScheduler::new(config.refresh_config()),
            server: fetcher.base().to_string(),
            fetcher,
            prefs,
            startup: StartupRetry::new(config.retry_delay()),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<CycleReport>();
        let mut redraw = tokio::time::interval(REDRAW_EVERY);

        self.state
            .record(LogLevel::Info, "Connecting to Lavalink server...", Local::now());
        self.spawn_cycle(&tx);

        loop {
            tokio::select! {
                _ = redraw.tick() => {
                    self.handle_input(&tx)?;
                    if self.should_quit {
                        break;
                    }
                    terminal.draw(|f| self.draw(f))?;
                }
                _ = self.scheduler.tick() => self.spawn_cycle(&tx),
                _ = sleep_until_opt(self.startup.retry_at()) => {
                    self.startup.take_due();
                    self.spawn_cycle(&tx);
                }
                Some(report) = rx.recv() => self.on_report(report),
            }
        }
        Ok(())
    }

    fn spawn_cycle(&mut self, tx: &mpsc::UnboundedSender<CycleReport>) {
        let seq = self.state.begin_cycle();
        let fetcher = self.fetcher.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let report = run_cycle(&fetcher, seq).await;
            // Receiver only goes away on shutdown.
            let _ = tx.send(report);
        });
    }

    fn on_report(&mut self, report: CycleReport) {
        let applied = self.state.apply(report, Local::now());
        let step = self
            .startup
            .on_applied(&applied, self.state.connection.is_initializing());
        if step == StartupStep::Handoff {
            self.scheduler.restart();
            info!(refresh = %self.scheduler.config().describe(), "startup finished");
        }
    }

    fn handle_input(&mut self, tx: &mpsc::UnboundedSender<CycleReport>) -> anyhow::Result<()> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(k) = event::read()? else { continue; };
            if k.kind != KeyEventKind::Press {
                continue;
            }
            // Raw mode swallows SIGINT, so Ctrl-C arrives as a key.
            if k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c') {
                self.should_quit = true;
                continue;
            }
            let now = Local::now();
            match k.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('p') | KeyCode::Char(' ') => {
                    if self.scheduler.toggle() {
                        self.state.record(LogLevel::Info, "Auto-refresh enabled", now);
                    } else {
                        self.state.record(LogLevel::Warning, "Auto-refresh paused", now);
                    }
                }
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    let next = self.scheduler.config().next_interval();
                    self.change_interval(next);
                }
                KeyCode::Char('-') => {
                    let prev = self.scheduler.config().prev_interval();
                    self.change_interval(prev);
                }
                KeyCode::Char('r') => self.spawn_cycle(tx),
                KeyCode::Char('t') => {
                    self.prefs.theme = self.prefs.theme.toggled();
                    if let Err(e) = save_prefs(&self.prefs) {
                        warn!("saving preferences failed: {e}");
                    }
                    self.state.record(
                        LogLevel::Info,
                        format!("Theme changed to {} mode", self.prefs.theme.name()),
                        now,
                    );
                }
                KeyCode::Char('c') => self.state.log.clear(now),
                _ => {}
            }
        }
        Ok(())
    }

    fn change_interval(&mut self, ms: u64) {
        if ms == self.scheduler.config().interval_ms {
            return;
        }
        match self.scheduler.set_interval(ms) {
            Ok(()) => self.state.record(
                LogLevel::Info,
                format!("Refresh interval changed to {}s", ms / 1000),
                Local::now(),
            ),
            Err(e) => warn!("{e}"),
        }
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let view = View {
            state: &self.state,
            refresh: self.scheduler.config(),
            palette: Palette::for_theme(self.prefs.theme),
            server: &self.server,
            now: Local::now(),
        };
        let area = f.area();
        f.render_widget(
            Block::default().style(Style::default().bg(view.palette.bg).fg(view.palette.fg)),
            area,
        );

        let banner_h = if view.state.banner().is_some() { 1 } else { 0 };
        // Root rows: header, banner, gauges, charts, details, log, footer
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(banner_h),
                Constraint::Length(6),
                Constraint::Min(8),
                Constraint::Length(13),
                Constraint::Length(8),
                Constraint::Length(1),
            ])
            .split(area);

        draw_header(f, rows[0], &view);
        draw_banner(f, rows[1], &view);

        let gauges = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        draw_cpu(f, gauges[0], &view);
        draw_mem(f, gauges[1], &view);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[3]);
        draw_cpu_history(f, charts[0], &view);
        draw_mem_history(f, charts[1], &view);

        let details = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(rows[4]);
        draw_players(f, details[0], &view);
        draw_server_info(f, details[1], &view);
        draw_sources_plugins(f, details[2], &view);

        draw_log(f, rows[5], &view);
        draw_footer(f, rows[6], &view);
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(d).await,
        None => std::future::pending::<()>().await,
    }
}
