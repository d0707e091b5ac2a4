//! App state and main loop: socket events, poll timers, key input and drawing.

use std::{io, time::Duration};

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::{info, warn};

use crate::protocol::RequestKind;
use crate::session::{SessionContext, SessionState};
use crate::target::Target;
use crate::ui::{
    blockmap::draw_block_map,
    disk::draw_disk,
    files::draw_files,
    header::draw_header,
    notice::{draw_blocker, draw_notice},
    server::draw_server,
};
use crate::view::ViewModel;
use crate::ws::{self, Inbound, WsSink};

// Wake at least this often even with no timers pending.
const IDLE_TICK: Duration = Duration::from_secs(1);

struct Connection {
    sink: WsSink,
    rx: mpsc::UnboundedReceiver<Inbound>,
    reader: JoinHandle<()>,
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

pub struct App {
    target: Target,
    session: SessionContext,
    view: ViewModel,
    should_quit: bool,
    reconnect: bool,
}

impl App {
    pub fn new(target: Target) -> Self {
        let session = SessionContext::new(target.label());
        Self {
            target,
            session,
            view: ViewModel::new(0),
            should_quit: false,
            reconnect: false,
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
        let mut keys = EventStream::new();

        // Show "connecting" while the handshake runs
        terminal.draw(|f| self.draw(f))?;
        let mut conn = self.connect().await;

        loop {
            if self.reconnect {
                self.reconnect = false;
                drop(conn.take());
                terminal.draw(|f| self.draw(f))?;
                conn = self.connect().await;
            }

            let now = Instant::now().into_std();
            self.session.poll_due(now);
            self.view.expire_notice(now);
            self.flush(&mut conn).await;

            terminal.draw(|f| self.draw(f))?;
            if self.should_quit {
                break;
            }

            let wake = self.next_wake();
            tokio::select! {
                ev = next_inbound(&mut conn) => self.on_inbound(ev, &mut conn),
                Some(ev) = keys.next() => self.on_terminal_event(ev?),
                _ = sleep_until(wake) => {}
            }
        }

        Ok(())
    }

    async fn connect(&mut self) -> Option<Connection> {
        self.session = SessionContext::new(self.target.label());
        info!(url = %self.target, "connecting");
        match ws::connect(self.target.url.as_str()).await {
            Ok(stream) => {
                let (tx, rx) = mpsc::unbounded_channel();
                let (sink, reader) = ws::spawn_reader(stream, tx);
                self.session.open(&mut self.view, Instant::now().into_std());
                Some(Connection { sink, rx, reader })
            }
            Err(e) => {
                self.session
                    .on_connect_failed(&e.to_string(), &mut self.view, Instant::now().into_std());
                None
            }
        }
    }

    // Write whatever the session queued; a failed write ends the session.
    async fn flush(&mut self, conn: &mut Option<Connection>) {
        let frames = self.session.drain_outbound();
        if frames.is_empty() {
            return;
        }
        let Some(c) = conn.as_mut() else { return; };
        if let Err(e) = ws::send_frames(&mut c.sink, frames).await {
            warn!(error = %e, "write failed");
            self.session
                .on_error(&e.to_string(), &mut self.view, Instant::now().into_std());
            *conn = None;
        }
    }

    fn on_inbound(&mut self, ev: Option<Inbound>, conn: &mut Option<Connection>) {
        let now = Instant::now().into_std();
        match ev {
            Some(Inbound::Frame(text)) => self.session.on_frame(&text, &mut self.view, now),
            Some(Inbound::Error(e)) => {
                self.session.on_error(&e, &mut self.view, now);
                *conn = None;
            }
            Some(Inbound::Closed) | None => {
                self.session.on_close(&mut self.view, now);
                *conn = None;
            }
        }
    }

    fn on_terminal_event(&mut self, ev: Event) {
        let Event::Key(k) = ev else { return; };
        if k.kind != KeyEventKind::Press {
            return;
        }
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.session.send(RequestKind::GetBlockInfo);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.session.state() == SessionState::Closed {
                    self.reconnect = true;
                }
            }
            _ => {}
        }
    }

    fn next_wake(&self) -> Instant {
        let idle = Instant::now() + IDLE_TICK;
        [
            self.session.scheduler().next_deadline(),
            self.view.notice_deadline(),
        ]
        .into_iter()
        .flatten()
        .map(Instant::from_std)
        .fold(idle, Instant::min)
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, info panels, block map, message line
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),  // header
                Constraint::Length(11), // disk (left) + files/server (right)
                Constraint::Min(4),     // block map
                Constraint::Length(1),  // notices
            ])
            .split(area);

        draw_header(f, rows[0], self.session.target(), self.session.state());

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        draw_disk(f, top[0], self.view.disk.as_ref());

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(5)])
            .split(top[1]);
        draw_files(f, right[0], self.view.files.as_ref(), self.view.file_sizes.as_ref());
        draw_server(f, right[1], self.view.server.as_ref());

        // Remembered for the next grid build; a resize alone never rebuilds it.
        self.view.grid_width = rows[2].width;
        draw_block_map(f, rows[2], &self.view.grid);

        draw_notice(f, rows[3], self.view.notice.as_ref());

        if self.view.blocked || self.session.state() != SessionState::Open {
            draw_blocker(
                f,
                Rect { height: area.height.saturating_sub(1), ..area },
                self.session.target(),
                self.session.state(),
            );
        }
    }
}

async fn next_inbound(conn: &mut Option<Connection>) -> Option<Inbound> {
    match conn {
        Some(c) => c.rx.recv().await,
        None => std::future::pending().await,
    }
}
