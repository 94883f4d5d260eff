//! Full-screen status panel.
//!
//! Shows the installer banner and the host facts, then waits for the
//! operator. The panel is a small state machine:
//!
//! ```text
//! Idle --draw--> Rendered --'q'/'Q'--> Exit
//! ```
//!
//! Any key other than `q`/`Q` is ignored and the panel stays `Rendered`.
//! The panel owns the calling thread until it exits.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::app::lifecycle::ReturnCode;
use crate::constants::PRODUCT_NAME;
use crate::errors::{InstallerError, InstallerResult};
use crate::hardware::HostFacts;
use crate::version;

/// Informational line under the banner.
pub const INFO_LINE: &str = "This utility transforms this host into a node of the SEED platform.";

/// Footer hint.
pub const FOOTER_HINT: &str = "Press Q to quit.";

/// Shown when the public IP address could not be determined.
const NOT_AVAILABLE: &str = "not available";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Rendered,
    Exit,
}

fn terminal_err(e: io::Error) -> InstallerError {
    InstallerError::Terminal(e.to_string())
}

pub struct StatusPanel {
    facts: HostFacts,
    state: PanelState,
}

impl StatusPanel {
    pub fn new(facts: HostFacts) -> Self {
        Self {
            facts,
            state: PanelState::Idle,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Feed a key to the panel and return the resulting state.
    pub fn handle_key(&mut self, key: KeyEvent) -> PanelState {
        if key.kind != KeyEventKind::Press {
            return self.state;
        }
        if let KeyCode::Char('q') | KeyCode::Char('Q') = key.code {
            self.state = PanelState::Exit;
        }
        self.state
    }

    /// Body lines describing the host.
    pub fn fact_lines(&self) -> Vec<(&'static str, String)> {
        let facts = &self.facts;
        vec![
            ("CPU", facts.cpu_name.clone()),
            ("Memory", format!("{} MB", facts.memory_mb())),
            (
                "Public IP",
                facts
                    .public_ip
                    .clone()
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            ),
            (
                "Operating System",
                format!("{} {}", facts.os_name, facts.os_version),
            ),
            ("Runtime", facts.runtime_version.clone()),
        ]
    }

    /// Render the panel into a frame.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Banner
                Constraint::Length(3), // Info
                Constraint::Min(7),    // Host facts
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let banner = Paragraph::new(Line::from(vec![
            Span::styled(
                PRODUCT_NAME,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  v{}", version::long_version())),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        frame.render_widget(banner, chunks[0]);

        let info = Paragraph::new(INFO_LINE)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(info, chunks[1]);

        let lines: Vec<Line> = self
            .fact_lines()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<18}", format!("{label}:")),
                        Style::default().fg(Color::Green),
                    ),
                    Span::raw(value),
                ])
            })
            .collect();
        let body = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Host "),
        );
        frame.render_widget(body, chunks[2]);

        let footer = Paragraph::new(FOOTER_HINT)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, chunks[3]);
    }

    /// Draw the panel; moves `Idle` to `Rendered`.
    pub fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> InstallerResult<()> {
        terminal
            .draw(|frame| self.render(frame))
            .map_err(terminal_err)?;
        if self.state == PanelState::Idle {
            self.state = PanelState::Rendered;
        }
        Ok(())
    }

    /// Draw, then block on `next_event` until the panel exits.
    pub fn run<B, F>(&mut self, terminal: &mut Terminal<B>, mut next_event: F) -> InstallerResult<ReturnCode>
    where
        B: Backend,
        F: FnMut() -> io::Result<Event>,
    {
        self.draw(terminal)?;

        while self.state != PanelState::Exit {
            match next_event().map_err(terminal_err)? {
                Event::Key(key) => {
                    self.handle_key(key);
                }
                Event::Resize(_, _) => self.draw(terminal)?,
                _ => {}
            }
        }

        Ok(ReturnCode::Success)
    }
}

/// Run the panel on the real terminal.
///
/// Raw mode and the alternate screen are always restored, also when
/// drawing or reading input fails.
pub fn run_interactive(facts: HostFacts) -> InstallerResult<ReturnCode> {
    enable_raw_mode().map_err(terminal_err)?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(terminal_err(e));
    }

    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => {
            let result = StatusPanel::new(facts).run(&mut terminal, event::read);
            let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
            let _ = terminal.show_cursor();
            result
        }
        Err(e) => {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            Err(terminal_err(e))
        }
    };

    disable_raw_mode().map_err(terminal_err)?;
    result
}
