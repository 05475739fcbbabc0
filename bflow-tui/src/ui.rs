// TUI rendering: per-connection utilisation bars + recent augmenting paths + status panel.

use std::io::Stdout;

use bflow_core::EngineState;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::App;
use crate::backend::FlowBackend;

const BAR_WIDTH: usize = 40;

/// `[#####.....]`-style bar of `flow / capacity`, `width` cells wide.
pub fn bar(flow: u64, capacity: u64, width: usize) -> String {
    let filled = if capacity == 0 {
        0
    } else {
        ((flow as u128 * width as u128) / capacity as u128) as usize
    };
    let filled = filled.min(width);
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    s.extend(std::iter::repeat('█').take(filled));
    s.extend(std::iter::repeat('·').take(width - filled));
    s.push(']');
    s
}

/// Draws the UI each frame:
/// - Top: one row per connection, `from -> to [bar] flow/capacity`.
/// - Middle: most recent augmenting paths, newest first.
/// - Bottom: total flow, augmentations, engine state, model, controls.
pub fn draw<B: FlowBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &App<B>,
) -> anyhow::Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(30), Constraint::Percentage(15)].as_ref())
            .split(f.size());

        let mut lines = Vec::with_capacity(app.backend.connections().len());
        for (idx, conn) in app.backend.connections().iter().enumerate() {
            let (flow, cap) = app.backend.load(idx);
            lines.push(format!(
                "{:>4} -> {:<4} {} {}/{}",
                conn.from,
                conn.to,
                bar(flow, cap, BAR_WIDTH),
                flow,
                cap
            ));
        }
        let load_widget = Paragraph::new(Text::from(lines.join("\n")))
            .block(Block::default().title("Connection utilisation").borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(load_widget, chunks[0]);

        let paths: Vec<&str> = app.history.iter().map(String::as_str).collect();
        let paths_widget = Paragraph::new(Text::from(paths.join("\n")))
            .block(Block::default().title("Augmenting paths (newest first)").borders(Borders::ALL))
            .style(Style::default().fg(Color::Green));
        f.render_widget(paths_widget, chunks[1]);

        let state = match app.backend.state() {
            EngineState::Searching => "searching",
            EngineState::Terminated => "max flow reached",
        };
        let status = format!(
            "Flow: {} | Paths: {} | State: {} | Model: {:?} | Running: {} | Controls: [s] Step  [r] Run/Pause  [q] Quit",
            app.backend.total_flow(),
            app.backend.augmentations(),
            state,
            app.backend.model(),
            if app.running { "yes" } else { "no" }
        );
        let status_widget = Paragraph::new(status)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(status_widget, chunks[2]);
    })?;
    Ok(())
}
