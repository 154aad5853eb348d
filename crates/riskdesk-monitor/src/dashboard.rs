//! TUI Dashboard using ratatui.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use riskdesk_core::types::Category;
use riskdesk_engine::{Tone, TIERS};
use rust_decimal::Decimal;
use std::io;
use std::time::Duration;

use crate::EvaluationReport;

/// Dashboard state.
#[derive(Default)]
pub struct DashboardState {
    pub report: Option<EvaluationReport>,
    pub messages: Vec<String>,
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Red => Color::Red,
        Tone::Orange => Color::Rgb(255, 165, 0),
        Tone::Green => Color::Green,
    }
}

fn category_color(category: Category) -> Color {
    match category {
        Category::Attack => Color::Red,
        Category::Core => Color::Yellow,
        Category::Defense => Color::Green,
        Category::Ammo => Color::LightBlue,
    }
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until 'q' or Esc.
    pub fn run<F>(&self, mut get_state: F) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut get_state);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<F>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        get_state: &mut F,
    ) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        loop {
            let state = get_state();
            terminal.draw(|f| self.ui(f, &state))?;

            if event::poll(Duration::from_millis(self.refresh_ms))? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(5), // Ratios
                Constraint::Length(9), // Ladder + categories
                Constraint::Min(6),    // Holdings
                Constraint::Length(4), // Instruction
                Constraint::Length(5), // Messages
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state);

        let Some(report) = &state.report else {
            let waiting = Paragraph::new("Waiting for market data...")
                .block(Block::default().borders(Borders::ALL).title("Status"));
            frame.render_widget(waiting, chunks[1]);
            self.render_messages(frame, chunks[5], state);
            return;
        };

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[2]);

        self.render_ratios(frame, chunks[1], report);
        self.render_ladder(frame, middle[0], report);
        self.render_categories(frame, middle[1], report);
        self.render_holdings(frame, chunks[3], report);
        self.render_instruction(frame, chunks[4], report);
        self.render_messages(frame, chunks[5], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let mut spans = vec![
            Span::styled(
                "Exposure Control",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
        ];
        if let Some(report) = &state.report {
            spans.push(Span::styled(
                format!(
                    "Index {:.0}  MDD -{:.2}%  {}",
                    report.market_index,
                    report.evaluation.metrics.drawdown_pct,
                    report.evaluation.tier.label
                ),
                Style::default().fg(Color::Cyan),
            ));
            if let Some(fetched_at) = report.fetched_at {
                spans.push(Span::raw(format!(
                    " | {} @ {}",
                    report.source,
                    fetched_at.format("%H:%M:%S")
                )));
            }
            spans.push(Span::raw(" | "));
        }
        spans.push(Span::raw("Press 'q' to quit"));

        let header = Paragraph::new(vec![Line::from(spans)])
            .block(Block::default().borders(Borders::ALL).title("System"));
        frame.render_widget(header, area);
    }

    fn render_ratios(&self, frame: &mut Frame, area: Rect, report: &EvaluationReport) {
        let m = &report.evaluation.metrics;

        let maintenance_color = tone_color(report.maintenance_tone());
        let beta_color = if report.beta_in_band() {
            Color::Green
        } else {
            Color::Yellow
        };

        let stats = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("Total: "),
                Span::styled(
                    format!("${:.0}", m.total_assets),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  |  Net: "),
                Span::styled(format!("${:.0}", m.net_assets), Style::default()),
                Span::raw("  |  Loan: "),
                Span::styled(format!("${:.0}", m.loan_amount), Style::default()),
            ]),
            Line::from(vec![
                Span::raw("Beta: "),
                Span::styled(format!("{:.2}", m.beta), Style::default().fg(beta_color)),
                Span::raw("  |  Maintenance: "),
                Span::styled(
                    format!("{:.0}%", m.maintenance_ratio),
                    Style::default().fg(maintenance_color),
                ),
                Span::raw("  |  Loan ratio: "),
                Span::styled(format!("{:.1}%", m.loan_ratio), Style::default()),
            ]),
            Line::from(vec![
                Span::raw("Attack: "),
                Span::styled(
                    format!("{:.1}%", m.attack_exposure_pct),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  target {}%  gap {:+.1} pts",
                    m.target_exposure, m.gap
                )),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title("Risk Ratios"));
        frame.render_widget(stats, area);
    }

    fn render_ladder(&self, frame: &mut Frame, area: Rect, report: &EvaluationReport) {
        let header_cells = ["Tier", "Drawdown", "Target"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = TIERS.iter().map(|tier| {
            let style = if tier.index == report.evaluation.tier.index {
                Style::default().fg(Color::Black).bg(Color::LightRed)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(format!("{} ({})", tier.label, tier.description)),
                Cell::from(tier.range_label()),
                Cell::from(format!("{}%", tier.target_exposure)),
            ])
            .style(style)
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(50),
                Constraint::Percentage(30),
                Constraint::Percentage(20),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Ladder"));

        frame.render_widget(table, area);
    }

    fn render_categories(&self, frame: &mut Frame, area: Rect, report: &EvaluationReport) {
        let m = &report.evaluation.metrics;
        let lines: Vec<Line> = Category::ALL
            .iter()
            .map(|c| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<8}", c.label()),
                        Style::default().fg(category_color(*c)),
                    ),
                    Span::raw(format!(
                        " ${:>12.0}  {:>5.1}%",
                        m.category_value(*c),
                        m.category_pct(*c)
                    )),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Allocation"));
        frame.render_widget(paragraph, area);
    }

    fn render_holdings(&self, frame: &mut Frame, area: Rect, report: &EvaluationReport) {
        let header_cells = ["Symbol", "Category", "Price", "Shares", "Value", "Weight"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = report.holdings.iter().map(|h| {
            let price_style = if h.price > Decimal::ZERO {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };

            Row::new(vec![
                Cell::from(h.symbol.clone()),
                Cell::from(h.category.label()).style(Style::default().fg(category_color(h.category))),
                Cell::from(format!("{:.2}", h.price)).style(price_style),
                Cell::from(format!("{}", h.shares)),
                Cell::from(format!("${:.0}", h.value)),
                Cell::from(format!("{:.1}%", h.weight_pct)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(15),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
                Constraint::Percentage(15),
                Constraint::Percentage(25),
                Constraint::Percentage(15),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Holdings"));

        frame.render_widget(table, area);
    }

    fn render_instruction(&self, frame: &mut Frame, area: Rect, report: &EvaluationReport) {
        let decision = &report.evaluation.decision;
        let color = tone_color(decision.tone());

        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(
                decision.headline(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(decision.instruction()),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title("Instruction"),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let messages: Vec<Line> = state
            .messages
            .iter()
            .rev()
            .take(3)
            .map(|m| Line::from(m.as_str()))
            .collect();

        let paragraph =
            Paragraph::new(messages).block(Block::default().borders(Borders::ALL).title("Log"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_colors() {
        assert_eq!(tone_color(Tone::Red), Color::Red);
        assert_eq!(tone_color(Tone::Orange), Color::Rgb(255, 165, 0));
        assert_eq!(tone_color(Tone::Green), Color::Green);
    }
}
