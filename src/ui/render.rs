use crate::host::HostStatus;
use crate::ui::terminal::Geometry;
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Rows taken by the status header at the top of the screen.
pub const STATUS_ROWS: u16 = 2;

/// Draw the status header and clear the rest of the screen. Modal windows
/// are painted on top of this.
pub fn render_backdrop(
    frame: &mut Frame,
    geometry: Geometry,
    theme: &Theme,
    status: Option<&HostStatus>,
) {
    let area = geometry.area().intersection(frame.area());
    frame.render_widget(
        Block::default().style(Style::default().fg(theme.fg).bg(theme.bg)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    frame.render_widget(Paragraph::new(status_line(theme, status)), chunks[0]);
    render_rule(frame, chunks[1], theme);
}

fn status_line<'a>(theme: &Theme, status: Option<&'a HostStatus>) -> Line<'a> {
    let mut spans = vec![Span::styled(
        " nft-tui ",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(status) = status {
        let label = Style::default().fg(theme.fg_dim);
        let value = Style::default().fg(theme.secondary);
        spans.extend([
            Span::styled(" host:", label),
            Span::styled(status.hostname.as_str(), value),
            Span::styled("  ip:", label),
            Span::styled(status.address.as_str(), value),
            Span::raw("  "),
            Span::styled(status.timestamp.as_str(), label),
        ]);
    }
    Line::from(spans)
}

/// A horizontal line across `area`.
pub fn render_rule(frame: &mut Frame, area: Rect, theme: &Theme) {
    let rule = "─".repeat(usize::from(area.width));
    frame.render_widget(
        Paragraph::new(rule).style(Style::default().fg(theme.fg_dim)),
        area,
    );
}
