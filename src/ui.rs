use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{app::App, session::Mode};

const HORIZONTAL_MARGIN: u16 = 2;

const BAR_BG: Color = Color::Rgb(0x37, 0x37, 0x37);
const BUFFER_BG: Color = Color::Rgb(0x1e, 0x1e, 0x1e);
const TEXT_FG: Color = Color::Rgb(0xd4, 0xd4, 0xd4);

/// Accuracy with four decimals, `-` before anything was typed.
pub fn format_accuracy(accuracy: Option<f64>) -> String {
    accuracy.map_or_else(|| "-".to_string(), |a| format!("{a:.4}"))
}

pub fn format_speed(apm: Option<f64>) -> String {
    apm.map_or_else(|| "-".to_string(), |s| format!("{s:.2}"))
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let bar_style = Style::default().bg(BAR_BG).fg(TEXT_FG);
        let buffer_style = Style::default().bg(BUFFER_BG).fg(TEXT_FG);
        let typed_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(1),    // operations
                Constraint::Length(1), // command line
            ])
            .split(area);

        // header: mode on the left, statistics on the right
        let stats = session.stats();
        let left = format!(" {} ", session.mode);
        let right = format!(
            "ACC: {} / APM: {} / {} left of {} ",
            format_accuracy(stats.accuracy()),
            format_speed(stats.actions_per_minute(self.now())),
            session.queued.len() + usize::from(!session.is_finished()),
            session.target_size,
        );
        let padding = (chunks[0].width as usize).saturating_sub(left.width() + right.width());
        Paragraph::new(Line::from(vec![
            Span::styled(left, bar_style.add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(padding)),
            Span::raw(right),
        ]))
        .style(bar_style)
        .render(chunks[0], buf);

        let lines = if session.is_finished() {
            vec![Line::from(Span::styled(
                "session complete, :edit to go again",
                dim_style,
            ))]
        } else {
            vec![
                Line::from(vec![
                    Span::styled(session.typed_prefix.clone(), typed_style),
                    Span::raw(session.remaining.clone()),
                ]),
                Line::from(Span::styled(session.queued.iter().join(" "), dim_style)),
            ]
        };
        let body = Layout::default()
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([Constraint::Min(1)])
            .split(chunks[1]);
        Paragraph::new("").style(buffer_style).render(chunks[1], buf);
        Paragraph::new(lines)
            .style(buffer_style)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(body[0], buf);

        let command_line = match session.mode {
            Mode::Command => format!(":{}", session.command_buffer),
            Mode::Normal => String::new(),
        };
        Paragraph::new(command_line)
            .style(bar_style)
            .render(chunks[2], buf);
    }
}
