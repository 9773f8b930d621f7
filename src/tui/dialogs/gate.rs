//! Biometric gate modal
//!
//! Shown while a gate is open. The scan runs on its own; the modal only
//! reports progress and offers retry or cancel.

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{GateKind, GatePhase, GateState};
use crate::tui::layout::centered_rect_fixed;

fn heading(kind: GateKind) -> &'static str {
    match kind {
        GateKind::SignIn => " Biometric sign in ",
        GateKind::Restricted => " Restricted access ",
        GateKind::Identity => " Verify identity ",
    }
}

pub fn render(frame: &mut Frame, gate: &GateState) {
    let area = centered_rect_fixed(48, 9, frame.area());
    frame.render_widget(Clear, area);

    let (color, status, hints) = match &gate.phase {
        GatePhase::Scanning => (
            Color::Cyan,
            "Scanning...".to_string(),
            vec![
                Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
                Span::raw(" Cancel"),
            ],
        ),
        GatePhase::Verified => (Color::Green, "Verified".to_string(), Vec::new()),
        GatePhase::Failed(reason) => (
            Color::Red,
            reason.clone(),
            vec![
                Span::styled("[R]", Style::default().fg(Color::Green)),
                Span::raw(" Try again  "),
                Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
                Span::raw(" Cancel"),
            ],
        ),
    };

    let block = Block::default()
        .title(heading(gate.kind()))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            gate.target.subject().to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(color))),
        Line::from(""),
        Line::from(hints),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
