//! Toast notification widget
//!
//! Shows the navigator's notices for a few seconds in the corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::{Notice, NoticeLevel};

const DISPLAY_TIME: Duration = Duration::from_secs(3);

impl NoticeLevel {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Warning => "!",
            Self::Error => "x",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Success => "Done",
            Self::Warning => "Check",
            Self::Error => "Error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub notice: Notice,
    pub shown_at: Instant,
}

impl Notification {
    pub fn new(notice: Notice) -> Self {
        Self {
            notice,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= DISPLAY_TIME
    }
}

/// Notices waiting to be shown, oldest first
#[derive(Debug, Default)]
pub struct NotificationQueue {
    queue: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(Notification::new(notice));
    }

    /// Drop the front notice once it has been up long enough
    pub fn remove_expired(&mut self) {
        while self.queue.front().is_some_and(Notification::is_expired) {
            self.queue.pop_front();
            // The next one starts its own clock when it becomes visible
            if let Some(next) = self.queue.front_mut() {
                next.shown_at = Instant::now();
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.queue.front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let level = self.notification.notice.level;
        let color = level.color();

        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!(" {} {} ", level.icon(), level.title()))
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        Paragraph::new(self.notification.notice.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(message: &str) -> Notice {
        Notice {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    #[test]
    fn test_queue_order() {
        let mut queue = NotificationQueue::default();
        assert!(queue.is_empty());

        queue.push(notice("First"));
        queue.push(notice("Second"));
        assert_eq!(queue.current().unwrap().notice.message, "First");

        queue.remove_expired();
        assert_eq!(queue.current().unwrap().notice.message, "First");
    }

    #[test]
    fn test_level_colors() {
        assert_eq!(NoticeLevel::Success.color(), Color::Green);
        assert_eq!(NoticeLevel::Error.color(), Color::Red);
    }
}
