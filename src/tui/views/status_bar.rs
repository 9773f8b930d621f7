//! Status bar view
//!
//! Key hints for the current screen, plus a busy marker while a listing
//! loads.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::Screen;
use crate::tui::app::App;

fn hints(app: &App) -> &'static str {
    if app.navigator.gate().is_some() {
        return " r:Retry  Esc:Cancel ";
    }
    if app.form.is_some() {
        return " Tab:Next field  Enter:Save  Esc:Cancel ";
    }
    match app.screen() {
        Screen::Onboarding => " Enter:Sign in  n:New profile  q:Quit ",
        Screen::SignUp => " Enter:Next  Esc:Back ",
        Screen::Auth => " 0-9:PIN  Enter:Continue  b:Biometric  Esc:Back ",
        Screen::Dashboard => {
            " Enter:Open  n:New  h/a/d:Hide/Archive/Delete  /:Search  s:Settings  m:Storage  l:Activity  x:Lock  q:Quit "
        }
        Screen::FolderDetail { .. } => " Enter:View  b:Browse  n:Note  a:Attach  d:Delete  Esc:Back ",
        Screen::Folder { .. } => " Enter:View  n:Note  a:Attach  d:Delete  Esc:Back ",
        Screen::Viewer { .. } => " x:Lock now  Esc:Lock ",
        Screen::Settings => " Enter:Toggle  o:Sign out  Esc:Back ",
        Screen::Storage => " Tab:Next tab  r:Restore  p:Delete forever  Esc:Back ",
        Screen::Activity => " f:Filter  Esc:Back ",
    }
}

fn is_loading(app: &App) -> bool {
    match app.screen() {
        Screen::Dashboard => app.navigator.folders().is_loading(),
        Screen::Folder { .. } | Screen::FolderDetail { .. } => app.navigator.items().loading,
        Screen::Storage => app.navigator.storage().folders.is_loading(),
        Screen::Activity => app.navigator.activity().loading,
        _ => false,
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    if is_loading(app) {
        spans.push(Span::styled(" Loading… ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw("│"));
    }

    spans.push(Span::styled(hints(app), Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
