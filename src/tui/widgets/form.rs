//! Multi-field form state
//!
//! A column of text inputs with one focused field. Dialogs render it; the
//! key handler feeds it characters.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};

use super::input::TextInput;

#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: Vec<TextInput>,
    focus: usize,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

/// What a key did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// The key was consumed by editing or moving focus
    Edited,
    /// Enter on the last field
    Submit,
    Cancel,
}

impl FormState {
    pub fn new(fields: Vec<TextInput>) -> Self {
        let mut form = Self {
            fields,
            focus: 0,
            error: None,
        };
        form.refresh_focus();
        form
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value()).unwrap_or("")
    }

    /// Trimmed owned value
    pub fn text(&self, index: usize) -> String {
        self.value(index).trim().to_string()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn fields(&self) -> &[TextInput] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
            self.refresh_focus();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            self.refresh_focus();
        }
    }

    fn refresh_focus(&mut self) {
        let focus = self.focus;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.focused = i == focus;
        }
    }

    fn focused_mut(&mut self) -> Option<&mut TextInput> {
        self.fields.get_mut(self.focus)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Enter => {
                if self.focus + 1 >= self.fields.len() {
                    return FormAction::Submit;
                }
                self.next_field();
            }
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_mut() {
                    field.insert(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_mut() {
                    field.backspace();
                }
            }
            KeyCode::Delete => {
                if let Some(field) = self.focused_mut() {
                    field.delete();
                }
            }
            KeyCode::Left => {
                if let Some(field) = self.focused_mut() {
                    field.move_left();
                }
            }
            KeyCode::Right => {
                if let Some(field) = self.focused_mut() {
                    field.move_right();
                }
            }
            KeyCode::Home => {
                if let Some(field) = self.focused_mut() {
                    field.move_start();
                }
            }
            KeyCode::End => {
                if let Some(field) = self.focused_mut() {
                    field.move_end();
                }
            }
            _ => {}
        }
        FormAction::Edited
    }
}

/// Renders one field per row
pub struct FormWidget<'a> {
    form: &'a FormState,
}

impl<'a> FormWidget<'a> {
    pub fn new(form: &'a FormState) -> Self {
        Self { form }
    }
}

impl Widget for FormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, field) in self.form.fields.iter().enumerate() {
            let y = area.y + (i as u16) * 2;
            if y >= area.y + area.height {
                break;
            }
            field.clone().render(Rect::new(area.x, y, area.width, 1), buf);
        }
    }
}
