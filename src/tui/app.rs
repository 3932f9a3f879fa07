//! Main application logic for the terminal user interface.
//!
//! `App` is a thin rendering surface over [`Controller`]: it maps key
//! presses to `TaskActions` handlers, keeps the table selection, and draws
//! the form, the filtered table (or empty state), the error region and the
//! confirmation dialog.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::{
    controller::{Controller, Focus, TaskActions},
    fields::{Filter, Status},
    input::InputField,
    schedule::Scheduler,
    storage::KeyValueStore,
    tui::{
        colors::{CUE_RED, DARK_GREEN, DARK_PURPLE, DARK_RED, GOLD},
        enums::AppState,
        utils::centered_rect,
    },
    validate::Field,
    view::{ListView, EMPTY_STATE},
};

pub struct App<S, D> {
    state: AppState,
    controller: Controller<S, D>,
    table_state: TableState,
}

impl<S: KeyValueStore, D: Scheduler> App<S, D> {
    pub fn new(controller: Controller<S, D>) -> Self {
        let mut app = App {
            state: AppState::TaskList,
            controller,
            table_state: TableState::default(),
        };
        app.clamp_selection();
        app
    }

    pub fn controller(&self) -> &Controller<S, D> {
        &self.controller
    }

    /// Id of the highlighted row, if any.
    pub fn selected_id(&self) -> Option<String> {
        let view = self.controller.view();
        self.table_state
            .selected()
            .and_then(|i| view.rows().get(i))
            .map(|r| r.id.clone())
    }

    /// Keep the selection within the visible rows after any change.
    fn clamp_selection(&mut self) {
        let len = self.controller.view().rows().len();
        let selected = match (self.table_state.selected(), len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), n) => Some(i.min(n - 1)),
        };
        self.table_state.select(selected);
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.controller.view().rows().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.table_state.select(Some(next));
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return true;
        }

        if self.controller.pending_confirmation().is_some() {
            match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.controller.on_confirm(true)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.controller.on_confirm(false)
                }
                _ => {}
            }
            self.clamp_selection();
            return false;
        }

        if self.state == AppState::Help {
            self.state = AppState::TaskList;
            return false;
        }

        let quit = match self.controller.form.focus {
            Focus::Text | Focus::DueDate => {
                self.handle_form_key(key);
                false
            }
            Focus::List => self.handle_list_key(key),
        };
        self.clamp_selection();
        quit
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        if key == KeyCode::Enter {
            self.controller.on_submit();
            return;
        }
        let form = &mut self.controller.form;
        match key {
            KeyCode::Tab => form.focus = form.focus.next(),
            KeyCode::BackTab => form.focus = form.focus.prev(),
            KeyCode::Esc => form.focus = Focus::List,
            _ => {
                let Some(input) = form.focused_input() else {
                    return;
                };
                match key {
                    KeyCode::Char(c) => input.handle_char(c),
                    KeyCode::Backspace => input.handle_backspace(),
                    KeyCode::Delete => input.handle_delete(),
                    KeyCode::Left => input.move_cursor_left(),
                    KeyCode::Right => input.move_cursor_right(),
                    KeyCode::Home => input.move_home(),
                    KeyCode::End => input.move_end(),
                    _ => {}
                }
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.controller.form.focus = Focus::Text,
            KeyCode::BackTab => self.controller.form.focus = Focus::DueDate,
            KeyCode::Char('a') | KeyCode::Char('i') => self.controller.form.focus = Focus::Text,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char(' ') | KeyCode::Char('c') => {
                if let Some(id) = self.selected_id() {
                    self.controller.on_toggle(&id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.controller.on_delete(&id);
                }
            }
            KeyCode::Char('D') => self.controller.on_delete_all(),
            KeyCode::Char('f') => {
                let next = self.controller.filter().next();
                self.controller.on_filter_change(next);
            }
            KeyCode::Char('F') => {
                let prev = self.controller.filter().prev();
                self.controller.on_filter_change(prev);
            }
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Apply deferred work that has come due.
    pub fn tick(&mut self) {
        self.controller.tick();
        self.clamp_selection();
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("TASK LIST", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   Filter: "),
        ];
        for filter in Filter::ALL {
            let label = format!(" {} ", capitalise(filter.as_str()));
            let style = if filter == self.controller.filter() {
                Style::default().bg(Color::Cyan).fg(Color::Black).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }
        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn input_block(&self, title: &'static str, field: Field, focus: Focus) -> Block<'static> {
        let border = if self.controller.has_cue(field) {
            Style::default().fg(CUE_RED).add_modifier(Modifier::BOLD)
        } else if self.controller.form.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Block::default().borders(Borders::ALL).title(title).border_style(border)
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let form = &self.controller.form;
        let inputs: [(&InputField, &'static str, Field, Focus); 2] = [
            (&form.text, "Task", Field::Text, Focus::Text),
            (&form.due, "Due date (YYYY-MM-DD, today, in 3d)", Field::DueDate, Focus::DueDate),
        ];
        for (i, (input, title, field, focus)) in inputs.into_iter().enumerate() {
            let p = Paragraph::new(input.value.as_str()).block(self.input_block(title, field, focus));
            f.render_widget(p, chunks[i]);
            if form.focus == focus {
                let offset = Span::raw(input.before_cursor()).width() as u16;
                let x = chunks[i].x + 1 + offset;
                f.set_cursor_position((x.min(chunks[i].right().saturating_sub(2)), chunks[i].y + 1));
            }
        }
    }

    fn render_tasks(&mut self, f: &mut Frame, area: Rect) {
        let view = self.controller.view();
        let total = self.controller.store().len();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Tasks ({}/{}) - Press 'h' for help", view.rows().len(), total))
            .border_style(if self.controller.form.focus == Focus::List {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            });

        let rows = match &view {
            ListView::Empty => {
                let empty = Paragraph::new(EMPTY_STATE)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(block);
                f.render_widget(empty, area);
                return;
            }
            ListView::Rows(rows) => rows,
        };

        let header = Row::new(["Task", "Due Date", "Status", "Actions"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(DARK_PURPLE).fg(Color::White))
        .height(1);

        let table_rows: Vec<Row> = rows
            .iter()
            .map(|row| {
                let badge = match row.status {
                    Status::Pending => Style::default().bg(GOLD).fg(Color::Black),
                    Status::Completed => Style::default().bg(DARK_GREEN).fg(Color::White),
                };
                let text_style = if row.completed() {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                let r = Row::new(vec![
                    Cell::from(Span::styled(row.text.clone(), text_style)),
                    Cell::from(row.due.clone()),
                    Cell::from(Span::styled(format!(" {} ", row.status.label()), badge)),
                    Cell::from(format!("{}  ✕", row.toggle_icon)),
                ]);
                if self.controller.is_fading(&row.id) {
                    r.style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM | Modifier::CROSSED_OUT))
                } else {
                    r
                }
            })
            .collect();

        let widths = [
            Constraint::Min(30),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(8),
        ];
        let table = Table::new(table_rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_error(&self, f: &mut Frame, area: Rect) {
        let line = match self.controller.error() {
            Some(msg) => Paragraph::new(format!(" {msg}"))
                .style(Style::default().fg(Color::White).bg(DARK_RED).add_modifier(Modifier::BOLD)),
            None => Paragraph::new(""),
        };
        f.render_widget(line, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = match self.controller.form.focus {
            Focus::Text | Focus::DueDate => {
                "Enter: add task | Tab: next field | Esc: go to list | Ctrl-C: quit"
            }
            Focus::List => {
                "Space: toggle | d: delete | D: delete all | f: filter | a: add | h: help | q: quit"
            }
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(DARK_PURPLE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("Keyboard shortcuts", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from("Form:  type to edit, Enter to add, Tab / Shift-Tab to move, Esc for the list"),
            Line::from("List:  ↑/↓ or j/k select, Space or c toggle, d delete, D delete all"),
            Line::from("       f / F cycle filter (all, pending, completed), a focus the form"),
            Line::from("       q or Esc quit"),
            Line::from(""),
            Line::from("Due dates accept YYYY-MM-DD, today, tomorrow, in 3d, in 2w, friday, next mon"),
            Line::from(""),
            Line::from("Press any key to return"),
        ];
        let help = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect, prompt: &str) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(prompt.to_string(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from("This action cannot be undone."),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Draw the whole screen.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        if self.state == AppState::Help {
            self.render_help(f, chunks[2]);
        } else {
            self.render_form(f, chunks[1]);
            self.render_tasks(f, chunks[2]);
        }
        self.render_error(f, chunks[3]);
        self.render_status_bar(f, chunks[4]);

        if let Some(confirm) = self.controller.pending_confirmation() {
            let area = f.area();
            self.render_confirm(f, area, confirm.prompt());
        }
    }

    /// Main event loop. Renders, applies due timers and handles input until
    /// the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
