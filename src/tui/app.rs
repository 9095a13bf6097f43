//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store for the
//! lifetime of the UI, holds the transient input state (the pending new
//! mission and the single in-progress edit), handles key events, and renders
//! the board.

use std::io::{self, IsTerminal};
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::config::Config;
use crate::db::{EditOutcome, TaskStore};
use crate::effects::{Cue, CueSink, Muted, TerminalBell};
use crate::task::{Stats, MAX_EDIT_TEXT_CHARS, MAX_NEW_TEXT_CHARS};
use crate::tui::{
    colors::{NEON_CYAN, NEON_PINK, NIGHT_BLUE, SUNSET_ORANGE, SUNSET_PURPLE},
    enums::AppState,
    input::InputField,
    particles::ParticleField,
    utils::centered_rect,
};

const HIGHLIGHT_SYMBOL: &str = ">> ";
const EDIT_PREFIX: &str = "✎ ";

/// The one mission being edited and its uncommitted text.
#[derive(Debug, Clone)]
struct EditSession {
    id: u64,
    draft: InputField,
}

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    store: TaskStore,
    list_state: ListState,
    new_task: InputField,
    editing: Option<EditSession>,
    status_message: String,
    sound_on: bool,
    cues: Box<dyn CueSink>,
    particles: ParticleField,
    show_clock: bool,
    started: Instant,
}

impl App {
    /// Create the UI around an opened store, ringing the terminal bell for
    /// cues when stdout is a terminal.
    pub fn new(store: TaskStore, config: &Config) -> Self {
        let cues: Box<dyn CueSink> = if io::stdout().is_terminal() {
            Box::new(TerminalBell::stdout())
        } else {
            Box::new(Muted)
        };
        Self::with_parts(store, cues, ParticleField::new(config.particles), config)
    }

    /// Create the UI with explicit effect collaborators.
    pub fn with_parts(
        store: TaskStore,
        cues: Box<dyn CueSink>,
        particles: ParticleField,
        config: &Config,
    ) -> Self {
        let mut list_state = ListState::default();
        if !store.is_empty() {
            list_state.select(Some(0));
        }
        App {
            state: AppState::Browse,
            store,
            list_state,
            new_task: InputField::new(MAX_NEW_TEXT_CHARS),
            editing: None,
            status_message: String::new(),
            sound_on: config.sound,
            cues,
            particles,
            show_clock: config.show_clock,
            started: Instant::now(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Counts for the stats bar, recomputed from the current list.
    pub fn stats(&self) -> Stats {
        self.store.stats()
    }

    /// Text typed for the next mission.
    pub fn pending_input(&self) -> &str {
        &self.new_task.value
    }

    /// Id and draft text of the mission being edited.
    pub fn editing(&self) -> Option<(u64, &str)> {
        self.editing
            .as_ref()
            .map(|session| (session.id, session.draft.value.as_str()))
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    /// Id of the highlighted mission.
    pub fn selected_id(&self) -> Option<u64> {
        self.list_state
            .selected()
            .and_then(|idx| self.store.tasks().get(idx))
            .map(|t| t.id)
    }

    fn set_status_message(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn play(&mut self, cue: Cue) {
        if self.sound_on {
            self.cues.play(cue);
        }
    }

    /// Surface a failed write; the board keeps going either way.
    fn report_save_error(&mut self) {
        if let Some(e) = self.store.take_save_error() {
            self.set_status_message(format!("Warning: changes not saved ({e})"));
        }
    }

    fn select_id(&mut self, id: u64) {
        let idx = self.store.tasks().iter().position(|t| t.id == id);
        self.list_state.select(idx);
    }

    /// Keep the selection on a real row after the list shrinks or grows.
    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let idx = self.list_state.selected().unwrap_or(0).min(len - 1);
            self.list_state.select(Some(idx));
        }
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if down => (i + 1).min(len - 1),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(next));
    }

    /// Create a mission from the pending input.
    ///
    /// Blank input is refused with an error cue and the buffer is left as is.
    pub fn submit_new_task(&mut self) -> bool {
        let created = self.store.create(&self.new_task.value).map(|t| t.id);
        match created {
            Ok(id) => {
                self.new_task.clear();
                self.play(Cue::Click);
                self.select_id(id);
                self.set_status_message("Mission accepted");
                self.report_save_error();
                true
            }
            Err(e) => {
                self.play(Cue::Error);
                self.set_status_message(e.to_string());
                false
            }
        }
    }

    /// Flip the highlighted mission between pending and completed.
    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.store.toggle_complete(id) {
            let done = self.store.get(id).is_some_and(|t| t.completed);
            self.set_status_message(if done { "Mission complete" } else { "Mission reopened" });
        }
        self.report_save_error();
    }

    /// Start editing the highlighted mission, seeding the draft with its text.
    pub fn begin_edit(&mut self) {
        let Some(task) = self.selected_id().and_then(|id| self.store.get(id)) else {
            return;
        };
        self.editing = Some(EditSession {
            id: task.id,
            draft: InputField::with_value(&task.text, MAX_EDIT_TEXT_CHARS),
        });
        self.state = AppState::Editing;
    }

    /// Commit the draft. A blank draft keeps the edit open.
    pub fn commit_edit(&mut self) {
        let Some(session) = &self.editing else {
            return;
        };
        let id = session.id;
        match self.store.edit_text(id, &session.draft.value) {
            EditOutcome::Applied => {
                self.editing = None;
                self.state = AppState::Browse;
                self.set_status_message("Mission updated");
                self.report_save_error();
            }
            EditOutcome::Blank => {
                self.set_status_message("Type a mission or press Esc to cancel");
            }
            EditOutcome::NotFound => {
                self.editing = None;
                self.state = AppState::Browse;
                self.clamp_selection();
                self.set_status_message(format!("Mission #{id} no longer exists"));
            }
        }
    }

    /// Drop the draft without touching the mission.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.state = AppState::Browse;
    }

    /// Remove the highlighted mission.
    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if self.store.delete(id) {
            self.play(Cue::Delete);
            self.set_status_message(format!("Mission #{id} deleted"));
        }
        self.clamp_selection();
        self.report_save_error();
    }

    /// Handle one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.clear_status_message();
        match self.state {
            AppState::Browse => return self.handle_browse_key(key),
            AppState::Compose => self.handle_compose_key(key, modifiers),
            AppState::Editing => self.handle_edit_key(key, modifiers),
            AppState::Help => self.state = AppState::Browse,
        }
        false
    }

    fn handle_browse_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => {
                self.state = AppState::Compose;
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => self.toggle_selected(),
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('m') => {
                self.sound_on = !self.sound_on;
                self.set_status_message(if self.sound_on { "Sound on" } else { "Sound off" });
            }
            KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => {
                self.state = AppState::Help;
            }
            _ => {}
        }
        false
    }

    fn handle_compose_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc | KeyCode::Tab => self.state = AppState::Browse,
            KeyCode::Enter => {
                self.submit_new_task();
            }
            _ => edit_field(&mut self.new_task, key, modifiers),
        }
    }

    fn handle_edit_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Enter => self.commit_edit(),
            _ => {
                if let Some(session) = self.editing.as_mut() {
                    edit_field(&mut session.draft, key, modifiers);
                }
            }
        }
    }

    /// Poll for and handle one keyboard event.
    ///
    /// Returns true if the application should quit.
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

    /// Render the title header with the HUD clock.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(SUNSET_PURPLE));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(7), Constraint::Min(0), Constraint::Length(7)])
            .split(inner);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "V I C E   C I T Y",
                Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "~ MISSION BOARD ~",
                Style::default().fg(NEON_CYAN).add_modifier(Modifier::ITALIC),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(title, columns[1]);

        if self.show_clock {
            let clock = Paragraph::new(Local::now().format("%H:%M").to_string())
                .style(Style::default().fg(SUNSET_ORANGE).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Right);
            f.render_widget(clock, columns[2]);
        }
    }

    /// Render the new-mission input box.
    fn render_input(&self, f: &mut Frame, area: Rect) {
        let focused = self.state == AppState::Compose;
        let border = if focused { NEON_CYAN } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" New mission ")
            .title_bottom(Line::from(" Enter: Accept ").alignment(Alignment::Right));

        let text = if self.new_task.value.is_empty() && !focused {
            Line::from(Span::styled(
                "Enter your mission...",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(self.new_task.value.as_str())
        };
        let inner = block.inner(area);
        f.render_widget(Paragraph::new(text).block(block), area);

        if focused {
            let offset = cursor_column(&self.new_task)
                .min(usize::from(inner.width.saturating_sub(1)));
            f.set_cursor_position((inner.x + offset as u16, inner.y));
        }
    }

    /// Render the mission list, or the empty state when there is nothing to do.
    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(SUNSET_PURPLE))
            .title(format!(" Missions ({}) ", self.store.len()));
        let inner = block.inner(area);
        let elapsed = self.started.elapsed().as_secs_f32();

        if self.store.is_empty() {
            f.render_widget(block, area);
            let text = vec![
                Line::from(Span::styled(
                    "No missions in progress",
                    Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Miami is waiting...",
                    Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                )),
            ];
            let empty = Paragraph::new(text).alignment(Alignment::Center);
            f.render_widget(empty, centered_rect(80, 40, inner));
            self.particles.render(inner, elapsed, SUNSET_PURPLE, f.buffer_mut());
            return;
        }

        let editing = self.editing.as_ref();
        let items: Vec<ListItem> = self
            .store
            .tasks()
            .iter()
            .map(|task| match editing {
                Some(session) if session.id == task.id => ListItem::new(Line::from(vec![
                    Span::styled(EDIT_PREFIX, Style::default().fg(NEON_CYAN)),
                    Span::styled(
                        session.draft.value.clone(),
                        Style::default().fg(NEON_CYAN).add_modifier(Modifier::UNDERLINED),
                    ),
                ])),
                _ => {
                    let (mark, style) = if task.completed {
                        (
                            "[x] ",
                            Style::default()
                                .fg(SUNSET_PURPLE)
                                .add_modifier(Modifier::CROSSED_OUT),
                        )
                    } else {
                        ("[ ] ", Style::default().fg(Color::White))
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(mark, Style::default().fg(NEON_PINK)),
                        Span::styled(task.text.clone(), style),
                    ]))
                }
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(NIGHT_BLUE).add_modifier(Modifier::BOLD))
            .highlight_symbol(HIGHLIGHT_SYMBOL);
        f.render_stateful_widget(list, area, &mut self.list_state);
        self.particles.render(inner, elapsed, SUNSET_PURPLE, f.buffer_mut());

        if let (Some(session), Some(selected)) = (self.editing.as_ref(), self.list_state.selected()) {
            let row = selected.saturating_sub(self.list_state.offset());
            if row < usize::from(inner.height) {
                let prefix = Span::raw(HIGHLIGHT_SYMBOL).width() + Span::raw(EDIT_PREFIX).width();
                let x = (prefix + cursor_column(&session.draft))
                    .min(usize::from(inner.width.saturating_sub(1)));
                f.set_cursor_position((inner.x + x as u16, inner.y + row as u16));
            }
        }
    }

    /// Render the Missions / Completed / Pending counters.
    fn render_stats(&self, f: &mut Frame, area: Rect) {
        let stats = self.stats();
        let value = Style::default().fg(SUNSET_ORANGE).add_modifier(Modifier::BOLD);
        let label = Style::default().fg(NEON_CYAN);
        let line = Line::from(vec![
            Span::styled(stats.total.to_string(), value),
            Span::styled(" Missions", label),
            Span::raw("    "),
            Span::styled(stats.completed.to_string(), value),
            Span::styled(" Completed", label),
            Span::raw("    "),
            Span::styled(stats.pending.to_string(), value),
            Span::styled(" Pending", label),
        ]);
        let paragraph = Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(SUNSET_PURPLE)),
            )
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Mission Board Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Mission List:", bold)),
            Line::from("  ↑/↓, k/j     Select mission"),
            Line::from("  a, i, Tab    Type a new mission"),
            Line::from("  Space, x     Toggle completed"),
            Line::from("  e            Edit selected mission"),
            Line::from("  d, Del       Delete selected mission"),
            Line::from("  m            Sound on/off"),
            Line::from("  h, ?, F1     Show this help"),
            Line::from("  q, Esc       Quit"),
            Line::from(""),
            Line::from(Span::styled("New Mission / Edit:", bold)),
            Line::from("  Enter        Accept / save"),
            Line::from("  Esc          Back / cancel"),
            Line::from(format!(
                "  New missions up to {MAX_NEW_TEXT_CHARS} characters, edits up to {MAX_EDIT_TEXT_CHARS}"
            )),
        ];

        let popup = centered_rect(60, 70, area);
        f.render_widget(Clear, popup);
        let paragraph = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(NEON_PINK))
                    .title("Help - Press any key to return"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, popup);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(10)])
            .split(area);

        let status_text = if self.status_message.is_empty() {
            self.state.hints().to_string()
        } else {
            self.status_message.clone()
        };
        let style = Style::default().bg(NIGHT_BLUE).fg(Color::White);
        f.render_widget(Paragraph::new(status_text).style(style), columns[0]);

        let sound = if self.sound_on { "♪ ON " } else { "♪ OFF " };
        f.render_widget(
            Paragraph::new(sound)
                .style(style.fg(NEON_CYAN))
                .alignment(Alignment::Right),
            columns[1],
        );
    }

    /// Main render function.
    fn render(&mut self, f: &mut Frame) {
        let show_stats = !self.store.is_empty();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(if show_stats { 3 } else { 0 }),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_input(f, chunks[1]);
        self.render_list(f, chunks[2]);
        if show_stats {
            self.render_stats(f, chunks[3]);
        }
        if self.state == AppState::Help {
            self.render_help(f, chunks[2]);
        }
        self.render_status_bar(f, chunks[4]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Redraws every poll interval so the clock and particles keep moving.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Terminal column of the cursor, counting wide glyphs as two cells.
fn cursor_column(field: &InputField) -> usize {
    Span::raw(field.before_cursor()).width()
}

/// Apply a text-editing key to an input field.
fn edit_field(field: &mut InputField, key: KeyCode, modifiers: KeyModifiers) {
    match key {
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            field.handle_char(c);
        }
        KeyCode::Backspace => field.handle_backspace(),
        KeyCode::Delete => field.handle_delete(),
        KeyCode::Left => field.move_cursor_left(),
        KeyCode::Right => field.move_cursor_right(),
        KeyCode::Home => field.move_home(),
        KeyCode::End => field.move_end(),
        _ => {}
    }
}
