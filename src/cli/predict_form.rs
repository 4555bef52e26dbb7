//! Interactive prediction form using ratatui
//!
//! A full-screen form with the seven model inputs. Categorical fields cycle
//! through their lookup table labels, numeric fields step within their bounds,
//! and Enter runs a prediction whose result (or error) is shown inline.
//!
//! `PredictionForm` holds all form logic and is independent of the terminal,
//! so it can be driven directly in tests.

use std::io::{stdout, Stdout};
use std::ops::RangeInclusive;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::pipeline::{
    CategoryTable, Prediction, Selections, DAY_OF_WEEK_TABLE, DAY_RANGE, DEFAULT_DAY,
    DEFAULT_FAMILY_SIZE, DEFAULT_MONTH, DEFAULT_YEAR, FAMILY_SIZE_RANGE, MONTH_RANGE,
    SPECIAL_EVENT_TABLE, STATUS_TABLE, YEAR_RANGE,
};

/// One input of the form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    SpecialEvent,
    DayOfWeek,
    Status,
    FamilySize,
    Day,
    Month,
    Year,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::SpecialEvent,
        FormField::DayOfWeek,
        FormField::Status,
        FormField::FamilySize,
        FormField::Day,
        FormField::Month,
        FormField::Year,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::SpecialEvent => "Special Event",
            FormField::DayOfWeek => "Day of Week",
            FormField::Status => "Status",
            FormField::FamilySize => "Family Size",
            FormField::Day => "Day",
            FormField::Month => "Month",
            FormField::Year => "Year",
        }
    }
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Stay,
    Submit(Selections),
    Quit,
}

/// Form state
#[derive(Debug, Clone)]
pub struct PredictionForm {
    focus: usize,
    special_event: usize,
    day_of_week: usize,
    status: usize,
    family_size: u32,
    day: u32,
    month: u32,
    year: i32,
    outcome: Option<Result<Prediction, String>>,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionForm {
    pub fn new() -> Self {
        Self {
            focus: 0,
            special_event: 0,
            day_of_week: 0,
            status: 0,
            family_size: DEFAULT_FAMILY_SIZE,
            day: DEFAULT_DAY,
            month: DEFAULT_MONTH,
            year: DEFAULT_YEAR,
            outcome: None,
        }
    }

    pub fn focused(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    /// Next option or +1; selections wrap, numbers stop at their maximum
    pub fn increment(&mut self) {
        self.step(1);
    }

    /// Previous option or -1; selections wrap, numbers stop at their minimum
    pub fn decrement(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: i64) {
        match self.focused() {
            FormField::SpecialEvent => cycle(&mut self.special_event, &SPECIAL_EVENT_TABLE, delta),
            FormField::DayOfWeek => cycle(&mut self.day_of_week, &DAY_OF_WEEK_TABLE, delta),
            FormField::Status => cycle(&mut self.status, &STATUS_TABLE, delta),
            FormField::FamilySize => bump_u32(&mut self.family_size, &FAMILY_SIZE_RANGE, delta),
            FormField::Day => bump_u32(&mut self.day, &DAY_RANGE, delta),
            FormField::Month => bump_u32(&mut self.month, &MONTH_RANGE, delta),
            FormField::Year => {
                let next = (i64::from(self.year) + delta)
                    .clamp(i64::from(*YEAR_RANGE.start()), i64::from(*YEAR_RANGE.end()));
                self.year = next as i32;
            }
        }
        // A stale result would no longer match the inputs
        self.outcome = None;
    }

    /// The request matching the displayed values
    pub fn selections(&self) -> Selections {
        Selections {
            special_event: label(&SPECIAL_EVENT_TABLE, self.special_event),
            day_of_week: label(&DAY_OF_WEEK_TABLE, self.day_of_week),
            status: label(&STATUS_TABLE, self.status),
            family_size: self.family_size,
            day: self.day,
            month: self.month,
            year: self.year,
        }
    }

    pub fn value_text(&self, field: FormField) -> String {
        let selections = self.selections();
        match field {
            FormField::SpecialEvent => selections.special_event,
            FormField::DayOfWeek => selections.day_of_week,
            FormField::Status => selections.status,
            FormField::FamilySize => bounded(self.family_size, &FAMILY_SIZE_RANGE),
            FormField::Day => bounded(self.day, &DAY_RANGE),
            FormField::Month => bounded(self.month, &MONTH_RANGE),
            FormField::Year => bounded(self.year, &YEAR_RANGE),
        }
    }

    pub fn outcome(&self) -> Option<&Result<Prediction, String>> {
        self.outcome.as_ref()
    }

    pub fn set_outcome(&mut self, outcome: Result<Prediction, String>) {
        self.outcome = Some(outcome);
    }

    pub fn handle_key(&mut self, code: KeyCode) -> FormAction {
        match code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => self.focus_prev(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.focus_next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => self.decrement(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => self.increment(),
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                return FormAction::Submit(self.selections())
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return FormAction::Quit,
            _ => {}
        }
        FormAction::Stay
    }
}

fn cycle(index: &mut usize, table: &CategoryTable, delta: i64) {
    let len = table.len() as i64;
    if len == 0 {
        return;
    }
    *index = (*index as i64 + delta).rem_euclid(len) as usize;
}

fn bump_u32(value: &mut u32, range: &RangeInclusive<u32>, delta: i64) {
    let next =
        (i64::from(*value) + delta).clamp(i64::from(*range.start()), i64::from(*range.end()));
    *value = next as u32;
}

fn bounded<T: std::fmt::Display>(value: T, range: &RangeInclusive<T>) -> String {
    format!("{:>4}   ({}-{})", value, range.start(), range.end())
}

fn label(table: &CategoryTable, index: usize) -> String {
    table.label_at(index).unwrap_or_default().to_string()
}

/// Run the form until the user quits.
///
/// `on_submit` runs synchronously for every Predict press; its result is shown
/// under the inputs.
pub fn run_prediction_form<F>(mut on_submit: F) -> Result<()>
where
    F: FnMut(&Selections) -> Result<Prediction>,
{
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(enter_form_screen, restore_terminal)?;

    let result = run_form_loop(&mut terminal, &mut on_submit);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Run `setup`, calling `restore` before handing back its error
fn setup_or_restore<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            restore();
            Err(e)
        }
    }
}

/// Undo raw mode and the alternate screen, ignoring failures
fn restore_terminal() {
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn enter_form_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    stdout().execute(EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout()))?)
}

fn run_form_loop<F>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    on_submit: &mut F,
) -> Result<()>
where
    F: FnMut(&Selections) -> Result<Prediction>,
{
    let mut form = PredictionForm::new();

    loop {
        terminal.draw(|frame| draw_form(frame, &form))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match form.handle_key(key.code) {
                FormAction::Stay => {}
                FormAction::Quit => return Ok(()),
                FormAction::Submit(selections) => {
                    let outcome = on_submit(&selections).map_err(|e| format!("{:#}", e));
                    form.set_outcome(outcome);
                }
            }
        }
    }
}

fn draw_form(frame: &mut Frame, form: &PredictionForm) {
    let area = frame.area();

    let form_width = 64u16;
    let form_height = 20u16;
    let x = area.width.saturating_sub(form_width) / 2;
    let y = area.height.saturating_sub(form_height) / 2;
    let form_area = Rect::new(
        x,
        y,
        form_width.min(area.width),
        form_height.min(area.height),
    );

    frame.render_widget(Clear, form_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Machine Learning Modeling ")
        .title_style(Style::default().fg(Color::Cyan).bold());

    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(FormField::ALL.len() as u16),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(inner);

    let intro = Paragraph::new(Line::from(Span::styled(
        "  Enter the details to predict the number of food hamper pickups:",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(intro, chunks[0]);

    let items: Vec<ListItem> = FormField::ALL
        .iter()
        .map(|field| {
            let focused = *field == form.focused();
            let style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let arrows = if focused { ("◀ ", " ▶") } else { ("  ", "  ") };
            ListItem::new(format!(
                "  {:<14} {}{}{}",
                field.label(),
                arrows.0,
                form.value_text(*field),
                arrows.1
            ))
            .style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(form.focus));
    frame.render_stateful_widget(List::new(items), chunks[1], &mut list_state);

    let status = match form.outcome() {
        Some(Ok(prediction)) => Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "  ✓ Predicted Number of Food Hampers: ",
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    prediction.hampers.to_string(),
                    Style::default().fg(Color::Yellow).bold(),
                ),
            ]),
        ]),
        Some(Err(message)) => Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  ✗ {}", message),
                Style::default().fg(Color::Red),
            )),
        ])
        .wrap(Wrap { trim: false }),
        None => Paragraph::new(""),
    };
    frame.render_widget(status, chunks[2]);

    let help_text = Line::from(vec![
        Span::styled("  ↑/↓", Style::default().fg(Color::Cyan)),
        Span::styled(" field  ", Style::default().fg(Color::DarkGray)),
        Span::styled("←/→", Style::default().fg(Color::Cyan)),
        Span::styled(" change  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" predict  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" back", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(help_text), chunks[3]);
}
