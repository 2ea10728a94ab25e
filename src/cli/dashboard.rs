use chrono::Local;
use crossterm::event::KeyCode;
use rand::seq::SliceRandom;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::error::Result;
use crate::fmt::{money, percent, points};
use crate::models::{optional_field, MonthlyTarget, NewSale, Outcome, OwnershipType, Sale};
use crate::month;
use crate::reports::{self, MonthSummary};
use crate::settings::{get_data_dir, load_settings};
use crate::storage::{self, SalesStore, Storage, TargetStore};
use crate::tui::{outcome_span, run_view, wrap_text, Palette, View, ViewAction};

const GREETINGS: &[&str] = &[
    "Fill the board.",
    "Another day on the podium.",
    "Who's touring today?",
    "Let's see the numbers.",
    "Make it a two-tour day.",
    "Coffee first. Closings second.",
    "The gift closet is fully stocked.",
    "Smile, it's showtime.",
    "Every tour is a maybe.",
    "Back to the tables.",
];

const OUTCOME_CYCLE: &[Outcome] = &[
    Outcome::Sold,
    Outcome::NoSale,
    Outcome::Courtesy,
    Outcome::Resale,
];

const OWNERSHIP_CYCLE: &[OwnershipType] = &[
    OwnershipType::Deed,
    OwnershipType::Trust,
    OwnershipType::Both,
];

// ---------------------------------------------------------------------------
// Sale form
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq)]
enum FormField {
    Date,
    Client,
    TourNumber,
    Outcome,
    Amount,
    BonusPoints,
    MembershipId,
    Ownership,
    ExistingOwnership,
    Notes,
    FollowUp,
}

impl FormField {
    fn label(self) -> &'static str {
        match self {
            FormField::Date => "Date (YYYY-MM-DD)",
            FormField::Client => "Client name",
            FormField::TourNumber => "Tour number",
            FormField::Outcome => "Outcome",
            FormField::Amount => "Sale amount ($)",
            FormField::BonusPoints => "Bonus points",
            FormField::MembershipId => "Membership id",
            FormField::Ownership => "Ownership type",
            FormField::ExistingOwnership => "Existing ownership",
            FormField::Notes => "Notes",
            FormField::FollowUp => "Follow-up",
        }
    }
}

/// Entry form for one tour. Text fields edit in place; the sale-only fields
/// (amount, points, membership, ownership) appear only while the outcome is
/// SOLD, matching how the numbers are counted.
struct SaleForm {
    date: String,
    client_name: String,
    tour_number: String,
    outcome: Outcome,
    amount: String,
    bonus_points: String,
    membership_id: String,
    ownership_type: OwnershipType,
    existing_ownership: String,
    notes: String,
    follow_up: String,
    field: usize,
    error: Option<String>,
}

impl SaleForm {
    fn new(date: String) -> Self {
        Self {
            date,
            client_name: String::new(),
            tour_number: "1".to_string(),
            outcome: Outcome::Sold,
            amount: String::new(),
            bonus_points: String::new(),
            membership_id: String::new(),
            ownership_type: OwnershipType::Deed,
            existing_ownership: String::new(),
            notes: String::new(),
            follow_up: String::new(),
            field: 0,
            error: None,
        }
    }

    fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Date,
            FormField::Client,
            FormField::TourNumber,
            FormField::Outcome,
        ];
        if self.outcome.is_sold() {
            fields.extend([
                FormField::Amount,
                FormField::BonusPoints,
                FormField::MembershipId,
                FormField::Ownership,
            ]);
        }
        fields.extend([FormField::ExistingOwnership, FormField::Notes, FormField::FollowUp]);
        fields
    }

    fn current(&self) -> FormField {
        let fields = self.visible_fields();
        fields[self.field.min(fields.len() - 1)]
    }

    fn next_field(&mut self) {
        self.field = (self.field + 1) % self.visible_fields().len();
    }

    fn prev_field(&mut self) {
        let len = self.visible_fields().len();
        self.field = (self.field + len - 1) % len;
    }

    /// Cycle the enum under the cursor. Switching the outcome away from SOLD
    /// shrinks the field list, so clamp the cursor.
    fn cycle(&mut self, forward: bool) {
        match self.current() {
            FormField::Outcome => {
                let i = OUTCOME_CYCLE.iter().position(|o| *o == self.outcome).unwrap_or(0);
                let len = OUTCOME_CYCLE.len();
                self.outcome = OUTCOME_CYCLE[(i + if forward { 1 } else { len - 1 }) % len];
                let visible = self.visible_fields().len();
                self.field = self.field.min(visible - 1);
            }
            FormField::Ownership => {
                let i = OWNERSHIP_CYCLE
                    .iter()
                    .position(|o| *o == self.ownership_type)
                    .unwrap_or(0);
                let len = OWNERSHIP_CYCLE.len();
                self.ownership_type = OWNERSHIP_CYCLE[(i + if forward { 1 } else { len - 1 }) % len];
            }
            _ => {}
        }
    }

    fn buffer_mut(&mut self) -> Option<&mut String> {
        match self.current() {
            FormField::Date => Some(&mut self.date),
            FormField::Client => Some(&mut self.client_name),
            FormField::TourNumber => Some(&mut self.tour_number),
            FormField::Amount => Some(&mut self.amount),
            FormField::BonusPoints => Some(&mut self.bonus_points),
            FormField::MembershipId => Some(&mut self.membership_id),
            FormField::ExistingOwnership => Some(&mut self.existing_ownership),
            FormField::Notes => Some(&mut self.notes),
            FormField::FollowUp => Some(&mut self.follow_up),
            FormField::Outcome | FormField::Ownership => None,
        }
    }

    fn buffer(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Client => &self.client_name,
            FormField::TourNumber => &self.tour_number,
            FormField::Amount => &self.amount,
            FormField::BonusPoints => &self.bonus_points,
            FormField::MembershipId => &self.membership_id,
            FormField::ExistingOwnership => &self.existing_ownership,
            FormField::Notes => &self.notes,
            FormField::FollowUp => &self.follow_up,
            FormField::Outcome | FormField::Ownership => "",
        }
    }

    fn push(&mut self, c: char) {
        if let Some(buf) = self.buffer_mut() {
            buf.push(c);
        }
    }

    fn backspace(&mut self) {
        if let Some(buf) = self.buffer_mut() {
            buf.pop();
        }
    }

    /// Coerce the buffers into a sale. Client name is the one required field;
    /// unparseable numbers fall back to their defaults rather than erroring.
    fn submit(&self) -> std::result::Result<NewSale, String> {
        if self.client_name.trim().is_empty() {
            return Err("Client name is required".to_string());
        }
        if chrono::NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            return Err(format!("Invalid date '{}'", self.date.trim()));
        }

        Ok(NewSale {
            date: self.date.trim().to_string(),
            amount: self.amount.trim().parse().unwrap_or(0.0),
            bonus_points: self.bonus_points.trim().parse().unwrap_or(0.0),
            client_name: self.client_name.trim().to_string(),
            tour_number: self.tour_number.trim().parse().unwrap_or(1),
            outcome: self.outcome,
            membership_id: optional_field(&self.membership_id),
            ownership_type: self.ownership_type,
            existing_ownership: optional_field(&self.existing_ownership),
            notes: self.notes.trim().to_string(),
            follow_up: optional_field(&self.follow_up),
        })
    }
}

// ---------------------------------------------------------------------------
// Target editor
// ---------------------------------------------------------------------------

struct TargetEditor {
    asp: String,
    goal: String,
    field: usize,
}

impl TargetEditor {
    fn new(current: MonthlyTarget) -> Self {
        Self {
            asp: format!("{:.0}", current.asp),
            goal: format!("{:.0}", current.goal),
            field: 0,
        }
    }

    fn buffer_mut(&mut self) -> &mut String {
        if self.field == 0 {
            &mut self.asp
        } else {
            &mut self.goal
        }
    }

    fn submit(&self, current: MonthlyTarget) -> MonthlyTarget {
        MonthlyTarget {
            asp: self.asp.trim().parse().unwrap_or(current.asp),
            goal: self.goal.trim().parse().unwrap_or(current.goal),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

enum Screen {
    Table,
    Search,
    Detail,
    Form(SaleForm),
    Targets(TargetEditor),
    ConfirmDelete(String),
}

struct Dashboard {
    storage: Storage,
    sales: SalesStore,
    targets: TargetStore,
    month: String,
    search: String,
    summary: MonthSummary,
    selected: usize,
    table_state: TableState,
    screen: Screen,
    greeting: String,
    dark_mode: bool,
    palette: Palette,
    status_message: Option<String>,
}

impl Dashboard {
    fn new(storage: Storage, user_name: Option<String>) -> Self {
        let sales = SalesStore::load(storage.clone());
        let targets = TargetStore::load(storage.clone());
        let dark_mode = storage::load_dark_mode(&storage);

        let mut rng = rand::thread_rng();
        let random_greeting = GREETINGS.choose(&mut rng).unwrap_or(&"Hello.").to_string();
        let first_name = user_name
            .as_deref()
            .and_then(|n| n.split_whitespace().next())
            .unwrap_or("");
        let greeting = if first_name.is_empty() {
            format!("Tourlog: {random_greeting}")
        } else {
            format!("Aloha, {first_name}. {random_greeting}")
        };

        let current = month::current();
        let summary = reports::summarize(sales.all(), &current, "");
        Self {
            storage,
            sales,
            targets,
            month: current,
            search: String::new(),
            summary,
            selected: 0,
            table_state: TableState::default(),
            screen: Screen::Table,
            greeting,
            dark_mode,
            palette: Palette::new(dark_mode),
            status_message: None,
        }
    }

    /// Recompute the visible month after any change to history, month, or
    /// search, keeping the selection inside the new entry list.
    fn refresh(&mut self) {
        self.summary = reports::summarize(self.sales.all(), &self.month, &self.search);
        if self.selected >= self.summary.entries.len() {
            self.selected = self.summary.entries.len().saturating_sub(1);
        }
    }

    /// Re-read every slot from disk.
    fn reload(&mut self) {
        self.sales = SalesStore::load(self.storage.clone());
        self.targets = TargetStore::load(self.storage.clone());
        self.dark_mode = storage::load_dark_mode(&self.storage);
        self.palette = Palette::new(self.dark_mode);
        self.refresh();
    }

    fn shift_month(&mut self, delta: i32) {
        if let Some(m) = month::shift(&self.month, delta) {
            self.month = m;
            self.selected = 0;
            self.refresh();
        }
    }

    fn selected_sale(&self) -> Option<&Sale> {
        self.summary.entries.get(self.selected)
    }

    fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.palette = Palette::new(self.dark_mode);
        if let Err(e) = storage::save_dark_mode(&self.storage, self.dark_mode) {
            self.status_message = Some(format!("Could not save appearance: {e}"));
        }
    }

    // ---------- drawing ----------

    fn draw_frame(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let palette = self.palette;

        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
            area,
        );

        let [header_area, sep1, stats_area, sep2, search_area, table_area, footer_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(format!(" {}", self.greeting)).style(palette.header),
            header_area,
        );

        let sep_line = "━".repeat(area.width as usize);
        let sep_widget = Paragraph::new(sep_line.as_str()).style(Style::default().fg(palette.dim));
        frame.render_widget(sep_widget.clone(), sep1);
        frame.render_widget(sep_widget, sep2);

        self.draw_stats(frame, stats_area);
        self.draw_search(frame, search_area);
        self.draw_table(frame, table_area);
        self.draw_footer(frame, footer_area);

        match &self.screen {
            Screen::Form(form) => draw_form(frame, form, &palette),
            Screen::Targets(editor) => draw_targets(frame, editor, &self.month, &palette),
            Screen::Detail => {
                if let Some(sale) = self.selected_sale() {
                    draw_detail(frame, sale, &palette);
                }
            }
            Screen::ConfirmDelete(_) => {
                if let Some(sale) = self.selected_sale() {
                    draw_confirm(frame, sale, &palette);
                }
            }
            _ => {}
        }
    }

    fn draw_stats(&self, frame: &mut Frame, area: Rect) {
        let target = self.targets.get(&self.month);
        let s = &self.summary;
        let goal_pct = if target.goal > 0.0 {
            s.total_sales / target.goal * 100.0
        } else {
            0.0
        };

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let lines = vec![
            Line::from(vec![
                Span::raw(" \u{2039} "),
                Span::styled(month::label(&self.month), bold),
                Span::raw(" \u{203a}"),
                Span::styled(
                    format!("   Goal {} of {} ({})", money(s.total_sales), money(target.goal), percent(goal_pct)),
                    Style::default().fg(self.palette.dim),
                ),
            ]),
            Line::from(format!(
                " Tours {}   Sold {}   Conversion {}",
                s.total_tours,
                s.sold_count,
                percent(s.conversion_rate),
            )),
            Line::from(format!(
                " Sales {}   Points {}   Avg {} (target {})",
                money(s.total_sales),
                points(s.total_bonus_points),
                money(s.average_sale),
                money(target.asp),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect) {
        let widget = if matches!(self.screen, Screen::Search) {
            Paragraph::new(format!(" Search: {}\u{2588}", self.search)).style(self.palette.input)
        } else if self.search.is_empty() {
            Paragraph::new(" Search: (press / to search)").style(self.palette.footer)
        } else {
            Paragraph::new(format!(" Search: {}", self.search)).style(self.palette.input)
        };
        frame.render_widget(widget, area);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect) {
        if self.summary.entries.is_empty() {
            let msg = if self.search.is_empty() {
                format!("\n No tours recorded for {}. Press a to add one.", month::label(&self.month))
            } else {
                "\n No tours match the search.".to_string()
            };
            frame.render_widget(
                Paragraph::new(msg).style(Style::default().fg(self.palette.dim)),
                area,
            );
            return;
        }

        let header = Row::new(vec![
            "Date", "Tour", "Client", "Outcome", "Amount", "Points", "Membership", "Notes",
        ])
        .style(self.palette.header)
        .bottom_margin(1);

        let rows: Vec<Row> = self
            .summary
            .entries
            .iter()
            .map(|sale| {
                let (amount, pts) = if sale.outcome.is_sold() {
                    (money(sale.amount), points(sale.bonus_points))
                } else {
                    (String::new(), String::new())
                };
                Row::new(vec![
                    Cell::from(sale.date.clone()),
                    Cell::from(format!("#{}", sale.tour_number)),
                    Cell::from(sale.client_name.clone()),
                    Cell::from(outcome_span(sale.outcome)),
                    Cell::from(amount),
                    Cell::from(pts),
                    Cell::from(sale.membership_id.clone().unwrap_or_default()),
                    Cell::from(sale.notes.clone()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(10),
            Constraint::Length(4),
            Constraint::Length(20),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Fill(1),
        ];

        self.table_state.select(Some(self.selected));
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(self.palette.selected);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let widget = if let Some(msg) = &self.status_message {
            Paragraph::new(format!(" {msg}")).style(self.palette.input)
        } else {
            Paragraph::new(
                " \u{2190}/\u{2192} month  \u{2191}/\u{2193} select  \u{21b5} detail  a add  d delete  / search  t targets  m dark  r reload  q quit",
            )
            .style(self.palette.footer)
        };
        frame.render_widget(widget, area);
    }

    // ---------- key handling ----------

    fn handle_table_key(&mut self, code: KeyCode) -> ViewAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            KeyCode::Left => self.shift_month(-1),
            KeyCode::Right => self.shift_month(1),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.summary.entries.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter => {
                if self.selected_sale().is_some() {
                    self.screen = Screen::Detail;
                }
            }
            KeyCode::Char('/') => self.screen = Screen::Search,
            KeyCode::Char('a') => {
                let today = Local::now().format("%Y-%m-%d").to_string();
                self.screen = Screen::Form(SaleForm::new(today));
            }
            KeyCode::Char('d') => {
                if let Some(sale) = self.selected_sale() {
                    self.screen = Screen::ConfirmDelete(sale.id.clone());
                }
            }
            KeyCode::Char('t') => {
                let current = self.targets.get(&self.month);
                self.screen = Screen::Targets(TargetEditor::new(current));
            }
            KeyCode::Char('m') => self.toggle_dark_mode(),
            KeyCode::Char('r') => {
                self.reload();
                self.status_message = Some("Reloaded from disk.".to_string());
            }
            _ => {}
        }
        ViewAction::Continue
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.summary.entries.len() {
                    self.selected += 1;
                }
            }
            _ => self.screen = Screen::Table,
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.search.clear();
                self.screen = Screen::Table;
                self.refresh();
            }
            KeyCode::Enter => self.screen = Screen::Table,
            KeyCode::Backspace => {
                self.search.pop();
                self.refresh();
            }
            KeyCode::Char(c) => {
                self.search.push(c);
                self.refresh();
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let Screen::Form(form) = &mut self.screen else {
            return;
        };
        match code {
            KeyCode::Esc => self.screen = Screen::Table,
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                // Enter walks through the form; only the last field submits.
                if form.field + 1 < form.visible_fields().len() {
                    form.next_field();
                    return;
                }
                let new = match form.submit() {
                    Ok(new) => new,
                    Err(msg) => {
                        form.error = Some(msg);
                        return;
                    }
                };
                let client = new.client_name.clone();
                let date = new.date.clone();
                match self.sales.add(new) {
                    Ok(_) => {
                        self.screen = Screen::Table;
                        self.refresh();
                        self.status_message = Some(format!("Recorded tour for {client} on {date}."));
                    }
                    Err(e) => self.status_message = Some(format!("Save failed: {e}")),
                }
            }
            KeyCode::Char(c) => {
                form.error = None;
                form.push(c);
            }
            _ => {}
        }
    }

    fn handle_targets_key(&mut self, code: KeyCode) {
        let Screen::Targets(editor) = &mut self.screen else {
            return;
        };
        match code {
            KeyCode::Esc => self.screen = Screen::Table,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => editor.field = 1 - editor.field,
            KeyCode::Backspace => {
                editor.buffer_mut().pop();
            }
            KeyCode::Enter => {
                let target = editor.submit(self.targets.get(&self.month));
                let month = self.month.clone();
                self.screen = Screen::Table;
                match self.targets.set(&month, target) {
                    Ok(()) => {
                        self.status_message = Some(format!(
                            "Targets for {}: ASP {}, goal {}.",
                            month::label(&month),
                            money(target.asp),
                            money(target.goal),
                        ));
                    }
                    Err(e) => self.status_message = Some(format!("Save failed: {e}")),
                }
            }
            KeyCode::Char(c) => editor.buffer_mut().push(c),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, code: KeyCode) {
        let Screen::ConfirmDelete(id) = &self.screen else {
            return;
        };
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                let id = id.clone();
                self.screen = Screen::Table;
                match self.sales.delete(&id) {
                    Ok(true) => self.status_message = Some("Tour deleted.".to_string()),
                    Ok(false) => self.status_message = Some("Tour was already gone.".to_string()),
                    Err(e) => self.status_message = Some(format!("Delete failed: {e}")),
                }
                self.refresh();
            }
            _ => self.screen = Screen::Table,
        }
    }
}

impl View for Dashboard {
    fn draw(&mut self, frame: &mut Frame) {
        self.draw_frame(frame);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        self.status_message = None;
        match self.screen {
            Screen::Table => return self.handle_table_key(code),
            Screen::Search => self.handle_search_key(code),
            Screen::Detail => self.handle_detail_key(code),
            Screen::Form(_) => self.handle_form_key(code),
            Screen::Targets(_) => self.handle_targets_key(code),
            Screen::ConfirmDelete(_) => self.handle_confirm_key(code),
        }
        ViewAction::Continue
    }
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn draw_form(frame: &mut Frame, form: &SaleForm, palette: &Palette) {
    let fields = form.visible_fields();
    let height = fields.len() as u16 + 5;
    let popup = centered_rect(52, height, frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Record a tour ")
        .style(Style::default().bg(palette.bg).fg(palette.fg));

    let mut lines = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let marker = if i == form.field { ">" } else { " " };
        let value = match field {
            FormField::Outcome => format!("\u{2039} {} \u{203a}", form.outcome),
            FormField::Ownership => format!("\u{2039} {} \u{203a}", form.ownership_type),
            _ => {
                let buf = form.buffer(*field);
                if i == form.field {
                    format!("{buf}\u{2588}")
                } else {
                    buf.to_string()
                }
            }
        };
        let style = if i == form.field {
            palette.input
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(" {marker} {:<20} {value}", format!("{}:", field.label())),
            style,
        )));
    }
    lines.push(Line::from(""));
    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(ratatui::style::Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            " Enter next/save  \u{2190}/\u{2192} change  Esc cancel",
            palette.footer,
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn draw_targets(frame: &mut Frame, editor: &TargetEditor, month_key: &str, palette: &Palette) {
    let popup = centered_rect(44, 7, frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(format!(" Targets for {} ", month::label(month_key)))
        .style(Style::default().bg(palette.bg).fg(palette.fg));

    let row = |label: &str, value: &str, active: bool| {
        let marker = if active { ">" } else { " " };
        let cursor = if active { "\u{2588}" } else { "" };
        let style = if active { palette.input } else { Style::default() };
        Line::from(Span::styled(format!(" {marker} {label:<12} {value}{cursor}"), style))
    };

    let lines = vec![
        row("ASP ($):", &editor.asp, editor.field == 0),
        row("Goal ($):", &editor.goal, editor.field == 1),
        Line::from(""),
        Line::from(Span::styled(
            " Tab switch  Enter save  Esc cancel",
            palette.footer,
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn draw_detail(frame: &mut Frame, sale: &Sale, palette: &Palette) {
    let width: u16 = 56;
    let (notes, _) = wrap_text(&sale.notes, width as usize - 14);

    let mut lines = vec![
        Line::from(format!(" Date:       {}", sale.date)),
        Line::from(format!(" Tour:       #{}", sale.tour_number)),
        Line::from(format!(" Client:     {}", sale.client_name)),
        Line::from(vec![Span::raw(" Outcome:    "), outcome_span(sale.outcome)]),
    ];
    if sale.outcome.is_sold() {
        lines.push(Line::from(format!(" Amount:     {}", money(sale.amount))));
        lines.push(Line::from(format!(" Points:     {}", points(sale.bonus_points))));
        if let Some(id) = &sale.membership_id {
            lines.push(Line::from(format!(" Membership: {id}")));
        }
        lines.push(Line::from(format!(" Ownership:  {}", sale.ownership_type)));
    }
    if let Some(existing) = &sale.existing_ownership {
        lines.push(Line::from(format!(" Existing:   {existing}")));
    }
    if !sale.notes.is_empty() {
        for (i, note_line) in notes.lines().enumerate() {
            let label = if i == 0 { "Notes:     " } else { "           " };
            lines.push(Line::from(format!(" {label} {note_line}")));
        }
    }
    if let Some(follow_up) = &sale.follow_up {
        lines.push(Line::from(format!(" Follow-up:  {follow_up}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " \u{2191}/\u{2193} browse  Esc close",
        palette.footer,
    )));

    let height = lines.len() as u16 + 2;
    let popup = centered_rect(width, height.min(frame.area().height), frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Tour detail ")
        .style(Style::default().bg(palette.bg).fg(palette.fg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn draw_confirm(frame: &mut Frame, sale: &Sale, palette: &Palette) {
    let popup = centered_rect(50, 5, frame.area());
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" Delete tour ")
        .style(Style::default().bg(palette.bg).fg(palette.fg));

    let lines = vec![
        Line::from(format!(" Delete tour for {} on {}?", sale.client_name, sale.date)),
        Line::from(""),
        Line::from(Span::styled(" y delete  n cancel", palette.footer)),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let user_name = if settings.user_name.is_empty() {
        None
    } else {
        Some(settings.user_name.clone())
    };

    let mut dashboard = Dashboard::new(Storage::new(data_dir), user_name);
    run_view(&mut dashboard)
}
