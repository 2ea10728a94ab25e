use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Frame;

use crate::error::Result;
use crate::models::Outcome;

/// Colors for one appearance mode. The dashboard rebuilds this whenever the
/// dark-mode toggle flips.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub header: Style,
    pub footer: Style,
    pub selected: Style,
    pub input: Style,
}

impl Palette {
    pub fn new(dark: bool) -> Self {
        if dark {
            Self {
                bg: Color::Rgb(18, 18, 28),
                fg: Color::Rgb(220, 220, 230),
                dim: Color::DarkGray,
                header: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                footer: Style::new().fg(Color::DarkGray),
                selected: Style::new()
                    .bg(Color::Rgb(40, 40, 60))
                    .add_modifier(Modifier::BOLD),
                input: Style::new().fg(Color::Cyan),
            }
        } else {
            Self {
                bg: Color::Reset,
                fg: Color::Black,
                dim: Color::Gray,
                header: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
                footer: Style::new().fg(Color::Gray),
                selected: Style::new()
                    .bg(Color::Rgb(210, 210, 230))
                    .add_modifier(Modifier::BOLD),
                input: Style::new().fg(Color::Blue),
            }
        }
    }
}

pub fn outcome_color(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Sold => Color::Green,
        Outcome::NoSale => Color::Red,
        Outcome::Courtesy => Color::Blue,
        Outcome::Resale => Color::Magenta,
    }
}

/// The outcome name as a colored Span for table rows.
pub fn outcome_span(outcome: Outcome) -> Span<'static> {
    Span::styled(outcome.to_string(), Style::new().fg(outcome_color(outcome)))
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

// ---------------------------------------------------------------------------
// Fullscreen view infrastructure
// ---------------------------------------------------------------------------

pub enum ViewAction {
    Continue,
    Close,
}

pub trait View {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, code: KeyCode) -> ViewAction;
}

/// Run an interactive ratatui view. Sets up the terminal, event loop, and
/// panic hook, then restores the terminal on exit.
pub fn run_view(view: &mut dyn View) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| view.draw(frame)) {
            break Err(e.into());
        }

        match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                match view.handle_key(key.code) {
                    ViewAction::Close => break Ok(()),
                    ViewAction::Continue => {}
                }
            }
            _ => {}
        }
    };

    drop(terminal);
    ratatui::restore();
    result
}
