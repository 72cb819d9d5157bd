use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::game::Snapshot;
use crate::session::{CharState, SessionState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub const COMPLETION_BANNER: &str = "Congratulations! You've completed the sentence.";

/// Everything the typing screen draws, borrowed from the game each frame.
pub struct GameView<'a> {
    pub session: Option<&'a SessionState>,
    pub snapshot: Snapshot,
    pub message: Option<&'a str>,
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let Some(state) = self.session else {
            let text = self.message.unwrap_or("Loading dictionary...");
            Paragraph::new(Span::styled(text.to_string(), italic_style))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(area, buf);
            return;
        };

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let prompt_lines =
            (state.target().as_str().width() as f64 / max_chars_per_line as f64).ceil() as u16 + 1;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // stats
                Constraint::Length(1), // padding
                Constraint::Length(1), // instructions
                Constraint::Length(prompt_lines),
                Constraint::Length(1), // banner
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!(
                "Words per minute: {}   Accuracy: {:.2}%",
                self.snapshot.wpm, self.snapshot.accuracy
            ),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled("Type the following sentence:", italic_style))
            .render(chunks[2], buf);

        let spans = state
            .target()
            .chars()
            .iter()
            .zip(state.char_states())
            .map(|(&c, char_state)| {
                let style = match char_state {
                    CharState::Correct => green_bold_style,
                    CharState::Incorrect => red_bold_style,
                    CharState::Cursor => underlined_dim_bold_style,
                    CharState::Pending => dim_bold_style,
                };
                Span::styled(c.to_string(), style)
            })
            .collect::<Vec<Span>>();

        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .render(chunks[3], buf);

        if state.has_finished() {
            Paragraph::new(Span::styled(COMPLETION_BANNER, green_bold_style))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
        } else if let Some(message) = self.message {
            Paragraph::new(Span::styled(message.to_string(), red_bold_style))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
        }

        Paragraph::new(Span::styled("(tab) another sentence / (esc)ape", italic_style))
            .render(chunks[6], buf);
    }
}
