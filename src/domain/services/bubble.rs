#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Message;
use crate::domain::models::MessageType;

// Unicode border characters plus inner padding on both sides.
const BUBBLE_PADDING: usize = 8;
// Left border + left padding + right padding + right border + scrollbar.
const BORDER_ELEMENTS_LENGTH: usize = 5;
const OUTER_PADDING_PERCENTAGE: f32 = 0.04;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

fn fill_spaces(total: usize, used: Vec<usize>) -> String {
    let used_sum: usize = used.iter().sum();
    if used_sum >= total {
        return "".to_string();
    }

    return " ".repeat(total - used_sum);
}

impl<'a> Bubble<'a> {
    pub fn new(
        message: &'a Message,
        alignment: BubbleAlignment,
        window_max_width: usize,
    ) -> Bubble<'a> {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.max_line_length();
        let mut wrapped: Vec<String> = vec![];

        for full_line in self.message.text.split('\n') {
            if full_line.trim().is_empty() {
                wrapped.push(" ".to_string());
                continue;
            }

            let mut char_count = 0;
            let mut words: Vec<&str> = vec![];

            for word in full_line.split(' ') {
                if word.len() + char_count + 1 > max_line_length && !words.is_empty() {
                    wrapped.push(words.join(" ").trim_end().to_string());
                    words = vec![];
                    char_count = 0;
                }

                words.push(word);
                char_count += word.len() + 1;
            }
            if !words.is_empty() {
                wrapped.push(words.join(" ").trim_end().to_string());
            }
        }

        let lines = wrapped
            .into_iter()
            .map(|text| {
                return self.line_in_borders(text, max_line_length);
            })
            .collect::<Vec<Line<'static>>>();

        return self.wrap_lines_in_bubble(lines, max_line_length);
    }

    fn line_in_borders(&self, text: String, max_line_length: usize) -> Line<'static> {
        let fill = fill_spaces(max_line_length, vec![text.len()]);
        let formatted_line_length = text.len() + fill.len() + BUBBLE_PADDING;

        let mut spans = vec![
            self.highlight_span("│ ".to_string()),
            Span::from(text),
            self.highlight_span(format!("{fill} │")),
        ];

        let outer_padding = fill_spaces(self.window_max_width, vec![formatted_line_length]);
        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer_padding));
            return Line::from(spans);
        }

        let mut line_spans = vec![Span::from(outer_padding)];
        line_spans.append(&mut spans);

        return Line::from(line_spans);
    }

    fn max_line_length(&self) -> usize {
        // Keep a minimum 4% of padding on the outer side of the bubble.
        let min_outer_padding =
            ((self.window_max_width as f32) * OUTER_PADDING_PERCENTAGE).ceil() as usize;
        let line_border_width = BORDER_ELEMENTS_LENGTH + min_outer_padding;

        let mut max_line_length = self
            .message
            .text
            .lines()
            .map(|line| {
                return line.len();
            })
            .max()
            .unwrap_or(1);

        let width_budget = self.window_max_width.saturating_sub(line_border_width);
        if width_budget > 0 && max_line_length > width_budget {
            max_line_length = width_budget;
        }

        let username = self.message.author.to_string();
        if max_line_length < username.len() {
            max_line_length = username.len();
        }

        return max_line_length;
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the vertical bars.
        let inner_bar = "─".repeat(max_line_length + 2);
        let top_left_border = "╭";
        let mut top_bar = format!("{top_left_border}{inner_bar}╮");
        let bottom_bar = format!("╰{inner_bar}╯");
        let bar_padding = fill_spaces(
            self.window_max_width,
            vec![max_line_length, BUBBLE_PADDING],
        );

        let username = self.message.author.to_string();
        let top_replace = "─".repeat(username.len());
        top_bar = top_bar.replace(
            format!("{top_left_border}{top_replace}").as_str(),
            format!("{top_left_border}{username}").as_str(),
        );

        if self.alignment == BubbleAlignment::Left {
            let mut res = vec![self.highlight_line(format!("{top_bar}{bar_padding}"))];
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_padding}")));
            return res;
        }

        let mut res = vec![self.highlight_line(format!("{bar_padding}{top_bar}"))];
        res.extend(lines);
        res.push(self.highlight_line(format!("{bar_padding}{bottom_bar}")));

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        if self.message.message_type() == MessageType::Error {
            return Span::styled(
                text,
                Style {
                    fg: Some(Color::Red),
                    ..Style::default()
                },
            );
        }

        return Span::from(text);
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
