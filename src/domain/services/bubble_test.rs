use ratatui::style::Color;
use ratatui::text::Line;

use super::fill_spaces;
use super::Bubble;
use super::BubbleAlignment;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

fn line_to_string(line: &Line) -> String {
    return line
        .spans
        .iter()
        .map(|span| {
            return span.content.to_string();
        })
        .collect::<Vec<String>>()
        .join("");
}

#[test]
fn it_fills_remaining_space() {
    assert_eq!(fill_spaces(10, vec![4]), "      ");
    assert_eq!(fill_spaces(10, vec![4, 6]), "");
    assert_eq!(fill_spaces(4, vec![10]), "");
}

#[test]
fn it_renders_a_single_line_bubble() {
    Config::set(ConfigKey::Model, "gemini");
    let message = Message::new(Author::Assistant, "Hello!");

    let lines = Bubble::new(&message, BubbleAlignment::Left, 50).as_lines();

    assert_eq!(lines.len(), 3);
    assert!(line_to_string(&lines[0]).starts_with('╭'));
    assert!(line_to_string(&lines[1]).contains("│ Hello!"));
    assert!(line_to_string(&lines[2]).starts_with('╰'));
}

#[test]
fn it_wraps_long_lines() {
    Config::set(ConfigKey::Model, "gemini");
    let message = Message::new(
        Author::Assistant,
        "alpha beta gamma delta epsilon zeta eta theta iota kappa",
    );

    let lines = Bubble::new(&message, BubbleAlignment::Left, 30).as_lines();

    assert!(lines.len() > 3);
}

#[test]
fn it_right_aligns_user_bubbles() {
    Config::set(ConfigKey::Username, "You");
    let message = Message::new(Author::User, "Hi");

    let lines = Bubble::new(&message, BubbleAlignment::Right, 50).as_lines();

    assert!(line_to_string(&lines[0]).starts_with(' '));
    assert!(line_to_string(&lines[0]).ends_with('╮'));
    assert!(line_to_string(&lines[1]).contains("│ Hi"));
}

#[test]
fn it_colors_error_bubbles() {
    Config::set(ConfigKey::Model, "gemini");
    let message = Message::new_with_type(Author::Assistant, MessageType::Error, "It broke!");

    let lines = Bubble::new(&message, BubbleAlignment::Left, 50).as_lines();

    assert_eq!(lines[0].spans[0].style.fg, Some(Color::Red));
}
