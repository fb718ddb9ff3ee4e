use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl TextArea {
    pub fn build<'a>(attach_context: bool) -> tui_textarea::TextArea<'a> {
        let mut context_state = "off";
        if attach_context {
            context_state = "on";
        }

        let mut textarea = tui_textarea::TextArea::default();
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(format!("Enter prompt (table context: {context_state})"))
                .padding(Padding::new(1, 1, 0, 0)),
        );

        return textarea;
    }
}
