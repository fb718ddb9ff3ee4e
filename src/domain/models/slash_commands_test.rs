use super::SlashCommand;

#[test]
fn it_parses_quit() {
    for input in ["/q", "/quit", "/exit"] {
        let cmd = SlashCommand::parse(input).unwrap();
        assert!(cmd.is_quit());
        assert!(!cmd.is_clear());
    }
}

#[test]
fn it_parses_clear() {
    for input in ["/clear", "/reset"] {
        let cmd = SlashCommand::parse(input).unwrap();
        assert!(cmd.is_clear());
        assert!(!cmd.is_quit());
    }
}

#[test]
fn it_parses_context_toggle() {
    for input in ["/ctx", "/context"] {
        let cmd = SlashCommand::parse(input).unwrap();
        assert!(cmd.is_context_toggle());
    }
}

#[test]
fn it_parses_help() {
    for input in ["/h", "/help"] {
        let cmd = SlashCommand::parse(input).unwrap();
        assert!(cmd.is_help());
    }
}

#[test]
fn it_ignores_plain_text() {
    assert!(SlashCommand::parse("How did cash evolve?").is_none());
}

#[test]
fn it_ignores_unknown_commands() {
    assert!(SlashCommand::parse("/frobnicate").is_none());
}

#[test]
fn it_parses_commands_with_trailing_text() {
    let cmd = SlashCommand::parse("/context please").unwrap();
    assert!(cmd.is_context_toggle());
}
