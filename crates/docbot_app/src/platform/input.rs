//! Turns terminal lines into controller messages.

use std::path::PathBuf;

use docbot_core::chat::{self, FileKind};
use docbot_core::contract::{self, ResultTab, Section, Settings};

pub const CHAT_COMMANDS: &str = "Commands: /url <address>, /pdf <paths...>, /text <paths...>, \
/clear-chat, /help, /quit. Anything else is sent to the bot.";

pub const CONTRACT_COMMANDS: &str = "Commands: /analyze <query>, /tab <ner|clause|negotiation|answer>, \
/section <query|history|contract|settings>, /search <term>, /negotiate <topic>, /preview, /close, \
/copy, /download, /settings <model> <language> <on|off>, /quit. Plain text is analyzed as a query.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Msg(chat::Msg),
    /// Local files to stat before they can be queued.
    Attach { kind: FileKind, paths: Vec<PathBuf> },
    Usage(&'static str),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContractInput {
    Msg(contract::Msg),
    Usage(&'static str),
    Quit,
}

fn split_command(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix('/')?;
    match rest.split_once(char::is_whitespace) {
        Some((name, args)) => Some((name, args.trim())),
        None => Some((rest, "")),
    }
}

pub fn parse_chat_line(line: &str) -> ChatInput {
    let Some((name, args)) = split_command(line) else {
        return ChatInput::Msg(chat::Msg::InputSubmitted(line.to_string()));
    };
    match name.to_ascii_lowercase().as_str() {
        "url" if !args.is_empty() => ChatInput::Msg(chat::Msg::UrlAttached(args.to_string())),
        "pdf" | "text" if !args.is_empty() => ChatInput::Attach {
            kind: if name.eq_ignore_ascii_case("pdf") {
                FileKind::Pdf
            } else {
                FileKind::Text
            },
            paths: args.split_whitespace().map(PathBuf::from).collect(),
        },
        "clear-chat" => ChatInput::Msg(chat::Msg::ChatCleared),
        "help" => ChatInput::Msg(chat::Msg::InputSubmitted("help".to_string())),
        "quit" | "exit" => ChatInput::Quit,
        _ => ChatInput::Usage(CHAT_COMMANDS),
    }
}

/// Answer to a `[y/N]` prompt; anything but yes declines.
pub fn is_affirmative(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn parse_contract_line(line: &str) -> ContractInput {
    let Some((name, args)) = split_command(line) else {
        return ContractInput::Msg(contract::Msg::QuerySubmitted(line.to_string()));
    };
    let msg = match name.to_ascii_lowercase().as_str() {
        "analyze" => contract::Msg::QuerySubmitted(args.to_string()),
        "search" => contract::Msg::ClauseSearchSubmitted(args.to_string()),
        "negotiate" => contract::Msg::NegotiationSubmitted(args.to_string()),
        "tab" => match ResultTab::parse(args) {
            Some(tab) => contract::Msg::TabSelected(tab),
            None => return ContractInput::Usage("Usage: /tab <ner|clause|negotiation|answer>"),
        },
        "section" => match Section::parse(args) {
            Some(section) => contract::Msg::SectionSelected(section),
            None => {
                return ContractInput::Usage("Usage: /section <query|history|contract|settings>")
            }
        },
        "preview" => contract::Msg::PreviewRequested,
        "close" => contract::Msg::PreviewClosed,
        "copy" => contract::Msg::CopyRequested,
        "download" => contract::Msg::DownloadRequested,
        "settings" => match parse_settings(args) {
            Some(settings) => contract::Msg::SettingsSubmitted(settings),
            None => return ContractInput::Usage("Usage: /settings <model> <language> <on|off>"),
        },
        "quit" | "exit" => return ContractInput::Quit,
        _ => return ContractInput::Usage(CONTRACT_COMMANDS),
    };
    ContractInput::Msg(msg)
}

fn parse_settings(args: &str) -> Option<Settings> {
    let mut parts = args.split_whitespace();
    let model = parts.next()?;
    let language = parts.next()?;
    let auto_save = match parts.next()?.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => true,
        "off" | "false" | "no" => false,
        _ => return None,
    };
    if parts.next().is_some() {
        return None;
    }
    Some(Settings {
        model: model.to_string(),
        language: language.to_string(),
        auto_save,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_chat_text_goes_to_the_bot_untrimmed() {
        assert_eq!(
            parse_chat_line("  Scrape URLs "),
            ChatInput::Msg(chat::Msg::InputSubmitted("  Scrape URLs ".to_string()))
        );
    }

    #[test]
    fn chat_attachments() {
        assert_eq!(
            parse_chat_line("/url https://example.com/a"),
            ChatInput::Msg(chat::Msg::UrlAttached("https://example.com/a".to_string()))
        );
        assert_eq!(
            parse_chat_line("/PDF a.pdf  docs/b.pdf"),
            ChatInput::Attach {
                kind: FileKind::Pdf,
                paths: vec![PathBuf::from("a.pdf"), PathBuf::from("docs/b.pdf")],
            }
        );
        assert_eq!(
            parse_chat_line("/text notes.txt"),
            ChatInput::Attach {
                kind: FileKind::Text,
                paths: vec![PathBuf::from("notes.txt")],
            }
        );
    }

    #[test]
    fn chat_commands_without_arguments_show_usage() {
        assert_eq!(parse_chat_line("/url"), ChatInput::Usage(CHAT_COMMANDS));
        assert_eq!(parse_chat_line("/pdf   "), ChatInput::Usage(CHAT_COMMANDS));
        assert_eq!(parse_chat_line("/frobnicate"), ChatInput::Usage(CHAT_COMMANDS));
        assert_eq!(parse_chat_line("/quit"), ChatInput::Quit);
        assert_eq!(
            parse_chat_line("/clear-chat"),
            ChatInput::Msg(chat::Msg::ChatCleared)
        );
    }

    #[test]
    fn confirmation_defaults_to_no() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("sure"));
    }

    #[test]
    fn contract_lines() {
        assert_eq!(
            parse_contract_line("Draft an NDA"),
            ContractInput::Msg(contract::Msg::QuerySubmitted("Draft an NDA".to_string()))
        );
        assert_eq!(
            parse_contract_line("/tab clauses"),
            ContractInput::Msg(contract::Msg::TabSelected(ResultTab::Clause))
        );
        assert_eq!(
            parse_contract_line("/section history"),
            ContractInput::Msg(contract::Msg::SectionSelected(Section::History))
        );
        assert_eq!(
            parse_contract_line("/negotiate payment terms"),
            ContractInput::Msg(contract::Msg::NegotiationSubmitted(
                "payment terms".to_string()
            ))
        );
        assert_eq!(
            parse_contract_line("/search"),
            ContractInput::Msg(contract::Msg::ClauseSearchSubmitted(String::new()))
        );
        assert!(matches!(
            parse_contract_line("/tab summary"),
            ContractInput::Usage(_)
        ));
    }

    #[test]
    fn contract_settings_need_three_fields() {
        assert_eq!(
            parse_contract_line("/settings llama3.1 en on"),
            ContractInput::Msg(contract::Msg::SettingsSubmitted(Settings {
                model: "llama3.1".to_string(),
                language: "en".to_string(),
                auto_save: true,
            }))
        );
        for bad in ["/settings", "/settings llama3.1 en", "/settings a b maybe", "/settings a b on x"] {
            assert!(matches!(parse_contract_line(bad), ContractInput::Usage(_)), "{bad}");
        }
    }
}
