use std::collections::HashMap;

use chrono::{DateTime, Local, Utc};
use docbot_core::chat::{Author, ChatMessage, ChatViewModel, MessageBody, MessageId, ProgressView};
use docbot_core::contract::{
    ContractViewModel, GeneratedContract, HistoryPanel, ResultTab, Section,
};
use docbot_core::{Notice, NoticeLevel};

const BAR_WIDTH: usize = 20;

/// Prints chat messages once, and again whenever their revision changes.
#[derive(Debug, Default)]
pub struct ChatRenderer {
    seen: HashMap<MessageId, u32>,
}

impl ChatRenderer {
    pub fn render(&mut self, view: &ChatViewModel) -> Vec<String> {
        // Cleared messages must not linger in `seen`.
        self.seen
            .retain(|id, _| view.messages.iter().any(|message| message.id == *id));

        let mut lines = Vec::new();
        for message in &view.messages {
            if self.seen.get(&message.id) == Some(&message.revision) {
                continue;
            }
            self.seen.insert(message.id, message.revision);
            lines.extend(format_message(message));
        }
        lines
    }
}

fn format_message(message: &ChatMessage) -> Vec<String> {
    let who = match message.author {
        Author::User => "you",
        Author::System => "bot",
    };
    let prefix = format!("[{}] {who}: ", clock_time(message.timestamp));
    match &message.body {
        MessageBody::Text(text) => {
            let indent = " ".repeat(prefix.chars().count());
            text.lines()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        format!("{prefix}{line}")
                    } else if line.is_empty() {
                        String::new()
                    } else {
                        format!("{indent}{line}")
                    }
                })
                .collect()
        }
        MessageBody::Progress(progress) => vec![format!("{prefix}{}", progress_line(progress))],
    }
}

fn clock_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}

pub fn progress_line(progress: &ProgressView) -> String {
    let filled = usize::from(progress.percent.min(100)) * BAR_WIDTH / 100;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
    match &progress.status {
        Some(status) => format!(
            "{} [{bar}] {:>3}% {status}",
            progress.title, progress.percent
        ),
        None => format!("{} [{bar}] {:>3}%", progress.title, progress.percent),
    }
}

pub fn notice_line(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warn",
        NoticeLevel::Error => "error",
    };
    format!("<{tag}> {}", notice.text)
}

/// Full redraw of the active contract section.
pub fn render_contract(view: &ContractViewModel) -> Vec<String> {
    let mut lines = vec![String::new(), section_header(view)];
    if view.loading {
        lines.push("Working...".to_string());
    }

    match view.section {
        Section::Query => query_section(view, &mut lines),
        Section::History => history_section(&view.history, &mut lines),
        Section::Contract => contract_section(view, &mut lines),
        Section::Settings => settings_section(view, &mut lines),
    }

    if let Some(preview) = &view.preview {
        let mut details = Vec::new();
        if let Some(pages) = preview.pages {
            details.push(format!("{pages} pages"));
        }
        if let Some(words) = preview.word_count {
            details.push(format!("{} words", format_with_commas(words)));
        }
        if details.is_empty() {
            lines.push("--- Contract preview ---".to_string());
        } else {
            lines.push(format!("--- Contract preview ({}) ---", details.join(", ")));
        }
        lines.extend(preview.text.lines().map(str::to_string));
        lines.push("--- /close to dismiss ---".to_string());
    }
    lines
}

fn section_header(view: &ContractViewModel) -> String {
    let name = match view.section {
        Section::Query => "Query",
        Section::History => "History",
        Section::Contract => "Contracts",
        Section::Settings => "Settings",
    };
    match view.section {
        Section::Query => format!("== {name} [tab: {}] ==", tab_label(view.tab)),
        _ => format!("== {name} =="),
    }
}

fn tab_label(tab: ResultTab) -> &'static str {
    match tab {
        ResultTab::Ner => "NER",
        ResultTab::Clause => "Clause match",
        ResultTab::Negotiation => "Negotiation",
        ResultTab::Answer => "Answer",
    }
}

fn query_section(view: &ContractViewModel, lines: &mut Vec<String>) {
    match &view.active_block {
        Some(block) => lines.extend(block.lines().map(str::to_string)),
        None => lines.push("No analysis yet. Type a legal query to begin.".to_string()),
    }

    if let Some(search) = &view.search {
        lines.push(format!("Clause search: \"{}\"", search.term));
        if search.matches.is_empty() {
            lines.push("  No matching clauses.".to_string());
        }
        for hit in &search.matches {
            lines.push(format!(
                "  - {} ({}% match, {} risk): {}",
                hit.category,
                hit.relevance_percent(),
                hit.risk_type,
                hit.text
            ));
        }
    }

    if let Some(negotiation) = &view.negotiation {
        lines.push(format!("Negotiation: {}", negotiation.topic));
        lines.push("  Key points:".to_string());
        lines.extend(
            negotiation
                .summary
                .key_points
                .iter()
                .map(|point| format!("    - {point}")),
        );
        lines.push("  Recommendations:".to_string());
        lines.extend(
            negotiation
                .summary
                .recommendations
                .iter()
                .map(|item| format!("    - {item}")),
        );
        lines.push(format!(
            "  Risk assessment: {}",
            negotiation.summary.risk_assessment
        ));
    }
}

fn history_section(history: &HistoryPanel, lines: &mut Vec<String>) {
    match history {
        HistoryPanel::NotLoaded => {}
        HistoryPanel::Loading => lines.push("Loading history...".to_string()),
        HistoryPanel::Failed(error) => lines.push(format!("Could not load history: {error}")),
        HistoryPanel::Loaded(entries) if entries.is_empty() => {
            lines.push("No queries yet.".to_string())
        }
        HistoryPanel::Loaded(entries) => {
            for entry in entries {
                lines.push(format!(
                    "- {} {} ({} entities, {})",
                    entry.timestamp,
                    entry.query,
                    entry.entities_found,
                    entry.status.as_deref().unwrap_or("completed")
                ));
            }
        }
    }
}

fn contract_section(view: &ContractViewModel, lines: &mut Vec<String>) {
    if view.contracts.is_empty() {
        lines.push("No contracts generated yet. Analyze a query first.".to_string());
        return;
    }
    lines.extend(view.contracts.iter().map(contract_row));
    if view.has_contract {
        lines.push("Latest contract: /preview, /copy or /download".to_string());
    }
}

fn contract_row(contract: &GeneratedContract) -> String {
    format!(
        "- {} {} ({} words)",
        contract.generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        contract.query,
        format_with_commas(contract.word_count as u64)
    )
}

fn settings_section(view: &ContractViewModel, lines: &mut Vec<String>) {
    let Some(settings) = &view.settings else {
        if !view.loading {
            lines.push("Settings not loaded.".to_string());
        }
        return;
    };
    let unset = "(not set)";
    lines.push(format!(
        "model: {}",
        settings.model.as_deref().unwrap_or(unset)
    ));
    lines.push(format!(
        "language: {}",
        settings.language.as_deref().unwrap_or(unset)
    ));
    lines.push(format!(
        "auto save: {}",
        match settings.auto_save {
            Some(true) => "on",
            Some(false) => "off",
            None => unset,
        }
    ));
    lines.push("Change with /settings <model> <language> <on|off>".to_string());
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}
