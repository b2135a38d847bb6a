/// Named chat commands recognised in free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Scrape,
    ProcessPdfs,
    GenerateEmbeddings,
    ShowStatus,
    ClearData,
    Help,
    FullWorkflow,
    /// Nothing matched; reply with a capability summary.
    Fallback,
}

type Predicate = fn(&str) -> bool;

/// Dispatch table, checked top to bottom against the lowercased input.
/// The first matching predicate wins, so order is significant.
pub const COMMANDS: &[(Predicate, Command)] = &[
    (mentions_scrape_urls, Command::Scrape),
    (mentions_pdf, Command::ProcessPdfs),
    (mentions_embedding, Command::GenerateEmbeddings),
    (mentions_status, Command::ShowStatus),
    (mentions_clear, Command::ClearData),
    (mentions_help, Command::Help),
    (mentions_full_workflow, Command::FullWorkflow),
];

pub fn route_command(text: &str) -> Command {
    let lowered = text.to_lowercase();
    COMMANDS
        .iter()
        .find(|(matches, _)| matches(&lowered))
        .map(|(_, command)| *command)
        .unwrap_or(Command::Fallback)
}

fn mentions_scrape_urls(text: &str) -> bool {
    text.contains("scrape") && text.contains("url")
}

fn mentions_pdf(text: &str) -> bool {
    text.contains("pdf")
}

fn mentions_embedding(text: &str) -> bool {
    text.contains("embedding")
}

fn mentions_status(text: &str) -> bool {
    text.contains("status")
}

fn mentions_clear(text: &str) -> bool {
    text.contains("clear") || text.contains("clean")
}

fn mentions_help(text: &str) -> bool {
    text.contains("help")
}

fn mentions_full_workflow(text: &str) -> bool {
    ["full workflow", "full process", "complete workflow"]
        .iter()
        .any(|phrase| text.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::{route_command, Command};

    #[test]
    fn matches_are_case_insensitive() {
        assert_eq!(route_command("Scrape URLs"), Command::Scrape);
        assert_eq!(route_command("SHOW STATUS"), Command::ShowStatus);
    }

    #[test]
    fn earlier_entries_win() {
        assert_eq!(route_command("scrape the pdf urls"), Command::Scrape);
        assert_eq!(route_command("pdf status"), Command::ProcessPdfs);
        assert_eq!(route_command("embedding status"), Command::GenerateEmbeddings);
        assert_eq!(route_command("help me clear things"), Command::ClearData);
    }

    #[test]
    fn scrape_needs_both_keywords() {
        assert_eq!(route_command("scrape everything"), Command::Fallback);
    }

    #[test]
    fn full_workflow_phrases() {
        assert_eq!(route_command("Full workflow"), Command::FullWorkflow);
        assert_eq!(route_command("run the complete workflow"), Command::FullWorkflow);
        assert_eq!(route_command("full process please"), Command::FullWorkflow);
    }

    #[test]
    fn clean_counts_as_clear() {
        assert_eq!(route_command("clean up"), Command::ClearData);
    }

    #[test]
    fn unknown_text_falls_back() {
        assert_eq!(route_command("hello there"), Command::Fallback);
        assert_eq!(route_command(""), Command::Fallback);
    }
}
