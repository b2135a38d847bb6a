use chrono::{DateTime, NaiveDateTime};

use crate::chat::workflow::{SystemStatus, Tally};
use crate::chat::PendingFile;

pub(crate) const WELCOME: &str = "👋 Hi! I'm the document scraper bot. Queue URLs with /url, \
attach PDFs with /pdf, then ask me to scrape, process or embed. Type 'help' for everything I can do.";

pub(crate) const FALLBACK: &str = "I can help you with:\n\
• Scraping URLs\n\
• Processing PDFs\n\
• Generating embeddings\n\
• Showing status\n\
• Full workflow\n\
• Clearing data\n\n\
Try saying 'scrape URLs' or use the quick actions!";

pub(crate) const HELP: &str = "🤖 Document Scraper Bot Help\n\n\
Quick Commands:\n\
• \"Scrape URLs\" - Process web content\n\
• \"Process PDFs\" - Extract and clean PDF text\n\
• \"Generate embeddings\" - Create vector representations\n\
• \"Full workflow\" - Complete end-to-end processing\n\
• \"Show status\" - View system information\n\
• \"Clear data\" - Remove all processed files\n\n\
File Operations:\n\
• /url <address> queues a URL for scraping\n\
• /pdf <paths...> and /text <paths...> attach local files\n\
• Batch processing available\n\n\
Backend:\n\
• Document API on port 5000\n\
• Models: Llama 3.1 for classification, MXBai for embeddings\n\
• Progress is reported as each step completes";

pub(crate) const CHAT_CLEARED: &str = "Chat cleared! How can I help you today?";
pub(crate) const EMPTY_INPUT: &str = "Please enter a message";
pub(crate) const BUSY: &str = "Still working on the previous request";
pub(crate) const NEED_URLS: &str = "Please add some URLs first. Use /url <address> to queue one.";
pub(crate) const NEED_URLS_FULL: &str = "Please add some URLs first for the complete workflow.";
pub(crate) const INVALID_URL: &str = "❌ Please enter a valid URL starting with http:// or https://";
pub(crate) const WORKFLOW_STARTED: &str = "🚀 Starting complete workflow...";
pub(crate) const WORKFLOW_FINISHED: &str = "🎉 Complete workflow finished! Your documents are now \
scraped, processed, classified, and embedded. Ready for analysis!";
pub(crate) const DATA_CLEARED: &str = "✅ All data cleared successfully!";
pub(crate) const UNEXPECTED_REPLY: &str = "unexpected response from server";
pub(crate) const CLEAR_PROMPT: &str = "⚠️ Are you sure you want to clear all processed data?\n\n\
This will remove:\n\
• Scraped documents\n\
• Processed clauses\n\
• Generated embeddings\n\
• Classification metadata";

pub(crate) fn url_added(url: &str) -> String {
    format!("📎 URL added: {url}")
}

pub(crate) fn url_queued(queue_len: usize) -> String {
    format!("URL added to scraping queue. You now have {queue_len} URL(s) ready to process.")
}

pub(crate) fn file_attached(file: &PendingFile) -> String {
    match file.kind {
        crate::chat::FileKind::Pdf => format!(
            "📎 PDF uploaded: {} ({:.1}MB)",
            file.name,
            file.size_bytes as f64 / 1024.0 / 1024.0
        ),
        crate::chat::FileKind::Text => format!("📎 Text file uploaded: {}", file.name),
    }
}

pub(crate) fn files_added(files: &[PendingFile]) -> String {
    let pdfs = files
        .iter()
        .filter(|file| file.kind == crate::chat::FileKind::Pdf)
        .count();
    let texts = files.len() - pdfs;
    match (pdfs, texts) {
        (_, 0) => format!("{pdfs} PDF file(s) added. Ready for processing."),
        (0, _) => format!("{texts} text file(s) added. Ready for processing."),
        _ => format!("{pdfs} PDF file(s) and {texts} text file(s) added. Ready for processing."),
    }
}

pub(crate) fn failure(prefix: &str, error: &str) -> String {
    format!("❌ {prefix}: {error}")
}

pub(crate) fn scrape_summary(tally: &Tally) -> String {
    format!(
        "✅ Scraping complete!\n\n📊 Results:\n\
• Successfully scraped: {} URLs\n\
• Failed: {} URLs\n\
• Files saved to: raw_docs_scraped/\n\n\
Next: Process the content or run full workflow.",
        tally.scraped, tally.scrape_failed
    )
}

pub(crate) fn pdf_summary(tally: &Tally) -> String {
    format!(
        "✅ PDF processing complete!\n\n📊 Results:\n\
• PDFs processed: {}\n\
• Documents cleaned: {}\n\
• Clauses extracted: {}\n\
• Files saved to: cleaned_docs/ and clauses/",
        tally.pdfs, tally.cleaned, tally.clauses
    )
}

pub(crate) fn embedding_summary(tally: &Tally) -> String {
    format!(
        "✅ Embeddings generated successfully!\n\n📈 Summary:\n\
• Clauses classified: {}\n\
• Embeddings created: {}\n\
• Ready for similarity search and analysis",
        tally.classified, tally.embedded
    )
}

pub(crate) fn status_summary(status: &SystemStatus, pending_urls: usize, pending_files: usize) -> String {
    format!(
        "📊 System Status\n\n\
📁 Files:\n\
• Raw docs: {} files\n\
• Combined docs: {} files\n\
• Cleaned docs: {} files\n\
• Clauses: {} items\n\
• Metadata: {} JSON files\n\n\
🔧 Models:\n\
• Classification: {}\n\
• Embeddings: {}\n\n\
📊 Queue Status:\n\
• URLs pending: {}\n\
• Files pending: {}\n\n\
⚡ Last Updated:\n{}",
        status.files.raw_docs,
        status.files.combined_docs,
        status.files.cleaned_docs,
        status.files.clauses,
        status.files.metadata,
        status.models.classification,
        status.models.embedding,
        pending_urls,
        pending_files,
        format_server_timestamp(&status.timestamp),
    )
}

/// Server timestamps may or may not carry an offset; show whatever parses.
pub(crate) fn format_server_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M:%S %:z").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M:%S").to_string();
    }
    raw.to_string()
}
