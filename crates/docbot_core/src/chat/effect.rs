use std::time::Duration;

use crate::chat::{RunId, ScraperCall};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CallScraper { run_id: RunId, call: ScraperCall },
    Pause { run_id: RunId, duration: Duration },
    RequestConfirmation { prompt: String },
}
