use url::Url;

use crate::chat::state::Activity;
use crate::chat::text;
use crate::chat::workflow::{Endpoint, Stage, StageRun, Waiting, WorkflowRun};
use crate::chat::{
    route_command, ChatState, Command, Effect, Msg, PendingFile, RunId, ScraperCall, ScraperReply,
    Workflow,
};
use crate::NoticeLevel;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ChatState, msg: Msg) -> (ChatState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputSubmitted(raw) => submit(&mut state, &raw),
        Msg::UrlAttached(raw) => {
            attach_url(&mut state, &raw);
            Vec::new()
        }
        Msg::FilesAttached(files) => {
            attach_files(&mut state, files);
            Vec::new()
        }
        Msg::ConfirmationAnswered(confirmed) => match state.activity {
            Activity::AwaitingConfirmation(workflow) => {
                state.activity = Activity::Idle;
                state.mark_dirty();
                if confirmed {
                    start_workflow(&mut state, workflow)
                } else {
                    Vec::new()
                }
            }
            Activity::Idle | Activity::Running(_) => Vec::new(),
        },
        Msg::ScraperReplied { run_id, result } => on_reply(&mut state, run_id, result),
        Msg::PauseElapsed { run_id } => on_pause_elapsed(&mut state, run_id),
        Msg::ChatCleared => {
            state.clear_messages();
            state.push_system(text::CHAT_CLEARED);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut ChatState, raw: &str) -> Vec<Effect> {
    let text = raw.trim();
    if text.is_empty() {
        state.push_notice(NoticeLevel::Warning, text::EMPTY_INPUT);
        return Vec::new();
    }
    if state.is_busy() {
        state.push_notice(NoticeLevel::Warning, text::BUSY);
        return Vec::new();
    }

    state.push_user(text);
    match route_command(text) {
        Command::Scrape => start_workflow(state, Workflow::Scrape),
        Command::ProcessPdfs => start_workflow(state, Workflow::ProcessPdfs),
        Command::GenerateEmbeddings => start_workflow(state, Workflow::GenerateEmbeddings),
        Command::ShowStatus => start_workflow(state, Workflow::ShowStatus),
        Command::FullWorkflow => start_workflow(state, Workflow::FullWorkflow),
        Command::ClearData => {
            state.activity = Activity::AwaitingConfirmation(Workflow::ClearData);
            vec![Effect::RequestConfirmation {
                prompt: text::CLEAR_PROMPT.to_string(),
            }]
        }
        Command::Help => {
            state.push_system(text::HELP);
            Vec::new()
        }
        Command::Fallback => {
            state.push_system(text::FALLBACK);
            Vec::new()
        }
    }
}

fn attach_url(state: &mut ChatState, raw: &str) {
    let url = raw.trim();
    if url.is_empty() {
        return;
    }
    if !has_accepted_scheme(url) || Url::parse(url).is_err() {
        state.push_system(text::INVALID_URL);
        return;
    }
    state.urls.push(url.to_string());
    state.push_user(text::url_added(url));
    state.push_system(text::url_queued(state.urls.len()));
}

fn has_accepted_scheme(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

fn attach_files(state: &mut ChatState, files: Vec<PendingFile>) {
    if files.is_empty() {
        return;
    }
    for file in &files {
        state.push_user(text::file_attached(file));
    }
    state.push_system(text::files_added(&files));
    state.files.extend(files);
}

fn start_workflow(state: &mut ChatState, workflow: Workflow) -> Vec<Effect> {
    if workflow.needs_urls() && state.urls.is_empty() {
        let message = match workflow {
            Workflow::FullWorkflow => text::NEED_URLS_FULL,
            _ => text::NEED_URLS,
        };
        state.push_system(message);
        return Vec::new();
    }
    if workflow == Workflow::FullWorkflow {
        state.push_system(text::WORKFLOW_STARTED);
    }

    let run_id = state.allocate_run_id();
    state.activity = Activity::Running(WorkflowRun::new(run_id, workflow));
    begin_stage(state)
}

/// Sets up the current stage of the active run and issues its first step.
fn begin_stage(state: &mut ChatState) -> Vec<Effect> {
    let Activity::Running(run) = &state.activity else {
        return Vec::new();
    };
    let stage = run.current.stage;

    let progress = stage.progress_title().map(|title| state.push_progress(title));
    let submitted_urls = if stage == Stage::Scrape {
        state.urls.clone()
    } else {
        Vec::new()
    };

    if let Activity::Running(run) = &mut state.activity {
        run.current.progress = progress;
        run.current.submitted_urls = submitted_urls;
        run.waiting = Waiting::Reply;
    }
    issue_step(state)
}

fn issue_step(state: &mut ChatState) -> Vec<Effect> {
    let Activity::Running(run) = &state.activity else {
        return Vec::new();
    };
    let run_id = run.id;
    let Some(step) = run.current.current_step() else {
        return Vec::new();
    };
    let progress = run.current.progress;
    let call = match step.endpoint {
        Endpoint::Scrape => ScraperCall::Scrape {
            urls: run.current.submitted_urls.clone(),
        },
        Endpoint::ProcessPdfs => ScraperCall::ProcessPdfs,
        Endpoint::CleanDocs => ScraperCall::CleanDocs,
        Endpoint::SplitClauses => ScraperCall::SplitClauses,
        Endpoint::ClassifyClauses => ScraperCall::ClassifyClauses,
        Endpoint::GenerateEmbeddings => ScraperCall::GenerateEmbeddings,
        Endpoint::Status => ScraperCall::Status,
        Endpoint::Clear => ScraperCall::Clear,
    };

    if let (Some(id), Some((percent, label))) = (progress, step.checkpoint) {
        state.update_progress(id, percent, label);
    }
    vec![Effect::CallScraper { run_id, call }]
}

fn active_run(state: &ChatState, run_id: RunId, waiting: Waiting) -> bool {
    matches!(&state.activity, Activity::Running(run) if run.id == run_id && run.waiting == waiting)
}

fn on_reply(
    state: &mut ChatState,
    run_id: RunId,
    result: Result<ScraperReply, String>,
) -> Vec<Effect> {
    if !active_run(state, run_id, Waiting::Reply) {
        return Vec::new();
    }
    let Activity::Running(run) = &state.activity else {
        return Vec::new();
    };
    let current = run.current.clone();
    let Some(step) = current.current_step() else {
        return Vec::new();
    };

    let reply = match result {
        Ok(reply) => reply,
        Err(error) => return fail_run(state, current.stage, &error),
    };

    let mut current = current;
    match (step.endpoint, reply) {
        (Endpoint::Scrape, ScraperReply::Scraped(results)) => {
            let total = results.len();
            for (index, outcome) in results.iter().enumerate() {
                let percent = rounded_percent(index + 1, total);
                let status = if outcome.success {
                    current.tally.scraped += 1;
                    format!("Scraped: {}", outcome.url)
                } else {
                    current.tally.scrape_failed += 1;
                    format!("Failed: {}", outcome.url)
                };
                if let Some(id) = current.progress {
                    state.update_progress(id, percent, &status);
                }
            }
            let submitted = current.submitted_urls.len().min(state.urls.len());
            state.urls = state.urls.split_off(submitted);
        }
        (Endpoint::ProcessPdfs, ScraperReply::PdfsProcessed { documents }) => {
            current.tally.pdfs = documents;
        }
        (Endpoint::CleanDocs, ScraperReply::DocsCleaned { documents }) => {
            current.tally.cleaned = documents;
        }
        (Endpoint::SplitClauses, ScraperReply::ClausesSplit { total_clauses }) => {
            current.tally.clauses = total_clauses;
        }
        (Endpoint::ClassifyClauses, ScraperReply::ClausesClassified { processed }) => {
            current.tally.classified = processed;
        }
        (Endpoint::GenerateEmbeddings, ScraperReply::EmbeddingsGenerated { processed }) => {
            current.tally.embedded = processed;
        }
        (Endpoint::Status, ScraperReply::Status(status)) => {
            let summary = text::status_summary(&status, state.urls.len(), state.files.len());
            state.push_system(summary);
        }
        (Endpoint::Clear, ScraperReply::Cleared(outcome)) => {
            if !outcome.success {
                let error = outcome.error.unwrap_or_else(|| "unknown error".to_string());
                return fail_run(state, current.stage, &error);
            }
            state.urls.clear();
            state.files.clear();
            state.push_system(text::DATA_CLEARED);
        }
        _ => return fail_run(state, current.stage, text::UNEXPECTED_REPLY),
    }

    current.step += 1;
    let has_more_steps = current.current_step().is_some();
    if let Activity::Running(run) = &mut state.activity {
        run.current = current.clone();
    }
    if has_more_steps {
        return issue_step(state);
    }
    finish_stage(state, current)
}

fn finish_stage(state: &mut ChatState, current: StageRun) -> Vec<Effect> {
    // Scrape progress already ends on the last URL's status.
    let scraped_any = current.tally.scraped + current.tally.scrape_failed > 0;
    if let Some(id) = current.progress {
        if !(current.stage == Stage::Scrape && scraped_any) {
            state.update_progress(id, 100, "Complete");
        }
    }
    match current.stage {
        Stage::Scrape => {
            state.push_system(text::scrape_summary(&current.tally));
        }
        Stage::ProcessPdfs => {
            state.files.clear();
            state.push_system(text::pdf_summary(&current.tally));
        }
        Stage::GenerateEmbeddings => {
            state.push_system(text::embedding_summary(&current.tally));
        }
        Stage::Status | Stage::Clear => {}
    }

    let Activity::Running(run) = &mut state.activity else {
        return Vec::new();
    };
    if run.next_stage().is_some() {
        run.waiting = Waiting::Pause;
        let run_id = run.id;
        return vec![Effect::Pause {
            run_id,
            duration: state.stage_pause(),
        }];
    }

    let workflow = run.workflow;
    state.activity = Activity::Idle;
    state.mark_dirty();
    if workflow == Workflow::FullWorkflow {
        state.push_system(text::WORKFLOW_FINISHED);
    }
    Vec::new()
}

fn on_pause_elapsed(state: &mut ChatState, run_id: RunId) -> Vec<Effect> {
    if !active_run(state, run_id, Waiting::Pause) {
        return Vec::new();
    }
    if let Activity::Running(run) = &mut state.activity {
        let Some(next) = run.next_stage() else {
            return Vec::new();
        };
        run.stage_index += 1;
        run.current = StageRun::new(next);
    }
    begin_stage(state)
}

/// Reports the failure once and ends the run; later stages never start.
fn fail_run(state: &mut ChatState, stage: Stage, error: &str) -> Vec<Effect> {
    state.push_system(text::failure(stage.failure_prefix(), error));
    state.activity = Activity::Idle;
    state.mark_dirty();
    Vec::new()
}

/// `done / total` as a percentage, rounding halves up.
fn rounded_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let percent = (done * 200 + total) / (total * 2);
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::{has_accepted_scheme, rounded_percent};

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(3, 3), 100);
        assert_eq!(rounded_percent(0, 0), 100);
    }

    #[test]
    fn scheme_check_ignores_case() {
        assert!(has_accepted_scheme("HTTPS://example.com"));
        assert!(has_accepted_scheme("http://example.com"));
        assert!(!has_accepted_scheme("ftp://example.com"));
        assert!(!has_accepted_scheme("httpx://example.com"));
    }
}
