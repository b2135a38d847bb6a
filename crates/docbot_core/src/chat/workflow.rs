use crate::chat::MessageId;

pub type RunId = u64;

/// A named command that talks to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Scrape,
    ProcessPdfs,
    GenerateEmbeddings,
    FullWorkflow,
    ShowStatus,
    ClearData,
}

impl Workflow {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Workflow::Scrape => &[Stage::Scrape],
            Workflow::ProcessPdfs => &[Stage::ProcessPdfs],
            Workflow::GenerateEmbeddings => &[Stage::GenerateEmbeddings],
            Workflow::FullWorkflow => &[
                Stage::Scrape,
                Stage::ProcessPdfs,
                Stage::GenerateEmbeddings,
            ],
            Workflow::ShowStatus => &[Stage::Status],
            Workflow::ClearData => &[Stage::Clear],
        }
    }

    pub fn needs_urls(self) -> bool {
        matches!(self, Workflow::Scrape | Workflow::FullWorkflow)
    }
}

/// A single-purpose unit of a workflow with its own progress message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scrape,
    ProcessPdfs,
    GenerateEmbeddings,
    Status,
    Clear,
}

/// Backend endpoint a step calls; `Scrape` carries the URL snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScraperCall {
    Scrape { urls: Vec<String> },
    ProcessPdfs,
    CleanDocs,
    SplitClauses,
    ClassifyClauses,
    GenerateEmbeddings,
    Status,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Scrape,
    ProcessPdfs,
    CleanDocs,
    SplitClauses,
    ClassifyClauses,
    GenerateEmbeddings,
    Status,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) endpoint: Endpoint,
    /// Progress shown before the call is issued.
    pub(crate) checkpoint: Option<(u8, &'static str)>,
}

const fn step(endpoint: Endpoint, checkpoint: Option<(u8, &'static str)>) -> Step {
    Step {
        endpoint,
        checkpoint,
    }
}

const SCRAPE_STEPS: &[Step] = &[step(Endpoint::Scrape, None)];
const PDF_STEPS: &[Step] = &[
    step(Endpoint::ProcessPdfs, Some((25, "Processing PDF files"))),
    step(Endpoint::CleanDocs, Some((50, "Cleaning documents"))),
    step(Endpoint::SplitClauses, Some((75, "Splitting into clauses"))),
];
const EMBEDDING_STEPS: &[Step] = &[
    step(Endpoint::ClassifyClauses, Some((30, "Classifying clauses"))),
    step(Endpoint::GenerateEmbeddings, Some((70, "Generating embeddings"))),
];
const STATUS_STEPS: &[Step] = &[step(Endpoint::Status, None)];
const CLEAR_STEPS: &[Step] = &[step(Endpoint::Clear, None)];

impl Stage {
    pub(crate) fn steps(self) -> &'static [Step] {
        match self {
            Stage::Scrape => SCRAPE_STEPS,
            Stage::ProcessPdfs => PDF_STEPS,
            Stage::GenerateEmbeddings => EMBEDDING_STEPS,
            Stage::Status => STATUS_STEPS,
            Stage::Clear => CLEAR_STEPS,
        }
    }

    pub(crate) fn progress_title(self) -> Option<&'static str> {
        match self {
            Stage::Scrape => Some("Scraping URLs"),
            Stage::ProcessPdfs => Some("Processing PDFs"),
            Stage::GenerateEmbeddings => Some("Generating Embeddings"),
            Stage::Status | Stage::Clear => None,
        }
    }

    pub(crate) fn failure_prefix(self) -> &'static str {
        match self {
            Stage::Scrape => "Error during scraping",
            Stage::ProcessPdfs => "Error processing PDFs",
            Stage::GenerateEmbeddings => "Error generating embeddings",
            Stage::Status => "Error fetching status",
            Stage::Clear => "Error clearing data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    pub url: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileCounts {
    pub raw_docs: u64,
    pub combined_docs: u64,
    pub cleaned_docs: u64,
    pub clauses: u64,
    pub metadata: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelNames {
    pub classification: String,
    pub embedding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemStatus {
    pub files: FileCounts,
    pub models: ModelNames,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearOutcome {
    pub success: bool,
    pub error: Option<String>,
}

/// Decoded backend reply for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScraperReply {
    Scraped(Vec<ScrapeOutcome>),
    PdfsProcessed { documents: usize },
    DocsCleaned { documents: usize },
    ClausesSplit { total_clauses: u64 },
    ClausesClassified { processed: u64 },
    EmbeddingsGenerated { processed: u64 },
    Status(SystemStatus),
    Cleared(ClearOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Tally {
    pub(crate) scraped: usize,
    pub(crate) scrape_failed: usize,
    pub(crate) pdfs: usize,
    pub(crate) cleaned: usize,
    pub(crate) clauses: u64,
    pub(crate) classified: u64,
    pub(crate) embedded: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Waiting {
    Reply,
    Pause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StageRun {
    pub(crate) stage: Stage,
    pub(crate) step: usize,
    pub(crate) progress: Option<MessageId>,
    /// URLs handed to `/scrape`; removed from the queue once it succeeds.
    pub(crate) submitted_urls: Vec<String>,
    pub(crate) tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WorkflowRun {
    pub(crate) id: RunId,
    pub(crate) workflow: Workflow,
    pub(crate) stage_index: usize,
    pub(crate) current: StageRun,
    pub(crate) waiting: Waiting,
}

impl WorkflowRun {
    pub(crate) fn new(id: RunId, workflow: Workflow) -> Self {
        Self {
            id,
            workflow,
            stage_index: 0,
            current: StageRun::new(workflow.stages()[0]),
            waiting: Waiting::Reply,
        }
    }

    pub(crate) fn next_stage(&self) -> Option<Stage> {
        self.workflow.stages().get(self.stage_index + 1).copied()
    }
}

impl StageRun {
    pub(crate) fn new(stage: Stage) -> Self {
        Self {
            stage,
            step: 0,
            progress: None,
            submitted_urls: Vec::new(),
            tally: Tally::default(),
        }
    }

    pub(crate) fn current_step(&self) -> Option<Step> {
        self.stage.steps().get(self.step).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, Stage, Workflow};

    #[test]
    fn every_workflow_has_stages() {
        for workflow in [
            Workflow::Scrape,
            Workflow::ProcessPdfs,
            Workflow::GenerateEmbeddings,
            Workflow::FullWorkflow,
            Workflow::ShowStatus,
            Workflow::ClearData,
        ] {
            assert!(!workflow.stages().is_empty(), "{workflow:?}");
        }
    }

    #[test]
    fn pdf_checkpoints_are_ascending() {
        let percents: Vec<u8> = Stage::ProcessPdfs
            .steps()
            .iter()
            .filter_map(|step| step.checkpoint.map(|(percent, _)| percent))
            .collect();
        assert_eq!(percents, vec![25, 50, 75]);
        let endpoints: Vec<Endpoint> = Stage::ProcessPdfs
            .steps()
            .iter()
            .map(|step| step.endpoint)
            .collect();
        assert_eq!(
            endpoints,
            vec![Endpoint::ProcessPdfs, Endpoint::CleanDocs, Endpoint::SplitClauses]
        );
    }

    #[test]
    fn every_stage_has_steps() {
        for stage in [
            Stage::Scrape,
            Stage::ProcessPdfs,
            Stage::GenerateEmbeddings,
            Stage::Status,
            Stage::Clear,
        ] {
            assert!(!stage.steps().is_empty(), "{stage:?}");
        }
        assert_eq!(Stage::GenerateEmbeddings.steps().len(), 2);
    }
}
