//! Generation pipeline orchestrator.
//!
//! Runs the stages strictly in order:
//! `Extracting -> Generating -> Cleaning -> Archiving -> Packaging -> Done`,
//! with `Failed` reachable from any stage. Stage outcomes are resolved by the
//! shared [`FallbackPolicy`]; archiving is always best-effort and ignores it.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Instant;

use uniicon_core::{GenerationRequest, PipelineResult};
use uniicon_services::ImageServiceError;

use crate::archiver::Archiver;
use crate::cleaner::BackgroundCleaner;
use crate::error::{PipelineError, PipelineFailure, Stage};
use crate::extract::PromptExtractor;
use crate::generate::ImageGenerator;
use crate::packager::package_result;
use crate::policy::FallbackPolicy;

/// Position of a run in the stage sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Extracting,
    Generating,
    Cleaning,
    Archiving,
    Packaging,
    Done,
    Failed(Stage),
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PipelineState::Extracting => f.write_str("extracting"),
            PipelineState::Generating => f.write_str("generating"),
            PipelineState::Cleaning => f.write_str("cleaning"),
            PipelineState::Archiving => f.write_str("archiving"),
            PipelineState::Packaging => f.write_str("packaging"),
            PipelineState::Done => f.write_str("done"),
            PipelineState::Failed(stage) => write!(f, "failed({})", stage),
        }
    }
}

/// Outcome of one run plus every state it passed through
#[derive(Debug)]
pub struct PipelineRun {
    pub states: Vec<PipelineState>,
    pub outcome: Result<PipelineResult, PipelineFailure>,
}

impl PipelineRun {
    pub fn final_state(&self) -> Option<PipelineState> {
        self.states.last().copied()
    }

    pub fn reached(&self, state: PipelineState) -> bool {
        self.states.contains(&state)
    }

    pub fn into_result(self) -> Result<PipelineResult, PipelineFailure> {
        self.outcome
    }
}

struct Transitions {
    states: Vec<PipelineState>,
}

impl Transitions {
    fn new() -> Self {
        Self {
            states: Vec::with_capacity(6),
        }
    }

    fn enter(&mut self, state: PipelineState) {
        tracing::debug!(state = %state, "Pipeline state transition");
        self.states.push(state);
    }
}

/// The icon generation pipeline. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct GenerationPipeline {
    extractor: PromptExtractor,
    generator: ImageGenerator,
    cleaner: BackgroundCleaner,
    archiver: Archiver,
    policy: FallbackPolicy,
}

impl GenerationPipeline {
    pub fn new(
        extractor: PromptExtractor,
        generator: ImageGenerator,
        cleaner: BackgroundCleaner,
        archiver: Archiver,
        policy: FallbackPolicy,
    ) -> Self {
        Self {
            extractor,
            generator,
            cleaner,
            archiver,
            policy,
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn extractor(&self) -> &PromptExtractor {
        &self.extractor
    }

    pub fn generator(&self) -> &ImageGenerator {
        &self.generator
    }

    pub fn archiver(&self) -> &Archiver {
        &self.archiver
    }

    /// Run the pipeline for one request
    pub async fn run(&self, request: &GenerationRequest) -> Result<PipelineResult, PipelineFailure> {
        self.execute(&request.input).await.into_result()
    }

    /// Run the pipeline and keep the state trace
    pub async fn execute(&self, input: &str) -> PipelineRun {
        let start = Instant::now();
        let mut transitions = Transitions::new();

        let outcome = self.drive(input, &mut transitions).await;

        let outcome = match outcome {
            Ok(result) => {
                transitions.enter(PipelineState::Done);
                tracing::info!(
                    generation_method = %result.generation_method,
                    format = %result.format,
                    archived = result.archived_asset.is_some(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Icon generation pipeline completed"
                );
                Ok(result)
            }
            Err(error) => {
                let stage = error.stage();
                transitions.enter(PipelineState::Failed(stage));
                tracing::error!(
                    stage = %stage,
                    error = %error,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Icon generation pipeline failed"
                );
                Err(error.into_failure(self.policy.fallbacks_disabled()))
            }
        };

        PipelineRun {
            states: transitions.states,
            outcome,
        }
    }

    async fn drive(
        &self,
        input: &str,
        transitions: &mut Transitions,
    ) -> Result<PipelineResult, PipelineError> {
        transitions.enter(PipelineState::Extracting);
        let prompt = self
            .policy
            .apply(
                Stage::Extracting,
                self.extractor.extract_primary(input).await,
                |_| true,
                || self.extractor.extract_fallback(input),
            )
            .map_err(PipelineError::Extraction)?;
        tracing::info!(source = %prompt.source, prompt = %prompt.text, "Prompt ready");

        transitions.enter(PipelineState::Generating);
        let image = self
            .policy
            .apply(
                Stage::Generating,
                self.generator.generate_primary(&prompt.text).await,
                ImageServiceError::is_substitutable,
                || self.generator.generate_fallback(&prompt.text),
            )
            .map_err(PipelineError::Generation)?;
        let method = image.source;

        transitions.enter(PipelineState::Cleaning);
        let cleaned = self.cleaner.clean(image.clone()).await;
        let image = self
            .policy
            .apply(Stage::Cleaning, cleaned, |_| true, move || image)
            .map_err(PipelineError::Cleaning)?;

        transitions.enter(PipelineState::Archiving);
        let archived = self.archiver.archive(&image, input).await;

        transitions.enter(PipelineState::Packaging);
        Ok(package_result(&image, archived, method)?)
    }
}
