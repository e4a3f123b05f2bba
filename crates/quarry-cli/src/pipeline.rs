//! End-to-end experiment assembly.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use clap::ValueEnum;
use quarry_core::config::{OutputConfig, QuarryConfig};
use quarry_core::errors::{LearningError, StorageError};
use quarry_core::events::{EventDispatcher, LoopEventHandler};
use quarry_core::traits::SnapshotStore;
use quarry_core::types::Label;
use quarry_data::{
    partition, Corpus, LabeledPool, SplitSizes, TextVectorizer, TokenSequence, UnlabeledReservoir,
};
use quarry_learning::metrics::sink_for_path;
use quarry_learning::{
    ControllerSettings, MetricsLog, MetricsSink, RunReport, SamplingController,
};
use quarry_model::{LogisticRegression, LogisticRegressionConfig, ModelSnapshot};
use quarry_storage::{FileSnapshotStore, MemorySnapshotStore};
use tracing::info;

/// On-disk corpus layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CorpusFormat {
    /// One `{"text": ..., "label": ...}` object per line.
    Jsonl,
    /// `pos/*.txt` and `neg/*.txt` under a root directory.
    Dirs,
}

impl CorpusFormat {
    /// Directories are read as `pos/` + `neg/` trees, files as JSONL.
    pub fn detect(path: &Path) -> Self {
        if path.is_dir() {
            CorpusFormat::Dirs
        } else {
            CorpusFormat::Jsonl
        }
    }
}

/// What a finished run hands back.
#[derive(Debug, Clone)]
pub struct ExperimentOutcome {
    pub report: RunReport,
    pub metrics: MetricsLog,
}

/// Load the corpus, build the pool and reservoir, and run the
/// active-learning loop with the configured snapshot store.
pub fn run_experiment(
    corpus_path: &Path,
    format: CorpusFormat,
    config: &QuarryConfig,
    handlers: Vec<Arc<dyn LoopEventHandler>>,
) -> Result<ExperimentOutcome, LearningError> {
    let started = Instant::now();
    let corpus = match format {
        CorpusFormat::Jsonl => Corpus::load_jsonl(corpus_path)?,
        CorpusFormat::Dirs => Corpus::load_labeled_dirs(corpus_path)?,
    };
    info!(
        documents = corpus.len(),
        positive = corpus.count(Label::Positive),
        negative = corpus.count(Label::Negative),
        "corpus loaded"
    );
    let corpus = match config.split.shuffle_seed {
        Some(seed) => corpus.shuffled(seed),
        None => corpus,
    };

    let (pool, reservoir) = partition(corpus.into_examples(), SplitSizes::from(&config.split))?;
    let (pool, reservoir, dimension) = vectorize(pool, reservoir, config)?;

    let model = LogisticRegression::new(LogisticRegressionConfig::from_training(
        &config.training,
        dimension,
    ));
    let settings = ControllerSettings::from_config(config);
    let mut events = EventDispatcher::new();
    for handler in handlers {
        events.register(handler);
    }

    let outcome = if config.checkpoint.effective_in_memory() {
        drive(model, MemorySnapshotStore::<ModelSnapshot>::new(), pool, reservoir, settings, events)?
    } else {
        let store = FileSnapshotStore::<ModelSnapshot>::create(config.checkpoint.effective_dir())?;
        drive(model, store, pool, reservoir, settings, events)?
    };

    info!(
        rounds = outcome.report.rounds.len(),
        accuracy = outcome.report.final_evaluation.accuracy,
        run_duration_ms = started.elapsed().as_millis() as u64,
        "experiment finished"
    );
    Ok(outcome)
}

/// Write the metrics export and run report where the config asks for them.
pub fn write_outputs(outcome: &ExperimentOutcome, output: &OutputConfig) -> Result<(), StorageError> {
    if let Some(path) = &output.metrics_path {
        sink_for_path(path).write(&outcome.metrics)?;
        info!(path = %path, records = outcome.metrics.len(), "metrics written");
    }
    if let Some(path) = &output.report_path {
        outcome.report.write_json(Path::new(path))?;
        info!(path = %path, "report written");
    }
    Ok(())
}

type Encoded = (
    LabeledPool<TokenSequence>,
    UnlabeledReservoir<TokenSequence>,
    usize,
);

/// Fit the vocabulary on the initial train split only, then encode every
/// split and the reservoir with it.
fn vectorize(
    pool: LabeledPool<String>,
    reservoir: UnlabeledReservoir<String>,
    config: &QuarryConfig,
) -> Result<Encoded, LearningError> {
    let mut vectorizer = TextVectorizer::new(
        config.vectorizer.effective_max_tokens(),
        config.vectorizer.effective_sequence_length(),
    );
    let train_texts: Vec<&str> = pool.train().iter().map(|e| e.features.as_str()).collect();
    vectorizer.adapt(&train_texts);

    let pool = pool.try_map_splits(|split| vectorizer.encode_examples(split))?;
    let reservoir = reservoir.try_map_queues(|queue| vectorizer.encode_examples(queue))?;
    Ok((pool, reservoir, vectorizer.max_tokens()))
}

fn drive<St>(
    model: LogisticRegression,
    store: St,
    pool: LabeledPool<TokenSequence>,
    reservoir: UnlabeledReservoir<TokenSequence>,
    settings: ControllerSettings,
    events: EventDispatcher,
) -> Result<ExperimentOutcome, LearningError>
where
    St: SnapshotStore<ModelSnapshot>,
{
    let mut controller =
        SamplingController::new(model, store, pool, reservoir, settings).with_events(events);
    let report = controller.run()?;
    Ok(ExperimentOutcome {
        report,
        metrics: controller.metrics().clone(),
    })
}
