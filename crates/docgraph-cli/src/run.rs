// Dweve DocGraph - Document to Graph Compiler
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! The batch loop: read, compile, write, repeat.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use docgraph_core::{CancellationToken, DocumentSource, FileSource, Mapping, Pipeline};
use docgraph_elastic::ElasticScroller;
use docgraph_neo4j::{BatchReport, GraphBuilder, GraphSink, Neo4jSink, StatementConfig, WriterSink};
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};

use crate::config::RunConfig;
use crate::error::{CliError, Result};

const SLEEP_SLICE: Duration = Duration::from_millis(200);

/// When the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Process a single batch.
    Once,
    /// Stop at the first empty batch.
    UntilEmpty,
    /// Sleep after an empty batch and read again, until interrupted.
    Poll(Duration),
}

/// Everything a run needs besides the configuration file contents.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mapping: PathBuf,
    pub config: PathBuf,
    /// Read documents from this file instead of Elasticsearch.
    pub input: Option<PathBuf>,
    /// Execute statements against Neo4j; otherwise print them.
    pub execute: bool,
    pub once: bool,
    pub end_after_empty: bool,
    pub statements: StatementConfig,
}

impl RunOptions {
    fn needs_config(&self) -> bool {
        self.input.is_none() || self.execute
    }

    fn mode(&self, config: &RunConfig) -> RunMode {
        if self.once {
            RunMode::Once
        } else if self.end_after_empty {
            RunMode::UntilEmpty
        } else {
            RunMode::Poll(config.poll_interval())
        }
    }
}

/// Load everything, run the loop, and close the sink.
pub fn run(options: &RunOptions) -> Result<BatchReport> {
    let mapping = Mapping::from_yaml_file(&options.mapping)?;
    info!(
        index = %mapping.index,
        nodes = mapping.nodes.len(),
        relationships = mapping.relationships.len(),
        "mapping loaded"
    );

    let config = if options.needs_config() || options.config.exists() {
        let config = RunConfig::from_yaml_file(&options.config)?;
        debug!(path = %options.config.display(), "config loaded");
        config
    } else {
        RunConfig::default()
    };

    let mut source: Box<dyn DocumentSource> = match &options.input {
        Some(path) => Box::new(FileSource::open(path, config.batch_size())?),
        None => {
            let elastic = config.elastic()?;
            Box::new(ElasticScroller::new(
                elastic.scroll_config(&mapping.index, mapping.doc_type.clone()),
            ))
        }
    };

    let sink: Box<dyn GraphSink> = if options.execute {
        Box::new(Neo4jSink::connect(&config.neo()?.connection())?)
    } else {
        info!("dry run, statements are printed instead of executed");
        Box::new(WriterSink::new(std::io::stdout()).with_comments(options.statements.include_comments))
    };

    let cancel = CancellationToken::new();
    let _signals = listen_for_interrupt(&cancel)?;

    let mode = options.mode(&config);
    let pipeline = Pipeline::new(Arc::new(mapping));
    let mut builder = GraphBuilder::new(sink, options.statements.clone());
    drive(&pipeline, source.as_mut(), &mut builder, mode, &cancel)
}

/// Run the loop, then close the sink whether or not it succeeded.
pub fn drive<D, S>(
    pipeline: &Pipeline,
    source: &mut D,
    builder: &mut GraphBuilder<S>,
    mode: RunMode,
    cancel: &CancellationToken,
) -> Result<BatchReport>
where
    D: DocumentSource + ?Sized,
    S: GraphSink,
{
    let outcome = run_batches(pipeline, source, builder, mode, cancel);
    let closed = builder.close();

    let result = match (outcome, closed) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(e)) => Err(CliError::from(e)),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            error!(error = %close_err, "closing sink failed");
            Err(e)
        }
    };

    match &result {
        Ok(total) => info!(report = %total, "complete"),
        Err(e) => error!(error = %e, "run failed"),
    }
    result
}

/// Read and write batches until `mode` says stop or `cancel` fires.
pub fn run_batches<D, S>(
    pipeline: &Pipeline,
    source: &mut D,
    builder: &mut GraphBuilder<S>,
    mode: RunMode,
    cancel: &CancellationToken,
) -> Result<BatchReport>
where
    D: DocumentSource + ?Sized,
    S: GraphSink,
{
    let mut total = BatchReport::default();

    while !cancel.is_cancelled() {
        info!(index = %pipeline.mapping().index, "reading next batch");
        let documents = source.next_batch()?;

        if documents.is_empty() {
            match mode {
                RunMode::Once | RunMode::UntilEmpty => {
                    info!("source is empty");
                    break;
                }
                RunMode::Poll(interval) => {
                    info!(seconds = interval.as_secs(), "source is empty, sleeping");
                    sleep_unless_cancelled(interval, cancel);
                    continue;
                }
            }
        }

        let batch = pipeline.compile_batch(documents, cancel);
        if batch.cancelled {
            break;
        }
        let report = builder.build(&batch);
        total.merge(&report);

        if mode == RunMode::Once {
            break;
        }
    }

    if cancel.is_cancelled() {
        info!("interrupt detected, stopping");
    }
    Ok(total)
}

/// Sleep for `duration`, waking early on cancellation.
///
/// Returns false when woken by cancellation.
pub fn sleep_unless_cancelled(duration: Duration, cancel: &CancellationToken) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if cancel.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(SLEEP_SLICE.min(deadline - now));
    }
}

// The returned runtime owns the signal task and must outlive the run.
fn listen_for_interrupt(cancel: &CancellationToken) -> Result<Runtime> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("docgraph-signal")
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(e.to_string()))?;

    let token = cancel.clone();
    runtime.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received");
                token.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for interrupts"),
        }
    });
    Ok(runtime)
}
