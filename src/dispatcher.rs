// File: dispatcher.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ScanConfig;
use crate::engine::DecisionEngine;
use crate::probe::Prober;
use crate::sink::ResultSink;
use crate::state::ScanState;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use log::{debug, trace, warn};
use std::fmt::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Mutex, Notify};

/// Creates a bounded URL queue. Submitting blocks once `capacity` URLs are pending.
pub fn work_queue(capacity: usize) -> (Submitter, WorkReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (
        Submitter {
            sender,
            barrier: Arc::new(CompletionBarrier::new()),
        },
        WorkReceiver {
            inner: Arc::new(Mutex::new(receiver)),
        },
    )
}

/// One queued URL together with its unit of outstanding work.
///
/// The unit is released when the item is dropped, whether a worker finished it or
/// the queue was torn down with the item still inside.
pub struct WorkItem {
    url: String,
    _pending: PendingWork,
}

impl WorkItem {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Producer side of the queue. Dropping it closes the queue.
#[derive(Debug)]
pub struct Submitter {
    sender: mpsc::Sender<WorkItem>,
    barrier: Arc<CompletionBarrier>,
}

impl Submitter {
    /// Waits for room in the queue. Returns `false` if every consumer is gone.
    pub async fn submit(&self, url: String) -> bool {
        let item = self.barrier.enter(url);
        self.sender.send(item).await.is_ok()
    }

    pub fn try_submit(&self, url: String) -> Result<(), TrySendError<WorkItem>> {
        let item = self.barrier.enter(url);
        self.sender.try_send(item)
    }

    /// Barrier counting every URL submitted through this queue.
    pub fn barrier(&self) -> Arc<CompletionBarrier> {
        Arc::clone(&self.barrier)
    }
}

/// Consumer side of the queue, cloned into every worker.
#[derive(Debug, Clone)]
pub struct WorkReceiver {
    inner: Arc<Mutex<mpsc::Receiver<WorkItem>>>,
}

impl WorkReceiver {
    /// Next pending URL, or `None` once the queue is closed and drained.
    pub async fn next(&self) -> Option<WorkItem> {
        self.inner.lock().await.recv().await
    }
}

/// Outstanding-work counter that callers can wait on until it drops to zero.
#[derive(Debug, Default)]
pub struct CompletionBarrier {
    outstanding: AtomicUsize,
    notify: Notify,
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
    }

    pub fn done(&self) {
        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.notify.notify_waiters();
        }
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }

    /// Counts one unit of work, released when the returned guard is dropped.
    pub fn pending(self: &Arc<Self>) -> PendingWork {
        self.add();
        PendingWork {
            barrier: Arc::clone(self),
        }
    }

    fn enter(self: &Arc<Self>, url: String) -> WorkItem {
        WorkItem {
            url,
            _pending: self.pending(),
        }
    }
}

pub struct PendingWork {
    barrier: Arc<CompletionBarrier>,
}

impl Drop for PendingWork {
    fn drop(&mut self) {
        self.barrier.done();
    }
}

impl std::fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkItem").field("url", &self.url).finish()
    }
}

pub struct Dispatcher<P: Prober + 'static> {
    engine: Arc<DecisionEngine<P>>,
    sink: Arc<ResultSink>,
    workers: usize,
    progress: Option<ProgressBar>,
}

impl<P: Prober + 'static> Dispatcher<P> {
    pub fn new(engine: DecisionEngine<P>, sink: ResultSink, workers: usize) -> Self {
        Dispatcher {
            engine: Arc::new(engine),
            sink: Arc::new(sink),
            workers: workers.max(1),
            progress: None,
        }
    }

    pub fn from_config(prober: P, config: &ScanConfig) -> Self {
        let state_ptr = Arc::new(ScanState::new());
        let engine = DecisionEngine::new(prober, config, state_ptr);
        let mut sink = ResultSink::new(config.output_path());
        let progress = if config.progress() {
            let pb = progress_bar();
            sink = sink.with_progress(pb.clone());
            Some(pb)
        } else {
            None
        };
        Dispatcher {
            engine: Arc::new(engine),
            sink: Arc::new(sink),
            workers: config.workers(),
            progress,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn sink(&self) -> &Arc<ResultSink> {
        &self.sink
    }

    pub fn state(&self) -> Arc<ScanState> {
        Arc::clone(self.engine.state())
    }

    /// Feeds `urls` through the worker pool and returns once every URL is evaluated.
    ///
    /// `urls` is pulled one line at a time, so a lazy reader is never drained ahead
    /// of the queue.
    pub async fn run<I>(&self, urls: I) -> Arc<ScanState>
    where
        I: IntoIterator<Item = String>,
    {
        let state_ptr = self.state();
        state_ptr.mark_started();

        let (submitter, receiver) = work_queue(self.workers);
        let barrier = submitter.barrier();

        debug!("Starting {} workers", self.workers);
        let mut handles = Vec::with_capacity(self.workers);
        for id in 0..self.workers {
            handles.push(tokio::spawn(worker(
                id,
                receiver.clone(),
                Arc::clone(&self.engine),
                Arc::clone(&self.sink),
                self.progress.clone(),
            )));
        }
        drop(receiver);

        for url in urls {
            if let Some(pb) = &self.progress {
                pb.inc_length(1);
            }
            if !submitter.submit(url).await {
                warn!("All workers stopped before the input was exhausted");
                break;
            }
        }
        drop(submitter);

        barrier.wait().await;

        for result in join_all(handles).await {
            if let Err(e) = result {
                warn!("Worker task failed: {}", e);
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }
        state_ptr.mark_finished();
        state_ptr
    }
}

async fn worker<P: Prober + 'static>(
    id: usize,
    queue: WorkReceiver,
    engine: Arc<DecisionEngine<P>>,
    sink: Arc<ResultSink>,
    progress: Option<ProgressBar>,
) {
    while let Some(item) = queue.next().await {
        if let Some(line) = engine.evaluate(item.url()).await {
            // File I/O runs on the blocking pool so a slow disk never parks a runtime thread.
            let sink = Arc::clone(&sink);
            if let Err(e) = tokio::task::spawn_blocking(move || sink.record(&line)).await {
                warn!("Result write for {} failed: {}", item.url(), e);
            }
        }
        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }
    trace!("Worker {} drained the queue", id);
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template(
        "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})",
    ) {
        pb.set_style(
            style
                .with_key("eta", |state: &ProgressState, w: &mut dyn Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                })
                .progress_chars("█▉▊▋▌▍▎▏  "),
        );
    }
    pb
}
