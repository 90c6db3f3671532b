// Background work: the scrape and AI queries run as tokio tasks and hand
// their single result back through a oneshot the UI polls without blocking.
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::{mpsc::UnboundedSender, oneshot};
use tracing::debug;
use trendscout_core::{AiAnswer, Language, RepoAnalyst, RepositoryRecord, TrendingSource};

use crate::event::Message;

pub type FetchResult = trendscout_core::Result<Vec<RepositoryRecord>>;
pub type AnalysisResult = trendscout_core::Result<AiAnswer>;

/// What a non-blocking look into a delivery found
#[derive(Debug)]
pub enum DeliveryState<T> {
    /// The task is still running
    Pending,
    Ready(T),
    /// The task went away without sending anything (panicked or was dropped)
    Abandoned,
}

/// Receiving end of a one-result, capacity-one channel
///
/// Dropping it is how the UI stops caring: the task's send then fails
/// quietly instead of blocking or blowing up.
#[derive(Debug)]
pub struct Delivery<T> {
    // None once the value (or the hang-up) has been observed; tokio's
    // receiver panics if polled again after completing
    rx: Option<oneshot::Receiver<T>>,
}

impl<T> Delivery<T> {
    pub fn channel() -> (oneshot::Sender<T>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx: Some(rx) })
    }

    /// Never blocks
    pub fn try_take(&mut self) -> DeliveryState<T> {
        let Some(rx) = self.rx.as_mut() else {
            return DeliveryState::Abandoned;
        };

        match rx.try_recv() {
            Ok(value) => {
                self.rx = None;
                DeliveryState::Ready(value)
            }
            Err(oneshot::error::TryRecvError::Empty) => DeliveryState::Pending,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.rx = None;
                DeliveryState::Abandoned
            }
        }
    }
}

/// Launches background tasks on the tokio runtime
#[derive(Clone)]
pub struct TaskRunner {
    handle: Handle,
    trending: Arc<dyn TrendingSource>,
    analyst: Arc<dyn RepoAnalyst>,
    wake: Option<UnboundedSender<Message>>,
}

impl TaskRunner {
    pub fn new(
        handle: Handle,
        trending: Arc<dyn TrendingSource>,
        analyst: Arc<dyn RepoAnalyst>,
    ) -> Self {
        Self {
            handle,
            trending,
            analyst,
            wake: None,
        }
    }

    /// Post `AiFinished` on this channel whenever an analysis delivers
    pub fn with_wake(mut self, wake: UnboundedSender<Message>) -> Self {
        self.wake = Some(wake);
        self
    }

    pub fn spawn_fetch(&self, language: Language) -> Delivery<FetchResult> {
        let (tx, delivery) = Delivery::channel();
        let source = Arc::clone(&self.trending);

        self.handle.spawn(async move {
            debug!(%language, "crawl start");
            let result = source.fetch(language).await;
            match &result {
                Ok(repos) => debug!(%language, count = repos.len(), "crawl success"),
                Err(e) => tracing::error!(%language, error = %e, "crawl error"),
            }

            if tx.send(result).is_err() {
                debug!(%language, "nobody waiting for crawl result, dropping it");
            }
        });

        delivery
    }

    /// `generation` is echoed back in the wake-up so stale ones can be told apart
    pub fn spawn_analysis(&self, url: String, generation: u64) -> Delivery<AnalysisResult> {
        let (tx, delivery) = Delivery::channel();
        let analyst = Arc::clone(&self.analyst);
        let wake = self.wake.clone();

        self.handle.spawn(async move {
            debug!(%url, generation, "ask ai");
            let result = analyst.analyze(&url).await;
            match &result {
                Ok(_) => debug!(%url, generation, "ask ai success"),
                Err(e) => tracing::error!(%url, generation, error = %e, "ask ai error"),
            }

            if tx.send(result).is_err() {
                debug!(%url, generation, "analysis no longer wanted, dropping it");
                return;
            }

            if let Some(wake) = wake {
                // Loop already gone means we're shutting down; nothing to do
                let _ = wake.send(Message::AiFinished { url, generation });
            }
        });

        delivery
    }
}
