use super::{PlayerSearch, SearchEffect, SearchEvent, SearchTicket};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Debounced request driver.
///
/// Each scheduled ticket starts a quiet-period timer; a newer ticket aborts
/// the pending timer, so a burst of edits produces one request for the last
/// value. Once a timer fires the request runs on its own task and is never
/// aborted: stale answers are filtered by generation on the receiving side.
pub struct SearchWorkflow<S: PlayerSearch> {
    client: Arc<S>,
    debounce: Duration,
    timer: Option<JoinHandle<()>>,
    in_flight: Arc<AtomicUsize>,
    events_tx: mpsc::UnboundedSender<SearchEvent>,
    events_rx: mpsc::UnboundedReceiver<SearchEvent>,
}

impl<S: PlayerSearch> SearchWorkflow<S> {
    pub fn new(client: Arc<S>, debounce: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            client,
            debounce,
            timer: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            events_tx,
            events_rx,
        }
    }

    pub fn run(&mut self, effect: SearchEffect) {
        match effect {
            SearchEffect::Schedule(ticket) => self.schedule(ticket),
            SearchEffect::Cancel => self.cancel(),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, ticket: SearchTicket) {
        self.cancel();

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let debounce = self.debounce;
        let in_flight = self.in_flight.clone();

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let SearchTicket { generation, query } = ticket;
            debug!("Debounce settled: #{} {:?}", generation, query);
            in_flight.fetch_add(1, Ordering::SeqCst);
            if tx.send(SearchEvent::Started { generation }).is_err() {
                in_flight.fetch_sub(1, Ordering::SeqCst);
                return;
            }

            tokio::spawn(async move {
                let outcome = client.search(&query).await;
                if let Err(e) = &outcome {
                    debug!("Player search for {:?} failed: {}", query, e);
                }
                let _ = tx.send(SearchEvent::Finished {
                    generation,
                    outcome,
                });
                in_flight.fetch_sub(1, Ordering::SeqCst);
            });
        }));
    }

    /// Drops the pending timer, if any. Requests already sent keep running.
    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// True when no event can arrive: no timer running, no request
    /// outstanding and nothing queued.
    pub fn is_idle(&self) -> bool {
        !self.is_pending()
            && self.in_flight.load(Ordering::SeqCst) == 0
            && self.events_rx.is_empty()
    }

    /// Waits for the next event, or returns `None` straight away when the
    /// driver is idle.
    pub async fn recv(&mut self) -> Option<SearchEvent> {
        if self.is_idle() {
            return None;
        }
        self.events_rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<SearchEvent> {
        self.events_rx.try_recv().ok()
    }
}

impl<S: PlayerSearch> Drop for SearchWorkflow<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
