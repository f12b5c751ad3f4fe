// src/search/session.rs
//! Search session state machine.
//!
//! Every way a fetch can start is an explicit transition (`InitialLoad`,
//! `EditFilter`, `ChangePage`), and each one resolves to a
//! `FetchRequested` event carrying a full parameter snapshot, so nothing
//! downstream ever reads mutable filter state at an unpredictable time.
//! Filter edits are the only path into the debounce window; the initial
//! load is its own transition and can never be duplicated by it.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::{debug, error, trace};

use crate::search::filters::{FilterEdit, FilterState};
use crate::search::pagination::PaginationState;
use crate::search::query::JobsQuery;
use crate::types::{Job, JobsPage};

/// Quiet period a burst of filter edits must survive before a fetch.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Park duration for the timer branch while no debounce is pending.
const IDLE_PARK: Duration = Duration::from_secs(3600);

/// A user-level event feeding the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The one-time page-load fetch.
    InitialLoad,
    /// A filter widget changed; coalesced behind the debounce window.
    EditFilter(FilterEdit),
    /// Explicit page selection; fetches on the same turn, no debounce.
    ChangePage(u32),
}

/// A fully resolved fetch order: sequence token plus the serialized
/// query snapshot taken at the moment the transition settled.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequested {
    pub seq: u64,
    pub query: JobsQuery,
}

/// Owns the filter and page state and turns transitions into
/// `FetchRequested` events.
#[derive(Debug)]
pub struct SearchSession {
    filters: FilterState,
    pagination: PaginationState,
    debounce_window: Duration,
    seq: u64,
}

impl SearchSession {
    pub fn new(filters: FilterState) -> Self {
        Self {
            filters,
            pagination: PaginationState::new(),
            debounce_window: DEBOUNCE_WINDOW,
            seq: 0,
        }
    }

    /// Shrink the debounce window (timing-sensitive tests).
    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    fn snapshot(&mut self) -> FetchRequested {
        self.seq += 1;
        FetchRequested {
            seq: self.seq,
            query: JobsQuery::build(&self.filters, self.pagination.current_page()),
        }
    }

    /// Drive the session until the event channel closes.
    ///
    /// Filter edits start or reset one pending timer; only the last
    /// edit of a burst produces a fetch. When the window elapses on a
    /// page other than 1, the page resets to 1 and that reset carries
    /// the fetch, matching the page-change path.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<Transition>,
        requests: mpsc::Sender<FetchRequested>,
    ) {
        let mut deadline: Option<Instant> = None;
        loop {
            let wake = deadline.unwrap_or_else(|| Instant::now() + IDLE_PARK);
            tokio::select! {
                event = events.recv() => {
                    match event {
                        None => break,
                        Some(Transition::InitialLoad) => {
                            deadline = None;
                            trace!("Initial load requested");
                            if requests.send(self.snapshot()).await.is_err() {
                                break;
                            }
                        }
                        Some(Transition::ChangePage(page)) => {
                            deadline = None;
                            self.pagination.go_to_page(page);
                            debug!("Page change to {}, fetching immediately", page);
                            if requests.send(self.snapshot()).await.is_err() {
                                break;
                            }
                        }
                        Some(Transition::EditFilter(edit)) => {
                            trace!("Filter edit: {:?}", edit);
                            self.filters.apply(edit);
                            deadline = Some(Instant::now() + self.debounce_window);
                        }
                    }
                }
                _ = time::sleep_until(wake), if deadline.is_some() => {
                    deadline = None;
                    if self.pagination.current_page() != 1 {
                        self.pagination.reset_to_first();
                    }
                    debug!("Filter burst settled, fetching page 1");
                    if requests.send(self.snapshot()).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Holds the fetched results and guards against out-of-order
/// completions: a response is applied only when no later request has
/// been initiated since it was issued, so the displayed set always
/// reflects the most recently initiated fetch.
#[derive(Debug, Default)]
pub struct ResultsState {
    jobs: Vec<Job>,
    total_jobs: u64,
    loading: bool,
    latest_seq: u64,
}

impl ResultsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn total_jobs(&self) -> u64 {
        self.total_jobs
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Mark a fetch as in flight. Sequence tokens are issued
    /// monotonically, so each call supersedes every earlier request.
    pub fn begin(&mut self, seq: u64) {
        self.loading = true;
        self.latest_seq = self.latest_seq.max(seq);
    }

    /// Apply a completed fetch. Returns false when the completion was
    /// superseded and discarded. A failed fetch empties the list and
    /// resets the total, collapsing transient backend errors into the
    /// "no jobs found" state.
    pub fn complete(&mut self, seq: u64, outcome: Result<JobsPage>) -> bool {
        if seq < self.latest_seq {
            trace!(
                "Discarding stale response {} (latest is {})",
                seq,
                self.latest_seq
            );
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(page) => {
                self.jobs = page.jobs;
                self.total_jobs = page.total_jobs;
            }
            Err(e) => {
                error!("Jobs fetch failed: {:#}", e);
                self.jobs.clear();
                self.total_jobs = 0;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filters::TextField;

    fn edit(value: &str) -> Transition {
        Transition::EditFilter(FilterEdit::Text(TextField::SearchInput, value.to_string()))
    }

    fn page_of(request: &FetchRequested) -> u32 {
        request.query.page
    }

    async fn recv_within(
        rx: &mut mpsc::Receiver<FetchRequested>,
        ms: u64,
    ) -> Option<FetchRequested> {
        time::timeout(Duration::from_millis(ms), rx.recv())
            .await
            .ok()
            .flatten()
    }

    fn spawn_session(window_ms: u64) -> (mpsc::Sender<Transition>, mpsc::Receiver<FetchRequested>) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let (request_tx, request_rx) = mpsc::channel(16);
        let session = SearchSession::new(FilterState::new())
            .with_debounce_window(Duration::from_millis(window_ms));
        tokio::spawn(session.run(event_rx, request_tx));
        (event_tx, request_rx)
    }

    #[tokio::test]
    async fn test_debounce_coalesces_burst_into_one_fetch() {
        // Edits at 0, 30, 60 and 120 ms against a 150 ms window: the
        // first three coalesce, the 120 ms edit interrupts the pending
        // timer, and exactly one fetch fires after it.
        let (tx, mut rx) = spawn_session(150);

        tx.send(edit("r")).await.unwrap();
        time::sleep(Duration::from_millis(30)).await;
        tx.send(edit("ru")).await.unwrap();
        time::sleep(Duration::from_millis(30)).await;
        tx.send(edit("rus")).await.unwrap();
        time::sleep(Duration::from_millis(60)).await;
        tx.send(edit("rust")).await.unwrap();

        let first = recv_within(&mut rx, 600).await.expect("one fetch fires");
        assert_eq!(page_of(&first), 1);
        let snapshot: Vec<&str> = first
            .query
            .params
            .iter()
            .filter(|(k, _)| *k == "search")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(snapshot, vec!["rust"]);

        assert!(recv_within(&mut rx, 250).await.is_none(), "burst must coalesce");
    }

    #[tokio::test]
    async fn test_page_change_bypasses_debounce() {
        let (tx, mut rx) = spawn_session(200);

        tx.send(Transition::ChangePage(3)).await.unwrap();
        // Well inside the debounce window
        let request = recv_within(&mut rx, 50).await.expect("immediate fetch");
        assert_eq!(page_of(&request), 3);

        assert!(recv_within(&mut rx, 300).await.is_none());
    }

    #[tokio::test]
    async fn test_initial_load_fetches_once_without_debounce() {
        let (tx, mut rx) = spawn_session(200);

        tx.send(Transition::InitialLoad).await.unwrap();
        let request = recv_within(&mut rx, 50).await.expect("initial fetch");
        assert_eq!(request.seq, 1);
        assert_eq!(page_of(&request), 1);

        // No debounce follow-up
        assert!(recv_within(&mut rx, 300).await.is_none());
    }

    #[tokio::test]
    async fn test_filter_edit_resets_to_first_page() {
        let (tx, mut rx) = spawn_session(50);

        tx.send(Transition::ChangePage(4)).await.unwrap();
        let request = recv_within(&mut rx, 50).await.unwrap();
        assert_eq!(page_of(&request), 4);

        tx.send(edit("backend")).await.unwrap();
        let request = recv_within(&mut rx, 300).await.expect("debounced fetch");
        assert_eq!(page_of(&request), 1);
    }

    #[tokio::test]
    async fn test_sequence_tokens_increase_per_fetch() {
        let (tx, mut rx) = spawn_session(10);

        tx.send(Transition::InitialLoad).await.unwrap();
        tx.send(Transition::ChangePage(2)).await.unwrap();
        tx.send(Transition::ChangePage(3)).await.unwrap();

        let seqs: Vec<u64> = [
            recv_within(&mut rx, 100).await.unwrap(),
            recv_within(&mut rx, 100).await.unwrap(),
            recv_within(&mut rx, 100).await.unwrap(),
        ]
        .iter()
        .map(|r| r.seq)
        .collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    fn page(ids: &[&str], total: u64) -> JobsPage {
        JobsPage {
            jobs: ids
                .iter()
                .map(|id| Job {
                    id: id.to_string(),
                    ..Default::default()
                })
                .collect(),
            total_jobs: total,
        }
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut results = ResultsState::new();
        results.begin(1);
        results.begin(2);

        // The slow first request resolves after the second was issued
        assert!(!results.complete(1, Ok(page(&["old"], 40))));
        assert!(results.jobs().is_empty());
        assert!(results.loading(), "newer request still in flight");

        assert!(results.complete(2, Ok(page(&["new"], 12))));
        assert_eq!(results.jobs()[0].id, "new");
        assert_eq!(results.total_jobs(), 12);
        assert!(!results.loading());
    }

    #[test]
    fn test_failed_fetch_clears_jobs_and_total() {
        let mut results = ResultsState::new();
        results.begin(1);
        assert!(results.complete(1, Ok(page(&["a", "b"], 23))));
        assert_eq!(results.total_jobs(), 23);

        results.begin(2);
        assert!(results.complete(2, Err(anyhow::anyhow!("backend down"))));
        assert!(results.jobs().is_empty());
        assert_eq!(results.total_jobs(), 0);
        assert!(!results.loading());
    }
}
