//! Debounced recalculation for interactive editing.
//!
//! Edits land on the input immediately; the engine runs once the input has
//! been quiet for the debounce window, so a burst of keystrokes costs a single
//! calculation. The latest result is published on a watch channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::pricing::{PricingError, PricingTables, ProposalCalculator, ProposalInput, ProposalOutput};
use crate::domain::proposal::{DraftSnapshot, DraftState, InputEdit};

/// Default quiet window before recalculating.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

pub type CalculationResult = Result<ProposalOutput, PricingError>;

/// Holds an editable input and keeps its priced output current.
///
/// Must be created inside a tokio runtime. The background task stops when the
/// recalculator is dropped.
pub struct DebouncedRecalculator {
    tables: Arc<PricingTables>,
    input_tx: watch::Sender<ProposalInput>,
    output_tx: Arc<watch::Sender<CalculationResult>>,
    recomputes: Arc<AtomicU64>,
    task: JoinHandle<()>,
}

impl DebouncedRecalculator {
    /// Starts from the default input with the default window.
    pub fn new(tables: Arc<PricingTables>) -> Self {
        Self::with_input(tables, ProposalInput::default(), DEFAULT_DEBOUNCE)
    }

    /// Starts from `input`. The initial output is computed before returning.
    pub fn with_input(tables: Arc<PricingTables>, input: ProposalInput, window: Duration) -> Self {
        let initial = ProposalCalculator::compute(&input, &tables);
        let (input_tx, input_rx) = watch::channel(input);
        let (output_tx, _) = watch::channel(initial);
        let output_tx = Arc::new(output_tx);
        let recomputes = Arc::new(AtomicU64::new(0));

        let task = tokio::spawn(run(
            input_rx,
            Arc::clone(&output_tx),
            Arc::clone(&tables),
            window,
            Arc::clone(&recomputes),
        ));

        Self {
            tables,
            input_tx,
            output_tx,
            recomputes,
            task,
        }
    }

    /// Applies an edit to the current input. Recalculation follows after the window.
    pub fn apply(&self, edit: InputEdit) {
        self.input_tx.send_modify(|input| *input = input.apply(edit));
    }

    /// Current input, including edits not yet priced.
    pub fn input(&self) -> ProposalInput {
        self.input_tx.borrow().clone()
    }

    /// Latest published result.
    pub fn output(&self) -> CalculationResult {
        self.output_tx.borrow().clone()
    }

    /// Receiver that is notified whenever a new result is published.
    pub fn subscribe(&self) -> watch::Receiver<CalculationResult> {
        self.output_tx.subscribe()
    }

    /// Number of debounced engine runs so far.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes.load(Ordering::SeqCst)
    }

    /// Restores the default input and publishes its output immediately.
    pub fn reset(&self) {
        let input = ProposalInput::default();
        let output = ProposalCalculator::compute(&input, &self.tables);
        self.input_tx.send_replace(input);
        self.output_tx.send_replace(output);
    }

    /// Versioned draft of the current state, for persisting between sessions.
    ///
    /// Returns the calculation error if the current input cannot be priced.
    pub fn snapshot(&self) -> Result<DraftSnapshot, PricingError> {
        let input = self.input();
        let output = ProposalCalculator::compute(&input, &self.tables)?;
        Ok(DraftSnapshot::current(DraftState { input, output }))
    }
}

impl Drop for DebouncedRecalculator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut input_rx: watch::Receiver<ProposalInput>,
    output_tx: Arc<watch::Sender<CalculationResult>>,
    tables: Arc<PricingTables>,
    window: Duration,
    recomputes: Arc<AtomicU64>,
) {
    while input_rx.changed().await.is_ok() {
        // Every further edit restarts the window.
        loop {
            match tokio::time::timeout(window, input_rx.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => return,
                Err(_) => break,
            }
        }

        let input = input_rx.borrow_and_update().clone();
        let result = ProposalCalculator::compute(&input, &tables);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Recalculation failed");
        }
        recomputes.fetch_add(1, Ordering::SeqCst);
        output_tx.send_replace(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::{Discipline, Scope};

    const WINDOW: Duration = Duration::from_millis(40);
    const SETTLE: Duration = Duration::from_millis(200);

    fn recalculator() -> DebouncedRecalculator {
        DebouncedRecalculator::with_input(
            Arc::new(PricingTables::defaults().clone()),
            ProposalInput::default(),
            WINDOW,
        )
    }

    #[tokio::test]
    async fn initial_output_is_available_immediately() {
        let recalc = recalculator();
        assert_eq!(recalc.output().unwrap().total_fee, 1_873_350_000);
        assert_eq!(recalc.recompute_count(), 0);
    }

    #[tokio::test]
    async fn edits_apply_to_input_before_recalculation() {
        let recalc = recalculator();
        recalc.apply(InputEdit::AreaHa(50.0));

        assert_eq!(recalc.input().area_ha, 50.0);
        assert_eq!(recalc.output().unwrap().billable_area, 100.0);
    }

    #[tokio::test]
    async fn burst_of_edits_triggers_one_recalculation() {
        let recalc = recalculator();
        for area in [10.0, 20.0, 30.0, 40.0, 50.0] {
            recalc.apply(InputEdit::AreaHa(area));
        }

        tokio::time::sleep(SETTLE).await;

        assert_eq!(recalc.recompute_count(), 1);
        assert_eq!(recalc.output().unwrap().billable_area, 50.0);
    }

    #[tokio::test]
    async fn subscribers_see_new_results() {
        let recalc = recalculator();
        let mut rx = recalc.subscribe();

        recalc.apply(InputEdit::Scope(Scope::Diagnostic));
        tokio::time::timeout(SETTLE, rx.changed()).await.unwrap().unwrap();

        assert_eq!(rx.borrow().as_ref().unwrap().phase_breakdown.len(), 1);
    }

    #[tokio::test]
    async fn reset_restores_default_state() {
        let recalc = recalculator();
        recalc.apply(InputEdit::Discipline(Discipline::Interior));
        tokio::time::sleep(SETTLE).await;

        recalc.reset();

        assert_eq!(recalc.input(), ProposalInput::default());
        assert_eq!(recalc.output().unwrap().total_fee, 1_873_350_000);
    }

    #[tokio::test]
    async fn snapshot_carries_current_schema_version() {
        let recalc = recalculator();
        recalc.apply(InputEdit::AreaHa(12.5));

        let snapshot = recalc.snapshot().unwrap();

        assert_eq!(snapshot.version, 3);
        assert_eq!(snapshot.state.input.area_ha, 12.5);
        assert_eq!(snapshot.state.output.billable_area, 12.5);
    }
}
