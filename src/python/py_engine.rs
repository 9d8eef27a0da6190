//! Engine bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::cards::{CardPosition, CardStatus};
use crate::core::{EngineConfig, TokenSet};
use crate::engine::MatchEngine;

fn status_name(status: CardStatus) -> &'static str {
    match status {
        CardStatus::Hidden => "hidden",
        CardStatus::Revealed => "revealed",
        CardStatus::Matched => "matched",
    }
}

/// Python wrapper for MatchEngine.
#[pyclass(name = "MatchEngine")]
pub struct PyMatchEngine {
    engine: MatchEngine,
}

#[pymethods]
impl PyMatchEngine {
    /// Create an idle engine.
    ///
    /// # Arguments
    /// - seed: shuffle seed, or None for an OS-seeded engine
    /// - tick_interval_ms: clock period
    /// - mismatch_delay_ms: how long a mismatched pair stays face-up
    #[new]
    #[pyo3(signature = (seed = None, tick_interval_ms = 1000, mismatch_delay_ms = 1000))]
    fn new(seed: Option<u64>, tick_interval_ms: u64, mismatch_delay_ms: u64) -> PyResult<Self> {
        let config = EngineConfig {
            tick_interval_ms,
            mismatch_delay_ms,
            seed,
        };
        let engine =
            MatchEngine::new(config).map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?;
        Ok(Self { engine })
    }

    /// Deal a new game. Uses the classic faces when `tokens` is None.
    #[pyo3(signature = (tokens = None))]
    fn start_game(&mut self, tokens: Option<Vec<String>>) -> PyResult<()> {
        let set = match tokens {
            Some(tokens) => {
                TokenSet::new(tokens).map_err(|e| PyErr::new::<PyValueError, _>(e.to_string()))?
            }
            None => TokenSet::classic(),
        };
        self.engine.start_game(&set);
        Ok(())
    }

    /// Reveal a card. Returns False if the reveal was ignored.
    fn reveal_card(&mut self, position: usize) -> bool {
        self.engine.reveal_card(CardPosition::new(position)).is_some()
    }

    /// Advance the virtual clock.
    fn advance_ms(&mut self, elapsed_ms: u64) {
        self.engine.advance_ms(elapsed_ms);
    }

    /// Status of every card: "hidden", "revealed" or "matched".
    fn statuses(&self) -> Vec<&'static str> {
        self.engine.statuses().into_iter().map(status_name).collect()
    }

    /// A card's token, or None while it is face-down.
    fn visible_token(&self, position: usize) -> Option<String> {
        self.engine
            .visible_token(CardPosition::new(position))
            .map(|token| token.as_str().to_string())
    }

    #[getter]
    fn moves(&self) -> u32 {
        self.engine.moves()
    }

    #[getter]
    fn elapsed_seconds(&self) -> u64 {
        self.engine.elapsed_seconds()
    }

    #[getter]
    fn matched_pairs(&self) -> usize {
        self.engine.matched_pairs()
    }

    #[getter]
    fn total_pairs(&self) -> usize {
        self.engine.total_pairs()
    }

    fn is_won(&self) -> bool {
        self.engine.is_won()
    }

    /// The win message, once the game is won.
    fn win_message(&self) -> Option<String> {
        self.engine.win().map(|win| win.to_string())
    }

    /// Board encoding as a flat numpy array.
    fn observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_slice_bound(py, &self.engine.observation())
    }

    /// Shape of `observation()` as (cards, features).
    #[getter]
    fn observation_shape(&self) -> (usize, usize) {
        let [cards, features] = self.engine.observation_shape();
        (cards, features)
    }

    fn __repr__(&self) -> String {
        format!(
            "MatchEngine(phase={:?}, moves={}, elapsed={}s, pairs={}/{})",
            self.engine.phase(),
            self.engine.moves(),
            self.engine.elapsed_seconds(),
            self.engine.matched_pairs(),
            self.engine.total_pairs()
        )
    }
}
