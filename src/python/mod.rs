//! Python bindings for the memory-match engine.
//!
//! # Quick Start
//!
//! ```python
//! import memory_match as mm
//!
//! engine = mm.MatchEngine(seed=42)
//! engine.start_game()              # the six classic faces
//!
//! engine.reveal_card(0)
//! engine.reveal_card(1)
//! engine.advance_ms(1000)          # mismatches flip back here
//!
//! obs = engine.observation()       # numpy array, shape engine.observation_shape
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

/// memory_match: a deterministic memory-matching game engine.
#[pymodule]
fn memory_match(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMatchEngine>()?;
    Ok(())
}
