//! Deterministic interpretation of a depth window.
//!
//! Produces the same structured schema the generative backend returns, built
//! purely from curve statistics and queried rows. Used as the fallback when no
//! backend is configured or a backend call fails, so interpretation always
//! yields a result.

mod fallback;

pub use fallback::fallback_interpretation;
