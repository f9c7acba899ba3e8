//! Candidate selection for ranking.
//!
//! Keeps the `k` smallest distances with deterministic tie-breaking.

pub(crate) mod topk;
