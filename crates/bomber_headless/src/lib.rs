//! # Bomber Headless
//!
//! Local arena runner for exercising agent sessions end to end without a
//! ledger. Contains a miniature rules engine (movement, fuses, blast
//! resolution), a scenario loader for wire-format snapshots, and an ASCII
//! view for terminal review.
//!
//! Exact parity with the on-chain program is not a goal here; the runner
//! exists to drive the intelligence core through realistic multi-tick
//! matches.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod scenario;
pub mod sim;
pub mod view;
