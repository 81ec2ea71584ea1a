//! High-level pipeline.
//!
//! This module is the glue between the stages:
//! segmentation -> rotation estimate -> re-rotation (repeated) -> scale solve,
//! and for the test pass: rotation -> segmentation -> coordinate transform.
//!
//! Algorithmic primitives live in `crate::segment`, `crate::rotation`,
//! `crate::calibrate` and `crate::transform`. The pipeline layer owns call
//! order and data flow only.
//!
//! Entry points:
//! - `calibrate`: convergence loop followed by the scale solve
//! - `locate`: one test pass with an existing calibration
//! - [`Session`]: both, wired to the external providers

mod result;
mod run;
mod session;

pub use result::{CalibrationOutcome, LocateOutcome, SessionReport, TestPass};
pub use session::Session;

pub(crate) use run::{calibrate, locate};
