//! Worker (C8): long-running process that polls the job queue, runs the
//! deploy pipeline, and reports status back through the store (§4.5).

pub mod materialize;
pub mod worker;

pub use worker::Worker;
