//! Background minutes generation
//!
//! A single worker task runs the whole extract, prompt, complete, render and
//! save sequence. Progress is reported through an append-only log channel;
//! the worker's join handle carries the final result.

mod log;
mod run;

pub use log::{drain, LogEntry, LogLevel, LogReceiver, LogSink};
pub use run::{output_file_name, Pipeline, RunHandle, RunReport, RunRequest};
