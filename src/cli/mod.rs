//! Command Line Interface (CLI) layer.
//!
//! This module defines argument parsing (`args`) and the orchestration entry
//! point (`runner`) that wires user-provided options to the library pipeline.
//!
//! If you are embedding the pipeline into another application, prefer the
//! `aquapig::pipeline` module instead of calling the CLI code.
pub mod args;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
