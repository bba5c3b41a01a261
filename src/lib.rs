//! Mathpipe - line-oriented bridge to a math typesetting engine
//!
//! This crate implements the protocol shell around an external
//! TeX/MathML/AsciiMath → SVG converter: it assembles the engine
//! configuration at startup, then reads one JSON request per stdin line and
//! writes one JSON response per line to stdout, correlated by id.
//!
//! The crate can be used in two modes:
//! - **Standalone binary**: the `mathpipe` process driven over stdio
//! - **In-process library**: for integration tests with the mock engine

pub mod config;
pub mod engine;
pub mod serve;

pub use engine::{CommandEngine, Engine, EngineError, MockEngine};
pub use serve::serve;
