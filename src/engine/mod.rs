//! Engine modules: text edits, file operations and the step pipeline.
//!
//! The engine knows nothing about Rails. It applies ordered, labelled
//! operation lists to a project tree; the recipe decides what goes in them.

pub mod ops;
pub mod pipeline;
pub mod text;
