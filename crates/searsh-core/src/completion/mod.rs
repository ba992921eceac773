// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Auto-completion pipeline.
//!
//! Completion runs in three stages, independently of evaluation:
//!
//! 1. [`tokenize`] scans backward from the cursor and extracts the
//!    access chain as [`Identifier`]s;
//! 2. [`CompletionEngine`] resolves all but the last identifier against
//!    the live scope, switching to registry-backed type inference when a
//!    constructor or a typed method is met;
//! 3. the last (partial) identifier selects the candidate list.

mod engine;
mod identifier;
mod tokenizer;


pub use engine::{Completion, CompletionEngine, DEFAULT_EXCLUDED};
pub use identifier::Identifier;
pub use tokenizer::tokenize;
