// src/compile/mod.rs

//! Compiler layer.
//!
//! - [`invoker`] defines the `CompileCallback` trait, the default
//!   `IdentityCompiler` and the `CompileInvoker` the pipeline calls.
//! - [`command`] provides `CommandCompiler`, which pipes source text through
//!   an external command.

pub mod command;
pub mod invoker;

pub use command::CommandCompiler;
pub use invoker::{CompileCallback, CompileInvoker, IdentityCompiler};
