// src/output/mod.rs

//! Everything that touches artifacts after compilation: writing and removing
//! them ([`writer`]) and the optional post-process hook ([`post_process`]).

pub mod post_process;
pub mod writer;

pub use post_process::{
    BatchCallback, CommandFormatter, NoopFormatter, OutputFormatter, PostProcessHook,
};
pub use writer::ArtifactWriter;
