#![allow(dead_code, unused_imports)]

pub use mdxwatch_test_utils::{builders, fakes, init_tracing, with_timeout};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
