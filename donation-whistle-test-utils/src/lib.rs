//! Test utilities for the donation server.
//!
//! Tests are set up in two phases. [`TestBuilder`] declares the tables and fixtures a test
//! needs, then `build()` returns a [`TestContext`] backed by an in-memory SQLite database
//! that the test runs against.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        fixtures::record::factory, TestBuilder, TestContext, TestError,
    };
}
