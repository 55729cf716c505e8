//! Tests for import controller endpoints.

mod get_import_job;
mod start_import;

use super::*;
