//! Tests for alias controller endpoints.

mod create_alias;
mod delete_alias;
mod export_aliases;
mod get_alias;
mod import_aliases;
mod list_aliases;
mod remove_donor;
mod update_alias;

use super::*;
