//! Tests for HTTP controller endpoints.

mod alias;
mod import;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use donation_whistle::server::service::cache::ResponseCache;
use donation_whistle_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};
