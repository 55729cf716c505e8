use donation_whistle_test_utils::prelude::*;

use crate::server::worker::queue::WorkerQueue;
