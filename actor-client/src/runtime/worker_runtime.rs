/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Runtime helper for running one data-plane session on a dedicated thread.
//!
//! The worker thread owns a single-threaded Tokio runtime; every protocol callback of
//! its connection runs there, one after another.

use crate::error::ClientError;
use crate::observability::events;
use std::future::Future;
use std::thread;
use std::time::Duration;
use tokio::runtime::Builder;
use tracing::{debug, warn};

pub(crate) const DEFAULT_SESSION_WORKER_THREAD_NAME: &str = "actor-session";
const SESSION_WORKER_THREAD_NAME_MAX_LEN: usize = 15;
const COMPONENT: &str = "worker_runtime";

/// Handle to a spawned session worker.
pub(crate) struct SessionWorkerHandle {
    worker_thread: String,
    join_handle: thread::JoinHandle<Result<(), ClientError>>,
}

impl SessionWorkerHandle {
    pub(crate) fn is_finished(&self) -> bool {
        self.join_handle.is_finished()
    }

    /// Waits for the worker to end, checking its liveness every `check_interval`.
    pub(crate) async fn wait(self, check_interval: Duration) -> Result<(), ClientError> {
        while !self.is_finished() {
            tokio::time::sleep(check_interval).await;
        }

        let result = self
            .join_handle
            .join()
            .map_err(|_| ClientError::Worker(format!("{} panicked", self.worker_thread)))?;

        debug!(
            event = events::WORKER_EXITED,
            component = COMPONENT,
            worker_thread = self.worker_thread.as_str(),
            ok = result.is_ok(),
            "session worker exited"
        );
        result
    }
}

fn sanitize_thread_name(thread_name: String) -> String {
    let valid = !thread_name.is_empty()
        && thread_name.len() <= SESSION_WORKER_THREAD_NAME_MAX_LEN
        && !thread_name.contains('\0');

    if valid {
        thread_name
    } else {
        warn!(
            event = events::RUNTIME_THREAD_NAME_FALLBACK,
            component = COMPONENT,
            requested = thread_name.as_str(),
            fallback = DEFAULT_SESSION_WORKER_THREAD_NAME,
            "invalid session worker thread name; using fallback"
        );
        DEFAULT_SESSION_WORKER_THREAD_NAME.to_string()
    }
}

/// Spawns `run` on its own thread with a current-thread runtime.
///
/// The future is built on the worker thread, so it does not have to be `Send`.
pub(crate) fn spawn_session_worker<F, Fut>(
    thread_name: String,
    run: F,
) -> Result<SessionWorkerHandle, ClientError>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), ClientError>> + 'static,
{
    let worker_thread = sanitize_thread_name(thread_name);

    let join_handle = thread::Builder::new()
        .name(worker_thread.clone())
        .spawn(move || {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| ClientError::Worker(format!("unable to build runtime: {e}")))?;

            runtime.block_on(run())
        })
        .map_err(|e| ClientError::Worker(format!("unable to spawn worker thread: {e}")))?;

    debug!(
        event = events::WORKER_SPAWN_OK,
        component = COMPONENT,
        worker_thread = worker_thread.as_str(),
        "session worker spawned"
    );

    Ok(SessionWorkerHandle {
        worker_thread,
        join_handle,
    })
}

/// Thread name for the worker of one session, derived from its id.
pub(crate) fn session_thread_name(worker_id: &str) -> String {
    let suffix: String = worker_id
        .chars()
        .filter(|ch| ch.is_ascii_hexdigit())
        .take(SESSION_WORKER_THREAD_NAME_MAX_LEN - "actor-".len())
        .collect();

    if suffix.is_empty() {
        DEFAULT_SESSION_WORKER_THREAD_NAME.to_string()
    } else {
        format!("actor-{suffix}")
    }
}
