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

//! Placeholder values and the worker context attached to structured fields.

pub const NONE: &str = "none";
pub const DEFAULT_WORKER_THREAD: &str = "unknown-thread";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkerContext {
    pub worker_id: String,
    pub worker_thread: String,
}

impl WorkerContext {
    pub fn new(worker_id: impl Into<String>, worker_thread: Option<&str>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: thread_name_or_default(worker_thread),
        }
    }

    pub fn with_current_thread(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: current_thread_name_or_default(),
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_WORKER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_context_falls_back_to_default_thread_name() {
        let context = WorkerContext::new("worker-1", None);
        assert_eq!(context.worker_id, "worker-1");
        assert_eq!(context.worker_thread, DEFAULT_WORKER_THREAD);
    }

    #[test]
    fn worker_context_keeps_explicit_thread_name() {
        let context = WorkerContext::new("worker-1", Some("actor-session"));
        assert_eq!(context.worker_thread, "actor-session");
    }

    #[test]
    fn thread_name_helper_uses_placeholder_for_unnamed_threads() {
        assert_eq!(thread_name_or_default(None), DEFAULT_WORKER_THREAD);
        assert_eq!(thread_name_or_default(Some("session-1")), "session-1");
    }

    #[test]
    fn with_current_thread_reads_named_thread() {
        let handle = std::thread::Builder::new()
            .name("named-for-test".to_string())
            .spawn(|| WorkerContext::with_current_thread("w"))
            .unwrap();
        assert_eq!(handle.join().unwrap().worker_thread, "named-for-test");
    }
}
