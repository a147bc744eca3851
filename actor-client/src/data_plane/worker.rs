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

//! Runs data-plane sessions on dedicated worker threads.

use super::AmqpSession;
use crate::codec::ApplicationProperties;
use crate::config::SessionPolicy;
use crate::endpoint::{EndpointDescriptor, LinkRole};
use crate::error::ClientError;
use crate::observability::events;
use crate::observability::fields::WorkerContext;
use crate::runtime::worker_runtime::{session_thread_name, spawn_session_worker};
use crate::tls::TlsContext;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

const COMPONENT: &str = "data_plane";

/// Runs the data-plane session for a resolved endpoint until it ends.
#[async_trait]
pub trait DataPlane: Send + Sync {
    async fn run_session(&self, endpoint: EndpointDescriptor) -> Result<(), ClientError>;
}

pub struct AmqpDataPlane {
    role: LinkRole,
    properties: ApplicationProperties,
    policy: SessionPolicy,
    tls: Arc<TlsContext>,
}

impl AmqpDataPlane {
    pub fn new(
        role: LinkRole,
        properties: ApplicationProperties,
        policy: SessionPolicy,
        tls: Arc<TlsContext>,
    ) -> Self {
        Self {
            role,
            properties,
            policy,
            tls,
        }
    }
}

#[async_trait]
impl DataPlane for AmqpDataPlane {
    async fn run_session(&self, endpoint: EndpointDescriptor) -> Result<(), ClientError> {
        let worker_id = Uuid::new_v4().to_string();
        let thread_name = session_thread_name(&worker_id);

        let role = self.role;
        let properties = self.properties.clone();
        let policy = self.policy;
        let tls = self.tls.clone();

        let handle = spawn_session_worker(thread_name, move || async move {
            let context = WorkerContext::with_current_thread(worker_id);
            run_with_reconnect(&policy, &context, || {
                let mut session = AmqpSession::new(
                    endpoint.clone(),
                    role,
                    properties.clone(),
                    policy,
                    tls.clone(),
                    context.clone(),
                );
                async move { session.run().await }
            })
            .await
        })?;

        handle.wait(self.policy.worker_check_interval()).await
    }
}

/// Runs `attempt` until it returns anything other than a retryable transport error.
///
/// Without `policy.reconnect` the first outcome is returned as is. Every retry
/// targets the same endpoint after `policy.reconnect_delay()`.
pub(crate) async fn run_with_reconnect<F, Fut>(
    policy: &SessionPolicy,
    context: &WorkerContext,
    mut attempt: F,
) -> Result<(), ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), ClientError>>,
{
    loop {
        match attempt().await {
            Err(err) if policy.reconnect && err.is_transport() => {
                warn!(
                    event = events::WORKER_RECONNECT,
                    component = COMPONENT,
                    worker_id = context.worker_id.as_str(),
                    worker_thread = context.worker_thread.as_str(),
                    err = %err,
                    delay_ms = policy.reconnect_delay_ms,
                    "session failed; reconnecting"
                );
                tokio::time::sleep(policy.reconnect_delay()).await;
            }
            other => return other,
        }
    }
}
