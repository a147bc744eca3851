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

//! Create, poll to a terminal state, resolve the endpoint.
//!
//! `REQUESTED -> { CREATED, <other terminal> }`. Polling sleeps a fixed interval
//! between status reads and is unbounded unless [`PollPolicy::max_attempts`] is set.

use crate::config::PollPolicy;
use crate::control_plane::{
    ControlPlane, ResourceKind, ResourceRequest, ResourceState, ResourceStatus,
};
use crate::endpoint::EndpointDescriptor;
use crate::error::ClientError;
use crate::observability::events;
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "provisioning";

pub struct Provisioner {
    control_plane: Arc<dyn ControlPlane>,
    kind: ResourceKind,
    policy: PollPolicy,
}

impl Provisioner {
    pub fn new(
        control_plane: Arc<dyn ControlPlane>,
        kind: ResourceKind,
        policy: PollPolicy,
    ) -> Self {
        Self {
            control_plane,
            kind,
            policy,
        }
    }

    /// Runs the whole state machine and returns the endpoint of a CREATED resource.
    ///
    /// Any terminal state other than CREATED is reported as
    /// [`ClientError::ProvisioningFailed`]; the created resource is left in place.
    pub async fn provision(&self, selector: &str) -> Result<EndpointDescriptor, ClientError> {
        let request = ResourceRequest {
            selector: selector.to_string(),
        };
        let created = self.control_plane.create(self.kind, &request).await?;
        info!(
            event = events::PROVISION_CREATE_RESPONSE,
            component = COMPONENT,
            "{} create response: {}",
            self.kind,
            created.to_pretty_json()
        );

        let status = self.await_terminal(&created.id).await?;
        match &status.status {
            ResourceState::Created => {
                info!(
                    event = events::PROVISION_CREATED,
                    component = COMPONENT,
                    kind = %self.kind,
                    id = status.id.as_str(),
                    "resource created"
                );
                select_endpoint(self.kind, &status)
            }
            state => {
                warn!(
                    event = events::PROVISION_UNUSABLE,
                    component = COMPONENT,
                    state = %state,
                    "Unable to use {} {}",
                    self.kind,
                    created.id
                );
                Err(ClientError::ProvisioningFailed {
                    kind: self.kind,
                    id: created.id,
                    state: state.to_string(),
                })
            }
        }
    }

    /// Reads the status of `id` until it leaves REQUESTED.
    pub async fn await_terminal(&self, id: &str) -> Result<ResourceStatus, ClientError> {
        let mut attempts: u32 = 1;
        let mut status = self.control_plane.get(self.kind, id).await?;
        self.log_status(id, &status);

        while status.status == ResourceState::Requested {
            if let Some(max_attempts) = self.policy.max_attempts {
                if attempts >= max_attempts {
                    warn!(
                        event = events::PROVISION_TIMEOUT,
                        component = COMPONENT,
                        kind = %self.kind,
                        id,
                        attempts,
                        "giving up on status polling"
                    );
                    return Err(ClientError::ProvisioningTimeout {
                        kind: self.kind,
                        id: id.to_string(),
                        attempts,
                    });
                }
            }

            tokio::time::sleep(self.policy.interval()).await;
            status = self.control_plane.get(self.kind, id).await?;
            attempts += 1;
            debug!(
                event = events::PROVISION_POLL,
                component = COMPONENT,
                kind = %self.kind,
                id,
                attempts,
                state = %status.status,
                "polled status"
            );
        }

        self.log_status(id, &status);
        Ok(status)
    }

    fn log_status(&self, id: &str, status: &ResourceStatus) {
        info!(
            event = events::PROVISION_STATUS_RESPONSE,
            component = COMPONENT,
            "{} {} status response: {}",
            self.kind,
            id,
            status.to_pretty_json()
        );
    }
}

/// Resolves the endpoint of a CREATED status.
///
/// An empty list is an error. With several entries the first one is used and the
/// rest are reported.
pub fn select_endpoint(
    kind: ResourceKind,
    status: &ResourceStatus,
) -> Result<EndpointDescriptor, ClientError> {
    let Some((first, ignored)) = status.endpoints.split_first() else {
        return Err(ClientError::NoEndpoint {
            kind,
            id: status.id.clone(),
        });
    };

    if !ignored.is_empty() {
        warn!(
            event = events::ENDPOINT_EXTRA_IGNORED,
            component = COMPONENT,
            kind = %kind,
            id = status.id.as_str(),
            count = ignored.len(),
            "status lists more than one endpoint; using the first"
        );
    }

    let endpoint = first.resolve(kind.link_role())?;
    info!(
        event = events::ENDPOINT_SELECTED,
        component = COMPONENT,
        "Using endpoint {endpoint}"
    );
    Ok(endpoint)
}
