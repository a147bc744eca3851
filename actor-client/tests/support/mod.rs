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

#![allow(dead_code)]

use actor_client::codec::{InboundMessage, OutboundMessage};
use actor_client::control_plane::{
    ControlPlane, ResourceKind, ResourceRequest, ResourceState, ResourceStatus,
};
use actor_client::data_plane::{DataPlane, InboundLink, LinkCredit, OutboundLink, Settlement};
use actor_client::{
    ClientConfig, ClientError, Credentials, EndpointDescriptor, ProvisioningConfig, RouteConfig,
    WireEndpoint, WirePort,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

pub(crate) fn dummy_credentials() -> Credentials {
    Credentials {
        cert_chain_and_key_pem: "certs/actor.pem".into(),
        ca_certificate_pem: "certs/ca.pem".into(),
    }
}

pub(crate) fn provisioned_config() -> ClientConfig {
    ClientConfig::new(
        dummy_credentials(),
        RouteConfig::Provisioned(ProvisioningConfig {
            api_host: "api.example.com".to_string(),
            api_port: 443,
            selector: "orders".to_string(),
            common_name: "actor-1".to_string(),
        }),
        r#"{"region": "eu"}"#,
    )
    .unwrap()
}

pub(crate) fn wire_endpoint(host: &str, port: WirePort) -> WireEndpoint {
    WireEndpoint {
        host: host.to_string(),
        port,
        target: Some("deliveries/d-1".to_string()),
        source: Some("subscriptions/s-1".to_string()),
    }
}

pub(crate) fn requested(id: &str) -> ResourceStatus {
    ResourceStatus {
        id: id.to_string(),
        status: ResourceState::Requested,
        endpoints: Vec::new(),
    }
}

pub(crate) fn created(id: &str, endpoints: Vec<WireEndpoint>) -> ResourceStatus {
    ResourceStatus {
        id: id.to_string(),
        status: ResourceState::Created,
        endpoints,
    }
}

pub(crate) fn terminal(id: &str, state: &str) -> ResourceStatus {
    ResourceStatus {
        id: id.to_string(),
        status: ResourceState::Other(state.to_string()),
        endpoints: Vec::new(),
    }
}

/// Control plane answering status reads from a fixed script.
///
/// Once the script is exhausted its last entry is repeated.
pub(crate) struct ScriptedControlPlane {
    id: String,
    statuses: Mutex<VecDeque<ResourceStatus>>,
    last: Mutex<Option<ResourceStatus>>,
    kinds: Mutex<Vec<ResourceKind>>,
    creates: AtomicUsize,
    gets: AtomicUsize,
}

impl ScriptedControlPlane {
    pub(crate) fn new(id: &str, statuses: Vec<ResourceStatus>) -> Self {
        Self {
            id: id.to_string(),
            statuses: Mutex::new(statuses.into()),
            last: Mutex::new(None),
            kinds: Mutex::new(Vec::new()),
            creates: AtomicUsize::new(0),
            gets: AtomicUsize::new(0),
        }
    }

    pub(crate) fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub(crate) fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub(crate) fn kinds(&self) -> Vec<ResourceKind> {
        self.kinds.lock().unwrap().clone()
    }
}

#[async_trait]
impl ControlPlane for ScriptedControlPlane {
    async fn create(
        &self,
        kind: ResourceKind,
        _request: &ResourceRequest,
    ) -> Result<ResourceStatus, ClientError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.kinds.lock().unwrap().push(kind);
        Ok(requested(&self.id))
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<ResourceStatus, ClientError> {
        assert_eq!(id, self.id, "status read for an unknown resource");
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.kinds.lock().unwrap().push(kind);

        let next = self.statuses.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(status) = next {
            *last = Some(status);
        }
        last.clone().ok_or_else(|| ClientError::ControlPlaneStatus {
            status: 404,
            url: format!("/{}/{id}", kind.collection()),
            body: String::new(),
        })
    }

    async fn delete(&self, _kind: ResourceKind, _id: &str) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Data plane that records the endpoints it was asked to use.
#[derive(Default)]
pub(crate) struct RecordingDataPlane {
    endpoints: Mutex<Vec<EndpointDescriptor>>,
}

impl RecordingDataPlane {
    pub(crate) fn endpoints(&self) -> Vec<EndpointDescriptor> {
        self.endpoints.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataPlane for RecordingDataPlane {
    async fn run_session(&self, endpoint: EndpointDescriptor) -> Result<(), ClientError> {
        self.endpoints.lock().unwrap().push(endpoint);
        Ok(())
    }
}

/// Sending link that settles every message and detaches after `capacity` sends.
pub(crate) struct FakeOutboundLink {
    pub(crate) credit: LinkCredit,
    pub(crate) settlement: Settlement,
    pub(crate) capacity: usize,
    pub(crate) sent: Vec<OutboundMessage>,
    pub(crate) sent_at: Vec<tokio::time::Instant>,
}

impl FakeOutboundLink {
    pub(crate) fn new(credit: LinkCredit, capacity: usize) -> Self {
        Self {
            credit,
            settlement: Settlement::Accepted,
            capacity,
            sent: Vec::new(),
            sent_at: Vec::new(),
        }
    }

    pub(crate) fn bodies(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|message| message.body_text().into_owned())
            .collect()
    }
}

#[async_trait(?Send)]
impl OutboundLink for FakeOutboundLink {
    fn credit(&self) -> LinkCredit {
        self.credit
    }

    async fn send(&mut self, message: &OutboundMessage) -> Result<Settlement, ClientError> {
        self.sent.push(message.clone());
        self.sent_at.push(tokio::time::Instant::now());
        if self.sent.len() >= self.capacity {
            return Err(ClientError::Transport("link detached".to_string()));
        }
        Ok(self.settlement.clone())
    }
}

/// Receiving link that replays queued messages, then detaches.
pub(crate) struct FakeInboundLink {
    pub(crate) queued: VecDeque<InboundMessage>,
    pub(crate) fail_accept: bool,
    pub(crate) accepted: usize,
}

impl FakeInboundLink {
    pub(crate) fn new(messages: Vec<InboundMessage>) -> Self {
        Self {
            queued: messages.into(),
            fail_accept: false,
            accepted: 0,
        }
    }
}

#[async_trait(?Send)]
impl InboundLink for FakeInboundLink {
    async fn recv(&mut self) -> Result<InboundMessage, ClientError> {
        self.queued
            .pop_front()
            .ok_or_else(|| ClientError::Transport("link detached".to_string()))
    }

    async fn accept(&mut self) -> Result<(), ClientError> {
        if self.fail_accept {
            return Err(ClientError::Transport("disposition refused".to_string()));
        }
        self.accepted += 1;
        Ok(())
    }
}
