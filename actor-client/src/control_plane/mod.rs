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

//! Control-plane layer.
//!
//! Thin REST contract for provisioned resources (`POST /{kind}`, `GET /{kind}/{id}`,
//! `DELETE /{kind}/{id}`). No retries happen here; retry policy belongs to the caller.

mod http_client;
pub use http_client::HttpControlPlane;

use crate::endpoint::{LinkRole, WireEndpoint};
use crate::error::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource the control plane provisions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    Delivery,
    Subscription,
}

impl ResourceKind {
    /// Path segment of the resource collection.
    pub fn collection(&self) -> &'static str {
        match self {
            ResourceKind::Delivery => "deliveries",
            ResourceKind::Subscription => "subscriptions",
        }
    }

    pub fn link_role(&self) -> LinkRole {
        match self {
            ResourceKind::Delivery => LinkRole::Sender,
            ResourceKind::Subscription => LinkRole::Receiver,
        }
    }

    pub fn for_role(role: LinkRole) -> Self {
        match role {
            LinkRole::Sender => ResourceKind::Delivery,
            LinkRole::Receiver => ResourceKind::Subscription,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Delivery => f.write_str("Delivery"),
            ResourceKind::Subscription => f.write_str("Subscription"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ResourceRequest {
    pub selector: String,
}

/// Provisioning state reported in a status document.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceState {
    Requested,
    Created,
    /// Any other terminal state, kept verbatim.
    Other(String),
}

impl ResourceState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ResourceState::Requested)
    }
}

impl From<String> for ResourceState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "REQUESTED" => ResourceState::Requested,
            "CREATED" => ResourceState::Created,
            _ => ResourceState::Other(raw),
        }
    }
}

impl From<ResourceState> for String {
    fn from(state: ResourceState) -> Self {
        match state {
            ResourceState::Requested => "REQUESTED".to_string(),
            ResourceState::Created => "CREATED".to_string(),
            ResourceState::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceState::Requested => f.write_str("REQUESTED"),
            ResourceState::Created => f.write_str("CREATED"),
            ResourceState::Other(raw) => f.write_str(raw),
        }
    }
}

/// Status document returned by create and get.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ResourceStatus {
    pub id: String,
    pub status: ResourceState,
    #[serde(default)]
    pub endpoints: Vec<WireEndpoint>,
}

impl ResourceStatus {
    /// Indented JSON, the shape status documents are logged in.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn create(
        &self,
        kind: ResourceKind,
        request: &ResourceRequest,
    ) -> Result<ResourceStatus, ClientError>;

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<ResourceStatus, ClientError>;

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), ClientError>;
}
