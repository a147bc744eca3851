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

//! Error taxonomy shared by the control plane, provisioning and data plane.

use crate::control_plane::ResourceKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unable to load credential '{}': {reason}", path.display())]
    Credentials { path: PathBuf, reason: String },

    #[error("unable to build TLS context: {0}")]
    Tls(String),

    #[error("control-plane request failed: {0}")]
    ControlPlane(#[from] reqwest::Error),

    #[error("control-plane returned HTTP {status} for {url}: {body}")]
    ControlPlaneStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("{kind} {id} reached terminal state {state}")]
    ProvisioningFailed {
        kind: ResourceKind,
        id: String,
        state: String,
    },

    #[error("{kind} {id} still REQUESTED after {attempts} status polls")]
    ProvisioningTimeout {
        kind: ResourceKind,
        id: String,
        attempts: u32,
    },

    #[error("{kind} {id} is CREATED but lists no endpoint")]
    NoEndpoint { kind: ResourceKind, id: String },

    #[error("endpoint has no {0} address")]
    MissingAddress(&'static str),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("link opened without send credit")]
    NoCredit,

    #[error("session worker failed: {0}")]
    Worker(String),
}

impl ClientError {
    pub(crate) fn transport(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport(format!("{context}: {err}"))
    }

    /// Data-plane failures; the only errors a reconnecting session retries.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
