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

//! Orchestration: resolve an endpoint, then run the data-plane session against it.

use crate::config::{ClientConfig, RouteConfig};
use crate::control_plane::{ControlPlane, HttpControlPlane, ResourceKind};
use crate::data_plane::{AmqpDataPlane, DataPlane};
use crate::endpoint::{EndpointDescriptor, LinkRole};
use crate::error::ClientError;
use crate::observability::events;
use crate::provisioning::Provisioner;
use crate::tls::TlsContext;
use std::sync::Arc;
use tracing::info;

const COMPONENT: &str = "client";

pub struct ActorClient {
    config: Arc<ClientConfig>,
    role: LinkRole,
    control_plane: Option<Arc<dyn ControlPlane>>,
    data_plane: Arc<dyn DataPlane>,
}

impl ActorClient {
    /// Builds a client whose planes share one TLS context.
    ///
    /// Credentials are loaded here, so a missing or malformed PEM fails before any
    /// control-plane request or connection attempt.
    pub fn from_config(config: ClientConfig, role: LinkRole) -> Result<Self, ClientError> {
        let tls = Arc::new(TlsContext::from_credentials(&config.credentials)?);

        let control_plane: Option<Arc<dyn ControlPlane>> = match &config.route {
            RouteConfig::Provisioned(provisioning) => {
                Some(Arc::new(HttpControlPlane::new(provisioning, &tls)?))
            }
            RouteConfig::Direct(_) => None,
        };

        let data_plane = Arc::new(AmqpDataPlane::new(
            role,
            config.application_properties.clone(),
            config.session_policy,
            tls,
        ));

        Ok(Self {
            config: Arc::new(config),
            role,
            control_plane,
            data_plane,
        })
    }

    /// Assembles a client from already-built planes.
    pub fn with_parts(
        config: ClientConfig,
        role: LinkRole,
        control_plane: Option<Arc<dyn ControlPlane>>,
        data_plane: Arc<dyn DataPlane>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            role,
            control_plane,
            data_plane,
        }
    }

    pub fn role(&self) -> LinkRole {
        self.role
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Endpoint for this client's role, provisioning a resource first when configured to.
    pub async fn resolve_endpoint(&self) -> Result<EndpointDescriptor, ClientError> {
        match &self.config.route {
            RouteConfig::Direct(endpoint) => {
                info!(
                    event = events::ENDPOINT_SELECTED,
                    component = COMPONENT,
                    "Using pre-known endpoint {endpoint}"
                );
                Ok(endpoint.clone())
            }
            RouteConfig::Provisioned(provisioning) => {
                let control_plane = self.control_plane.clone().ok_or_else(|| {
                    ClientError::Config("provisioned route without a control plane".to_string())
                })?;

                Provisioner::new(
                    control_plane,
                    ResourceKind::for_role(self.role),
                    self.config.poll_policy,
                )
                .provision(&provisioning.selector)
                .await
            }
        }
    }

    /// Resolves the endpoint and runs the session until it ends.
    ///
    /// Nothing reaches the data plane unless an endpoint was resolved.
    pub async fn run(&self) -> Result<(), ClientError> {
        let endpoint = self.resolve_endpoint().await?;
        self.data_plane.run_session(endpoint).await
    }
}
