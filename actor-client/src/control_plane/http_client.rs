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

//! HTTPS control-plane client authenticated with the shared TLS context.

use super::{ControlPlane, ResourceKind, ResourceRequest, ResourceStatus};
use crate::config::ProvisioningConfig;
use crate::error::ClientError;
use crate::observability::events;
use crate::tls::{PeerVerification, TlsContext};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

const COMPONENT: &str = "control_plane";

pub struct HttpControlPlane {
    client: Client,
    base_url: String,
}

impl HttpControlPlane {
    pub fn new(config: &ProvisioningConfig, tls: &TlsContext) -> Result<Self, ClientError> {
        let client = Client::builder()
            .use_preconfigured_tls(tls.client_config(PeerVerification::Strict)?)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}", self.base_url, kind.collection())
    }

    fn resource_url(&self, kind: ResourceKind, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, kind.collection(), id)
    }

    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::ControlPlaneStatus {
            status: status.as_u16(),
            url,
            body,
        })
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn create(
        &self,
        kind: ResourceKind,
        request: &ResourceRequest,
    ) -> Result<ResourceStatus, ClientError> {
        let url = self.collection_url(kind);
        debug!(
            event = events::CONTROL_PLANE_REQUEST,
            component = COMPONENT,
            method = "POST",
            url = url.as_str(),
            "control-plane request"
        );

        let response = self.client.post(&url).json(request).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<ResourceStatus, ClientError> {
        let url = self.resource_url(kind, id);
        debug!(
            event = events::CONTROL_PLANE_REQUEST,
            component = COMPONENT,
            method = "GET",
            url = url.as_str(),
            "control-plane request"
        );

        let response = self.client.get(&url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<(), ClientError> {
        let url = self.resource_url(kind, id);
        debug!(
            event = events::CONTROL_PLANE_REQUEST,
            component = COMPONENT,
            method = "DELETE",
            url = url.as_str(),
            "control-plane request"
        );

        let response = self.client.delete(&url).send().await?;
        Self::check(response).await.map(|_| ())
    }
}
