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

//! Immutable client configuration, built once at startup and shared read-only.

use crate::codec::ApplicationProperties;
use crate::endpoint::EndpointDescriptor;
use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
const DEFAULT_HEARTBEAT_MS: u32 = 5_000;
const DEFAULT_RECONNECT_DELAY_MS: u64 = 1_000;
const DEFAULT_RESEND_DELAY_MS: u64 = 1_000;
const DEFAULT_WORKER_CHECK_INTERVAL_MS: u64 = 1_000;

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    /// PEM file holding the client certificate chain followed by its private key.
    pub cert_chain_and_key_pem: PathBuf,
    /// PEM bundle of trusted CA certificates.
    pub ca_certificate_pem: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ProvisioningConfig {
    pub api_host: String,
    pub api_port: u16,
    pub selector: String,
    pub common_name: String,
}

impl ProvisioningConfig {
    /// Control-plane base URL, `https://{host}:{port}/{common_name}`.
    pub fn base_url(&self) -> String {
        format!(
            "https://{}:{}/{}",
            self.api_host, self.api_port, self.common_name
        )
    }
}

/// Where the data-plane endpoint comes from.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum RouteConfig {
    /// Pre-known endpoint, no control-plane interaction.
    Direct(EndpointDescriptor),
    /// Endpoint resolved by provisioning a resource on the control plane.
    Provisioned(ProvisioningConfig),
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct PollPolicy {
    pub interval_ms: u64,
    /// `None` polls until a terminal state, however long that takes.
    pub max_attempts: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_attempts: None,
        }
    }
}

impl PollPolicy {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct SessionPolicy {
    pub heartbeat_ms: u32,
    pub reconnect: bool,
    pub reconnect_delay_ms: u64,
    pub resend_delay_ms: u64,
    pub worker_check_interval_ms: u64,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            heartbeat_ms: DEFAULT_HEARTBEAT_MS,
            reconnect: false,
            reconnect_delay_ms: DEFAULT_RECONNECT_DELAY_MS,
            resend_delay_ms: DEFAULT_RESEND_DELAY_MS,
            worker_check_interval_ms: DEFAULT_WORKER_CHECK_INTERVAL_MS,
        }
    }
}

impl SessionPolicy {
    pub fn resend_delay(&self) -> Duration {
        Duration::from_millis(self.resend_delay_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    pub fn worker_check_interval(&self) -> Duration {
        Duration::from_millis(self.worker_check_interval_ms)
    }
}

/// On-disk shape of [`ClientConfig`], with properties still JSON-encoded.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ClientConfigFile {
    pub credentials: Credentials,
    pub route: RouteConfig,
    #[serde(default = "empty_properties_json")]
    pub application_properties: String,
    #[serde(default)]
    pub poll_policy: PollPolicy,
    #[serde(default)]
    pub session_policy: SessionPolicy,
}

fn empty_properties_json() -> String {
    "{}".to_string()
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub route: RouteConfig,
    pub application_properties: ApplicationProperties,
    pub poll_policy: PollPolicy,
    pub session_policy: SessionPolicy,
}

impl ClientConfig {
    /// Config with default policies; `application_properties` is a JSON object string.
    pub fn new(
        credentials: Credentials,
        route: RouteConfig,
        application_properties: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            credentials,
            route,
            application_properties: ApplicationProperties::from_json(application_properties)?,
            poll_policy: PollPolicy::default(),
            session_policy: SessionPolicy::default(),
        })
    }

    pub fn with_poll_policy(mut self, poll_policy: PollPolicy) -> Self {
        self.poll_policy = poll_policy;
        self
    }

    pub fn with_session_policy(mut self, session_policy: SessionPolicy) -> Self {
        self.session_policy = session_policy;
        self
    }

    pub fn from_json5_str(contents: &str) -> Result<Self, ClientError> {
        let file: ClientConfigFile = json5::from_str(contents)
            .map_err(|e| ClientError::Config(format!("unable to parse config: {e}")))?;
        Self::try_from(file)
    }

    pub fn from_json5_file(path: &Path) -> Result<Self, ClientError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("unable to read {}: {e}", path.display()))
        })?;
        Self::from_json5_str(&contents)
    }
}

impl TryFrom<ClientConfigFile> for ClientConfig {
    type Error = ClientError;

    fn try_from(file: ClientConfigFile) -> Result<Self, Self::Error> {
        Ok(Self::new(file.credentials, file.route, &file.application_properties)?
            .with_poll_policy(file.poll_policy)
            .with_session_policy(file.session_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVISIONED: &str = r#"{
        // comments are allowed in json5
        credentials: {
            cert_chain_and_key_pem: "/certs/actor.pem",
            ca_certificate_pem: "/certs/ca.pem",
        },
        route: {
            provisioned: {
                api_host: "api.example.com",
                api_port: 8443,
                selector: "orders",
                common_name: "actor-1",
            },
        },
        application_properties: '{"b": 1, "a": "x"}',
        poll_policy: { max_attempts: 10 },
    }"#;

    #[test]
    fn parses_provisioned_config_with_defaults() {
        let config = ClientConfig::from_json5_str(PROVISIONED).unwrap();

        let RouteConfig::Provisioned(provisioning) = &config.route else {
            panic!("expected provisioned route");
        };
        assert_eq!(
            provisioning.base_url(),
            "https://api.example.com:8443/actor-1"
        );
        assert_eq!(config.application_properties.render(), r#"{"a":"x","b":1}"#);
        assert_eq!(config.poll_policy.interval(), Duration::from_secs(2));
        assert_eq!(config.poll_policy.max_attempts, Some(10));
        assert_eq!(config.session_policy, SessionPolicy::default());
        assert!(!config.session_policy.reconnect);
        assert_eq!(config.session_policy.heartbeat_ms, 5_000);
    }

    #[test]
    fn parses_direct_config() {
        let config = ClientConfig::from_json5_str(
            r#"{
                credentials: { cert_chain_and_key_pem: "a.pem", ca_certificate_pem: "ca.pem" },
                route: { direct: { host: "broker", port: 5671, address: "subs/1" } },
            }"#,
        )
        .unwrap();

        let RouteConfig::Direct(endpoint) = &config.route else {
            panic!("expected direct route");
        };
        assert_eq!(endpoint, &EndpointDescriptor::new("broker", 5671, "subs/1"));
        assert!(config.application_properties.is_empty());
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = ClientConfig::from_json5_str(
            r#"{
                credentials: { cert_chain_and_key_pem: "a.pem", ca_certificate_pem: "ca.pem" },
                route: { direct: { host: "broker", port: 5671, address: "a" } },
                retries: 3,
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn rejects_invalid_properties_json() {
        let err = ClientConfig::new(
            Credentials {
                cert_chain_and_key_pem: "a.pem".into(),
                ca_certificate_pem: "ca.pem".into(),
            },
            RouteConfig::Direct(EndpointDescriptor::new("broker", 5671, "a")),
            "{not json",
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
