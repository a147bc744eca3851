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

//! Flags shared by the example binaries. Every flag falls back to an environment variable.

use actor_client::{
    ClientConfig, Credentials, EndpointDescriptor, PollPolicy, ProvisioningConfig, RouteConfig,
    SessionPolicy,
};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub(crate) struct CredentialArgs {
    /// PEM file with the client certificate chain followed by its private key
    #[arg(long, env = "ACTOR_CERTIFICATE_CHAIN_AND_KEY_PEM")]
    pub(crate) cert_chain_and_key_pem: PathBuf,

    /// PEM bundle of trusted CA certificates
    #[arg(long, env = "CA_CERTIFICATE_PEM")]
    pub(crate) ca_certificate_pem: PathBuf,
}

impl CredentialArgs {
    pub(crate) fn credentials(&self) -> Credentials {
        Credentials {
            cert_chain_and_key_pem: self.cert_chain_and_key_pem.clone(),
            ca_certificate_pem: self.ca_certificate_pem.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ApiArgs {
    /// Host name of the control-plane API
    #[arg(long, env = "ACTOR_API_HOST")]
    pub(crate) api_host: String,

    /// Port of the control-plane API
    #[arg(long, env = "ACTOR_API_PORT", value_parser = parse_port)]
    pub(crate) api_port: u16,

    /// Common name of the actor's client certificate
    #[arg(long, env = "ACTOR_COMMON_NAME")]
    pub(crate) common_name: String,

    /// Milliseconds between status polls
    #[arg(long, default_value_t = 2_000)]
    pub(crate) poll_interval_ms: u64,

    /// Give up after this many status polls; unbounded when omitted
    #[arg(long)]
    pub(crate) max_poll_attempts: Option<u32>,
}

impl ApiArgs {
    pub(crate) fn route(&self, selector: &str) -> RouteConfig {
        RouteConfig::Provisioned(ProvisioningConfig {
            api_host: self.api_host.clone(),
            api_port: self.api_port,
            selector: selector.to_string(),
            common_name: self.common_name.clone(),
        })
    }

    pub(crate) fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval_ms: self.poll_interval_ms,
            max_attempts: self.max_poll_attempts,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct EndpointArgs {
    /// Host of the pre-known AMQP endpoint
    #[arg(long, env = "ENDPOINT_HOST")]
    pub(crate) endpoint_host: String,

    /// Port of the pre-known AMQP endpoint
    #[arg(long, env = "ENDPOINT_PORT", value_parser = parse_port)]
    pub(crate) endpoint_port: u16,
}

impl EndpointArgs {
    pub(crate) fn route(&self, address: &str) -> RouteConfig {
        RouteConfig::Direct(EndpointDescriptor::new(
            &self.endpoint_host,
            self.endpoint_port,
            address,
        ))
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SessionArgs {
    /// Re-open the session against the same endpoint after a transport failure
    #[arg(long, default_value_t = false)]
    pub(crate) reconnect: bool,

    /// Milliseconds between published messages
    #[arg(long, default_value_t = 1_000)]
    pub(crate) resend_delay_ms: u64,
}

impl SessionArgs {
    pub(crate) fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            reconnect: self.reconnect,
            resend_delay_ms: self.resend_delay_ms,
            ..SessionPolicy::default()
        }
    }
}

pub(crate) fn parse_port(raw: &str) -> Result<u16, String> {
    raw.trim().parse::<u16>().map_err(|_| {
        format!("invalid value for port: '{raw}' (expected an integer in range 0..=65535)")
    })
}

/// Assembles the immutable client configuration from parsed flags.
pub(crate) fn build_config(
    credentials: &CredentialArgs,
    route: RouteConfig,
    application_properties: &str,
    poll_policy: PollPolicy,
    session: &SessionArgs,
) -> Result<ClientConfig> {
    let config = ClientConfig::new(credentials.credentials(), route, application_properties)
        .context("invalid client configuration")?;

    Ok(config
        .with_poll_policy(poll_policy)
        .with_session_policy(session.session_policy()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[derive(Debug, Parser)]
    #[command(version, about, long_about = None)]
    struct RepresentativeArgs {
        #[command(flatten)]
        credentials: CredentialArgs,
        #[command(flatten)]
        api: ApiArgs,
        #[command(flatten)]
        session: SessionArgs,
    }

    #[test]
    fn parse_port_accepts_numbers_and_rejects_overflow() {
        assert_eq!(parse_port("5671").unwrap(), 5671);
        assert_eq!(parse_port(" 443 ").unwrap(), 443);
        assert_eq!(
            parse_port("70000").unwrap_err(),
            "invalid value for port: '70000' (expected an integer in range 0..=65535)"
        );
    }

    #[test]
    fn representative_command_is_well_formed() {
        RepresentativeArgs::command().debug_assert();
    }

    #[test]
    fn flags_build_a_provisioned_config() {
        let args = RepresentativeArgs::try_parse_from([
            "delivery",
            "--cert-chain-and-key-pem",
            "actor.pem",
            "--ca-certificate-pem",
            "ca.pem",
            "--api-host",
            "api.example.com",
            "--api-port",
            "8443",
            "--common-name",
            "actor-1",
            "--max-poll-attempts",
            "5",
        ])
        .unwrap();

        let config = build_config(
            &args.credentials,
            args.api.route("orders"),
            r#"{"region":"eu"}"#,
            args.api.poll_policy(),
            &args.session,
        )
        .unwrap();

        assert_eq!(config.poll_policy.max_attempts, Some(5));
        assert_eq!(config.application_properties.render(), r#"{"region":"eu"}"#);
        assert!(!config.session_policy.reconnect);
        let RouteConfig::Provisioned(provisioning) = &config.route else {
            panic!("expected provisioned route");
        };
        assert_eq!(provisioning.base_url(), "https://api.example.com:8443/actor-1");
    }
}
