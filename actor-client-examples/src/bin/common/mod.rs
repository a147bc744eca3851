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

#[allow(dead_code)]
pub(crate) mod cli;

use actor_client::{ActorClient, ClientConfig, RouteConfig};
use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs the process-wide subscriber; `RUST_LOG` overrides the `info` default.
pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Dumps the effective configuration, one line per field.
pub(crate) fn log_config(config: &ClientConfig) {
    let credentials = &config.credentials;
    info!(
        "cert_chain_and_key_pem: {}",
        credentials.cert_chain_and_key_pem.display()
    );
    info!(
        "ca_certificate_pem: {}",
        credentials.ca_certificate_pem.display()
    );

    match &config.route {
        RouteConfig::Direct(endpoint) => {
            info!("endpoint_host: {}", endpoint.host());
            info!("endpoint_port: {}", endpoint.port());
            info!("endpoint_address: {}", endpoint.address());
        }
        RouteConfig::Provisioned(provisioning) => {
            info!("api_host: {}", provisioning.api_host);
            info!("api_port: {}", provisioning.api_port);
            info!("selector: {}", provisioning.selector);
            info!("common_name: {}", provisioning.common_name);
            info!("poll_interval_ms: {}", config.poll_policy.interval_ms);
        }
    }

    info!(
        "application_properties: {}",
        config.application_properties.render()
    );
    info!("reconnect: {}", config.session_policy.reconnect);
}

/// Runs the client until it fails or the process is interrupted.
pub(crate) async fn run_until_stopped(client: ActorClient) -> Result<()> {
    tokio::select! {
        result = client.run() => {
            result.context("actor client stopped")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("unable to listen for Ctrl-C")?;
            info!("Application stopped");
        }
    }
    Ok(())
}
