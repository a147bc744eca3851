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

mod common;

use actor_client::{ActorClient, LinkRole, PollPolicy};
use anyhow::{Context, Result};
use clap::Parser;
use common::cli::{self, CredentialArgs, EndpointArgs, SessionArgs};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Publishes to a pre-known endpoint", long_about = None)]
struct Args {
    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(flatten)]
    endpoint: EndpointArgs,

    /// Target address of the sending link
    #[arg(long, env = "ENDPOINT_TARGET")]
    target: String,

    /// JSON object attached to every message as application properties
    #[arg(long, env = "MESSAGE_APPLICATION_PROPERTIES_JSON", default_value = "{}")]
    application_properties: String,

    #[command(flatten)]
    session: SessionArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    common::init_tracing();
    let args = Args::parse();

    info!("Started delivery_direct");

    let config = cli::build_config(
        &args.credentials,
        args.endpoint.route(&args.target),
        &args.application_properties,
        PollPolicy::default(),
        &args.session,
    )?;
    common::log_config(&config);

    let client = ActorClient::from_config(config, LinkRole::Sender)
        .context("unable to start delivery client")?;
    common::run_until_stopped(client).await
}
