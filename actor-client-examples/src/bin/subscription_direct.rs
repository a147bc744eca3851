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
#[command(version, about = "Consumes from a pre-known endpoint", long_about = None)]
struct Args {
    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(flatten)]
    endpoint: EndpointArgs,

    /// Source address of the receiving link
    #[arg(long, env = "ENDPOINT_SOURCE")]
    source: String,

    #[command(flatten)]
    session: SessionArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    common::init_tracing();
    let args = Args::parse();

    info!("Started subscription_direct");

    let config = cli::build_config(
        &args.credentials,
        args.endpoint.route(&args.source),
        "{}",
        PollPolicy::default(),
        &args.session,
    )?;
    common::log_config(&config);

    let client = ActorClient::from_config(config, LinkRole::Receiver)
        .context("unable to start subscription client")?;
    common::run_until_stopped(client).await
}
