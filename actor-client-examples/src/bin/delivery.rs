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

use actor_client::{ActorClient, LinkRole};
use anyhow::{Context, Result};
use clap::Parser;
use common::cli::{self, ApiArgs, CredentialArgs, SessionArgs};
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Provisions a delivery and publishes to it", long_about = None)]
struct Args {
    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(flatten)]
    api: ApiArgs,

    /// Selector of the delivery to provision
    #[arg(long, env = "ACTOR_API_DELIVERY_SELECTOR")]
    selector: String,

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

    info!("Started delivery");

    let config = cli::build_config(
        &args.credentials,
        args.api.route(&args.selector),
        &args.application_properties,
        args.api.poll_policy(),
        &args.session,
    )?;
    common::log_config(&config);

    let client = ActorClient::from_config(config, LinkRole::Sender)
        .context("unable to start delivery client")?;
    common::run_until_stopped(client).await
}
