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
#[command(version, about = "Provisions a subscription and consumes from it", long_about = None)]
struct Args {
    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(flatten)]
    api: ApiArgs,

    /// Selector of the subscription to provision
    #[arg(long, env = "ACTOR_API_SUBSCRIPTION_SELECTOR")]
    selector: String,

    #[command(flatten)]
    session: SessionArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    common::init_tracing();
    let args = Args::parse();

    info!("Started subscription");

    let config = cli::build_config(
        &args.credentials,
        args.api.route(&args.selector),
        "{}",
        args.api.poll_policy(),
        &args.session,
    )?;
    common::log_config(&config);

    let client = ActorClient::from_config(config, LinkRole::Receiver)
        .context("unable to start subscription client")?;
    common::run_until_stopped(client).await
}
