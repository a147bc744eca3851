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

use actor_client::{ActorClient, ClientConfig, LinkRole};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Role {
    /// Publish to a delivery
    Sender,
    /// Consume from a subscription
    Receiver,
}

impl From<Role> for LinkRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Sender => LinkRole::Sender,
            Role::Receiver => LinkRole::Receiver,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Runs an actor client described by a JSON5 file", long_about = None)]
struct Args {
    /// JSON5 client configuration
    #[arg(short, long, default_value = "actor-client-examples/configs/client_config.json5")]
    config: PathBuf,

    /// Link role of this client
    #[arg(short, long, value_enum, default_value_t = Role::Sender)]
    role: Role,
}

#[tokio::main]
async fn main() -> Result<()> {
    common::init_tracing();
    let args = Args::parse();

    info!("Started configurable_client");

    let config = ClientConfig::from_json5_file(&args.config)
        .with_context(|| format!("unable to load {}", args.config.display()))?;
    common::log_config(&config);

    let client = ActorClient::from_config(config, args.role.into())
        .context("unable to start actor client")?;
    common::run_until_stopped(client).await
}
