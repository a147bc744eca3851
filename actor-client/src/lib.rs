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

//! # actor-client
//!
//! `actor-client` connects an actor to a message broker over AMQP 1.0 with mutual
//! TLS. An actor either publishes (a *delivery*, sender role) or consumes (a
//! *subscription*, receiver role).
//!
//! The broker endpoint is either pre-known ([`RouteConfig::Direct`]) or provisioned on
//! an HTTPS control plane ([`RouteConfig::Provisioned`]): the client creates the
//! resource, polls it until it leaves `REQUESTED`, and only a `CREATED` resource with
//! an endpoint lets the data plane start.
//!
//! ```no_run
//! use actor_client::{
//!     ActorClient, ClientConfig, Credentials, EndpointDescriptor, LinkRole, RouteConfig,
//! };
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = ClientConfig::new(
//!     Credentials {
//!         cert_chain_and_key_pem: "certs/actor.pem".into(),
//!         ca_certificate_pem: "certs/ca.pem".into(),
//!     },
//!     RouteConfig::Direct(EndpointDescriptor::new("broker.example.com", 5671, "orders")),
//!     r#"{"region": "eu"}"#,
//! )
//! .unwrap();
//!
//! let client = ActorClient::from_config(config, LinkRole::Sender).unwrap();
//! client.run().await.unwrap();
//! # });
//! ```
//!
//! ## Layers
//!
//! - `control_plane`: REST contract for deliveries and subscriptions.
//! - `provisioning`: create / poll / resolve state machine on top of the control plane.
//! - `data_plane`: AMQP session, the sender's scheduling loop and the receiver loop.
//! - `codec`: message bodies and property rendering, independent of the transport.
//!
//! ## Observability
//!
//! All logs go through `tracing` with a stable `event` field (see
//! `observability::events`) and a `component` field naming the emitting module.
//! Installing a subscriber is left to the binary.

mod client;
pub mod codec;
mod config;
pub mod control_plane;
pub mod data_plane;
mod endpoint;
mod error;
#[doc(hidden)]
pub mod observability;
pub mod provisioning;
pub(crate) mod runtime;
mod tls;

pub use client::ActorClient;
pub use config::{
    ClientConfig, ClientConfigFile, Credentials, PollPolicy, ProvisioningConfig, RouteConfig,
    SessionPolicy,
};
pub use endpoint::{EndpointDescriptor, LinkRole, WireEndpoint, WirePort};
pub use error::ClientError;
pub use tls::{PeerVerification, TlsContext};
