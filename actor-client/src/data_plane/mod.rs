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

//! Data-plane layer.
//!
//! One connection, one link. [`AmqpSession`] drives
//! `INIT -> CONNECTING -> LINK_OPENING -> LINK_OPEN` and then hands the open link to
//! the [`SchedulingLoop`] (senders) or the [`ReceiverLoop`] (receivers). The loops only
//! see the link through [`OutboundLink`] / [`InboundLink`], so they run the same way
//! against a broker or an in-memory fake.
//!
//! All callbacks of a session run on the session worker's single-threaded runtime,
//! which is why the link traits do not require `Send`.

mod amqp_message;
mod receiver;
mod scheduling;
mod session;
mod worker;

pub use receiver::ReceiverLoop;
pub use scheduling::SchedulingLoop;
pub use session::AmqpSession;
pub use worker::{AmqpDataPlane, DataPlane};

use crate::codec::{InboundMessage, OutboundMessage};
use crate::error::ClientError;
use async_trait::async_trait;
use std::fmt;

/// Lifecycle of a data-plane session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Init,
    Connecting,
    LinkOpening,
    LinkOpen,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Init => "INIT",
            SessionState::Connecting => "CONNECTING",
            SessionState::LinkOpening => "LINK_OPENING",
            SessionState::LinkOpen => "LINK_OPEN",
            SessionState::Closed => "CLOSED",
        };
        f.write_str(label)
    }
}

/// Send credit as known when the link opened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkCredit {
    /// The peer granted this much credit.
    Granted(u32),
    /// Credit is not exposed; each send waits until the peer grants some.
    OnDemand,
}

/// Peer outcome for one sent message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Settlement {
    Accepted,
    Rejected(String),
    Released,
    Other(String),
}

impl Settlement {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Settlement::Accepted)
    }
}

/// Sending half of an open link.
#[async_trait(?Send)]
pub trait OutboundLink {
    /// Credit observed at link-open time. It is not re-read before later sends.
    fn credit(&self) -> LinkCredit;

    /// Sends one message and resolves once the peer settles it.
    async fn send(&mut self, message: &OutboundMessage) -> Result<Settlement, ClientError>;
}

/// Receiving half of an open link.
#[async_trait(?Send)]
pub trait InboundLink {
    /// Next message, normalized at the transport boundary.
    async fn recv(&mut self) -> Result<InboundMessage, ClientError>;

    /// Accepts the message most recently returned by [`InboundLink::recv`].
    async fn accept(&mut self) -> Result<(), ClientError>;
}
