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

//! One AMQP 1.0 connection over mutual TLS carrying exactly one link.

use super::amqp_message::{from_amqp_message, settlement_from_outcome, to_amqp_message};
use super::{
    InboundLink, LinkCredit, OutboundLink, ReceiverLoop, SchedulingLoop, SessionState, Settlement,
};
use crate::codec::{ApplicationProperties, InboundMessage, OutboundMessage};
use crate::config::SessionPolicy;
use crate::endpoint::{EndpointDescriptor, LinkRole};
use crate::error::ClientError;
use crate::observability::events;
use crate::observability::fields::WorkerContext;
use crate::tls::TlsContext;
use async_trait::async_trait;
use fe2o3_amqp::connection::ConnectionHandle;
use fe2o3_amqp::link::delivery::Delivery;
use fe2o3_amqp::session::SessionHandle;
use fe2o3_amqp::types::messaging::Body;
use fe2o3_amqp::types::primitives::Value;
use fe2o3_amqp::{Connection, Receiver, Sender, Session};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

const COMPONENT: &str = "amqp_session";

pub struct AmqpSession {
    endpoint: EndpointDescriptor,
    role: LinkRole,
    properties: ApplicationProperties,
    policy: SessionPolicy,
    tls: Arc<TlsContext>,
    state: SessionState,
    history: Vec<SessionState>,
    context: WorkerContext,
}

impl AmqpSession {
    pub fn new(
        endpoint: EndpointDescriptor,
        role: LinkRole,
        properties: ApplicationProperties,
        policy: SessionPolicy,
        tls: Arc<TlsContext>,
        context: WorkerContext,
    ) -> Self {
        Self {
            endpoint,
            role,
            properties,
            policy,
            tls,
            state: SessionState::Init,
            history: vec![SessionState::Init],
            context,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Every state this session has entered, starting with `Init`.
    pub fn history(&self) -> &[SessionState] {
        &self.history
    }

    fn transition(&mut self, next: SessionState) {
        debug!(
            event = events::SESSION_STATE,
            component = COMPONENT,
            worker_id = self.context.worker_id.as_str(),
            worker_thread = self.context.worker_thread.as_str(),
            from = %self.state,
            to = %next,
            "session state changed"
        );
        self.state = next;
        self.history.push(next);
    }

    /// Connects, opens the link and runs its loop until the connection fails.
    ///
    /// The session is `Closed` when this returns, whatever the outcome.
    pub async fn run(&mut self) -> Result<(), ClientError> {
        self.transition(SessionState::Connecting);
        info!(
            event = events::SESSION_STATE,
            component = COMPONENT,
            worker_id = self.context.worker_id.as_str(),
            host = self.endpoint.host(),
            port = self.endpoint.port(),
            role = %self.role,
            "connecting to {}",
            self.endpoint.url()
        );

        let result = self.connect_and_run().await;
        self.transition(SessionState::Closed);
        result
    }

    async fn connect_and_run(&mut self) -> Result<(), ClientError> {
        let connector = self.tls.amqp_connector()?;
        let mut connection = Connection::builder()
            .container_id(format!("actor-client-{}", Uuid::new_v4()))
            .hostname(self.endpoint.host())
            .idle_time_out(self.policy.heartbeat_ms)
            .tls_connector(connector)
            .open(self.endpoint.url().as_str())
            .await
            .map_err(|e| ClientError::transport("unable to open connection", e))?;

        let mut session = match Session::begin(&mut connection).await {
            Ok(session) => session,
            Err(err) => {
                self.close_connection(&mut connection).await;
                return Err(ClientError::transport("unable to begin session", err));
            }
        };

        self.transition(SessionState::LinkOpening);
        let result = match self.role {
            LinkRole::Sender => self.run_sender(&mut session).await,
            LinkRole::Receiver => self.run_receiver(&mut session).await,
        };

        if let Err(err) = session.end().await {
            self.log_close_failure("session", &err);
        }
        self.close_connection(&mut connection).await;
        result
    }

    async fn run_sender(&mut self, session: &mut SessionHandle<()>) -> Result<(), ClientError> {
        let sender = Sender::attach(session, link_name(self.role), self.endpoint.address())
            .await
            .map_err(|e| ClientError::transport("unable to attach sender", e))?;
        self.transition(SessionState::LinkOpen);

        let mut link = AmqpSenderLink { sender };
        let result = SchedulingLoop::new(
            &mut link,
            self.properties.clone(),
            self.policy.resend_delay(),
        )
        .with_worker_context(self.context.clone())
        .run()
        .await;

        if let Err(err) = link.sender.close().await {
            self.log_close_failure("sender", &err);
        }
        result
    }

    async fn run_receiver(&mut self, session: &mut SessionHandle<()>) -> Result<(), ClientError> {
        let receiver = Receiver::attach(session, link_name(self.role), self.endpoint.address())
            .await
            .map_err(|e| ClientError::transport("unable to attach receiver", e))?;
        self.transition(SessionState::LinkOpen);

        let mut link = AmqpReceiverLink {
            receiver,
            pending: None,
        };
        let result = ReceiverLoop::new(&mut link)
            .with_worker_context(self.context.clone())
            .run()
            .await;

        if let Err(err) = link.receiver.close().await {
            self.log_close_failure("receiver", &err);
        }
        result
    }

    async fn close_connection(&self, connection: &mut ConnectionHandle<()>) {
        if let Err(err) = connection.close().await {
            self.log_close_failure("connection", &err);
        }
    }

    fn log_close_failure(&self, what: &str, err: &dyn std::fmt::Display) {
        debug!(
            event = events::SESSION_CLOSE_FAILED,
            component = COMPONENT,
            worker_id = self.context.worker_id.as_str(),
            what,
            err = %err,
            "close failed; ignoring"
        );
    }
}

fn link_name(role: LinkRole) -> String {
    format!("actor-{role}-{}", Uuid::new_v4())
}

struct AmqpSenderLink {
    sender: Sender,
}

#[async_trait(?Send)]
impl OutboundLink for AmqpSenderLink {
    fn credit(&self) -> LinkCredit {
        LinkCredit::OnDemand
    }

    async fn send(&mut self, message: &OutboundMessage) -> Result<Settlement, ClientError> {
        let outcome = self
            .sender
            .send(to_amqp_message(message))
            .await
            .map_err(|e| ClientError::transport("send failed", e))?;
        Ok(settlement_from_outcome(outcome))
    }
}

struct AmqpReceiverLink {
    receiver: Receiver,
    pending: Option<Delivery<Body<Value>>>,
}

#[async_trait(?Send)]
impl InboundLink for AmqpReceiverLink {
    async fn recv(&mut self) -> Result<InboundMessage, ClientError> {
        let delivery = self
            .receiver
            .recv::<Body<Value>>()
            .await
            .map_err(|e| ClientError::transport("receive failed", e))?;

        let message = from_amqp_message(delivery.message());
        self.pending = Some(delivery);
        Ok(message)
    }

    async fn accept(&mut self) -> Result<(), ClientError> {
        let Some(delivery) = self.pending.take() else {
            return Ok(());
        };
        self.receiver
            .accept(&delivery)
            .await
            .map_err(|e| ClientError::transport("accept failed", e))
    }
}
