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

//! Periodic publisher for an open sending link.
//!
//! Events are handled strictly one at a time from a queue:
//! `LinkOpened` emits the first message, every settlement arms a one-shot timer, and
//! the timer emits the next message. At most one message is in flight.

use super::{LinkCredit, OutboundLink, Settlement};
use crate::codec::{message_body_text, ApplicationProperties, OutboundMessage};
use crate::error::ClientError;
use crate::observability::events;
use crate::observability::fields::{self, WorkerContext};
use chrono::Local;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, warn};

const COMPONENT: &str = "scheduling_loop";

#[derive(Debug)]
enum SenderEvent {
    LinkOpened,
    Settled(Settlement),
    TimerTask,
}

pub struct SchedulingLoop<'a, L: OutboundLink + ?Sized> {
    link: &'a mut L,
    properties: ApplicationProperties,
    resend_delay: Duration,
    sent: u64,
    context: WorkerContext,
}

impl<'a, L: OutboundLink + ?Sized> SchedulingLoop<'a, L> {
    pub fn new(
        link: &'a mut L,
        properties: ApplicationProperties,
        resend_delay: Duration,
    ) -> Self {
        Self {
            link,
            properties,
            resend_delay,
            sent: 0,
            context: WorkerContext::with_current_thread(fields::NONE),
        }
    }

    pub fn with_worker_context(mut self, context: WorkerContext) -> Self {
        self.context = context;
        self
    }

    /// Number of messages handed to the link so far; the last body carried this number.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Publishes until the link fails. Never returns `Ok` on its own.
    pub async fn run(&mut self) -> Result<(), ClientError> {
        let mut queue = VecDeque::from([SenderEvent::LinkOpened]);

        while let Some(event) = queue.pop_front() {
            let next = match event {
                SenderEvent::LinkOpened => self.on_link_opened().await?,
                SenderEvent::Settled(settlement) => self.on_settled(settlement).await,
                SenderEvent::TimerTask => self.emit().await?,
            };
            queue.push_back(next);
        }
        Ok(())
    }

    async fn on_link_opened(&mut self) -> Result<SenderEvent, ClientError> {
        match self.link.credit() {
            LinkCredit::Granted(0) => {
                warn!(
                    event = events::SENDER_NO_CREDIT,
                    component = COMPONENT,
                    worker_id = self.context.worker_id.as_str(),
                    worker_thread = self.context.worker_thread.as_str(),
                    "link opened without credit; nothing sent"
                );
                Err(ClientError::NoCredit)
            }
            LinkCredit::Granted(_) | LinkCredit::OnDemand => self.emit().await,
        }
    }

    async fn on_settled(&mut self, settlement: Settlement) -> SenderEvent {
        if settlement.is_accepted() {
            debug!(
                event = events::SENDER_SETTLED,
                component = COMPONENT,
                worker_id = self.context.worker_id.as_str(),
                count = self.sent,
                "message accepted"
            );
        } else {
            warn!(
                event = events::SENDER_NOT_ACCEPTED,
                component = COMPONENT,
                worker_id = self.context.worker_id.as_str(),
                count = self.sent,
                settlement = ?settlement,
                "message settled without acceptance"
            );
        }

        tokio::time::sleep(self.resend_delay).await;
        SenderEvent::TimerTask
    }

    async fn emit(&mut self) -> Result<SenderEvent, ClientError> {
        self.sent += 1;
        let text = message_body_text(self.sent, &Local::now());
        let message = OutboundMessage::from_text(&text, self.properties.clone());

        info!(
            event = events::SENDER_SEND,
            component = COMPONENT,
            worker_id = self.context.worker_id.as_str(),
            count = self.sent,
            "Sending message: body='{}', properties={}",
            text,
            self.properties.render()
        );

        let settlement = self.link.send(&message).await?;
        Ok(SenderEvent::Settled(settlement))
    }
}
