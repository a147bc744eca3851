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

//! Logs every message arriving on an open receiving link, then accepts it.

use super::InboundLink;
use crate::codec::InboundMessage;
use crate::error::ClientError;
use crate::observability::events;
use crate::observability::fields::{self, WorkerContext};
use tracing::{info, warn};

const COMPONENT: &str = "receiver_loop";

pub struct ReceiverLoop<'a, L: InboundLink + ?Sized> {
    link: &'a mut L,
    received: u64,
    context: WorkerContext,
}

impl<'a, L: InboundLink + ?Sized> ReceiverLoop<'a, L> {
    pub fn new(link: &'a mut L) -> Self {
        Self {
            link,
            received: 0,
            context: WorkerContext::with_current_thread(fields::NONE),
        }
    }

    pub fn with_worker_context(mut self, context: WorkerContext) -> Self {
        self.context = context;
        self
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    /// Receives until the link fails. A failed accept is logged and skipped.
    pub async fn run(&mut self) -> Result<(), ClientError> {
        loop {
            let message = self.link.recv().await?;
            self.on_message(&message);

            if let Err(err) = self.link.accept().await {
                warn!(
                    event = events::RECEIVER_ACCEPT_FAILED,
                    component = COMPONENT,
                    worker_id = self.context.worker_id.as_str(),
                    count = self.received,
                    err = %err,
                    "unable to accept message"
                );
            }
        }
    }

    fn on_message(&mut self, message: &InboundMessage) {
        self.received += 1;
        info!(
            event = events::RECEIVER_MESSAGE,
            component = COMPONENT,
            worker_id = self.context.worker_id.as_str(),
            count = self.received,
            "Message received: body='{}', properties={}",
            message.body_text(),
            message.rendered_properties()
        );
    }
}
