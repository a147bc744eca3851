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

mod support;

use actor_client::codec::{InboundMessage, Payload, PropertyMap};
use actor_client::data_plane::ReceiverLoop;
use bytes::Bytes;
use serde_json::json;
use support::{init_tracing, FakeInboundLink};

const BODY: &str = "Hello World! Message #3 at 12:00:00";

fn message(payload: Payload) -> InboundMessage {
    let mut message = InboundMessage::new(payload);
    message.application_properties = Some(PropertyMap::from([
        ("region".to_string(), json!("eu")),
        ("priority".to_string(), json!(4)),
    ]));
    message
}

#[tokio::test]
async fn every_payload_shape_is_received_and_accepted() {
    init_tracing();
    let messages = vec![
        message(Payload::Bytes(BODY.as_bytes().to_vec())),
        message(Payload::Buffer(Bytes::from_static(BODY.as_bytes()))),
        message(Payload::Text(BODY.to_string())),
    ];
    for message in &messages {
        assert_eq!(message.body_text(), BODY);
        assert_eq!(message.rendered_properties(), r#"{"priority":4,"region":"eu"}"#);
    }

    let mut link = FakeInboundLink::new(messages);
    let mut receiver = ReceiverLoop::new(&mut link);
    let err = receiver.run().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(receiver.received(), 3);
    assert_eq!(link.accepted, 3);
}

#[tokio::test]
async fn failed_accept_does_not_stop_receiving() {
    let mut link = FakeInboundLink::new(vec![
        message(Payload::Text("first".to_string())),
        message(Payload::Text("second".to_string())),
    ]);
    link.fail_accept = true;

    let mut receiver = ReceiverLoop::new(&mut link);
    let _ = receiver.run().await;

    assert_eq!(receiver.received(), 2);
    assert_eq!(link.accepted, 0);
    assert!(link.queued.is_empty());
}
