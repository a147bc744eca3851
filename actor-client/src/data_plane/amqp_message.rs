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

//! Conversions between codec types and AMQP 1.0 messages.

use super::Settlement;
use crate::codec::{InboundMessage, OutboundMessage, Payload, PropertyMap};
use bytes::Bytes;
use fe2o3_amqp::types::messaging::{
    AmqpValue, ApplicationProperties, Body, Data, Message, Outcome, Properties,
};
use fe2o3_amqp::types::primitives::{Binary, SimpleValue, Value};
use serde_json::{json, Value as JsonValue};

/// Outbound message with an explicit binary data section.
pub(crate) fn to_amqp_message(message: &OutboundMessage) -> Message<Data> {
    let properties = message
        .properties
        .iter()
        .fold(ApplicationProperties::builder(), |builder, (key, value)| {
            builder.insert(key.as_str(), simple_value_from_json(value))
        })
        .build();

    Message::builder()
        .application_properties(properties)
        .data(Binary::from(message.body.clone()))
        .build()
}

pub(crate) fn settlement_from_outcome(outcome: Outcome) -> Settlement {
    match outcome {
        Outcome::Accepted(_) => Settlement::Accepted,
        Outcome::Rejected(rejected) => Settlement::Rejected(format!("{:?}", rejected.error)),
        Outcome::Released(_) => Settlement::Released,
        other => Settlement::Other(format!("{other:?}")),
    }
}

pub(crate) fn from_amqp_message(message: &Message<Body<Value>>) -> InboundMessage {
    InboundMessage {
        payload: payload_from_body(&message.body),
        application_properties: message.application_properties.as_ref().map(|properties| {
            properties
                .0
                .iter()
                .map(|(key, value)| (key.clone(), json_from_simple_value(value)))
                .collect()
        }),
        message_properties: message.properties.as_ref().map(properties_section_map),
    }
}

fn payload_from_body(body: &Body<Value>) -> Payload {
    match body {
        Body::Data(sections) => Payload::Bytes(
            sections
                .iter()
                .flat_map(|section| section.0.iter().copied())
                .collect(),
        ),
        Body::Value(AmqpValue(Value::Binary(buffer))) => {
            Payload::Buffer(Bytes::copy_from_slice(&buffer[..]))
        }
        Body::Value(AmqpValue(Value::String(text))) => Payload::Text(text.clone()),
        Body::Value(AmqpValue(other)) => Payload::Text(format!("{other:?}")),
        Body::Empty => Payload::Bytes(Vec::new()),
        other => Payload::Text(format!("{other:?}")),
    }
}

/// Only the populated fields of the transport properties section.
fn properties_section_map(properties: &Properties) -> PropertyMap {
    let mut map = PropertyMap::new();
    if let Some(message_id) = &properties.message_id {
        map.insert("message_id".to_string(), json!(format!("{message_id:?}")));
    }
    if let Some(correlation_id) = &properties.correlation_id {
        map.insert(
            "correlation_id".to_string(),
            json!(format!("{correlation_id:?}")),
        );
    }

    let text_fields = [
        ("to", &properties.to),
        ("subject", &properties.subject),
        ("reply_to", &properties.reply_to),
        ("group_id", &properties.group_id),
        ("reply_to_group_id", &properties.reply_to_group_id),
    ];
    for (key, value) in text_fields {
        if let Some(value) = value {
            map.insert(key.to_string(), json!(value));
        }
    }
    map
}

/// Scalars map to their AMQP counterparts; arrays and objects travel as JSON text.
pub(crate) fn simple_value_from_json(value: &JsonValue) -> SimpleValue {
    match value {
        JsonValue::Null => SimpleValue::Null,
        JsonValue::Bool(flag) => SimpleValue::Bool(*flag),
        JsonValue::Number(number) => {
            if let Some(signed) = number.as_i64() {
                SimpleValue::Long(signed)
            } else if let Some(unsigned) = number.as_u64() {
                SimpleValue::Ulong(unsigned)
            } else {
                SimpleValue::Double(number.as_f64().unwrap_or_default().into())
            }
        }
        JsonValue::String(text) => SimpleValue::String(text.clone()),
        compound => SimpleValue::String(compound.to_string()),
    }
}

pub(crate) fn json_from_simple_value(value: &SimpleValue) -> JsonValue {
    match value {
        SimpleValue::Null => JsonValue::Null,
        SimpleValue::Bool(flag) => json!(flag),
        SimpleValue::Ubyte(n) => json!(n),
        SimpleValue::Ushort(n) => json!(n),
        SimpleValue::Uint(n) => json!(n),
        SimpleValue::Ulong(n) => json!(n),
        SimpleValue::Byte(n) => json!(n),
        SimpleValue::Short(n) => json!(n),
        SimpleValue::Int(n) => json!(n),
        SimpleValue::Long(n) => json!(n),
        SimpleValue::Float(n) => json!(n.into_inner()),
        SimpleValue::Double(n) => json!(n.into_inner()),
        SimpleValue::String(text) => json!(text),
        SimpleValue::Binary(bytes) => json!(String::from_utf8_lossy(&bytes[..])),
        other => json!(format!("{other:?}")),
    }
}
