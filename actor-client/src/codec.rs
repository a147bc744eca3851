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

//! Transport-agnostic message encoding and inbound payload normalization.
//!
//! Outbound bodies are always carried as explicit bytes. Inbound bodies are tagged
//! once at the transport boundary as a [`Payload`] and rendered to text from there.

use crate::error::ClientError;
use bytes::Bytes;
use chrono::{DateTime, TimeZone};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Property map with lexically ordered keys, so renderings are stable.
pub type PropertyMap = BTreeMap<String, Value>;

/// Application properties attached to every published message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApplicationProperties(PropertyMap);

impl ApplicationProperties {
    /// Parses a JSON object. Anything other than an object is rejected.
    ///
    /// ```
    /// use actor_client::codec::ApplicationProperties;
    ///
    /// let properties = ApplicationProperties::from_json(r#"{"b":1,"a":2}"#).unwrap();
    /// assert_eq!(properties.render(), r#"{"a":2,"b":1}"#);
    /// ```
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => Ok(Self(object.into_iter().collect())),
            Ok(other) => Err(ClientError::Config(format!(
                "application properties must be a JSON object, got '{other}'"
            ))),
            Err(err) => Err(ClientError::Config(format!(
                "application properties are not valid JSON: {err}"
            ))),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &PropertyMap {
        &self.0
    }

    pub fn render(&self) -> String {
        render_properties(&self.0)
    }
}

/// Compact JSON rendering with sorted keys.
pub fn render_properties(properties: &PropertyMap) -> String {
    // BTreeMap keys serialize in order; a map of `Value`s cannot fail to serialize.
    serde_json::to_string(properties).unwrap_or_else(|_| "{}".to_string())
}

/// Body text of the `count`-th published message.
pub fn message_body_text<Tz>(count: u64, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("Hello World! Message #{count} at {}", at.format("%H:%M:%S"))
}

/// A message ready to hand to a sending link.
#[derive(Clone, Debug, PartialEq)]
pub struct OutboundMessage {
    pub body: Vec<u8>,
    pub properties: ApplicationProperties,
}

impl OutboundMessage {
    /// Encodes `text` as UTF-8 bytes; the body never travels as an inferred text value.
    pub fn from_text(text: &str, properties: ApplicationProperties) -> Self {
        Self {
            body: text.as_bytes().to_vec(),
            properties,
        }
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Inbound body as delivered by the transport.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Owned byte sequence, e.g. one or more data sections.
    Bytes(Vec<u8>),
    /// Shared buffer; clones share the bytes instead of copying them.
    Buffer(Bytes),
    /// A value the transport already decoded as text.
    Text(String),
}

impl Payload {
    /// Normalizes to UTF-8 text. Invalid sequences are replaced, never raised.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Payload::Bytes(bytes) => String::from_utf8_lossy(bytes),
            Payload::Buffer(buffer) => String::from_utf8_lossy(buffer.as_ref()),
            Payload::Text(text) => Cow::Borrowed(text.as_str()),
        }
    }
}

/// A received message, normalized at the transport boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct InboundMessage {
    pub payload: Payload,
    pub application_properties: Option<PropertyMap>,
    pub message_properties: Option<PropertyMap>,
}

impl InboundMessage {
    pub fn new(payload: Payload) -> Self {
        Self {
            payload,
            application_properties: None,
            message_properties: None,
        }
    }

    /// Application properties when populated, else the transport-level properties section.
    pub fn properties(&self) -> Cow<'_, PropertyMap> {
        [&self.application_properties, &self.message_properties]
            .into_iter()
            .flatten()
            .find(|map| !map.is_empty())
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(PropertyMap::new()))
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        self.payload.to_text()
    }

    pub fn rendered_properties(&self) -> String {
        render_properties(&self.properties())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::{NaiveDate, Utc};
    use serde_json::json;

    const SAMPLE: &str = "Hello World! Message #3 at 12:00:00";

    #[test]
    fn render_sorts_keys_lexically() {
        let properties = ApplicationProperties::from_json(r#"{"b":1,"a":2}"#).unwrap();
        assert_eq!(properties.render(), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn render_sorts_nested_objects_too() {
        let properties =
            ApplicationProperties::from_json(r#"{"z":{"y":true,"x":null},"m":[3,1]}"#).unwrap();
        assert_eq!(properties.render(), r#"{"m":[3,1],"z":{"x":null,"y":true}}"#);
    }

    #[test]
    fn from_json_rejects_non_objects_and_garbage() {
        assert!(matches!(
            ApplicationProperties::from_json("[1,2]"),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ApplicationProperties::from_json("message_application_properties_json"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn every_payload_shape_decodes_to_the_same_text() {
        let encoded = OutboundMessage::from_text(SAMPLE, ApplicationProperties::default());

        let shapes = [
            Payload::Bytes(encoded.body.clone()),
            Payload::Buffer(Bytes::from(encoded.body.clone())),
            Payload::Text(SAMPLE.to_string()),
        ];

        for shape in shapes {
            assert_eq!(shape.to_text(), SAMPLE, "shape {shape:?}");
        }
    }

    #[test]
    fn invalid_utf8_is_replaced_not_raised() {
        let payload = Payload::Bytes(vec![0x48, 0x69, 0xff]);
        assert_eq!(payload.to_text(), "Hi\u{fffd}");
    }

    #[test]
    fn body_text_carries_counter_and_wall_clock() {
        let at = Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        );
        assert_eq!(message_body_text(3, &at), SAMPLE);
    }

    #[test]
    fn inbound_properties_prefer_application_properties() {
        let mut message = InboundMessage::new(Payload::Text(String::new()));
        message.message_properties = Some(PropertyMap::from([(
            "subject".to_string(),
            json!("fallback"),
        )]));
        assert_eq!(message.rendered_properties(), r#"{"subject":"fallback"}"#);

        message.application_properties = Some(PropertyMap::from([
            ("b".to_string(), json!(1)),
            ("a".to_string(), json!("x")),
        ]));
        assert_eq!(message.rendered_properties(), r#"{"a":"x","b":1}"#);
    }

    #[test]
    fn inbound_properties_default_to_empty_map() {
        let message = InboundMessage {
            payload: Payload::Bytes(Vec::new()),
            application_properties: Some(PropertyMap::new()),
            message_properties: None,
        };
        assert_eq!(message.rendered_properties(), "{}");
    }
}
