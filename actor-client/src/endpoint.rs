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

use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the single link a session opens.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRole {
    /// Publishes into a delivery, bound to the endpoint's target address.
    Sender,
    /// Consumes from a subscription, bound to the endpoint's source address.
    Receiver,
}

impl LinkRole {
    /// Name of the endpoint field carrying the address for this role.
    pub fn address_field(&self) -> &'static str {
        match self {
            LinkRole::Sender => "target",
            LinkRole::Receiver => "source",
        }
    }
}

impl fmt::Display for LinkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkRole::Sender => f.write_str("sender"),
            LinkRole::Receiver => f.write_str("receiver"),
        }
    }
}

/// [`EndpointDescriptor`] is the resolved `host`/`port`/`address` tuple a data-plane session
/// connects to. The address is a target for senders and a source for receivers.
///
/// # Examples
///
/// ```
/// use actor_client::EndpointDescriptor;
///
/// let endpoint = EndpointDescriptor::new("broker.example.com", 5671, "orders");
///
/// assert_eq!(endpoint.url(), "amqps://broker.example.com:5671");
/// assert_eq!(endpoint.address(), "orders");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointDescriptor {
    host: String,
    port: u16,
    address: String,
}

impl EndpointDescriptor {
    pub fn new(host: &str, port: u16, address: &str) -> Self {
        Self {
            host: host.to_string(),
            port,
            address: address.to_string(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn url(&self) -> String {
        format!("amqps://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for EndpointDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} address={}", self.host, self.port, self.address)
    }
}

/// Endpoint entry as listed in a control-plane status document.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct WireEndpoint {
    pub host: String,
    pub port: WirePort,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The control plane reports ports either as numbers or as numeric strings.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum WirePort {
    Number(u64),
    Text(String),
}

impl WirePort {
    fn to_port(&self) -> Result<u16, ClientError> {
        let port = match self {
            WirePort::Number(number) => u16::try_from(*number).ok(),
            WirePort::Text(text) => text.trim().parse::<u16>().ok(),
        };
        port.ok_or_else(|| ClientError::Config(format!("invalid endpoint port {self:?}")))
    }
}

impl WireEndpoint {
    /// Picks the address matching `role` and validates the port.
    pub fn resolve(&self, role: LinkRole) -> Result<EndpointDescriptor, ClientError> {
        let address = match role {
            LinkRole::Sender => self.target.as_deref(),
            LinkRole::Receiver => self.source.as_deref(),
        }
        .ok_or(ClientError::MissingAddress(role.address_field()))?;

        Ok(EndpointDescriptor::new(
            &self.host,
            self.port.to_port()?,
            address,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(port: WirePort) -> WireEndpoint {
        WireEndpoint {
            host: "broker".to_string(),
            port,
            target: Some("deliveries/orders".to_string()),
            source: None,
        }
    }

    #[test]
    fn resolve_accepts_numeric_and_string_ports() {
        let from_number = wire(WirePort::Number(5671))
            .resolve(LinkRole::Sender)
            .unwrap();
        let from_text = wire(WirePort::Text("5671".to_string()))
            .resolve(LinkRole::Sender)
            .unwrap();

        assert_eq!(from_number, from_text);
        assert_eq!(from_number.port(), 5671);
        assert_eq!(from_number.address(), "deliveries/orders");
    }

    #[test]
    fn resolve_rejects_out_of_range_port() {
        let err = wire(WirePort::Number(70_000))
            .resolve(LinkRole::Sender)
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn resolve_requires_address_for_role() {
        let err = wire(WirePort::Number(5671))
            .resolve(LinkRole::Receiver)
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingAddress("source")));
    }

    #[test]
    fn wire_endpoint_parses_status_document_entry() {
        let entry: WireEndpoint =
            serde_json::from_str(r#"{"host":"broker","port":"5671","source":"subs/1"}"#).unwrap();

        let endpoint = entry.resolve(LinkRole::Receiver).unwrap();
        assert_eq!(endpoint, EndpointDescriptor::new("broker", 5671, "subs/1"));
    }
}
