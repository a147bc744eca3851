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

use actor_client::{
    ActorClient, ClientConfig, ClientError, Credentials, LinkRole, ProvisioningConfig,
    RouteConfig,
};
use std::io::Write;

#[test]
fn missing_credentials_fail_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("actor.pem");
    let config = ClientConfig::new(
        Credentials {
            cert_chain_and_key_pem: missing.clone(),
            ca_certificate_pem: dir.path().join("ca.pem"),
        },
        RouteConfig::Provisioned(ProvisioningConfig {
            api_host: "127.0.0.1".to_string(),
            api_port: 9,
            selector: "orders".to_string(),
            common_name: "actor-1".to_string(),
        }),
        "{}",
    )
    .unwrap();

    let err = ActorClient::from_config(config, LinkRole::Sender)
        .err()
        .expect("client must not start without credentials");

    match err {
        ClientError::Credentials { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn config_file_is_loaded_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            credentials: {{ cert_chain_and_key_pem: "a.pem", ca_certificate_pem: "ca.pem" }},
            route: {{ direct: {{ host: "broker", port: 5671, address: "orders" }} }},
            session_policy: {{ reconnect: true }},
        }}"#
    )
    .unwrap();

    let config = ClientConfig::from_json5_file(file.path()).unwrap();
    assert!(config.session_policy.reconnect);
    assert_eq!(config.session_policy.resend_delay_ms, 1_000);
    assert!(matches!(config.route, RouteConfig::Direct(_)));
}

#[test]
fn bundled_sample_config_parses() {
    let config = ClientConfig::from_json5_file(std::path::Path::new(
        "../actor-client-examples/configs/client_config.json5",
    ))
    .unwrap();

    assert_eq!(config.poll_policy.interval_ms, 2_000);
    assert_eq!(
        config.application_properties.render(),
        r#"{"priority":4,"region":"eu"}"#
    );
    assert!(matches!(config.route, RouteConfig::Provisioned(_)));
}
