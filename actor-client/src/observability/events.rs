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

//! Canonical structured event names used across `actor-client`.

// Control-plane and provisioning events.
pub const CONTROL_PLANE_REQUEST: &str = "control_plane_request";
pub const PROVISION_CREATE_RESPONSE: &str = "provision_create_response";
pub const PROVISION_STATUS_RESPONSE: &str = "provision_status_response";
pub const PROVISION_POLL: &str = "provision_poll";
pub const PROVISION_CREATED: &str = "provision_created";
pub const PROVISION_UNUSABLE: &str = "provision_unusable";
pub const PROVISION_TIMEOUT: &str = "provision_timeout";
pub const ENDPOINT_SELECTED: &str = "endpoint_selected";
pub const ENDPOINT_EXTRA_IGNORED: &str = "endpoint_extra_ignored";

// Data-plane session events.
pub const SESSION_STATE: &str = "session_state";
pub const SESSION_CLOSE_FAILED: &str = "session_close_failed";
pub const SENDER_SEND: &str = "sender_send";
pub const SENDER_SETTLED: &str = "sender_settled";
pub const SENDER_NOT_ACCEPTED: &str = "sender_not_accepted";
pub const SENDER_NO_CREDIT: &str = "sender_no_credit";
pub const RECEIVER_MESSAGE: &str = "receiver_message";
pub const RECEIVER_ACCEPT_FAILED: &str = "receiver_accept_failed";

// Worker runtime events.
pub const RUNTIME_THREAD_NAME_FALLBACK: &str = "runtime_thread_name_fallback";
pub const WORKER_SPAWN_OK: &str = "worker_spawn_ok";
pub const WORKER_EXITED: &str = "worker_exited";
pub const WORKER_RECONNECT: &str = "worker_reconnect";
