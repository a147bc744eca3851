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

//! Client-mode mutual TLS built from a certificate-chain+key PEM and a CA bundle.
//!
//! Credentials are read and parsed once, when the context is built, so a bad path
//! fails before any connection is attempted. Both planes derive their `rustls`
//! configuration from the same material.

use crate::config::Credentials;
use crate::error::ClientError;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::WebPkiServerVerifier;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, ServerName, UnixTime};
use rustls::{
    CertificateError, ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "tls";

/// How the broker's certificate is checked.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PeerVerification {
    /// Chain and host name must both validate.
    Strict,
    /// Chain must validate against the CA bundle; the host name is not checked.
    Anonymous,
}

pub struct TlsContext {
    chain: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
    roots: Arc<RootCertStore>,
    provider: Arc<CryptoProvider>,
}

impl TlsContext {
    pub fn from_credentials(credentials: &Credentials) -> Result<Self, ClientError> {
        let chain_path = credentials.cert_chain_and_key_pem.as_path();
        let chain = load_certificates(chain_path)?;
        let key = load_private_key(chain_path)?;

        let ca_path = credentials.ca_certificate_pem.as_path();
        let mut roots = RootCertStore::empty();
        for certificate in load_certificates(ca_path)? {
            roots
                .add(certificate)
                .map_err(|e| credential_error(ca_path, e))?;
        }

        debug!(
            component = COMPONENT,
            chain_len = chain.len(),
            trust_anchors = roots.len(),
            "loaded TLS credentials"
        );

        Ok(Self {
            chain,
            key,
            roots: Arc::new(roots),
            provider: Arc::new(rustls::crypto::ring::default_provider()),
        })
    }

    /// `rustls` client configuration presenting our chain and key.
    pub fn client_config(
        &self,
        verification: PeerVerification,
    ) -> Result<ClientConfig, ClientError> {
        let builder = ClientConfig::builder_with_provider(self.provider.clone())
            .with_safe_default_protocol_versions()
            .map_err(|e| ClientError::Tls(e.to_string()))?;

        let builder = match verification {
            PeerVerification::Strict => builder.with_root_certificates(self.roots.clone()),
            PeerVerification::Anonymous => {
                let verifier = AnyServerName::new(self.roots.clone(), self.provider.clone())?;
                builder
                    .dangerous()
                    .with_custom_certificate_verifier(Arc::new(verifier))
            }
        };

        builder
            .with_client_auth_cert(self.chain.clone(), self.key.clone_key())
            .map_err(|e| ClientError::Tls(e.to_string()))
    }

    /// Connector for the AMQP data plane.
    pub fn amqp_connector(&self) -> Result<tokio_rustls::TlsConnector, ClientError> {
        let config = self.client_config(PeerVerification::Anonymous)?;
        Ok(tokio_rustls::TlsConnector::from(Arc::new(config)))
    }
}

fn credential_error(path: &Path, reason: impl ToString) -> ClientError {
    ClientError::Credentials {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn open_pem(path: &Path) -> Result<BufReader<File>, ClientError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| credential_error(path, e))
}

fn load_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, ClientError> {
    let certificates = rustls_pemfile::certs(&mut open_pem(path)?)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| credential_error(path, e))?;

    if certificates.is_empty() {
        return Err(credential_error(path, "no PEM certificate found"));
    }
    Ok(certificates)
}

fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, ClientError> {
    rustls_pemfile::private_key(&mut open_pem(path)?)
        .map_err(|e| credential_error(path, e))?
        .ok_or_else(|| credential_error(path, "no PEM private key found"))
}

/// Validates the chain but accepts any presented host name.
#[derive(Debug)]
struct AnyServerName {
    inner: Arc<WebPkiServerVerifier>,
}

impl AnyServerName {
    fn new(
        roots: Arc<RootCertStore>,
        provider: Arc<CryptoProvider>,
    ) -> Result<Self, ClientError> {
        let inner = WebPkiServerVerifier::builder_with_provider(roots, provider)
            .build()
            .map_err(|e| ClientError::Tls(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ServerCertVerifier for AnyServerName {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        match self.inner.verify_server_cert(
            end_entity,
            intermediates,
            server_name,
            ocsp_response,
            now,
        ) {
            Err(rustls::Error::InvalidCertificate(
                CertificateError::NotValidForName | CertificateError::NotValidForNameContext { .. },
            )) => Ok(ServerCertVerified::assertion()),
            other => other,
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}
