// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP resource clients for the Jaqpot prediction service
//!
//! This crate implements the [`resource_client`] capability traits on top of
//! `reqwest`, and adds the account operations the prediction workflow does not
//! need (API key issuance).
//!
//! # Architecture
//!
//! - **Client**: [`client::JaqpotHttpClient`] - signed requests against the service
//! - **Configuration**: [`config::JaqpotConfig`] - base URL, credentials and timeouts,
//!   loadable from a file and `JAQPOT_` environment variables
//! - **Credentials**: [`credentials::Credentials`] - the API key pair sent on every request
//!
//! Every request carries the `X-Api-Key` and `X-Api-Secret` headers. The pair is
//! passed through as-is; the client only checks that neither part is blank.

pub mod client;
pub mod config;
pub mod credentials;

pub use client::{JaqpotHttpClient, JaqpotHttpError};
pub use config::{DEFAULT_BASE_URL, JaqpotConfig};
pub use credentials::Credentials;
