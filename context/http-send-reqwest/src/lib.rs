// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Reqwest-based HTTP client implementation for artemis.
//!
//! This crate provides `ReqwestHttpSend`, an HTTP client that implements
//! the `HttpSend` trait from `artemis_core` using the popular reqwest library.
//!
//! ## Example
//!
//! ```no_run
//! use artemis_core::Context;
//! use artemis_http_send_reqwest::ReqwestHttpSend;
//! use std::time::Duration;
//!
//! # fn main() -> artemis_core::Result<()> {
//! // Self-signed platform certificates are common, so verification is optional.
//! let http = ReqwestHttpSend::with_options(false, Duration::from_secs(120))?;
//! let ctx = Context::new().with_http_send(http);
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Client
//!
//! ```no_run
//! use artemis_http_send_reqwest::ReqwestHttpSend;
//! use reqwest::Client;
//! use std::time::Duration;
//!
//! let client = Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .pool_max_idle_per_host(10)
//!     .build()
//!     .unwrap();
//!
//! let http_send = ReqwestHttpSend::new(client);
//! ```

use std::time::Duration;

use artemis_core::{Error, HttpSend, Result};
use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
///
/// There is no `Default`: pick the TLS and timeout options explicitly with
/// [`ReqwestHttpSend::with_options`] or bring a configured [`Client`].
#[derive(Debug, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a new ReqwestHttpSend with TLS verification switch and timeout.
    ///
    /// With `verify_tls = false` invalid or self-signed certificates are accepted.
    pub fn with_options(verify_tls: bool, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(!verify_tls)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config_invalid("failed to build reqwest client").with_source(e))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::invalid_argument("failed to convert request").with_source(e))?;
        log::debug!("sending {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                let msg = if e.is_timeout() {
                    "request timed out"
                } else {
                    "failed to execute request"
                };
                Error::transport(msg).with_source(e)
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artemis_core::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on a random local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let resp = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(resp.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_http_send_collects_body() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let base = serve_once("200 OK", r#"{"code":"0","data":{}}"#).await;
        let http = ReqwestHttpSend::with_options(false, Duration::from_secs(5))?;

        let req = http::Request::post(format!("{base}/artemis/api/resource/v1/regions/root"))
            .header("content-type", "application/json")
            .body(Bytes::from_static(b"{}"))?;
        let resp = http.http_send(req).await?;

        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(resp.body().as_ref(), br#"{"code":"0","data":{}}"#);
        Ok(())
    }

    #[tokio::test]
    async fn test_http_send_keeps_error_status() -> anyhow::Result<()> {
        let base = serve_once("500 Internal Server Error", "oops").await;
        let http = ReqwestHttpSend::new(Client::new());

        let req = http::Request::post(format!("{base}/artemis")).body(Bytes::new())?;
        let resp = http.http_send(req).await?;

        assert_eq!(resp.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.body().as_ref(), b"oops");
        Ok(())
    }

    #[tokio::test]
    async fn test_http_send_connection_refused() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        drop(listener);

        let http = ReqwestHttpSend::with_options(false, Duration::from_secs(5))?;
        let req = http::Request::post(format!("http://{addr}/artemis")).body(Bytes::new())?;
        let err = http.http_send(req).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        Ok(())
    }

    #[tokio::test]
    async fn test_http_send_timeout() -> anyhow::Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        // Accept and hold the connection without ever answering.
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(stream);
        });

        let http = ReqwestHttpSend::with_options(false, Duration::from_millis(200))?;
        let req = http::Request::post(format!("http://{addr}/artemis")).body(Bytes::new())?;
        let err = http.http_send(req).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(err.to_string().contains("timed out"), "{err}");
        Ok(())
    }
}
