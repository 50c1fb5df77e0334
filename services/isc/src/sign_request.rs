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

//! Artemis gateway request signer.
use std::borrow::Cow;
use std::fmt::Write;

use artemis_core::hash::base64_hmac_sha256;
use artemis_core::time::{now_millis, timestamp_millis, DateTime};
use artemis_core::{
    header_get_or_default, Context, Error, Result, SignRequest, SigningCredential, SigningRequest,
};
use http::header::{HeaderName, ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use log::debug;

use super::constants::*;
use super::credential::Credential;

/// RequestSigner that implements the artemis `x-ca-*` header signature.
///
/// The signed header set contains `accept`, `content-type`,
/// `x-ca-signature-headers`, `x-ca-key`, `x-ca-nonce`, `x-ca-timestamp` and
/// `x-ca-signature`. A new nonce and timestamp are generated for every call.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Specify the signing nonce.
    ///
    /// # Note
    ///
    /// A nonce must never be reused. Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    fn timestamp(&self) -> i64 {
        self.time.map(timestamp_millis).unwrap_or_else(timestamp)
    }

    fn nonce(&self) -> String {
        self.nonce.clone().unwrap_or_else(nonce)
    }

    /// Build the complete signed header set for one request.
    ///
    /// Precedence, lowest first: defaults (`accept`, `content-type`,
    /// `x-ca-signature-headers`), identity headers (`x-ca-key`, fresh
    /// `x-ca-nonce` and `x-ca-timestamp`), then `extra_headers`. The string to
    /// sign is built from the final values and `x-ca-signature` is always
    /// computed last.
    pub fn build_headers(
        &self,
        cred: &Credential,
        method: &Method,
        path: &str,
        extra_headers: &HeaderMap,
    ) -> Result<HeaderMap> {
        let path = normalize_path(path)?;

        let mut headers = HeaderMap::with_capacity(7 + extra_headers.len());
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_CONTENT_TYPE));
        headers.insert(
            X_CA_SIGNATURE_HEADERS,
            HeaderValue::from_static(SIGNED_HEADER_NAMES),
        );
        headers.insert(X_CA_KEY, cred.access_key.parse()?);
        headers.insert(X_CA_NONCE, self.nonce().parse()?);
        headers.insert(X_CA_TIMESTAMP, HeaderValue::from(self.timestamp()));

        for (name, value) in extra_headers {
            headers.insert(name.clone(), value.clone());
        }

        let string_to_sign = string_to_sign(method, &headers, &path)?;
        let mut value: HeaderValue = signature(&cred.secret_key, &string_to_sign).parse()?;
        value.set_sensitive(true);
        headers.insert(X_CA_SIGNATURE, value);

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential
            .filter(|c| c.is_valid())
            .ok_or_else(|| Error::credential_invalid("missing access key or secret key"))?;
        if parts.uri.query().is_some() {
            return Err(Error::invalid_argument(format!(
                "uri {} must not contain query",
                parts.uri
            )));
        }

        let mut ctx = SigningRequest::build(parts)?;
        ctx.headers = self.build_headers(cred, &ctx.method, &ctx.path, &ctx.headers)?;
        ctx.apply(parts)
    }
}

/// Current time as milliseconds since the Unix epoch.
pub fn timestamp() -> i64 {
    now_millis()
}

/// A fresh 128-bit random nonce rendered as 32 lowercase hex chars.
pub fn nonce() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

/// Base64 encoded HMAC-SHA256 of `message`, keyed by the raw secret key bytes.
pub fn signature(secret_key: &str, message: &str) -> String {
    base64_hmac_sha256(secret_key.as_bytes(), message.as_bytes())
}

/// Make sure path starts with `/`.
///
/// Empty path, or path carrying a query or fragment, is rejected with
/// [`ErrorKind::InvalidArgument`](artemis_core::ErrorKind::InvalidArgument).
/// Only the path is part of the string to sign.
pub fn normalize_path(path: &str) -> Result<Cow<'_, str>> {
    if path.is_empty() {
        return Err(Error::invalid_argument("path must not be empty"));
    }
    if path.contains(['?', '#']) {
        return Err(Error::invalid_argument(format!(
            "path {path} must not contain query or fragment"
        )));
    }
    if path.starts_with('/') {
        Ok(Cow::Borrowed(path))
    } else {
        Ok(Cow::Owned(format!("/{path}")))
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// HTTPMethod + "\n" +
/// Accept + "\n" +
/// Content-Type + "\n" +
/// "x-ca-key:" + Key + "\n" +
/// "x-ca-nonce:" + Nonce + "\n" +
/// "x-ca-timestamp:" + Timestamp + "\n" +
/// Path
/// ```
///
/// Values are taken from `headers` as they are, the path is never combined
/// with host or query.
pub fn string_to_sign(method: &Method, headers: &HeaderMap, path: &str) -> Result<String> {
    let path = normalize_path(path)?;

    let mut s = String::with_capacity(128);
    s.write_str(method.as_str())?;
    s.write_str("\n")?;
    s.write_str(header_get_or_default(headers, &ACCEPT)?)?;
    s.write_str("\n")?;
    s.write_str(header_get_or_default(headers, &CONTENT_TYPE)?)?;
    s.write_str("\n")?;
    for name in [X_CA_KEY, X_CA_NONCE, X_CA_TIMESTAMP] {
        let value = header_get_or_default(headers, &HeaderName::from_static(name))?;
        writeln!(&mut s, "{name}:{value}")?;
    }
    s.write_str(&path)?;

    debug!("string to sign: {}", &s);
    Ok(s)
}
