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

//! Classify artemis responses.
//!
//! Every artemis response is wrapped in the same envelope:
//!
//! ```json
//! {"code": "0", "msg": "success", "data": {...}}
//! ```
//!
//! `code` equal to `0` or `"0"` means success. Any other code is a business
//! failure that still arrived in a well formed response, the platform uses it
//! for both real errors and empty results.

use std::fmt::Debug;

use artemis_core::{Error, Result};
use bytes::Bytes;
use http::StatusCode;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Outcome of one artemis call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Envelope accepted, carries the `data` field.
    Success(Value),
    /// Well formed response whose `code` is not zero, or which lacks a
    /// required field.
    BusinessFailure {
        /// `code` as returned, `None` if absent.
        code: Option<Value>,
        /// `msg` as returned, if any.
        msg: Option<String>,
    },
    /// Response status is not the expected one. The body is not inspected.
    TransportError {
        /// Status returned by the platform.
        status: StatusCode,
    },
    /// Body is not valid JSON.
    MalformedBody,
}

impl Outcome {
    /// Check if the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Borrow the payload if the call succeeded.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Outcome::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Take the payload, every failure becomes `None`.
    pub fn into_payload(self) -> Option<Value> {
        match self {
            Outcome::Success(v) => Some(v),
            _ => None,
        }
    }

    /// Convert into a result.
    ///
    /// - `Success(data)` returns `Some(data)`.
    /// - `BusinessFailure` and `MalformedBody` return `None`.
    /// - `TransportError` returns an error of kind `Transport`.
    pub fn into_result(self) -> Result<Option<Value>> {
        match self {
            Outcome::Success(v) => Ok(Some(v)),
            Outcome::BusinessFailure { code, msg } => {
                debug!("business failure: code={code:?}, msg={msg:?}");
                Ok(None)
            }
            Outcome::MalformedBody => {
                warn!("response body is not valid json, treated as empty result");
                Ok(None)
            }
            Outcome::TransportError { status } => Err(Error::transport(format!(
                "unexpected response status {status}"
            ))),
        }
    }

    /// Deserialize the payload into `T`.
    ///
    /// Returns `Ok(None)` for business failures and malformed bodies, and an
    /// error of kind `MalformedBody` when `data` does not match `T`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let Some(data) = self.into_result()? else {
            return Ok(None);
        };

        serde_json::from_value(data).map(Some).map_err(|e| {
            Error::malformed_body("response data does not match the expected type")
                .with_source(e)
        })
    }
}

/// InterpretResponse classifies a completed HTTP exchange.
pub trait InterpretResponse: Debug + Send + Sync + 'static {
    /// Interpret the response.
    fn interpret(&self, resp: &http::Response<Bytes>) -> Outcome;
}

/// Interpreter for operations returning data.
///
/// Requires `code` to be `0`/`"0"` and a `data` field to be present.
#[derive(Debug, Clone, Copy)]
pub struct CodeZeroData {
    expected_status: StatusCode,
}

impl Default for CodeZeroData {
    fn default() -> Self {
        Self {
            expected_status: StatusCode::OK,
        }
    }
}

impl CodeZeroData {
    /// Expect a different success status.
    pub fn with_expected_status(mut self, status: StatusCode) -> Self {
        self.expected_status = status;
        self
    }
}

impl InterpretResponse for CodeZeroData {
    fn interpret(&self, resp: &http::Response<Bytes>) -> Outcome {
        classify(resp, self.expected_status, true)
    }
}

/// Interpreter for acknowledgement operations.
///
/// Only requires `code` to be `0`/`"0"`, the payload is `data` if present or
/// `null` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct CodeZero {
    expected_status: StatusCode,
}

impl Default for CodeZero {
    fn default() -> Self {
        Self {
            expected_status: StatusCode::OK,
        }
    }
}

impl CodeZero {
    /// Expect a different success status.
    pub fn with_expected_status(mut self, status: StatusCode) -> Self {
        self.expected_status = status;
        self
    }
}

impl InterpretResponse for CodeZero {
    fn interpret(&self, resp: &http::Response<Bytes>) -> Outcome {
        classify(resp, self.expected_status, false)
    }
}

/// Interpret a response with the default [`CodeZeroData`] rules.
pub fn interpret(resp: &http::Response<Bytes>) -> Outcome {
    CodeZeroData::default().interpret(resp)
}

fn classify(resp: &http::Response<Bytes>, expected: StatusCode, require_data: bool) -> Outcome {
    if resp.status() != expected {
        debug!("unexpected response status: {}", resp.status());
        return Outcome::TransportError {
            status: resp.status(),
        };
    }

    let Ok(mut body) = serde_json::from_slice::<Value>(resp.body()) else {
        return Outcome::MalformedBody;
    };

    let Some(object) = body.as_object_mut() else {
        return Outcome::BusinessFailure {
            code: None,
            msg: None,
        };
    };

    let code = object.get("code").cloned();
    let msg = object
        .get("msg")
        .and_then(Value::as_str)
        .map(str::to_string);
    let data = object.remove("data");

    match (code.as_ref().is_some_and(is_code_zero), data) {
        (true, Some(data)) => Outcome::Success(data),
        (true, None) if !require_data => Outcome::Success(Value::Null),
        _ => Outcome::BusinessFailure { code, msg },
    }
}

/// `code` must be exactly integer `0` or string `"0"`.
fn is_code_zero(code: &Value) -> bool {
    match code {
        Value::Number(n) => n.as_i64() == Some(0) || n.as_u64() == Some(0),
        Value::String(s) => s == "0",
        _ => false,
    }
}
