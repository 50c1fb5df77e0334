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

use artemis_core::{Error, Result};
use http::header::HeaderName;
use http::{HeaderMap, HeaderValue, Method};
use serde_json::{Map, Value};

use crate::operation::Operation;

/// Call describes one request against the artemis gateway.
///
/// ```
/// use artemis_isc::Call;
/// use serde_json::json;
///
/// let call = Call::post("/artemis/api/resource/v1/card/cardList")
///     .body(json!({"pageNo": 1, "pageSize": 10}))
///     .overrides(json!({"pageSize": 100}));
/// assert_eq!(call.json_body().unwrap()["pageSize"], 100);
/// ```
#[derive(Debug, Clone)]
pub struct Call {
    method: Method,
    path: String,
    body: Value,
    overrides: Value,
    headers: HeaderMap,
    acknowledge: bool,
}

impl Call {
    /// Create a call with given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Value::Null,
            overrides: Value::Null,
            headers: HeaderMap::new(),
            acknowledge: false,
        }
    }

    /// Create a `POST` call.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Create a `GET` call.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create a call for a known operation.
    pub fn operation(op: Operation) -> Self {
        let call = Self::post(op.path());
        if op.acknowledges() {
            call.acknowledge()
        } else {
            call
        }
    }

    /// Set the default JSON body. Must be an object or `null`.
    pub fn body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Set body fields that win over the default body.
    pub fn overrides(mut self, overrides: Value) -> Self {
        self.overrides = overrides;
        self
    }

    /// Add a header, overriding the signed default of the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Only require `code` in the response envelope.
    pub fn acknowledge(mut self) -> Self {
        self.acknowledge = true;
        self
    }

    /// Method of this call.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path of this call as given.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Extra headers of this call.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Check if this call is an acknowledgement call.
    pub fn is_acknowledge(&self) -> bool {
        self.acknowledge
    }

    /// Merged JSON body to send.
    pub fn json_body(&self) -> Result<Map<String, Value>> {
        Ok(merge_body(
            as_object(&self.body, "body")?,
            as_object(&self.overrides, "overrides")?,
        ))
    }
}

fn as_object(v: &Value, field: &str) -> Result<Map<String, Value>> {
    match v {
        Value::Null => Ok(Map::new()),
        Value::Object(m) => Ok(m.clone()),
        _ => Err(Error::invalid_argument(format!(
            "{field} must be a json object"
        ))),
    }
}

/// Merge `overrides` into `defaults`.
///
/// Top level keys only, values from `overrides` replace the defaults as a
/// whole.
pub fn merge_body(mut defaults: Map<String, Value>, overrides: Map<String, Value>) -> Map<String, Value> {
    defaults.extend(overrides);
    defaults
}
