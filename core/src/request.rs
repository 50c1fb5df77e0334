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

use std::mem;

use http::header::HeaderName;
use http::HeaderMap;
use http::Method;

use crate::Result;

/// Signing context for request.
///
/// Headers are moved out of the request while signing and moved back by
/// [`SigningRequest::apply`], so no header is copied.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP path, without query.
    pub path: String,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let path = match parts.uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        Ok(SigningRequest {
            method: parts.method.clone(),
            path,
            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        Ok(())
    }
}

/// Get header value by name from a header map.
///
/// Returns empty string if header not found.
pub fn header_get_or_default<'a>(headers: &'a HeaderMap, key: &HeaderName) -> Result<&'a str> {
    match headers.get(key) {
        Some(v) => Ok(v.to_str()?),
        None => Ok(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;

    #[test]
    fn test_build_and_apply() -> Result<()> {
        let req = http::Request::post("https://127.0.0.1:1443/artemis/api/resource/v1/regions?x=1")
            .header(CONTENT_TYPE, "application/json")
            .body(())?;
        let (mut parts, _) = req.into_parts();

        let mut ctx = SigningRequest::build(&mut parts)?;
        assert!(parts.headers.is_empty());
        assert_eq!(ctx.path, "/artemis/api/resource/v1/regions");
        assert_eq!(
            header_get_or_default(&ctx.headers, &CONTENT_TYPE)?,
            "application/json"
        );
        assert_eq!(header_get_or_default(&ctx.headers, &http::header::ACCEPT)?, "");

        ctx.headers.insert("x-ca-key", "20552343".parse()?);
        ctx.apply(&mut parts)?;
        assert_eq!(parts.headers["x-ca-key"], "20552343");
        assert_eq!(parts.headers[CONTENT_TYPE], "application/json");
        assert_eq!(parts.uri.query(), Some("x=1"));

        Ok(())
    }
}
