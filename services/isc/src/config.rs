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

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use artemis_core::{utils::Redact, Context, Error, Result};
use http::Uri;

use super::constants::*;

/// Timeout used when [`Config::timeout`] is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Config carries all the configuration for the artemis gateway.
#[derive(Clone, Default)]
pub struct Config {
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ARTEMIS_HOST`]
    ///
    /// It must be `scheme://authority` like `https://10.0.0.1:1443`, a single
    /// trailing slash is ignored.
    pub host: Option<String>,
    /// `access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ARTEMIS_ACCESS_KEY`]
    pub access_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ARTEMIS_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// Timeout for a whole exchange, [`DEFAULT_TIMEOUT`] if unset.
    ///
    /// Transport option: read when the `HttpSend` of the context is built
    /// (for example `artemis::default_context`), not by [`Client`](crate::Client).
    pub timeout: Option<Duration>,
    /// Verify the platform's TLS certificate.
    ///
    /// Off by default since platforms usually ship self-signed certificates.
    /// Transport option like `timeout`.
    pub verify_tls: bool,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set access_key
    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set verify_tls
    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Load config from env.
    ///
    /// Values already present in this config are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(ARTEMIS_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ARTEMIS_ACCESS_KEY) {
            self.access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ARTEMIS_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }

        self
    }

    /// Timeout to use for a single exchange.
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Normalized endpoint built from `host`.
    ///
    /// Returns `scheme://authority` without trailing slash.
    pub fn endpoint(&self) -> Result<String> {
        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("host is required"))?;
        let host = host.strip_suffix('/').unwrap_or(host);

        let uri: Uri = host.parse().map_err(|e| {
            Error::config_invalid(format!("host {host} is not a valid uri")).with_source(e)
        })?;
        let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) else {
            return Err(Error::config_invalid(format!(
                "host {host} must contain scheme and authority"
            )));
        };
        if !matches!(uri.path(), "" | "/") || uri.query().is_some() {
            return Err(Error::config_invalid(format!(
                "host {host} must not contain path or query"
            )));
        }

        Ok(format!("{scheme}://{authority}"))
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("timeout", &self.timeout)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artemis_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;
    use test_case::test_case;

    #[test_case("https://60.22.91.250:1443", "https://60.22.91.250:1443"; "plain")]
    #[test_case("https://60.22.91.250:1443/", "https://60.22.91.250:1443"; "trailing slash")]
    #[test_case("http://isc.example.com", "http://isc.example.com"; "domain")]
    #[test_case(" https://isc.example.com/ ", "https://isc.example.com"; "whitespace")]
    fn test_endpoint(host: &str, expected: &str) {
        let cfg = Config::new().with_host(host);
        assert_eq!(cfg.endpoint().unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("60.22.91.250"; "missing scheme")]
    #[test_case("https://60.22.91.250:1443/prefix"; "with path")]
    #[test_case("https://60.22.91.250:1443/?a=b"; "with query")]
    fn test_endpoint_invalid(host: &str) {
        let cfg = Config::new().with_host(host);
        assert_eq!(cfg.endpoint().unwrap_err().kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_endpoint_missing_host() {
        let err = Config::new().endpoint().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_from_env_keeps_explicit_values() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (ARTEMIS_HOST.to_string(), "https://env-host".to_string()),
                (ARTEMIS_ACCESS_KEY.to_string(), "env_ak".to_string()),
                (ARTEMIS_SECRET_KEY.to_string(), "env_sk".to_string()),
            ]),
        });

        let cfg = Config::new().with_access_key("explicit_ak").from_env(&ctx);
        assert_eq!(cfg.host.as_deref(), Some("https://env-host"));
        assert_eq!(cfg.access_key.as_deref(), Some("explicit_ak"));
        assert_eq!(cfg.secret_key.as_deref(), Some("env_sk"));
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(!cfg.verify_tls);
        assert_eq!(cfg.timeout(), Duration::from_secs(120));
        assert_eq!(
            cfg.with_timeout(Duration::from_secs(5)).timeout(),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_debug_is_redacted() {
        let cfg = Config::new()
            .with_host("https://isc.example.com")
            .with_secret_key("4h9rlhpPLRmjW0pTuow1");
        let s = format!("{cfg:?}");
        assert!(s.contains("https://isc.example.com"));
        assert!(!s.contains("4h9rlhpPLRmjW0pTuow1"));
    }
}
