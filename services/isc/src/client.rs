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

use std::sync::Arc;

use artemis_core::{Context, Error, ProvideCredential, Result, Signer};
use bytes::Bytes;
use http::Method;
use log::debug;
use serde_json::Value;

use crate::call::Call;
use crate::config::Config;
use crate::credential::Credential;
use crate::envelope::{CodeZero, CodeZeroData, InterpretResponse, Outcome};
use crate::operation::Operation;
use crate::provide_credential::DefaultCredentialProvider;
use crate::sign_request::{normalize_path, RequestSigner};

/// Client sends signed calls to one artemis gateway.
///
/// Client is cheap to clone, clones share the transport and the loaded
/// credential. To rotate credentials, build a new client.
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Arc<str>,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client from config.
    ///
    /// Credential is loaded from the config first and env next. The host is
    /// validated here, see [`Config::endpoint`].
    ///
    /// `ctx` is used as given: [`Config::timeout`] and [`Config::verify_tls`]
    /// must already be applied to its `HttpSend`.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let provider = DefaultCredentialProvider::with_config(Arc::new(config.clone()));
        Self::with_credential_provider(ctx, config, provider)
    }

    /// Create a client with a custom credential provider.
    pub fn with_credential_provider(
        ctx: Context,
        config: Config,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let endpoint = config.endpoint()?;

        Ok(Self {
            endpoint: endpoint.into(),
            signer: Signer::new(ctx, provider, RequestSigner::new()),
        })
    }

    /// Normalized endpoint of this client.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a call and interpret the response by its kind.
    pub async fn send(&self, call: Call) -> Result<Outcome> {
        if call.is_acknowledge() {
            self.send_with(call, &CodeZero::default()).await
        } else {
            self.send_with(call, &CodeZeroData::default()).await
        }
    }

    /// Send a call and interpret the response with given interpreter.
    ///
    /// Returns an error if the call could not be built or signed, or if the
    /// exchange itself failed. Every completed exchange becomes an [`Outcome`].
    pub async fn send_with(
        &self,
        call: Call,
        interpreter: &dyn InterpretResponse,
    ) -> Result<Outcome> {
        let path = normalize_path(call.path())?;
        let body = call.json_body()?;
        let body = if body.is_empty() && call.method() == Method::GET {
            Bytes::new()
        } else {
            serde_json::to_vec(&body)
                .map(Bytes::from)
                .map_err(|e| Error::unexpected("failed to serialize body").with_source(e))?
        };

        let url = format!("{}{}", self.endpoint, path);
        debug!("sending artemis call: {} {}", call.method(), url);

        let req = http::Request::builder()
            .method(call.method().clone())
            .uri(url)
            .body(body)?;
        let (mut parts, body) = req.into_parts();
        parts.headers = call.headers().clone();

        self.signer.sign(&mut parts).await?;

        let resp = self
            .signer
            .context()
            .http_send(http::Request::from_parts(parts, body))
            .await?;
        let outcome = interpreter.interpret(&resp);
        debug!(
            "artemis call {} finished with status {}, success: {}",
            path,
            resp.status(),
            outcome.is_success()
        );
        Ok(outcome)
    }

    /// POST `body` to `path`.
    pub async fn call(&self, path: &str, body: Value) -> Result<Outcome> {
        self.send(Call::post(path).body(body)).await
    }

    /// POST `body` to `path` and return the payload.
    ///
    /// Business failures and malformed bodies return `None`.
    pub async fn call_data(&self, path: &str, body: Value) -> Result<Option<Value>> {
        self.call(path, body).await?.into_result()
    }

    /// Call a known operation.
    pub async fn operation(&self, op: Operation, body: Value) -> Result<Outcome> {
        self.send(Call::operation(op).body(body)).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use artemis_core::{ErrorKind, HttpSend};
    use async_trait::async_trait;
    use http::header::ACCEPT;
    use http::{HeaderValue, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::constants::*;
    use crate::sign_request::{signature, string_to_sign};

    #[derive(Debug, Clone)]
    struct Recorded {
        method: Method,
        uri: http::Uri,
        headers: http::HeaderMap,
        body: Bytes,
    }

    #[derive(Debug, Clone)]
    struct MockHttpSend {
        status: StatusCode,
        body: &'static str,
        requests: Arc<Mutex<Vec<Recorded>>>,
    }

    impl MockHttpSend {
        fn new(status: StatusCode, body: &'static str) -> Self {
            Self {
                status,
                body,
                requests: Arc::default(),
            }
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            let (parts, body) = req.into_parts();
            self.requests.lock().unwrap().push(Recorded {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
            });
            Ok(http::Response::builder()
                .status(self.status)
                .body(Bytes::from_static(self.body.as_bytes()))?)
        }
    }

    fn client(mock: &MockHttpSend) -> Client {
        let config = Config::new()
            .with_host("https://60.22.91.250:1443/")
            .with_access_key("20552343")
            .with_secret_key("4h9rlhpPLRmjW0pTuow1");
        Client::new(Context::new().with_http_send(mock.clone()), config).unwrap()
    }

    fn assert_signed(req: &Recorded) {
        let expected = signature(
            "4h9rlhpPLRmjW0pTuow1",
            &string_to_sign(&req.method, &req.headers, req.uri.path()).unwrap(),
        );
        assert_eq!(req.headers[X_CA_SIGNATURE], expected.as_str());
    }

    #[tokio::test]
    async fn test_call_data() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock = MockHttpSend::new(StatusCode::OK, r#"{"code": "0", "data": {"total": 1}}"#);
        let client = client(&mock);
        assert_eq!(client.endpoint(), "https://60.22.91.250:1443");

        let data = client
            .call_data(
                "artemis/api/resource/v1/card/cardList",
                json!({"pageNo": 1, "pageSize": 10}),
            )
            .await?;
        assert_eq!(data, Some(json!({"total": 1})));

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.method, Method::POST);
        assert_eq!(
            req.uri.to_string(),
            "https://60.22.91.250:1443/artemis/api/resource/v1/card/cardList"
        );
        assert_eq!(
            serde_json::from_slice::<Value>(&req.body).unwrap(),
            json!({"pageNo": 1, "pageSize": 10})
        );
        assert_eq!(req.headers[X_CA_KEY], "20552343");
        assert_signed(req);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_merges_body_and_headers() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, r#"{"code": 0, "data": []}"#);
        let client = client(&mock);

        let call = Call::post("/artemis/api/resource/v1/regions")
            .body(json!({"pageNo": 1, "pageSize": 10}))
            .overrides(json!({"pageSize": 1000}))
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        let outcome = client.send(call).await?;
        assert_eq!(outcome, Outcome::Success(json!([])));

        let requests = mock.requests();
        let req = &requests[0];
        assert_eq!(
            serde_json::from_slice::<Value>(&req.body).unwrap(),
            json!({"pageNo": 1, "pageSize": 1000})
        );
        assert_eq!(req.headers[ACCEPT], "application/json");
        assert_signed(req);
        Ok(())
    }

    #[tokio::test]
    async fn test_operation_acknowledge() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, r#"{"code": "0", "msg": "success"}"#);
        let client = client(&mock);

        let outcome = client
            .operation(Operation::CarCharge, json!({"plateNo": "A12345"}))
            .await?;
        assert_eq!(outcome, Outcome::Success(Value::Null));

        // Data operations still require `data`.
        let outcome = client.operation(Operation::CarChargePage, json!({})).await?;
        assert!(matches!(outcome, Outcome::BusinessFailure { .. }));

        let requests = mock.requests();
        assert_eq!(requests[0].uri.path(), "/artemis/api/pms/v1/car/charge");
        assert_eq!(
            requests[1].uri.path(),
            "/artemis/api/pms/v1/car/charge/page"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_path_fails_before_sending() {
        let mock = MockHttpSend::new(StatusCode::OK, r#"{"code": 0, "data": {}}"#);
        let client = client(&mock);

        let err = client.call("", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_path_with_query_fails_before_sending() {
        let mock = MockHttpSend::new(StatusCode::OK, r#"{"code": 0, "data": {}}"#);
        let client = client(&mock);

        let err = client.call("/foo?x=1", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_status() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::BAD_GATEWAY, "bad gateway");
        let client = client(&mock);

        let outcome = client.call("/foo", json!({})).await?;
        assert_eq!(
            outcome,
            Outcome::TransportError {
                status: StatusCode::BAD_GATEWAY
            }
        );

        let err = client.call_data("/foo", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        Ok(())
    }

    #[tokio::test]
    async fn test_exchange_failure() {
        let config = Config::new()
            .with_host("https://60.22.91.250:1443")
            .with_access_key("20552343")
            .with_secret_key("4h9rlhpPLRmjW0pTuow1");
        let client = Client::new(Context::new(), config).unwrap();

        let err = client.call("/foo", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let mock = MockHttpSend::new(StatusCode::OK, r#"{"code": 0, "data": {}}"#);
        let config = Config::new().with_host("https://60.22.91.250:1443");
        let client = Client::new(Context::new().with_http_send(mock.clone()), config).unwrap();

        let err = client.call("/foo", json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(mock.requests().is_empty());
    }

    #[test]
    fn test_invalid_host() {
        let err = Client::new(Context::new(), Config::new().with_host("60.22.91.250")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[tokio::test]
    async fn test_get_without_body() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, r#"{"code": 0, "data": {}}"#);
        let client = client(&mock);

        client.send(Call::get("/foo")).await?;
        let requests = mock.requests();
        let req = &requests[0];
        assert_eq!(req.method, Method::GET);
        assert!(req.body.is_empty());
        assert_signed(req);
        Ok(())
    }
}
