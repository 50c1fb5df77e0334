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

//! Signer and client for the artemis gateway of the integrated security
//! platform (ISC).
//!
//! Every call carries a signed `x-ca-*` header set and every response is a
//! JSON envelope `{code, data, msg}`.
//!
//! ```no_run
//! use artemis_core::Context;
//! use artemis_isc::{Client, Config, Operation};
//! use serde_json::json;
//!
//! # async fn example(ctx: Context) -> artemis_core::Result<()> {
//! let config = Config::new().from_env(&ctx);
//! let client = Client::new(ctx, config)?;
//!
//! let outcome = client
//!     .operation(Operation::CardList, json!({"pageNo": 1, "pageSize": 10}))
//!     .await?;
//! println!("{:?}", outcome.into_payload());
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{
    ARTEMIS_ACCESS_KEY, ARTEMIS_HOST, ARTEMIS_SECRET_KEY, X_CA_KEY, X_CA_NONCE,
    X_CA_SIGNATURE, X_CA_SIGNATURE_HEADERS, X_CA_TIMESTAMP,
};

mod config;
pub use config::{Config, DEFAULT_TIMEOUT};

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{nonce, normalize_path, signature, string_to_sign, timestamp, RequestSigner};

mod envelope;
pub use envelope::{interpret, CodeZero, CodeZeroData, InterpretResponse, Outcome};

mod call;
pub use call::{merge_body, Call};

mod operation;
pub use operation::Operation;

mod client;
pub use client::Client;

mod provide_credential;
pub use provide_credential::*;
