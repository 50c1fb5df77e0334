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

use std::time::Duration;

use artemis_core::{Context, OsEnv, Result};
use artemis_http_send_reqwest::ReqwestHttpSend;

/// Build a context backed by reqwest and the OS environment.
pub fn default_context(verify_tls: bool, timeout: Duration) -> Result<Context> {
    let http = ReqwestHttpSend::with_options(verify_tls, timeout)?;
    Ok(Context::new().with_http_send(http).with_env(OsEnv))
}

/// Build an artemis client with the default context.
///
/// Fields missing in `config` are loaded from env, see
/// [`Config::from_env`](artemis_isc::Config::from_env).
#[cfg(feature = "isc")]
pub fn default_client(config: artemis_isc::Config) -> Result<artemis_isc::Client> {
    let ctx = default_context(config.verify_tls, config.timeout())?;
    let config = config.from_env(&ctx);
    artemis_isc::Client::new(ctx, config)
}
