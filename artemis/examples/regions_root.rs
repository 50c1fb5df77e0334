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

use artemis::isc::{Config, Operation, Outcome};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder().try_init();
    let _ = dotenv::dotenv();

    // Host and keys are loaded from ARTEMIS_HOST, ARTEMIS_ACCESS_KEY and
    // ARTEMIS_SECRET_KEY.
    let client = artemis::default_client(Config::new())?;

    match client.operation(Operation::RegionsRoot, json!({})).await? {
        Outcome::Success(data) => println!("root region: {data:#}"),
        Outcome::BusinessFailure { code, msg } => {
            log::warn!("gateway rejected the call: code={code:?}, msg={msg:?}")
        }
        Outcome::TransportError { status } => log::error!("unexpected status: {status}"),
        Outcome::MalformedBody => log::error!("response body is not json"),
    }

    Ok(())
}
