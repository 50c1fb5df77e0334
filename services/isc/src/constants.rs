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

// Env values used in artemis services.
pub const ARTEMIS_HOST: &str = "ARTEMIS_HOST";
pub const ARTEMIS_ACCESS_KEY: &str = "ARTEMIS_ACCESS_KEY";
pub const ARTEMIS_SECRET_KEY: &str = "ARTEMIS_SECRET_KEY";

// Headers used in artemis signing.
pub const X_CA_KEY: &str = "x-ca-key";
pub const X_CA_NONCE: &str = "x-ca-nonce";
pub const X_CA_TIMESTAMP: &str = "x-ca-timestamp";
pub const X_CA_SIGNATURE: &str = "x-ca-signature";
pub const X_CA_SIGNATURE_HEADERS: &str = "x-ca-signature-headers";

// Default values of the signed headers.
pub const DEFAULT_ACCEPT: &str = "*/*";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const SIGNED_HEADER_NAMES: &str = "x-ca-key,x-ca-nonce,x-ca-timestamp";
