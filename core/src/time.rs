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

//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime with current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Milliseconds since the Unix epoch of the given time.
#[inline]
pub fn timestamp_millis(t: DateTime) -> i64 {
    t.timestamp_millis()
}

/// Milliseconds since the Unix epoch of the current time.
pub fn now_millis() -> i64 {
    timestamp_millis(now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_millis() {
        let t = chrono::DateTime::parse_from_rfc2822("Mon, 15 Aug 2022 16:50:12 GMT")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(timestamp_millis(t), 1660582212000);
    }

    #[test]
    fn test_now_millis_moves_forward() {
        let before = now_millis();
        let after = now_millis();
        assert!(after >= before);
        // Milliseconds, not seconds.
        assert!(before > 1_000_000_000_000);
    }
}
