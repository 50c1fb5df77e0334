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

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use artemis_core::Error;
use once_cell::sync::Lazy;

/// Operation is a known artemis endpoint.
///
/// Every operation maps to one fixed path. Operations that only acknowledge
/// a change (see [`Operation::acknowledges`]) are interpreted with
/// [`CodeZero`](crate::CodeZero), all others with
/// [`CodeZeroData`](crate::CodeZeroData).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Operation {
    /// Query vehicle charge periods by page.
    CarChargePage,
    /// Charge a vehicle for a parking lot.
    CarCharge,
    /// Cancel the charge period of a vehicle.
    CarChargeDeletion,
    /// Query temporary vehicles still inside by page.
    TempCarInRecordsPage,
    /// Advanced vehicle query.
    VehicleAdvanceList,
    /// Add vehicles in batch.
    VehicleBatchAdd,
    /// Update a single vehicle.
    VehicleSingleUpdate,
    /// Delete vehicles in batch.
    VehicleBatchDelete,
    /// Fetch the root region.
    RegionsRoot,
    /// Query regions by params.
    RegionNodesByParams,
    /// Query the sub regions of a region.
    SubRegions,
    /// List regions by page.
    Regions,
    /// Fetch region info by index codes.
    RegionCatalogRegionInfo,
    /// Query regions changed in a time range.
    RegionTimeRange,
    /// Add regions in batch.
    RegionBatchAdd,
    /// Update a single region.
    RegionSingleUpdate,
    /// Fetch card info.
    CardInfo,
    /// Advanced card query.
    CardAdvanceList,
    /// Query cards changed in a time range.
    CardTimeRange,
    /// Bind cards to persons.
    CardBindings,
    /// List cards by page.
    CardList,
}

impl Operation {
    /// All known operations.
    pub const ALL: [Operation; 21] = [
        Operation::CarChargePage,
        Operation::CarCharge,
        Operation::CarChargeDeletion,
        Operation::TempCarInRecordsPage,
        Operation::VehicleAdvanceList,
        Operation::VehicleBatchAdd,
        Operation::VehicleSingleUpdate,
        Operation::VehicleBatchDelete,
        Operation::RegionsRoot,
        Operation::RegionNodesByParams,
        Operation::SubRegions,
        Operation::Regions,
        Operation::RegionCatalogRegionInfo,
        Operation::RegionTimeRange,
        Operation::RegionBatchAdd,
        Operation::RegionSingleUpdate,
        Operation::CardInfo,
        Operation::CardAdvanceList,
        Operation::CardTimeRange,
        Operation::CardBindings,
        Operation::CardList,
    ];

    /// Fixed request path of this operation.
    pub fn path(&self) -> &'static str {
        match self {
            Operation::CarChargePage => "/artemis/api/pms/v1/car/charge/page",
            Operation::CarCharge => "/artemis/api/pms/v1/car/charge",
            Operation::CarChargeDeletion => "/artemis/api/pms/v1/car/charge/deletion",
            Operation::TempCarInRecordsPage => "/artemis/api/pms/v1/tempCarInRecords/page",
            Operation::VehicleAdvanceList => "/artemis/api/resource/v2/vehicle/advance/vehicleList",
            Operation::VehicleBatchAdd => "/artemis/api/resource/v1/vehicle/batch/add",
            Operation::VehicleSingleUpdate => "/artemis/api/resource/v1/vehicle/single/update",
            Operation::VehicleBatchDelete => "/artemis/api/resource/v1/vehicle/batch/delete",
            Operation::RegionsRoot => "/artemis/api/resource/v1/regions/root",
            Operation::RegionNodesByParams => "/artemis/api/irds/v2/region/nodesByParams",
            Operation::SubRegions => "/artemis/api/resource/v2/regions/subRegions",
            Operation::Regions => "/artemis/api/resource/v1/regions",
            Operation::RegionCatalogRegionInfo => {
                "/artemis/api/resource/v1/region/regionCatalog/regionInfo"
            }
            Operation::RegionTimeRange => "/artemis/api/resource/v1/region/timeRange",
            Operation::RegionBatchAdd => "/artemis/api/resource/v1/region/batch/add",
            Operation::RegionSingleUpdate => "/artemis/api/resource/v1/region/single/update",
            Operation::CardInfo => "/artemis/api/irds/v1/card/cardInfo",
            Operation::CardAdvanceList => "/artemis/api/irds/v1/card/advance/cardList",
            Operation::CardTimeRange => "/artemis/api/resource/v1/card/timeRange",
            Operation::CardBindings => "/artemis/api/cis/v1/card/bindings",
            Operation::CardList => "/artemis/api/resource/v1/card/cardList",
        }
    }

    /// Snake case name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CarChargePage => "car_charge_page",
            Operation::CarCharge => "car_charge",
            Operation::CarChargeDeletion => "car_charge_deletion",
            Operation::TempCarInRecordsPage => "temp_car_in_records_page",
            Operation::VehicleAdvanceList => "vehicle_advance_list",
            Operation::VehicleBatchAdd => "vehicle_batch_add",
            Operation::VehicleSingleUpdate => "vehicle_single_update",
            Operation::VehicleBatchDelete => "vehicle_batch_delete",
            Operation::RegionsRoot => "regions_root",
            Operation::RegionNodesByParams => "region_nodes_by_params",
            Operation::SubRegions => "sub_regions",
            Operation::Regions => "regions",
            Operation::RegionCatalogRegionInfo => "region_catalog_region_info",
            Operation::RegionTimeRange => "region_time_range",
            Operation::RegionBatchAdd => "region_batch_add",
            Operation::RegionSingleUpdate => "region_single_update",
            Operation::CardInfo => "card_info",
            Operation::CardAdvanceList => "card_advance_list",
            Operation::CardTimeRange => "card_time_range",
            Operation::CardBindings => "card_bindings",
            Operation::CardList => "card_list",
        }
    }

    /// Whether a success response of this operation only carries `code`.
    pub fn acknowledges(&self) -> bool {
        matches!(
            self,
            Operation::CarCharge | Operation::CarChargeDeletion | Operation::VehicleSingleUpdate
        )
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

static BY_NAME: Lazy<HashMap<&'static str, Operation>> =
    Lazy::new(|| Operation::ALL.iter().map(|op| (op.name(), *op)).collect());

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| Error::invalid_argument(format!("unknown operation: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use artemis_core::ErrorKind;
    use test_case::test_case;

    use super::*;

    #[test]
    fn test_table_is_consistent() {
        let paths: HashSet<_> = Operation::ALL.iter().map(|op| op.path()).collect();
        let names: HashSet<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(paths.len(), Operation::ALL.len());
        assert_eq!(names.len(), Operation::ALL.len());

        for op in Operation::ALL {
            assert!(op.path().starts_with("/artemis/api/"), "{op}");
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test_case(Operation::CarCharge, true)]
    #[test_case(Operation::CarChargeDeletion, true)]
    #[test_case(Operation::VehicleSingleUpdate, true)]
    #[test_case(Operation::CarChargePage, false)]
    #[test_case(Operation::RegionSingleUpdate, false)]
    fn test_acknowledges(op: Operation, expected: bool) {
        assert_eq!(op.acknowledges(), expected);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "regions/root".parse::<Operation>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::RegionsRoot.to_string(), "regions_root");
        assert_eq!(
            Operation::RegionsRoot.path(),
            "/artemis/api/resource/v1/regions/root"
        );
    }
}
