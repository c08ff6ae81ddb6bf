// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub tag: String,
    pub name: String,
    pub category: Option<String>,
    pub department: Option<String>,
    pub serial: Option<String>,
    pub status: String,
    pub acquired_on: Option<String>,
    pub price: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repair {
    pub id: i64,
    pub equipment_tag: String,
    pub reported_on: String,
    pub description: String,
    pub cost: String,
    pub resolved_on: Option<String>,
}
