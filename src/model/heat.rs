// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Heat-map overlay settings for one attribute of one label.
///
/// Configs are stored per diagram under [`heat_key`]. Mapping values to colors happens on the
/// rendering side; this type only carries the parameters through load/save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HeatConfig {
    /// Numeric attribute mapped linearly between `min` and `max`.
    Linear {
        label: String,
        attribute: String,
        min: f64,
        max: f64,
    },
    /// Enum attribute; a value's heat is its position in `values`.
    Enum {
        label: String,
        attribute: String,
        values: Vec<String>,
    },
}

impl HeatConfig {
    pub fn label(&self) -> &str {
        match self {
            Self::Linear { label, .. } | Self::Enum { label, .. } => label,
        }
    }

    pub fn attribute(&self) -> &str {
        match self {
            Self::Linear { attribute, .. } | Self::Enum { attribute, .. } => attribute,
        }
    }

    pub fn key(&self) -> String {
        heat_key(self.label(), self.attribute())
    }
}

/// Map key for a heat config: `<label>-<attribute>`.
pub fn heat_key(label: &str, attribute: &str) -> String {
    format!("{label}-{attribute}")
}

#[cfg(test)]
mod tests {
    use super::{heat_key, HeatConfig};

    #[test]
    fn key_joins_label_and_attribute() {
        let config = HeatConfig::Enum {
            label: "Server".to_owned(),
            attribute: "state".to_owned(),
            values: vec!["down".to_owned(), "up".to_owned()],
        };
        assert_eq!(config.key(), heat_key("Server", "state"));
        assert_eq!(config.key(), "Server-state");
    }
}
