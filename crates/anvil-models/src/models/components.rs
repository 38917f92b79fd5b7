/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # Components Module
//!
//! This module defines the resource envelope decoded from each YAML document.
//!
//! ## Core Data Model
//!
//! The envelope is represented by the `Component` struct:
//!
//! - `api_version`: Option<String> - API group and version of the resource (`apiVersion`)
//! - `kind`: String - Discriminator deciding whether the document is of interest
//! - `metadata`: ObjectMeta - Name, namespace, labels and annotations
//! - `spec`: serde_yaml::Mapping - Opaque body, interpreted by downstream consumers
//!
//! Every field is optional in the source document. A document without `kind`
//! decodes to an empty kind, which never matches [`COMPONENT_KIND`]. A present
//! `spec` must be a mapping; anything else is a decode failure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The discriminator value of documents that are loaded as components.
pub const COMPONENT_KIND: &str = "Component";

/// A decoded resource document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// API group and version, e.g. `dapr.io/v1alpha1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Resource kind
    #[serde(default)]
    pub kind: String,
    /// Identifying metadata
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Unstructured resource body
    #[serde(default)]
    pub spec: serde_yaml::Mapping,
}

/// Identifying metadata shared by all resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl Component {
    /// Returns true when the document's discriminator equals `kind` exactly.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Name from the metadata block, if any.
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    /// Looks up a top-level key of the spec body.
    pub fn spec_value(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.spec.get(key)
    }
}
