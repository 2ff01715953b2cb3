//! Conversion between [`Policy`] and the JSON policy resource.
//!
//! Neither direction is version-gated: a newer policy, conditional bindings
//! included, can still be decoded and passed through unchanged.

use super::{merge_duplicate_roles, Policy};
use crate::error::PolicyResult;
use crate::types::PolicyResource;
use log::trace;
use serde::Deserialize;

impl Policy {
    /// Build a policy from a decoded resource.
    pub fn from_policy_resource(resource: PolicyResource) -> Self {
        trace!(
            "Loading policy resource (version {:?}, {} bindings)",
            resource.version,
            resource.bindings.len()
        );
        Self {
            etag: resource.etag,
            version: resource.version,
            bindings: merge_duplicate_roles(resource.bindings, resource.version),
        }
    }

    /// Build a policy from a resource returned by `getIamPolicy`.
    ///
    /// Missing `bindings` means no bindings; unknown fields are ignored.
    pub fn from_resource(resource: &serde_json::Value) -> PolicyResult<Self> {
        let resource = PolicyResource::deserialize(resource)?;
        Ok(Self::from_policy_resource(resource))
    }

    /// Build a policy from the JSON text of a policy resource.
    pub fn from_json_str(json: &str) -> PolicyResult<Self> {
        let resource: PolicyResource = serde_json::from_str(json)?;
        Ok(Self::from_policy_resource(resource))
    }

    /// Render the resource to pass to `setIamPolicy`.
    pub fn to_resource(&self) -> PolicyResource {
        PolicyResource {
            etag: self.etag.clone(),
            version: self.version,
            bindings: self.bindings.clone(),
        }
    }

    /// Render the resource as a JSON value.
    pub fn to_value(&self) -> PolicyResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_resource())?)
    }

    /// Render the resource as compact JSON text.
    pub fn to_json_string(&self) -> PolicyResult<String> {
        Ok(serde_json::to_string(&self.to_resource())?)
    }

    /// Render the resource as indented JSON text.
    pub fn to_json_string_pretty(&self) -> PolicyResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_resource())?)
    }
}

impl From<PolicyResource> for Policy {
    fn from(resource: PolicyResource) -> Self {
        Self::from_policy_resource(resource)
    }
}

impl From<&Policy> for PolicyResource {
    fn from(policy: &Policy) -> Self {
        policy.to_resource()
    }
}
