//! This crate provides an IAM access policy value type:
//! - Role → members bindings with role-keyed get / set / delete
//! - JSON import/export of the `getIamPolicy` / `setIamPolicy` resource
//! - Deprecated owners / editors / viewers tiers and member factories
//!
//! Example:
//!
//! ```
//! use iam_policy_bindings::{Policy, EDITOR_ROLE, OWNER_ROLE, VIEWER_ROLE};
//! use serde_json::json;
//!
//! let mut policy = Policy::from_resource(&json!({"etag": "BwWWja0YfJA="})).unwrap();
//! policy
//!     .set(OWNER_ROLE, ["user:phred@example.com", "group:admins@groups.example.com"])
//!     .unwrap();
//! policy.set(EDITOR_ROLE, ["allAuthenticatedUsers"]).unwrap();
//! policy.set(VIEWER_ROLE, ["allUsers"]).unwrap();
//!
//! let resource = policy.to_value().unwrap();
//! assert_eq!(resource["etag"], "BwWWja0YfJA=");
//! assert_eq!(resource["bindings"].as_array().unwrap().len(), 3);
//! ```

mod error;
pub mod members;
mod policy;
mod types;

pub use error::{PolicyError, PolicyResult};
pub use members::{MemberKind, ALL_AUTHENTICATED_USERS, ALL_USERS};
pub use policy::{Policy, DEPRECATION_TARGET, MAX_SUPPORTED_VERSION};
pub use types::{Binding, LegacyTier, PolicyResource, EDITOR_ROLE, OWNER_ROLE, VIEWER_ROLE};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_then_get_sample() {
        let mut policy = Policy::new();
        policy
            .set(
                "roles/owner",
                ["user:a@x.com", "user:a@x.com", "group:g@x.com"],
            )
            .expect("set should succeed");
        let members = policy.get("roles/owner").expect("get should succeed");
        assert_eq!(members.len(), 2);
        assert!(members.contains("user:a@x.com"));
        assert!(members.contains("group:g@x.com"));
        assert_eq!(
            policy.to_value().expect("should serialize"),
            json!({"bindings": [{"role": "roles/owner", "members": ["group:g@x.com", "user:a@x.com"]}]})
        );
    }
}
