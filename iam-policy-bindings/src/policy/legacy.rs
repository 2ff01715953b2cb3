//! Deprecated owners / editors / viewers accessors.
//!
//! Each tier reads as the union of its mapped roles' members. Assigning to a
//! tier writes its single role and logs a deprecation warning under the
//! [`DEPRECATION_TARGET`] log target.

use super::Policy;
use crate::error::PolicyResult;
use crate::types::LegacyTier;
use log::warn;
use std::collections::BTreeSet;

/// Log target deprecation warnings are emitted under.
pub const DEPRECATION_TARGET: &str = "iam_policy_bindings::deprecation";

impl Policy {
    /// Union of the members bound to the tier's roles.
    pub fn legacy_members(&self, tier: LegacyTier) -> PolicyResult<BTreeSet<String>> {
        let mut result = BTreeSet::new();
        for role in tier.roles() {
            result.extend(self.get(role)?);
        }
        Ok(result)
    }

    /// Assign `members` to the tier's role, logging a deprecation warning.
    pub fn set_legacy_members<I, S>(&mut self, tier: LegacyTier, members: I) -> PolicyResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        warn!(
            target: DEPRECATION_TARGET,
            "Assigning to '{}' is deprecated. Replace with policy.set(\"{}\", members).",
            tier.name(),
            tier.assignment_role()
        );
        self.set(tier.assignment_role(), members)
    }

    #[deprecated(note = "use `Policy::get` or `Policy::bindings` instead")]
    pub fn get_owners(&self) -> PolicyResult<BTreeSet<String>> {
        self.legacy_members(LegacyTier::Owners)
    }

    /// Equivalent to `set(OWNER_ROLE, members)`, plus a deprecation warning.
    #[deprecated(note = "use `Policy::set` instead")]
    pub fn set_owners<I, S>(&mut self, members: I) -> PolicyResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_legacy_members(LegacyTier::Owners, members)
    }

    #[deprecated(note = "use `Policy::get` or `Policy::bindings` instead")]
    pub fn get_editors(&self) -> PolicyResult<BTreeSet<String>> {
        self.legacy_members(LegacyTier::Editors)
    }

    /// Equivalent to `set(EDITOR_ROLE, members)`, plus a deprecation warning.
    #[deprecated(note = "use `Policy::set` instead")]
    pub fn set_editors<I, S>(&mut self, members: I) -> PolicyResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_legacy_members(LegacyTier::Editors, members)
    }

    #[deprecated(note = "use `Policy::get` or `Policy::bindings` instead")]
    pub fn get_viewers(&self) -> PolicyResult<BTreeSet<String>> {
        self.legacy_members(LegacyTier::Viewers)
    }

    /// Equivalent to `set(VIEWER_ROLE, members)`, plus a deprecation warning.
    #[deprecated(note = "use `Policy::set` instead")]
    pub fn set_viewers<I, S>(&mut self, members: I) -> PolicyResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_legacy_members(LegacyTier::Viewers, members)
    }
}
