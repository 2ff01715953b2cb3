//! Access policy: an ordered list of role bindings with role-keyed access.
//!
//! Every role-keyed operation first runs [`Policy::check_version`]. Policies
//! declaring a schema version above 1 may carry conditional bindings, which
//! this type does not model, so role-keyed access to them is refused.

mod legacy;
mod resource;

pub use legacy::DEPRECATION_TARGET;

use crate::error::{PolicyError, PolicyResult};
use crate::types::Binding;
use log::{debug, trace};
use std::collections::BTreeSet;

/// Highest schema version role-keyed access is defined for.
pub const MAX_SUPPORTED_VERSION: i32 = 1;

/// IAM policy: role bindings plus an opaque etag and a schema version.
///
/// Holds at most one binding per role. The type has no internal locking;
/// callers sharing one instance across threads must wrap it themselves
/// (for example in a `Mutex`).
///
/// ```
/// use iam_policy_bindings::{Policy, OWNER_ROLE};
///
/// let mut policy = Policy::new();
/// policy
///     .set(OWNER_ROLE, ["user:a@x.com", "user:a@x.com", "group:g@x.com"])
///     .unwrap();
/// assert_eq!(policy.get(OWNER_ROLE).unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    etag: Option<String>,
    version: Option<i32>,
    bindings: Vec<Binding>,
}

impl Policy {
    /// Create an empty policy with no etag and no version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty policy carrying an etag and version.
    pub fn with_etag_and_version(etag: Option<String>, version: Option<i32>) -> Self {
        Self {
            etag,
            version,
            bindings: Vec::new(),
        }
    }

    /// Opaque concurrency token, passed through unmodified.
    pub fn etag(&self) -> Option<&str> {
        self.etag.as_deref()
    }

    /// Replace the etag.
    pub fn set_etag(&mut self, etag: Option<String>) {
        self.etag = etag;
    }

    /// Declared schema version, if any.
    pub fn version(&self) -> Option<i32> {
        self.version
    }

    /// Replace the schema version. This changes what the version gate allows.
    pub fn set_version(&mut self, version: Option<i32>) {
        self.version = version;
    }

    /// Fail with [`PolicyError::UnsupportedVersion`] if the declared version
    /// is above [`MAX_SUPPORTED_VERSION`].
    pub fn check_version(&self) -> PolicyResult<()> {
        match self.version {
            Some(version) if version > MAX_SUPPORTED_VERSION => {
                Err(PolicyError::UnsupportedVersion(version))
            }
            _ => Ok(()),
        }
    }

    /// Members bound to `role`, or an empty set if the role has no binding.
    pub fn get(&self, role: &str) -> PolicyResult<BTreeSet<String>> {
        self.check_version()?;
        Ok(self
            .find(role)
            .map(|index| self.bindings[index].members.clone())
            .unwrap_or_default())
    }

    /// Bind `members` to `role`, replacing any existing binding for it.
    ///
    /// Duplicate members collapse. A new role is appended after the existing
    /// bindings; a known role keeps its position.
    pub fn set<I, S>(&mut self, role: impl Into<String>, members: I) -> PolicyResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_version()?;
        let binding = Binding::new(role, members);
        match self.find(&binding.role) {
            Some(index) => {
                debug!(
                    "Replacing binding for {} ({} members)",
                    binding.role,
                    binding.members.len()
                );
                self.bindings[index].members = binding.members;
            }
            None => {
                debug!(
                    "Adding binding for {} ({} members)",
                    binding.role,
                    binding.members.len()
                );
                self.bindings.push(binding);
            }
        }
        Ok(())
    }

    /// Remove and return the binding for `role`.
    pub fn delete(&mut self, role: &str) -> PolicyResult<Binding> {
        self.check_version()?;
        let index = self
            .find(role)
            .ok_or_else(|| PolicyError::role_not_found(role))?;
        debug!("Removing binding for {}", role);
        Ok(self.bindings.remove(index))
    }

    /// Add a single member to `role`, creating the binding if needed.
    ///
    /// Returns `false` if the member was already bound.
    pub fn add_member(&mut self, role: &str, member: impl Into<String>) -> PolicyResult<bool> {
        self.check_version()?;
        let member = member.into();
        match self.find(role) {
            Some(index) => Ok(self.bindings[index].members.insert(member)),
            None => {
                self.bindings.push(Binding::new(role, [member]));
                Ok(true)
            }
        }
    }

    /// Remove a single member from `role`.
    ///
    /// A binding left without members is dropped. Returns `false` if the
    /// member was not bound; fails if the role has no binding at all.
    pub fn remove_member(&mut self, role: &str, member: &str) -> PolicyResult<bool> {
        self.check_version()?;
        let index = self
            .find(role)
            .ok_or_else(|| PolicyError::role_not_found(role))?;
        let removed = self.bindings[index].members.remove(member);
        if self.bindings[index].members.is_empty() {
            trace!("Dropping empty binding for {}", role);
            self.bindings.remove(index);
        }
        Ok(removed)
    }

    /// Roles in binding order.
    ///
    /// The iterator borrows the policy; call again to restart.
    pub fn roles(&self) -> PolicyResult<impl Iterator<Item = &str> + '_> {
        self.check_version()?;
        Ok(self.bindings.iter().map(|binding| binding.role.as_str()))
    }

    /// Whether `role` has a binding.
    pub fn contains_role(&self, role: &str) -> PolicyResult<bool> {
        self.check_version()?;
        Ok(self.find(role).is_some())
    }

    /// Number of bindings.
    pub fn len(&self) -> PolicyResult<usize> {
        self.check_version()?;
        Ok(self.bindings.len())
    }

    /// Whether the policy has no bindings.
    pub fn is_empty(&self) -> PolicyResult<bool> {
        Ok(self.len()? == 0)
    }

    /// The underlying binding list. Not version-gated.
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Replace the whole binding list. Not version-gated.
    ///
    /// On a supported version, bindings repeating a role are merged into the
    /// first occurrence. Newer policies keep the list exactly as given.
    pub fn set_bindings(&mut self, bindings: Vec<Binding>) {
        self.bindings = merge_duplicate_roles(bindings, self.version);
    }

    /// Consume the policy, returning its binding list.
    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }

    fn find(&self, role: &str) -> Option<usize> {
        self.bindings.iter().position(|binding| binding.role == role)
    }
}

/// Collapse bindings sharing a role into the first one, unioning members.
///
/// Only bindings with identical extra fields are merged, and nothing is
/// merged for versions above [`MAX_SUPPORTED_VERSION`]: conditional
/// bindings on one role are distinct grants.
pub(crate) fn merge_duplicate_roles(bindings: Vec<Binding>, version: Option<i32>) -> Vec<Binding> {
    if version.is_some_and(|v| v > MAX_SUPPORTED_VERSION) {
        return bindings;
    }
    let mut merged: Vec<Binding> = Vec::with_capacity(bindings.len());
    for binding in bindings {
        match merged
            .iter_mut()
            .find(|existing| existing.role == binding.role && existing.extra == binding.extra)
        {
            Some(existing) => {
                debug!("Merging repeated binding for {}", binding.role);
                existing.members.extend(binding.members);
            }
            None => merged.push(binding),
        }
    }
    merged
}
