//! Subcommand definitions and their execution against a loaded policy.

use anyhow::{Context, Result};
use clap::Subcommand;
use iam_policy_bindings::{LegacyTier, MemberKind, Policy};
use log::{info, warn};
use std::collections::BTreeSet;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Print the normalized policy document
    Show,

    /// List bound roles, one per line, in binding order
    Roles,

    /// Print the members bound to a role as a JSON array
    Get {
        #[arg(long)]
        role: String,
    },

    /// Replace the members bound to a role and print the updated policy
    Set {
        #[arg(long)]
        role: String,

        /// Member identifiers, e.g. user:alice@example.com or allUsers
        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Remove a role's binding and print the updated policy
    Remove {
        #[arg(long)]
        role: String,
    },

    /// Add one member to a role and print the updated policy
    AddMember {
        #[arg(long)]
        role: String,
        member: String,
    },

    /// Remove one member from a role and print the updated policy
    RemoveMember {
        #[arg(long)]
        role: String,
        member: String,
    },

    /// Format a member identifier (no policy is read)
    Member {
        /// user, serviceAccount, group, domain, allUsers or allAuthenticatedUsers
        kind: MemberKind,

        /// E-mail, group id or domain; omitted for allUsers / allAuthenticatedUsers
        value: Option<String>,
    },

    /// Print the deprecated owners / editors / viewers view as a JSON array
    Legacy { tier: LegacyTier },
}

impl Command {
    /// Whether this command produces an updated policy document.
    pub(crate) fn mutates(&self) -> bool {
        matches!(
            self,
            Self::Set { .. } | Self::Remove { .. } | Self::AddMember { .. } | Self::RemoveMember { .. }
        )
    }
}

/// Result of a command: either plain text or a policy to serialize.
#[derive(Debug)]
pub(crate) enum Outcome {
    Text(String),
    Policy(Policy),
}

/// Run `command`, loading the input policy only if the command needs one.
pub(crate) fn execute(command: Command, load: impl FnOnce() -> Result<Policy>) -> Result<Outcome> {
    match command {
        Command::Member { kind, value } => Ok(Outcome::Text(format_member(kind, value.as_deref())?)),
        Command::Show => Ok(Outcome::Policy(load()?)),
        Command::Roles => {
            let policy = load()?;
            let roles: Vec<&str> = policy.roles()?.collect();
            Ok(Outcome::Text(roles.join("\n")))
        }
        Command::Get { role } => members_json(&load()?.get(&role)?),
        Command::Set { role, members } => {
            let mut policy = load()?;
            for member in &members {
                if MemberKind::parse(member).is_none() {
                    warn!("Unrecognized member identifier: {}", member);
                }
            }
            policy.set(role.as_str(), members)?;
            info!("Updated binding for {}", role);
            Ok(Outcome::Policy(policy))
        }
        Command::Remove { role } => {
            let mut policy = load()?;
            let removed = policy.delete(&role)?;
            info!(
                "Removed binding for {} ({} members)",
                removed.role,
                removed.members.len()
            );
            Ok(Outcome::Policy(policy))
        }
        Command::AddMember { role, member } => {
            let mut policy = load()?;
            if !policy.add_member(&role, member.as_str())? {
                info!("{} is already bound to {}", member, role);
            }
            Ok(Outcome::Policy(policy))
        }
        Command::RemoveMember { role, member } => {
            let mut policy = load()?;
            if !policy.remove_member(&role, &member)? {
                info!("{} was not bound to {}", member, role);
            }
            Ok(Outcome::Policy(policy))
        }
        Command::Legacy { tier } => members_json(&load()?.legacy_members(tier)?),
    }
}

fn format_member(kind: MemberKind, value: Option<&str>) -> Result<String> {
    match (kind.prefix(), value) {
        (Some(_), None) => anyhow::bail!("A value is required for this member kind"),
        (None, Some(value)) => {
            warn!("Ignoring value '{}' for a collective member", value);
            Ok(kind.format(""))
        }
        (_, value) => Ok(kind.format(value.unwrap_or_default())),
    }
}

fn members_json(members: &BTreeSet<String>) -> Result<Outcome> {
    let json = serde_json::to_string(members).context("Failed to serialize members")?;
    Ok(Outcome::Text(json))
}
