//! Member identifiers
//!
//! A member is a prefixed string naming a principal: `user:<email>`,
//! `serviceAccount:<email>`, `group:<email-or-id>`, `domain:<domain>`, or one
//! of the collectives `allUsers` / `allAuthenticatedUsers`.
//!
//! The factory functions are kept for parity with older callers; writing the
//! prefixed string directly is equivalent.

/// Member representing every user, authenticated or not.
pub const ALL_USERS: &str = "allUsers";

/// Member representing every authenticated user.
pub const ALL_AUTHENTICATED_USERS: &str = "allAuthenticatedUsers";

/// Member string for a user.
#[deprecated(note = "write the member `user:{email}` in the binding instead")]
pub fn user(email: &str) -> String {
    format!("user:{email}")
}

/// Member string for a service account.
#[deprecated(note = "write the member `serviceAccount:{email}` in the binding instead")]
pub fn service_account(email: &str) -> String {
    format!("serviceAccount:{email}")
}

/// Member string for a group, given its id or e-mail.
#[deprecated(note = "write the member `group:{email}` in the binding instead")]
pub fn group(email: &str) -> String {
    format!("group:{email}")
}

/// Member string for every identity in a domain.
#[deprecated(note = "write the member `domain:{domain}` in the binding instead")]
pub fn domain(domain: &str) -> String {
    format!("domain:{domain}")
}

/// Member string for every user.
#[deprecated(note = "write the member `allUsers` in the binding instead")]
pub fn all_users() -> String {
    ALL_USERS.to_string()
}

/// Member string for every authenticated user.
#[deprecated(note = "write the member `allAuthenticatedUsers` in the binding instead")]
pub fn authenticated_users() -> String {
    ALL_AUTHENTICATED_USERS.to_string()
}

/// Principal kinds recognised in member strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    User,
    ServiceAccount,
    Group,
    Domain,
    AllUsers,
    AllAuthenticatedUsers,
}

impl MemberKind {
    /// Prefix (including the colon) for kinds that carry a value.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Self::User => Some("user:"),
            Self::ServiceAccount => Some("serviceAccount:"),
            Self::Group => Some("group:"),
            Self::Domain => Some("domain:"),
            Self::AllUsers | Self::AllAuthenticatedUsers => None,
        }
    }

    /// Split a member string into its kind and value.
    ///
    /// Collectives return an empty value. Unknown prefixes yield `None`; the
    /// policy itself never rejects them.
    pub fn parse(member: &str) -> Option<(Self, &str)> {
        match member {
            ALL_USERS => return Some((Self::AllUsers, "")),
            ALL_AUTHENTICATED_USERS => return Some((Self::AllAuthenticatedUsers, "")),
            _ => {}
        }
        [Self::User, Self::ServiceAccount, Self::Group, Self::Domain]
            .into_iter()
            .find_map(|kind| {
                kind.prefix()
                    .and_then(|prefix| member.strip_prefix(prefix))
                    .map(|value| (kind, value))
            })
    }

    /// Build the member string for this kind.
    ///
    /// `value` is ignored for the collectives.
    pub fn format(self, value: &str) -> String {
        match self {
            Self::AllUsers => ALL_USERS.to_string(),
            Self::AllAuthenticatedUsers => ALL_AUTHENTICATED_USERS.to_string(),
            _ => format!("{}{value}", self.prefix().unwrap_or_default()),
        }
    }
}

impl std::str::FromStr for MemberKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "serviceAccount" | "service-account" => Ok(Self::ServiceAccount),
            "group" => Ok(Self::Group),
            "domain" => Ok(Self::Domain),
            "allUsers" | "all-users" => Ok(Self::AllUsers),
            "allAuthenticatedUsers" | "all-authenticated-users" => {
                Ok(Self::AllAuthenticatedUsers)
            }
            other => Err(format!("unknown member kind: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_helpers() {
        assert_eq!(user("phred@example.com"), "user:phred@example.com");
        assert_eq!(
            service_account("account-1234@accounts.example.com"),
            "serviceAccount:account-1234@accounts.example.com"
        );
        assert_eq!(
            group("admins@groups.example.com"),
            "group:admins@groups.example.com"
        );
        assert_eq!(domain("example.com"), "domain:example.com");
        assert_eq!(all_users(), "allUsers");
        assert_eq!(authenticated_users(), "allAuthenticatedUsers");
    }

    #[test]
    fn test_parse_member_kinds() {
        assert_eq!(
            MemberKind::parse("serviceAccount:s@example.com"),
            Some((MemberKind::ServiceAccount, "s@example.com"))
        );
        assert_eq!(
            MemberKind::parse("domain:example.com"),
            Some((MemberKind::Domain, "example.com"))
        );
        assert_eq!(
            MemberKind::parse("allAuthenticatedUsers"),
            Some((MemberKind::AllAuthenticatedUsers, ""))
        );
        assert_eq!(MemberKind::parse("principal://whatever"), None);
        assert_eq!(MemberKind::parse("allUsersPlus"), None);
    }

    #[test]
    fn test_format_matches_factories() {
        assert_eq!(MemberKind::User.format("a@x.com"), user("a@x.com"));
        assert_eq!(MemberKind::Group.format("g@x.com"), group("g@x.com"));
        assert_eq!(MemberKind::AllUsers.format("ignored"), all_users());
    }

    #[test]
    fn test_member_kind_from_str() {
        assert_eq!("service-account".parse::<MemberKind>(), Ok(MemberKind::ServiceAccount));
        assert_eq!("allUsers".parse::<MemberKind>(), Ok(MemberKind::AllUsers));
        assert!("robot".parse::<MemberKind>().is_err());
    }
}
