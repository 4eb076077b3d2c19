//! User role for login and role-gated navigation.

use serde::{Deserialize, Serialize};

/// The kind of account a session belongs to.
///
/// The backend expects this as the `userType` discriminator on the login
/// call and the same spelling is persisted in the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// A storefront customer: owns a cart and orders.
    Client,
    /// A console administrator: manages the catalog and all accounts.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "CLIENT"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(Self::Client),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_from_str() {
        for role in [Role::Client, Role::Admin] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_serde_wire_spelling() {
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"CLIENT\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    }

    #[test]
    fn test_from_str_rejects_lowercase() {
        assert!("client".parse::<Role>().is_err());
    }
}
