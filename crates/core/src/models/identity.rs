use serde::{Deserialize, Serialize};

/// Policy roles the scheduling core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May act on behalf of any organizer.
    Elevated,
    Member,
}

impl Role {
    /// Maps a role name issued by the identity service onto a policy role.
    /// Only an exact match grants [`Role::Elevated`].
    pub fn from_name(name: &str, elevated_name: &str) -> Self {
        if name == elevated_name {
            Role::Elevated
        } else {
            Role::Member
        }
    }
}

/// The subject of the current request, as vouched for by the identity service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub uuid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl AuthenticatedUser {
    pub fn is_elevated(&self) -> bool {
        self.roles.contains(&Role::Elevated)
    }
}
