use serde::{Deserialize, Serialize};

use crate::errors::InternalError;
use crate::types::db::user;
use crate::types::internal::UserRole;

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user_id)
    pub sub: String,

    /// Organization the subject belonged to at issue time
    pub org: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token id
    pub jti: String,
}

/// The authenticated user acting on a request
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub user_id: String,
    pub org_id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl Caller {
    pub fn is_owner(&self) -> bool {
        self.role == UserRole::Owner
    }
}

impl TryFrom<user::Model> for Caller {
    type Error = InternalError;

    fn try_from(u: user::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            role: u.role.parse()?,
            user_id: u.id,
            org_id: u.org_id,
            name: u.name,
            email: u.email,
        })
    }
}
