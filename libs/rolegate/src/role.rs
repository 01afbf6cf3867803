use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a role identifier fails validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidRole {
    #[error("role identifier must not be empty")]
    Empty,
}

/// An opaque, case-sensitive role identifier (e.g. `admin`, `user`, `subscriber`)
///
/// Roles are open-ended: the engine never enumerates them, a deployment fixes
/// its own catalog. Identifiers must be non-empty; `Admin` and `admin` are
/// distinct roles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(String);

impl Role {
    /// Create a role from an identifier
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRole::Empty`] if the identifier is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidRole> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidRole::Empty);
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Role {
    type Err = InvalidRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::new(s)
    }
}

impl serde::Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Role::new(s).map_err(serde::de::Error::custom)
    }
}

/// The set of roles held by one principal at decision time
///
/// A semantic set: duplicates collapse, order is irrelevant, membership is
/// the only question ever asked of it. Constructed once per request by a
/// [`PrincipalResolver`](crate::resolver::PrincipalResolver) and never
/// mutated afterwards. An empty set is valid (a principal with no
/// privileges) and satisfies no requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// The role set of a principal holding no roles
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a role set from raw identifiers, validating each one
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidRole`] encountered.
    pub fn from_names<I, S>(names: I) -> Result<Self, InvalidRole>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Role::new).collect()
    }

    #[must_use]
    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for role in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(role.as_str())?;
            first = false;
        }
        Ok(())
    }
}
