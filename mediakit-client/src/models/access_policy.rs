use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use crate::odata::{string_or_null, wire_date};

/// Permission bitmask carried by an access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessPolicyPermissions(pub u64);

impl AccessPolicyPermissions {
    pub const NONE: Self = Self(0);
    pub const READ: Self = Self(1 << 0);
    pub const WRITE: Self = Self(1 << 1);
    pub const DELETE: Self = Self(1 << 2);
    pub const LIST: Self = Self(1 << 3);

    const NAMED: [(Self, &'static str); 4] = [
        (Self::READ, "read"),
        (Self::WRITE, "write"),
        (Self::DELETE, "delete"),
        (Self::LIST, "list"),
    ];

    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn add(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for AccessPolicyPermissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AccessPolicyPermissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Comma separated names, e.g. `read,list`. `none` or an empty string is no permission.
impl FromStr for AccessPolicyPermissions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut permissions = Self::NONE;
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let part = part.to_lowercase();
            if part == "none" {
                continue;
            }
            let flag = Self::NAMED
                .iter()
                .find(|(_, name)| *name == part)
                .map(|(flag, _)| *flag)
                .ok_or_else(|| format!("Invalid permission: {part}"))?;
            permissions |= flag;
        }
        Ok(permissions)
    }
}

impl Display for AccessPolicyPermissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(","))
    }
}

/// Snapshot of an access policy as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessPolicyInfo {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,
    #[serde(default)]
    pub duration_in_minutes: f64,
    #[serde(default)]
    pub permissions: AccessPolicyPermissions,
    #[serde(default, with = "wire_date::option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "wire_date::option")]
    pub last_modified: Option<DateTime<Utc>>,
}
