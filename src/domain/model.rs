use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 開發者專長，封閉集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Frontend,
    Backend,
    #[serde(rename = "Full-Stack")]
    FullStack,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Frontend, Role::Backend, Role::FullStack];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Frontend => "Frontend",
            Role::Backend => "Backend",
            Role::FullStack => "Full-Stack",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}' (expected Frontend, Backend or Full-Stack)")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

/// Role selector of the list view: every role, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn admits(&self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => *wanted == role,
        }
    }
}

impl fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleFilter::All => f.write_str("All"),
            RoleFilter::Only(role) => f.write_str(role.as_str()),
        }
    }
}

impl FromStr for RoleFilter {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RoleFilter::All);
        }
        s.parse().map(RoleFilter::Only)
    }
}

/// Store-assigned identifier. Opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A developer as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperRecord {
    pub id: RecordId,
    pub name: String,
    pub role: Role,
    pub tech_stack: Vec<String>,
    pub experience: f64,
}

/// 已驗證、尚未被指派 id 的開發者資料（POST body）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeveloper {
    pub name: String,
    pub role: Role,
    // 後端接受以逗號分隔的字串
    #[serde(serialize_with = "serialize_joined")]
    pub tech_stack: Vec<String>,
    pub experience: f64,
}

fn serialize_joined<S: Serializer>(tokens: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&tokens.join(", "))
}

impl NewDeveloper {
    pub fn into_record(self, id: RecordId) -> DeveloperRecord {
        DeveloperRecord {
            id,
            name: self.name,
            role: self.role,
            tech_stack: self.tech_stack,
            experience: self.experience,
        }
    }
}

/// Raw form input before parsing. Text fields hold exactly what was typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeveloperDraft {
    pub name: String,
    pub role: Role,
    pub tech_stack: String,
    pub experience: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Role,
    TechStack,
    Experience,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Role => "role",
            FormField::TechStack => "techStack",
            FormField::Experience => "experience",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub role_filter: RoleFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_closed_set() {
        assert_eq!("Backend".parse::<Role>().unwrap(), Role::Backend);
        assert_eq!("full-stack".parse::<Role>().unwrap(), Role::FullStack);
        assert_eq!(" frontend ".parse::<Role>().unwrap(), Role::Frontend);
        assert!("DevOps".parse::<Role>().is_err());
        assert!("All".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_filter_parsing() {
        assert_eq!("All".parse::<RoleFilter>().unwrap(), RoleFilter::All);
        assert_eq!(
            "Full-Stack".parse::<RoleFilter>().unwrap(),
            RoleFilter::Only(Role::FullStack)
        );
        assert!("Designer".parse::<RoleFilter>().is_err());
        assert!(RoleFilter::All.admits(Role::Backend));
        assert!(!RoleFilter::Only(Role::Frontend).admits(Role::Backend));
    }

    #[test]
    fn test_new_developer_wire_shape() {
        let new = NewDeveloper {
            name: "Ada".to_string(),
            role: Role::FullStack,
            tech_stack: vec!["Go".to_string(), "React".to_string()],
            experience: 3.5,
        };
        let json = serde_json::to_value(&new).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Ada",
                "role": "Full-Stack",
                "techStack": "Go, React",
                "experience": 3.5
            })
        );
    }
}
