use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Faculty => "FACULTY",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SemesterGpa {
    pub sem: String,
    pub gpa: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub xp: u32,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub semester: Option<u8>,
    #[serde(default)]
    pub reg_no: Option<String>,
    #[serde(default)]
    pub marks_history: Vec<SemesterGpa>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serde_uses_uppercase_tags() {
        let json = serde_json::to_string(&Role::Faculty).unwrap();
        assert_eq!(json, "\"FACULTY\"");
        let back: Role = serde_json::from_str("\"STUDENT\"").unwrap();
        assert_eq!(back, Role::Student);
    }

    #[test]
    fn user_optional_fields_default() {
        let user: User = serde_json::from_str(
            r#"{"id":"s1","name":"Rohan","email":"r@x.edu","role":"STUDENT"}"#,
        )
        .unwrap();
        assert_eq!(user.xp, 0);
        assert!(user.badges.is_empty());
        assert!(user.class_name.is_none());
    }
}
