use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{AcademyError, Result};

// 账号角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub enum AccountRole {
    Admin,   // 管理员
    Teacher, // 教师
    Student, // 学生
}

impl AccountRole {
    pub const ADMIN: &'static str = "admin";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    pub fn admin_roles() -> &'static [&'static AccountRole] {
        &[&Self::Admin]
    }
    pub fn teacher_roles() -> &'static [&'static AccountRole] {
        &[&Self::Teacher, &Self::Admin]
    }
    pub fn student_roles() -> &'static [&'static AccountRole] {
        &[&Self::Student]
    }
    pub fn all_roles() -> &'static [&'static AccountRole] {
        &[&Self::Admin, &Self::Teacher, &Self::Student]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Admin => Self::ADMIN,
            AccountRole::Teacher => Self::TEACHER,
            AccountRole::Student => Self::STUDENT,
        }
    }
}

impl<'de> Deserialize<'de> for AccountRole {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的账号角色: '{s}'. 支持的角色: admin, teacher, student"
            ))
        })
    }
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            AccountRole::ADMIN => Ok(AccountRole::Admin),
            AccountRole::TEACHER => Ok(AccountRole::Teacher),
            AccountRole::STUDENT => Ok(AccountRole::Student),
            _ => Err(format!("Invalid account role: {s}")),
        }
    }
}

/// 账号关联的档案
///
/// 角色与档案绑定在同一个枚举里：管理员没有档案，教师账号必然指向一个教师档案，
/// 学生账号必然指向一个学生档案。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub enum AccountProfile {
    Admin,
    Teacher { teacher_id: i64 },
    Student { student_id: i64 },
}

impl AccountProfile {
    pub fn role(&self) -> AccountRole {
        match self {
            AccountProfile::Admin => AccountRole::Admin,
            AccountProfile::Teacher { .. } => AccountRole::Teacher,
            AccountProfile::Student { .. } => AccountRole::Student,
        }
    }

    pub fn teacher_id(&self) -> Option<i64> {
        match self {
            AccountProfile::Teacher { teacher_id } => Some(*teacher_id),
            _ => None,
        }
    }

    pub fn student_id(&self) -> Option<i64> {
        match self {
            AccountProfile::Student { student_id } => Some(*student_id),
            _ => None,
        }
    }
}

/// 校验角色与档案链接的组合，并折叠为 [`AccountProfile`]
pub fn validate_role_relations(
    role: AccountRole,
    teacher_id: Option<i64>,
    student_id: Option<i64>,
) -> Result<AccountProfile> {
    match (role, teacher_id, student_id) {
        (AccountRole::Admin, None, None) => Ok(AccountProfile::Admin),
        (AccountRole::Admin, _, _) => Err(AcademyError::validation(
            "Admin accounts cannot be linked to a teacher or student profile",
        )),
        (AccountRole::Teacher, Some(teacher_id), None) => {
            Ok(AccountProfile::Teacher { teacher_id })
        }
        (AccountRole::Teacher, None, _) => Err(AcademyError::validation(
            "Teacher accounts require a teacher profile",
        )),
        (AccountRole::Teacher, Some(_), Some(_)) => Err(AcademyError::validation(
            "Teacher accounts cannot be linked to a student profile",
        )),
        (AccountRole::Student, None, Some(student_id)) => {
            Ok(AccountProfile::Student { student_id })
        }
        (AccountRole::Student, _, None) => Err(AcademyError::validation(
            "Student accounts require a student profile",
        )),
        (AccountRole::Student, Some(_), Some(_)) => Err(AcademyError::validation(
            "Student accounts cannot be linked to a teacher profile",
        )),
    }
}

// 账号实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/account.ts")]
pub struct Account {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub profile: AccountProfile,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Account {
    pub fn role(&self) -> AccountRole {
        self.profile.role()
    }

    pub fn has_role(&self, roles: &[&AccountRole]) -> bool {
        roles.contains(&&self.role())
    }

    pub fn teacher_id(&self) -> Option<i64> {
        self.profile.teacher_id()
    }

    pub fn student_id(&self) -> Option<i64> {
        self.profile.student_id()
    }

    pub fn is_admin(&self) -> bool {
        self.role() == AccountRole::Admin
    }

    /// 取当前账号的教师档案 ID，非教师账号返回 Forbidden
    pub fn require_teacher_id(&self) -> Result<i64> {
        self.teacher_id()
            .ok_or_else(|| AcademyError::authorization("Only teachers can perform this action"))
    }

    /// 取当前账号的学生档案 ID，非学生账号返回 Forbidden
    pub fn require_student_id(&self) -> Result<i64> {
        self.student_id()
            .ok_or_else(|| AcademyError::authorization("Only students can perform this action"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("admin".parse::<AccountRole>().unwrap(), AccountRole::Admin);
        assert_eq!("Teacher".parse::<AccountRole>().unwrap(), AccountRole::Teacher);
        assert_eq!(AccountRole::Student.to_string(), "student");
        assert!("root".parse::<AccountRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        let role: AccountRole = serde_json::from_str("\"student\"").unwrap();
        assert_eq!(role, AccountRole::Student);
        assert!(serde_json::from_str::<AccountRole>("\"guest\"").is_err());
    }

    #[test]
    fn test_admin_with_any_link_fails() {
        for (t, s) in [(Some(1), None), (None, Some(2)), (Some(1), Some(2))] {
            let err = validate_role_relations(AccountRole::Admin, t, s).unwrap_err();
            assert!(matches!(err, AcademyError::Validation(_)));
        }
        assert_eq!(
            validate_role_relations(AccountRole::Admin, None, None).unwrap(),
            AccountProfile::Admin
        );
    }

    #[test]
    fn test_teacher_requires_teacher_link() {
        assert!(validate_role_relations(AccountRole::Teacher, None, None).is_err());
        assert!(validate_role_relations(AccountRole::Teacher, None, Some(3)).is_err());
        assert!(validate_role_relations(AccountRole::Teacher, Some(3), Some(4)).is_err());
        assert_eq!(
            validate_role_relations(AccountRole::Teacher, Some(3), None).unwrap(),
            AccountProfile::Teacher { teacher_id: 3 }
        );
    }

    #[test]
    fn test_student_requires_student_link() {
        assert!(validate_role_relations(AccountRole::Student, None, None).is_err());
        assert!(validate_role_relations(AccountRole::Student, Some(3), None).is_err());
        assert_eq!(
            validate_role_relations(AccountRole::Student, None, Some(9)).unwrap(),
            AccountProfile::Student { student_id: 9 }
        );
    }

    #[test]
    fn test_profile_serializes_as_tagged_union() {
        let json = serde_json::to_value(AccountProfile::Teacher { teacher_id: 5 }).unwrap();
        assert_eq!(json["type"], "teacher");
        assert_eq!(json["teacher_id"], 5);
        let json = serde_json::to_value(AccountProfile::Admin).unwrap();
        assert_eq!(json["type"], "admin");
    }

    #[test]
    fn test_role_sets() {
        assert!(AccountRole::teacher_roles().contains(&&AccountRole::Admin));
        assert!(!AccountRole::student_roles().contains(&&AccountRole::Teacher));
        assert_eq!(AccountRole::all_roles().len(), 3);
    }
}
