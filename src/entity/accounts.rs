//! 账号实体

use sea_orm::entity::prelude::*;

use crate::errors::AcademyError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub role: String,
    #[sea_orm(unique)]
    pub teacher_id: Option<i64>,
    #[sea_orm(unique)]
    pub student_id: Option<i64>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    /// 两个可空外键在这里折叠为档案枚举，不合法的组合视为数据损坏
    pub fn into_account(
        self,
    ) -> crate::errors::Result<crate::models::accounts::entities::Account> {
        use crate::models::accounts::entities::{Account, AccountRole, validate_role_relations};

        let role = self.role.parse::<AccountRole>().map_err(|e| {
            AcademyError::database_operation(format!("Account {} has invalid role: {e}", self.id))
        })?;
        let profile =
            validate_role_relations(role, self.teacher_id, self.student_id).map_err(|e| {
                AcademyError::database_operation(format!(
                    "Account {} has inconsistent profile links: {}",
                    self.id,
                    e.message()
                ))
            })?;

        Ok(Account {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            name: self.name,
            surname: self.surname,
            profile,
            last_login: self.last_login.map(super::from_timestamp),
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accounts::entities::AccountProfile;

    fn row(role: &str, teacher_id: Option<i64>, student_id: Option<i64>) -> Model {
        Model {
            id: 1,
            username: "ada".to_string(),
            password_hash: "hash".to_string(),
            name: "Ada".to_string(),
            surname: "Lovelace".to_string(),
            role: role.to_string(),
            teacher_id,
            student_id,
            last_login: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_into_account_folds_profile() {
        let account = row("teacher", Some(4), None).into_account().unwrap();
        assert_eq!(account.profile, AccountProfile::Teacher { teacher_id: 4 });
    }

    #[test]
    fn test_inconsistent_row_is_database_error() {
        let err = row("student", Some(4), None).into_account().unwrap_err();
        assert!(matches!(err, AcademyError::DatabaseOperation(_)));
        let err = row("janitor", None, None).into_account().unwrap_err();
        assert!(matches!(err, AcademyError::DatabaseOperation(_)));
    }
}
