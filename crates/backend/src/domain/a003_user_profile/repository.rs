use anyhow::Context;
use contracts::domain::a003_user_profile::aggregate::{AccountType, UserProfile};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_user_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uid: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub location: String,
    pub governorate: String,
    pub account_type: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for UserProfile {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let account_type = AccountType::from_code(&m.account_type)
            .ok_or_else(|| anyhow::anyhow!("Unknown account type {:?} for {}", m.account_type, m.uid))?;
        Ok(UserProfile {
            uid: m.uid,
            email: m.email,
            full_name: m.full_name,
            phone: m.phone,
            location: m.location,
            governorate: m.governorate,
            account_type,
            created_at: m.created_at,
        })
    }
}

pub async fn insert(conn: &DatabaseConnection, profile: &UserProfile) -> anyhow::Result<()> {
    let active = ActiveModel {
        uid: Set(profile.uid.clone()),
        email: Set(profile.email.clone()),
        full_name: Set(profile.full_name.clone()),
        phone: Set(profile.phone.clone()),
        location: Set(profile.location.clone()),
        governorate: Set(profile.governorate.clone()),
        account_type: Set(profile.account_type.as_str().to_string()),
        created_at: Set(profile.created_at),
    };
    active
        .insert(conn)
        .await
        .with_context(|| format!("Failed to insert profile {}", profile.uid))?;
    Ok(())
}

pub async fn get_by_uid(conn: &DatabaseConnection, uid: &str) -> anyhow::Result<Option<UserProfile>> {
    Entity::find_by_id(uid.to_string())
        .one(conn)
        .await?
        .map(UserProfile::try_from)
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;

    #[tokio::test]
    async fn insert_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let conn = initialize_database(&dir.path().join("p.db")).await.unwrap();

        let profile = UserProfile {
            uid: "u-1".into(),
            email: "fatima@example.com".into(),
            full_name: "فاطمة".into(),
            phone: "+968 92345678".into(),
            location: "seeb".into(),
            governorate: "muscat".into(),
            account_type: AccountType::Artist,
            created_at: chrono::Utc::now(),
        };
        insert(&conn, &profile).await.unwrap();

        let loaded = get_by_uid(&conn, "u-1").await.unwrap().unwrap();
        assert_eq!(loaded.account_type, AccountType::Artist);
        assert_eq!(loaded.full_name, "فاطمة");
        assert!(get_by_uid(&conn, "missing").await.unwrap().is_none());

        // Повторная запись того же uid отклоняется
        assert!(insert(&conn, &profile).await.is_err());
    }
}
