use sea_orm::entity::prelude::*;

/// Account record. One row per admin, voter, or candidate login.
/// `role` is immutable after creation (0 = voter, 1 = candidate, 2 = admin).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    pub role: i16,
    pub password_hash: String,
    pub is_verified: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::voters::Entity")]
    Voters,
    #[sea_orm(has_many = "super::candidates::Entity")]
    Candidates,
}

impl Related<super::voters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Voters.def()
    }
}

impl Related<super::candidates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Candidates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
