use sea_orm::entity::prelude::*;

/// Append-only record of voting-related actions (logins, OTP attempts,
/// casts). Never updated or deleted, including by election reset.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub voter_id: Uuid,
    pub action: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub detail: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::voters::Entity",
        from = "Column::VoterId",
        to = "super::voters::Column::Id"
    )]
    Voters,
}

impl Related<super::voters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Voters.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
