use sea_orm::entity::prelude::*;

/// One-time 6-digit code bound to a voter. Expires 10 minutes after
/// issuance; issuing a new code supersedes any active one. `consumed_at`
/// doubles as the verification timestamp for the cast-vote window.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "otp_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub voter_id: Uuid,
    pub code: String,
    pub superseded: bool,
    pub consumed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
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
