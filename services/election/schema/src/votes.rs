use sea_orm::entity::prelude::*;

/// One cast vote. The unique constraint on `voter_id` is the ledger's
/// last line of defense: of two racing casts for the same voter, exactly
/// one insert succeeds.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub voter_id: Uuid,
    pub candidate_id: Uuid,
    pub voted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::voters::Entity",
        from = "Column::VoterId",
        to = "super::voters::Column::Id"
    )]
    Voters,
    #[sea_orm(
        belongs_to = "super::candidates::Entity",
        from = "Column::CandidateId",
        to = "super::candidates::Column::Id"
    )]
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
