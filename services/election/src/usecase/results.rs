use crate::domain::repository::CandidateRepository;
use crate::domain::types::CandidateStanding;
use crate::error::ElectionServiceError;

#[derive(Debug)]
pub struct ResultsOutput {
    pub standings: Vec<CandidateStanding>,
    pub total_votes: i64,
}

/// Public results board: approved candidates sorted descending by tally.
pub struct ResultsUseCase<C: CandidateRepository> {
    pub candidates: C,
}

impl<C: CandidateRepository> ResultsUseCase<C> {
    pub async fn execute(&self) -> Result<ResultsOutput, ElectionServiceError> {
        let standings = self.candidates.standings().await?;
        let total_votes = standings.iter().map(|s| s.votes).sum();
        Ok(ResultsOutput {
            standings,
            total_votes,
        })
    }
}
