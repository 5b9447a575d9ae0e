//! Teams and team memberships of the current user.

use super::Dispatcher;
use crate::api::{ApiError, Team, TeamMember};
use crate::store::Action;

impl Dispatcher {
    pub async fn get_my_teams(&self) -> Result<Vec<Team>, ApiError> {
        let teams = self.api.get_my_teams().await?;
        self.store
            .dispatch(Action::ReceivedMyTeams(teams.clone()))
            .await;
        Ok(teams)
    }

    pub async fn get_my_team_members(&self) -> Result<Vec<TeamMember>, ApiError> {
        let members = self.api.get_my_team_members().await?;
        self.store
            .dispatch(Action::ReceivedMyTeamMembers(members.clone()))
            .await;
        Ok(members)
    }

    /// Make `team_id` the active team.
    pub async fn select_team(&self, team_id: &str) {
        log::info!("selecting team {}", team_id);
        self.store
            .dispatch(Action::SelectTeam(team_id.to_string()))
            .await;
    }
}
