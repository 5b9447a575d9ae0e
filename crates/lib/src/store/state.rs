//! Client state tree and the reducer that applies actions to it.

use super::Action;
use crate::api::{ClientConfig, ClientLicense, Post, Team, TeamMember};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Status of an in-flight request (search).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    NotStarted,
    Started,
    Success,
    Failure,
}

/// A previously submitted search, shown under "Recent Searches".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub terms: String,
    #[serde(default)]
    pub is_or_search: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub entities: Entities,
    #[serde(default)]
    pub views: Views,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub general: GeneralState,
    #[serde(default)]
    pub current_user_id: String,
    #[serde(default)]
    pub teams: TeamsState,
    #[serde(default)]
    pub current_channel_id: String,
    #[serde(default)]
    pub posts: PostsState,
    #[serde(default)]
    pub search: SearchState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralState {
    #[serde(default)]
    pub config: ClientConfig,
    #[serde(default)]
    pub license: ClientLicense,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamsState {
    #[serde(default)]
    pub current_team_id: String,
    #[serde(default)]
    pub teams: HashMap<String, Team>,
    /// Current user's memberships keyed by team id.
    #[serde(default)]
    pub my_members: HashMap<String, TeamMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostsState {
    #[serde(default)]
    pub posts: HashMap<String, Post>,
    /// Post ids per channel, newest first.
    #[serde(default)]
    pub posts_in_channel: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub selected_post_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    #[serde(default)]
    pub results: Vec<String>,
    /// Recent searches per team, most recent first.
    #[serde(default)]
    pub recent: HashMap<String, Vec<RecentSearch>>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Views {
    #[serde(default)]
    pub channel_display_name: String,
    #[serde(default)]
    pub channel_loading: bool,
    #[serde(default)]
    pub channel_retry_failed: bool,
    #[serde(default)]
    pub search_draft: String,
}

/// Read-only view of session state consumed by notification routing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub current_user_id: String,
    pub current_team_id: String,
    pub teams: HashMap<String, Team>,
    pub my_team_members: HashMap<String, TeamMember>,
    pub current_channel_id: String,
}

impl State {
    pub fn session(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_user_id: self.entities.current_user_id.clone(),
            current_team_id: self.entities.teams.current_team_id.clone(),
            teams: self.entities.teams.teams.clone(),
            my_team_members: self.entities.teams.my_members.clone(),
            current_channel_id: self.entities.current_channel_id.clone(),
        }
    }

    /// Recent searches for a team, most recent first.
    pub fn recent_searches(&self, team_id: &str) -> &[RecentSearch] {
        self.entities
            .search
            .recent
            .get(team_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Apply an action.
    pub fn reduce(&mut self, action: &Action) {
        match action {
            Action::ReceivedClientConfig(config) => {
                self.entities.general.config = config.clone();
            }
            Action::ReceivedClientLicense(license) => {
                self.entities.general.license = license.clone();
            }
            Action::ReceivedCurrentUserId(id) => {
                self.entities.current_user_id = id.clone();
            }
            Action::ReceivedMyTeams(teams) => {
                for t in teams {
                    self.entities.teams.teams.insert(t.id.clone(), t.clone());
                }
            }
            Action::ReceivedMyTeamMembers(members) => {
                for m in members {
                    self.entities
                        .teams
                        .my_members
                        .insert(m.team_id.clone(), m.clone());
                }
            }
            Action::SelectTeam(id) => {
                self.entities.teams.current_team_id = id.clone();
            }
            Action::SelectChannel(id) => {
                self.entities.current_channel_id = id.clone();
            }
            Action::SetChannelDisplayName(name) => {
                self.views.channel_display_name = name.clone();
            }
            Action::SetChannelLoading(loading) => {
                self.views.channel_loading = *loading;
            }
            Action::SetChannelRetryFailed(failed) => {
                self.views.channel_retry_failed = *failed;
            }
            Action::ReceivedPosts {
                channel_id,
                order,
                posts,
            } => self.receive_posts(channel_id, order, posts),
            Action::ReceivedPostsOnly(posts) => {
                for post in posts.values() {
                    self.entities.posts.posts.insert(post.id.clone(), post.clone());
                }
            }
            Action::SelectPost(id) => {
                self.entities.posts.selected_post_id = id.clone();
            }
            Action::SearchDraftChanged(value) => {
                self.views.search_draft = value.clone();
            }
            Action::SearchPostsRequest => {
                self.entities.search.status = RequestStatus::Started;
                self.entities.search.error = None;
            }
            Action::SearchPostsSuccess { order } => {
                self.entities.search.results = order.clone();
                self.entities.search.status = RequestStatus::Success;
            }
            Action::SearchPostsFailure(error) => {
                self.entities.search.status = RequestStatus::Failure;
                self.entities.search.error = Some(error.clone());
            }
            Action::ClearSearch => {
                self.entities.search.results.clear();
                self.entities.search.status = RequestStatus::NotStarted;
                self.entities.search.error = None;
            }
            Action::ReceivedSearchTerm {
                team_id,
                terms,
                is_or_search,
            } => {
                let recent = self.entities.search.recent.entry(team_id.clone()).or_default();
                recent.retain(|r| r.terms != *terms);
                recent.insert(
                    0,
                    RecentSearch {
                        terms: terms.clone(),
                        is_or_search: *is_or_search,
                    },
                );
            }
            Action::RemoveSearchTerms { team_id, terms } => {
                if let Some(recent) = self.entities.search.recent.get_mut(team_id) {
                    recent.retain(|r| r.terms != *terms);
                }
            }
            Action::OfflineStorePurge => {
                *self = State::default();
            }
        }
    }

    fn receive_posts(&mut self, channel_id: &str, order: &[String], posts: &HashMap<String, Post>) {
        let state = &mut self.entities.posts;
        let ids = state
            .posts_in_channel
            .entry(channel_id.to_string())
            .or_default();
        for post in posts.values() {
            // A server post supersedes the pending post it was created from.
            if let Some(pending) = post.pending_post_id.as_deref() {
                if pending != post.id && state.posts.remove(pending).is_some() {
                    ids.retain(|id| id != pending);
                }
            }
            state.posts.insert(post.id.clone(), post.clone());
        }
        if order.is_empty() {
            let mut fresh: Vec<&Post> = posts.values().filter(|p| !ids.contains(&p.id)).collect();
            fresh.sort_by(|a, b| b.create_at.cmp(&a.create_at));
            let mut merged: Vec<String> = fresh.into_iter().map(|p| p.id.clone()).collect();
            merged.append(ids);
            *ids = merged;
        } else {
            *ids = order.to_vec();
        }
    }
}
