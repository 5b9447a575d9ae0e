//! Actions dispatched into the store: results of server calls and user intents.

use crate::api::{ClientConfig, ClientLicense, Post, Team, TeamMember};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ReceivedClientConfig(ClientConfig),
    ReceivedClientLicense(ClientLicense),
    ReceivedCurrentUserId(String),
    ReceivedMyTeams(Vec<Team>),
    ReceivedMyTeamMembers(Vec<TeamMember>),
    SelectTeam(String),
    SelectChannel(String),
    SetChannelDisplayName(String),
    SetChannelLoading(bool),
    SetChannelRetryFailed(bool),
    /// Posts for one channel. A non-empty `order` replaces the channel's page order; an empty
    /// one puts posts not yet in the channel at its head, newest first.
    ReceivedPosts {
        channel_id: String,
        order: Vec<String>,
        posts: HashMap<String, Post>,
    },
    /// Posts fetched outside a channel page (search hits, threads). Channel order is left alone.
    ReceivedPostsOnly(HashMap<String, Post>),
    SelectPost(String),
    SearchDraftChanged(String),
    SearchPostsRequest,
    SearchPostsSuccess {
        order: Vec<String>,
    },
    SearchPostsFailure(String),
    ClearSearch,
    ReceivedSearchTerm {
        team_id: String,
        terms: String,
        is_or_search: bool,
    },
    RemoveSearchTerms {
        team_id: String,
        terms: String,
    },
    /// Reset every offline-cached entity.
    OfflineStorePurge,
}

impl Action {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Action::ReceivedClientConfig(_) => "received_client_config",
            Action::ReceivedClientLicense(_) => "received_client_license",
            Action::ReceivedCurrentUserId(_) => "received_current_user_id",
            Action::ReceivedMyTeams(_) => "received_my_teams",
            Action::ReceivedMyTeamMembers(_) => "received_my_team_members",
            Action::SelectTeam(_) => "select_team",
            Action::SelectChannel(_) => "select_channel",
            Action::SetChannelDisplayName(_) => "set_channel_display_name",
            Action::SetChannelLoading(_) => "set_channel_loading",
            Action::SetChannelRetryFailed(_) => "set_channel_retry_failed",
            Action::ReceivedPosts { .. } => "received_posts",
            Action::ReceivedPostsOnly(_) => "received_posts_only",
            Action::SelectPost(_) => "select_post",
            Action::SearchDraftChanged(_) => "search_draft_changed",
            Action::SearchPostsRequest => "search_posts_request",
            Action::SearchPostsSuccess { .. } => "search_posts_success",
            Action::SearchPostsFailure(_) => "search_posts_failure",
            Action::ClearSearch => "clear_search",
            Action::ReceivedSearchTerm { .. } => "received_search_term",
            Action::RemoveSearchTerms { .. } => "remove_search_terms",
            Action::OfflineStorePurge => "offline_store_purge",
        }
    }
}
