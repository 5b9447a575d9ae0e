//! Search screen state and intent handlers.

use super::sections::{apply_modifier, build_sections, results_scroll_offset, should_scroll_to_results, Section};
use crate::actions::{
    clear_search, handle_search_draft_changed, remove_search_terms, select_post,
    set_channel_display_name, Dispatcher,
};
use crate::api::Post;
use crate::store::{Action, RecentSearch, RequestStatus};

/// What the UI should do after an intent was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScrollToTop,
    ScrollToOffset(u32),
    FocusInput,
    BlurInput,
    OpenThread { channel_id: String, root_id: String },
    ClosePreview,
    Dismiss,
}

pub struct SearchScreen {
    dispatcher: Dispatcher,
    value: String,
    is_focused: bool,
    preview: bool,
    post_id: Option<String>,
    last_status: RequestStatus,
}

impl SearchScreen {
    /// Screen opens focused with an empty search box.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            value: String::new(),
            is_focused: true,
            preview: false,
            post_id: None,
            last_status: RequestStatus::NotStarted,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Post shown in the preview overlay, if open.
    pub fn previewed_post(&self) -> Option<&str> {
        if self.preview {
            self.post_id.as_deref()
        } else {
            None
        }
    }

    async fn status(&self) -> RequestStatus {
        self.dispatcher.store().state().await.entities.search.status
    }

    pub async fn sections(&self) -> Vec<Section> {
        let state = self.dispatcher.store().state().await;
        let team_id = &state.entities.teams.current_team_id;
        build_sections(
            state.recent_searches(team_id),
            state.entities.search.status,
            &state.entities.search.results,
            &self.value,
        )
    }

    /// Call after the store changed; returns a scroll to the results header when a search starts or completes.
    pub async fn on_status_changed(&mut self) -> Option<Effect> {
        let state = self.dispatcher.store().state().await;
        let status = state.entities.search.status;
        let prev = std::mem::replace(&mut self.last_status, status);
        if should_scroll_to_results(prev, status) {
            let recent = state.recent_searches(&state.entities.teams.current_team_id);
            Some(Effect::ScrollToOffset(results_scroll_offset(recent.len())))
        } else {
            None
        }
    }

    pub async fn handle_text_changed(&mut self, value: impl Into<String>) -> Vec<Effect> {
        self.value = value.into();
        let store = self.dispatcher.store();
        store
            .dispatch(handle_search_draft_changed(self.value.clone()))
            .await;
        if self.value.is_empty() && self.status().await == RequestStatus::Success {
            store.dispatch(clear_search()).await;
            return vec![Effect::ScrollToTop];
        }
        Vec::new()
    }

    /// Submit a search. The box keeps the trimmed terms plus a trailing space for further typing.
    pub async fn search(&mut self, terms: &str, is_or_search: bool) -> Vec<Effect> {
        let terms = terms.trim().to_string();
        let effects = self.handle_text_changed(format!("{} ", terms)).await;
        let team_id = self.dispatcher.store().session().await.current_team_id;
        if let Err(e) = self
            .dispatcher
            .search_posts(&team_id, &terms, is_or_search)
            .await
        {
            log::debug!("search failed, showing retry: {}", e);
        }
        effects
    }

    pub async fn retry(&mut self) -> Vec<Effect> {
        let terms = self.value.trim().to_string();
        self.search(&terms, false).await
    }

    pub async fn set_modifier_value(&mut self, modifier: &str) -> Vec<Effect> {
        let value = apply_modifier(&self.value, modifier);
        let mut effects = self.handle_text_changed(value).await;
        effects.push(Effect::FocusInput);
        effects
    }

    pub async fn set_recent_value(&mut self, recent: &RecentSearch) -> Vec<Effect> {
        self.handle_text_changed(recent.terms.clone()).await;
        let mut effects = self.search(&recent.terms, recent.is_or_search).await;
        effects.push(Effect::BlurInput);
        effects
    }

    pub async fn remove_search_terms(&self, recent: &RecentSearch) {
        let store = self.dispatcher.store();
        let team_id = store.session().await.current_team_id;
        store
            .dispatch(remove_search_terms(team_id, recent.terms.clone()))
            .await;
    }

    /// Open the thread a result belongs to.
    pub async fn go_to_thread(&self, post: &Post) -> Effect {
        let root_id = post.thread_root_id().to_string();
        let channel_id = post.channel_id.clone();
        if let Err(e) = self
            .dispatcher
            .load_thread_if_necessary(&root_id, &channel_id)
            .await
        {
            log::warn!("loading thread {}: {}", root_id, e);
        }
        self.dispatcher
            .store()
            .dispatch(select_post(root_id.clone()))
            .await;
        Effect::OpenThread {
            channel_id,
            root_id,
        }
    }

    pub fn preview_post(&mut self, post_id: impl Into<String>) -> Effect {
        self.preview = true;
        self.post_id = Some(post_id.into());
        Effect::BlurInput
    }

    pub fn close_preview(&mut self) {
        self.preview = false;
        self.post_id = None;
    }

    /// Back button: close the preview if open, otherwise leave the screen.
    pub fn back_press(&mut self) -> Effect {
        if self.preview {
            self.close_preview();
            Effect::ClosePreview
        } else {
            Effect::Dismiss
        }
    }

    pub async fn cancel(&mut self) -> Vec<Effect> {
        let mut effects = self.handle_text_changed("").await;
        effects.push(Effect::Dismiss);
        effects
    }

    pub fn on_focus(&mut self) -> Effect {
        self.is_focused = true;
        Effect::ScrollToTop
    }

    pub fn on_blur(&mut self) {
        self.is_focused = false;
    }

    /// Leave search for the channel a previewed post lives in. Empty `channel_id` is ignored.
    pub async fn jump_to_channel(&mut self, channel_id: &str, display_name: &str) -> Vec<Effect> {
        if channel_id.is_empty() {
            return Vec::new();
        }
        let store = self.dispatcher.store();
        let current_channel_id = store.session().await.current_channel_id;

        store
            .dispatch(Action::SetChannelLoading(channel_id != current_channel_id))
            .await;
        store.dispatch(set_channel_display_name(display_name)).await;

        if let Err(e) = self.dispatcher.select_channel(channel_id).await {
            log::warn!("jumping to channel {}: {}", channel_id, e);
        }
        if let Err(e) = self
            .dispatcher
            .mark_channel_viewed(channel_id, &current_channel_id)
            .await
        {
            log::warn!("marking channel {} viewed: {}", channel_id, e);
        }
        if channel_id != current_channel_id && !current_channel_id.is_empty() {
            // The channel being left is viewed up to now as well.
            if let Err(e) = self.dispatcher.mark_channel_viewed(&current_channel_id, "").await {
                log::warn!("marking channel {} viewed: {}", current_channel_id, e);
            }
        }
        vec![Effect::Dismiss]
    }
}
