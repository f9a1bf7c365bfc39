//! Script generator page state.
//!
//! # Design
//! - The target author is resolved once per mount from the route, the session,
//!   then the last analysed author.
//! - Profile loads, reference analyses, and refreshes are fenced separately;
//!   loading a new author supersedes any profile request still in flight.
//! - Generation always targets the profile currently on screen.

use reelstyle_api_models::{AnalysisResult, GenerateRequest, GeneratedScript, Profile};

use crate::core::request::{RequestId, RequestTicket, Tracked};

/// Which layout the generator shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorScenario {
    /// Waiting for the first profile response.
    Loading,
    /// No usable profile: ask for a reference video.
    Onboarding,
    /// Profile available: topic form and script output.
    Studio,
}

/// Resolve which author the generator works for.
#[must_use]
pub fn resolve_target(
    route_username: Option<&str>,
    session_username: Option<&str>,
    last_analyzed: Option<&str>,
) -> Option<String> {
    [route_username, session_username, last_analyzed]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(ToString::to_string)
}

/// Whether a profile has enough material to write scripts from.
#[must_use]
pub fn is_usable_profile(profile: &Profile) -> bool {
    profile.videos_count > 0 || !profile.videos.is_empty() || !profile.master_profile.is_empty()
}

/// State owned by the generator page.
#[derive(Debug, Default)]
pub struct GeneratorState {
    /// Author whose profile is (being) shown.
    pub target: Option<String>,
    /// Raw topic input.
    pub topic: String,
    /// Raw reference URL input (onboarding).
    pub reference_url: String,
    profile: Tracked<Profile>,
    script: Tracked<GeneratedScript>,
    reference: Tracked<AnalysisResult>,
}

impl GeneratorState {
    /// Load the profile of `username`, superseding any profile request in flight.
    pub fn begin_profile(&mut self, username: &str) -> Option<(RequestTicket, String)> {
        let username = username.trim();
        if username.is_empty() {
            return None;
        }
        if self.target.as_deref() != Some(username) {
            self.profile.reset();
            self.script.reset();
        }
        self.target = Some(username.to_string());
        Some((self.profile.begin(), username.to_string()))
    }

    /// Ask the backend to rebuild the displayed profile.
    pub fn begin_refresh(&mut self) -> Option<(RequestTicket, String)> {
        let username = self.displayed_profile()?.username.clone();
        Some((self.profile.begin(), username))
    }

    /// Apply a profile completion. Failures degrade to onboarding.
    pub fn complete_profile(&mut self, id: RequestId, outcome: Result<Profile, String>) -> bool {
        self.profile.complete(id, outcome)
    }

    /// Start analysing the onboarding reference video.
    pub fn begin_reference(&mut self) -> Option<(RequestTicket, String)> {
        let url = self.reference_url.trim().to_string();
        if url.is_empty() {
            return None;
        }
        Some((self.reference.begin(), url))
    }

    /// Apply a reference analysis completion.
    ///
    /// Returns the author whose profile should be loaded next.
    pub fn complete_reference(
        &mut self,
        id: RequestId,
        outcome: Result<AnalysisResult, String>,
    ) -> Option<String> {
        let author = outcome.as_ref().ok().map(|result| result.username.clone());
        if !self.reference.complete(id, outcome) {
            return None;
        }
        let author = author.filter(|name| !name.trim().is_empty())?;
        self.reference_url.clear();
        Some(author)
    }

    /// Start generating a script for the displayed profile.
    pub fn begin_generate(&mut self) -> Option<(RequestTicket, GenerateRequest)> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return None;
        }
        let username = self.displayed_profile()?.username.clone();
        Some((self.script.begin(), GenerateRequest { username, topic }))
    }

    /// Apply a generation completion.
    pub fn complete_generate(
        &mut self,
        id: RequestId,
        outcome: Result<GeneratedScript, String>,
    ) -> bool {
        self.script.complete(id, outcome)
    }

    /// Abort all in-flight work.
    pub fn cancel(&mut self) {
        self.profile.cancel();
        self.script.cancel();
        self.reference.cancel();
    }

    /// Usable profile currently on screen.
    #[must_use]
    pub fn displayed_profile(&self) -> Option<&Profile> {
        self.profile
            .last_success()
            .filter(|profile| is_usable_profile(profile))
    }

    /// Layout to render.
    #[must_use]
    pub fn scenario(&self) -> GeneratorScenario {
        if self.displayed_profile().is_some() {
            GeneratorScenario::Studio
        } else if self.profile.is_pending() {
            GeneratorScenario::Loading
        } else {
            GeneratorScenario::Onboarding
        }
    }

    /// Profile slot.
    #[must_use]
    pub const fn profile(&self) -> &Tracked<Profile> {
        &self.profile
    }

    /// Script slot.
    #[must_use]
    pub const fn script(&self) -> &Tracked<GeneratedScript> {
        &self.script
    }

    /// Reference analysis slot.
    #[must_use]
    pub const fn reference(&self) -> &Tracked<AnalysisResult> {
        &self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::ApiClient;
    use crate::core::testing::{MemoryStore, ScriptedTransport};
    use reelstyle_api_models::MasterProfile;
    use serde_json::json;
    use std::error::Error;
    use std::rc::Rc;

    fn profile(username: &str) -> Profile {
        Profile {
            username: username.into(),
            master_profile: MasterProfile {
                core_identity: Some(format!("{username} identity")),
                ..MasterProfile::default()
            },
            videos_count: 1,
            videos: Vec::new(),
        }
    }

    fn analysis(username: &str) -> AnalysisResult {
        AnalysisResult {
            status: Some("success".into()),
            video_id: 3,
            username: username.into(),
            transcript_text: String::new(),
            segments: Vec::new(),
            paths: None,
            style_passport: None,
            meta_stats: None,
        }
    }

    #[test]
    fn target_prefers_route_then_session_then_last_analyzed() {
        assert_eq!(
            resolve_target(Some("route"), Some("me"), Some("last")).as_deref(),
            Some("route")
        );
        assert_eq!(
            resolve_target(Some(" "), Some("me"), Some("last")).as_deref(),
            Some("me")
        );
        assert_eq!(
            resolve_target(None, None, Some("last")).as_deref(),
            Some("last")
        );
        assert_eq!(resolve_target(None, None, None), None);
    }

    #[test]
    fn missing_profile_shows_onboarding() {
        let mut state = GeneratorState::default();
        assert_eq!(state.scenario(), GeneratorScenario::Onboarding);
        let Some((ticket, _)) = state.begin_profile("ghost") else {
            panic!("expected a ticket");
        };
        assert_eq!(state.scenario(), GeneratorScenario::Loading);
        state.complete_profile(ticket.id(), Err("Profile not found".into()));
        assert_eq!(state.scenario(), GeneratorScenario::Onboarding);
    }

    #[test]
    fn empty_profile_is_not_usable() {
        let mut state = GeneratorState::default();
        let Some((ticket, _)) = state.begin_profile("new") else {
            panic!("expected a ticket");
        };
        let empty = Profile {
            username: "new".into(),
            master_profile: MasterProfile::default(),
            videos_count: 0,
            videos: Vec::new(),
        };
        state.complete_profile(ticket.id(), Ok(empty));
        assert_eq!(state.scenario(), GeneratorScenario::Onboarding);
    }

    #[test]
    fn generate_requires_topic_and_profile() {
        let mut state = GeneratorState {
            topic: "coffee".into(),
            ..GeneratorState::default()
        };
        assert!(state.begin_generate().is_none());
        let Some((ticket, _)) = state.begin_profile("alice") else {
            panic!("expected a ticket");
        };
        state.complete_profile(ticket.id(), Ok(profile("alice")));
        state.topic = "  ".into();
        assert!(state.begin_generate().is_none());
        state.topic = " coffee ".into();
        let request = state.begin_generate().map(|(_, request)| request);
        assert_eq!(
            request,
            Some(GenerateRequest {
                username: "alice".into(),
                topic: "coffee".into()
            })
        );
    }

    #[test]
    fn switching_author_drops_previous_profile() {
        let mut state = GeneratorState::default();
        let Some((bob, _)) = state.begin_profile("bob") else {
            panic!("expected a ticket");
        };
        assert!(state.complete_profile(bob.id(), Ok(profile("bob"))));
        assert_eq!(state.scenario(), GeneratorScenario::Studio);

        let Some((alice, _)) = state.begin_profile("alice") else {
            panic!("expected a ticket");
        };
        assert_eq!(state.scenario(), GeneratorScenario::Loading);
        assert!(state.displayed_profile().is_none());

        assert!(state.complete_profile(alice.id(), Err("User not found".into())));
        assert_eq!(state.scenario(), GeneratorScenario::Onboarding);
        state.topic = "coffee".into();
        assert!(state.begin_generate().is_none());
    }

    #[test]
    fn refreshing_same_author_keeps_profile_on_screen() {
        let mut state = GeneratorState::default();
        let Some((first, _)) = state.begin_profile("bob") else {
            panic!("expected a ticket");
        };
        state.complete_profile(first.id(), Ok(profile("bob")));
        let Some((again, _)) = state.begin_profile("bob") else {
            panic!("expected a ticket");
        };
        assert_eq!(state.scenario(), GeneratorScenario::Studio);
        state.complete_profile(again.id(), Err("timeout".into()));
        assert_eq!(
            state.displayed_profile().map(|p| p.username.as_str()),
            Some("bob")
        );
    }

    #[test]
    fn stale_profile_fetch_cannot_redirect_generation() {
        let mut state = GeneratorState::default();
        let Some((stale, _)) = state.begin_profile("bob") else {
            panic!("expected a ticket");
        };

        state.reference_url = "https://youtu.be/ref".into();
        let Some((reference, _)) = state.begin_reference() else {
            panic!("expected a ticket");
        };
        let author = state.complete_reference(reference.id(), Ok(analysis("alice")));
        assert_eq!(author.as_deref(), Some("alice"));

        let Some((fresh, username)) = state.begin_profile("alice") else {
            panic!("expected a ticket");
        };
        assert_eq!(username, "alice");

        assert!(!state.complete_profile(stale.id(), Ok(profile("bob"))));
        assert!(state.complete_profile(fresh.id(), Ok(profile("alice"))));

        state.topic = "morning routine".into();
        let request = state.begin_generate().map(|(_, request)| request);
        assert_eq!(request.map(|r| r.username).as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn analyze_then_generate_uses_analyzed_author() -> Result<(), Box<dyn Error>> {
        let transport = Rc::new(ScriptedTransport::default());
        let store = Rc::new(MemoryStore::default());
        let client = ApiClient::new("http://api/v1", transport.clone(), store);
        let mut state = GeneratorState::default();

        transport.push_json(200, &json!({"video_id": 3, "username": "alice"}));
        transport.push_json(
            200,
            &json!({"username": "alice", "master_profile": {"tone_of_voice": "calm"}, "videos_count": 1, "videos": []}),
        );
        transport.push_json(
            200,
            &json!({"status": "success", "script_data": {"title": "Hello", "script": []}}),
        );

        state.reference_url = "https://youtu.be/ref".into();
        let (ticket, url) = state.begin_reference().ok_or("no reference ticket")?;
        let outcome = client.analyze_video(&url).await.map_err(|e| e.to_string());
        let author = state
            .complete_reference(ticket.id(), outcome)
            .ok_or("no author")?;

        let (ticket, username) = state.begin_profile(&author).ok_or("no profile ticket")?;
        let outcome = client.get_profile(&username).await.map_err(|e| e.to_string());
        state.complete_profile(ticket.id(), outcome);

        state.topic = "coffee".into();
        let (ticket, request) = state.begin_generate().ok_or("no generate ticket")?;
        let outcome = client
            .generate_script(&request.username, &request.topic)
            .await
            .map_err(|e| e.to_string());
        assert!(state.complete_generate(ticket.id(), outcome));

        let sent = transport.last_request().ok_or("no request")?;
        assert_eq!(
            sent.body.as_str(),
            Some(r#"{"username":"alice","topic":"coffee"}"#)
        );
        assert_eq!(
            state.script().last_success().and_then(|s| s.title.as_deref()),
            Some("Hello")
        );
        Ok(())
    }

    #[test]
    fn refresh_targets_displayed_profile() {
        let mut state = GeneratorState::default();
        assert!(state.begin_refresh().is_none());
        let Some((ticket, _)) = state.begin_profile("alice") else {
            panic!("expected a ticket");
        };
        state.complete_profile(ticket.id(), Ok(profile("alice")));
        let refresh = state.begin_refresh().map(|(_, username)| username);
        assert_eq!(refresh.as_deref(), Some("alice"));
        assert_eq!(state.scenario(), GeneratorScenario::Studio);
    }
}
