//! Routing definitions for the Reelstyle UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Landing,
    #[at("/login")]
    Login,
    #[at("/register")]
    Register,
    #[at("/dashboard")]
    Dashboard,
    #[at("/dashboard/analysis")]
    Analysis,
    #[at("/dashboard/analysis/:video_id")]
    AnalysisVideo { video_id: String },
    #[at("/dashboard/generator")]
    Generator,
    #[at("/dashboard/generator/:username")]
    GeneratorFor { username: String },
    #[at("/dashboard/history")]
    History,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Analysis request handed over from the landing page through history state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingAnalysis {
    pub url: String,
}

/// Notice handed from registration to the login page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LoginNotice {
    pub message: String,
}
