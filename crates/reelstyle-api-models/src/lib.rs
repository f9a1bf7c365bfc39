#![forbid(unsafe_code)]
#![warn(
    unused,
    unreachable_pub,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the Reelstyle backend.
//!
//! The backend fills most style attributes from a language model, so nearly
//! every descriptive field is optional and defaults when absent. Identifiers,
//! usernames, and status fields are the only values the client relies on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeRequest {
    /// Video URL (`YouTube`, `TikTok`, Reels, Shorts).
    pub url: String,
}

/// Request body for `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Creator whose master profile drives the script.
    pub username: String,
    /// Topic for the new video.
    pub topic: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Plain-text password; hashed server side.
    pub password: String,
}

/// Token issued by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token scheme, normally `bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Account record returned by `/auth/me` and `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Database identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// Account username.
    pub username: String,
    /// Contact email when known.
    #[serde(default)]
    pub email: Option<String>,
}

/// Error payload returned by the backend on non-2xx responses.
///
/// `detail` is usually a string but validation failures carry an array of
/// problems, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    /// Framework-style error detail.
    #[serde(default)]
    pub detail: Option<Value>,
    /// Alternate message field.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Human-readable message, preferring a string `detail` over `message`.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .or(self.message.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string)
    }

    /// Human-readable message from the `detail` field alone.
    #[must_use]
    pub fn detail_text(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(ToString::to_string)
    }
}

/// Either a single string or a list of strings.
///
/// Model output is not strict about this for tips and formula fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TextOrList {
    /// Single block of text.
    Text(String),
    /// Bullet list.
    List(Vec<String>),
}

impl TextOrList {
    /// Flatten into display lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text.clone()],
            Self::List(items) => items.clone(),
        }
    }

    /// Whether there is nothing to display.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::List(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

/// Timestamped transcript segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
    /// Spoken text.
    pub text: String,
}

/// Server-side artifact paths produced during analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Downloaded video file.
    pub video: String,
    /// Extracted audio track.
    pub audio: String,
    /// Extracted frames directory.
    pub frames: String,
}

/// One narrative block of an analyzed video.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructureBlock {
    /// Time range label, e.g. `00:00-00:05`.
    #[serde(default)]
    pub time: Option<String>,
    /// Block kind (Hook/Body/CTA).
    #[serde(default)]
    pub block: Option<String>,
    /// What happens in the block.
    #[serde(default)]
    pub description: Option<String>,
}

/// Structured style attributes characterising one analyzed video.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StylePassport {
    /// Why the first seconds grab attention.
    #[serde(default)]
    pub hook_analysis: Option<String>,
    /// Perceived speed on a 1-10 scale.
    #[serde(default)]
    pub pacing_wpm: Option<f64>,
    /// Colour grading, angles, shot dynamics.
    #[serde(default)]
    pub visual_style: Option<String>,
    /// Speaker tone.
    #[serde(default)]
    pub audio_tone: Option<String>,
    /// Editing techniques used. A bare string is read as one element.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub key_elements: Vec<String>,
    /// Narrative blocks in order. Entries that are not blocks are dropped.
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub structure: Vec<StructureBlock>,
    /// Likelihood of going viral, 1-10.
    #[serde(default)]
    pub virality_score: Option<f64>,
    /// How the style correlates with the view count.
    #[serde(default)]
    pub stats_analysis: Option<String>,
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) if !text.trim().is_empty() => vec![text],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<StructureBlock>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Platform metadata captured at download time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetaStats {
    /// View count.
    #[serde(default)]
    pub view_count: Option<u64>,
    /// Like count.
    #[serde(default)]
    pub like_count: Option<u64>,
    /// Comment count.
    #[serde(default)]
    pub comment_count: Option<u64>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Video title.
    #[serde(default)]
    pub title: Option<String>,
    /// Channel or account name.
    #[serde(default)]
    pub uploader: Option<String>,
}

/// Response of `POST /analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    /// Outcome label, `success` on the happy path.
    #[serde(default)]
    pub status: Option<String>,
    /// Database identifier of the stored video.
    pub video_id: i64,
    /// Creator the video was attributed to.
    pub username: String,
    /// Full transcript.
    #[serde(default)]
    pub transcript_text: String,
    /// Transcript segments with timestamps.
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Server-side artifact paths.
    #[serde(default)]
    pub paths: Option<ArtifactPaths>,
    /// Style analysis.
    #[serde(default)]
    pub style_passport: Option<StylePassport>,
    /// Platform metadata.
    #[serde(default)]
    pub meta_stats: Option<MetaStats>,
}

/// Response of `GET /video/{id}`: a stored analysis without live transcript data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoRecord {
    /// Outcome label.
    #[serde(default)]
    pub status: Option<String>,
    /// Database identifier.
    pub video_id: i64,
    /// Creator username.
    pub username: String,
    /// Transcript; empty when the backend did not store it.
    #[serde(default)]
    pub transcript_text: String,
    /// Style analysis.
    #[serde(default)]
    pub style_passport: Option<StylePassport>,
    /// Platform metadata.
    #[serde(default)]
    pub meta_stats: Option<MetaStats>,
    /// Original video URL.
    #[serde(default)]
    pub youtube_url: Option<String>,
    /// Video title.
    #[serde(default)]
    pub title: Option<String>,
}

impl From<VideoRecord> for AnalysisResult {
    fn from(record: VideoRecord) -> Self {
        let meta_stats = match (record.meta_stats, record.title) {
            (Some(mut stats), Some(title)) if stats.title.is_none() => {
                stats.title = Some(title);
                Some(stats)
            }
            (None, Some(title)) => Some(MetaStats {
                title: Some(title),
                ..MetaStats::default()
            }),
            (stats, _) => stats,
        };
        Self {
            status: record.status,
            video_id: record.video_id,
            username: record.username,
            transcript_text: record.transcript_text,
            segments: Vec::new(),
            paths: None,
            style_passport: record.style_passport,
            meta_stats,
        }
    }
}

/// Aggregated style attributes across a creator's analyzed videos.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MasterProfile {
    /// One-sentence essence of the creator.
    #[serde(default)]
    pub core_identity: Option<String>,
    /// Elements shared by the most successful videos.
    #[serde(default)]
    pub winning_formula: Option<TextOrList>,
    /// Consistent audio/verbal style.
    #[serde(default)]
    pub tone_of_voice: Option<String>,
    /// Consistent visual elements.
    #[serde(default)]
    pub visual_signature: Option<String>,
    /// Average pacing.
    #[serde(default)]
    pub avg_pacing_wpm: Option<f64>,
    /// Hooks that worked.
    #[serde(default)]
    pub best_hooks: Vec<String>,
    /// What to improve.
    #[serde(default)]
    pub weaknesses: Option<String>,
}

impl MasterProfile {
    /// Whether the backend has not synthesised a profile yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.core_identity.is_none()
            && self.winning_formula.is_none()
            && self.tone_of_voice.is_none()
            && self.visual_signature.is_none()
            && self.avg_pacing_wpm.is_none()
            && self.best_hooks.is_empty()
            && self.weaknesses.is_none()
    }
}

/// Entry in a creator's analyzed video history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoSummary {
    /// Database identifier.
    pub id: i64,
    /// Video title.
    #[serde(default)]
    pub title: Option<String>,
    /// Original URL.
    #[serde(default)]
    pub url: Option<String>,
    /// View count at analysis time.
    #[serde(default)]
    pub views: Option<u64>,
    /// Analysis timestamp (ISO 8601, zone optional).
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `GET /profile/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Creator username.
    pub username: String,
    /// Aggregated style attributes.
    #[serde(default)]
    pub master_profile: MasterProfile,
    /// Number of analyzed videos.
    #[serde(default)]
    pub videos_count: u32,
    /// Analyzed videos in backend order.
    #[serde(default)]
    pub videos: Vec<VideoSummary>,
}

/// One timed block of a generated script.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptBlock {
    /// Time range label.
    #[serde(default)]
    pub time: Option<String>,
    /// Shot description.
    #[serde(default)]
    pub visual: Option<String>,
    /// Voice-over or dialogue.
    #[serde(default)]
    pub audio: Option<String>,
}

/// Script produced from a creator's master profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedScript {
    /// Working title.
    #[serde(default)]
    pub title: Option<String>,
    /// Ordered script blocks.
    #[serde(default)]
    pub script: Vec<ScriptBlock>,
    /// Filming and editing tips.
    #[serde(default)]
    pub viral_tips: Option<TextOrList>,
}

/// Response of `POST /generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerateResponse {
    /// Outcome label.
    #[serde(default)]
    pub status: Option<String>,
    /// Generated script.
    pub script_data: GeneratedScript,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::error::Error;

    #[test]
    fn analysis_result_tolerates_sparse_model_output() -> Result<(), Box<dyn Error>> {
        let payload = json!({
            "status": "success",
            "video_id": 12,
            "username": "alice",
            "transcript_text": "hello",
            "segments": [{"start": 0.0, "end": 1.5, "text": "hello"}],
            "paths": {"video": "v.mp4", "audio": "a.wav", "frames": "frames/"},
            "style_passport": {
                "hook_analysis": "fast zoom",
                "pacing_wpm": 8,
                "key_elements": ["zoom-ins", "subtitles", "b-roll", "memes"]
            },
            "meta_stats": {"view_count": 1500, "duration": 42.5, "title": "Clip"}
        });
        let result: AnalysisResult = serde_json::from_value(payload)?;
        let passport = result.style_passport.ok_or("missing passport")?;
        assert_eq!(passport.pacing_wpm, Some(8.0));
        assert_eq!(passport.key_elements.len(), 4);
        assert!(passport.structure.is_empty());
        assert_eq!(result.meta_stats.and_then(|stats| stats.view_count), Some(1500));
        Ok(())
    }

    #[test]
    fn passport_accepts_loose_model_shapes() -> Result<(), Box<dyn Error>> {
        let passport: StylePassport = serde_json::from_value(json!({
            "key_elements": "zoom-ins",
            "structure": [
                {"time": "00:00-00:03", "block": "Hook", "description": "cold open"},
                "CTA at the end",
                42
            ]
        }))?;
        assert_eq!(passport.key_elements, vec!["zoom-ins".to_string()]);
        assert_eq!(passport.structure.len(), 1);
        assert_eq!(passport.structure[0].block.as_deref(), Some("Hook"));

        let sparse: StylePassport = serde_json::from_value(json!({
            "key_elements": ["cuts", 7, null],
            "structure": null
        }))?;
        assert_eq!(sparse.key_elements, vec!["cuts".to_string()]);
        assert!(sparse.structure.is_empty());

        let result: AnalysisResult = serde_json::from_value(json!({
            "video_id": 5,
            "username": "carol",
            "style_passport": {"key_elements": {"unexpected": true}}
        }))?;
        assert!(result.style_passport.ok_or("missing passport")?.key_elements.is_empty());
        Ok(())
    }

    #[test]
    fn video_record_converts_and_keeps_title() -> Result<(), Box<dyn Error>> {
        let record: VideoRecord = serde_json::from_value(json!({
            "status": "success",
            "video_id": 3,
            "username": "bob",
            "youtube_url": "https://youtu.be/x",
            "title": "Stored title"
        }))?;
        let result = AnalysisResult::from(record);
        assert!(result.transcript_text.is_empty());
        assert!(result.segments.is_empty());
        assert_eq!(
            result.meta_stats.and_then(|stats| stats.title),
            Some("Stored title".to_string())
        );
        Ok(())
    }

    #[test]
    fn error_body_prefers_string_detail() -> Result<(), Box<dyn Error>> {
        let body: ErrorBody =
            serde_json::from_value(json!({"detail": "User not found", "message": "other"}))?;
        assert_eq!(body.text().as_deref(), Some("User not found"));

        let validation: ErrorBody = serde_json::from_value(json!({
            "detail": [{"loc": ["body", "url"], "msg": "field required"}],
            "message": "Invalid payload"
        }))?;
        assert_eq!(validation.text().as_deref(), Some("Invalid payload"));
        assert_eq!(validation.detail_text(), None);

        assert_eq!(ErrorBody::default().text(), None);
        Ok(())
    }

    #[test]
    fn master_profile_emptiness_and_formula_shapes() -> Result<(), Box<dyn Error>> {
        let profile: Profile = serde_json::from_value(json!({
            "username": "alice",
            "master_profile": {},
            "videos_count": 0,
            "videos": []
        }))?;
        assert!(profile.master_profile.is_empty());

        let filled: MasterProfile = serde_json::from_value(json!({
            "winning_formula": ["numbers on screen", "fast cuts"],
            "tone_of_voice": "ironic"
        }))?;
        assert!(!filled.is_empty());
        assert_eq!(
            filled.winning_formula.map(|formula| formula.lines().len()),
            Some(2)
        );
        Ok(())
    }

    #[test]
    fn generate_response_accepts_text_tips() -> Result<(), Box<dyn Error>> {
        let response: GenerateResponse = serde_json::from_value(json!({
            "status": "success",
            "script_data": {
                "title": "iPhone review",
                "script": [{"time": "00:00-00:03", "visual": "close-up", "audio": "Think it's impossible?"}],
                "viral_tips": "Use fast cuts"
            }
        }))?;
        let script = response.script_data;
        assert_eq!(script.script.len(), 1);
        assert_eq!(
            script.viral_tips,
            Some(TextOrList::Text("Use fast cuts".to_string()))
        );
        Ok(())
    }
}
