//! Application state: problem index, editor sessions, progress store, and the
//! optional remote clients.
//!
//! This module owns:
//!   - the problem index (config bank merged over built-in seeds)
//!   - editor sessions (the server-side source document per user+problem)
//!   - the progress store (solved set + scores)
//!   - the prompts struct (from TOML or defaults)
//!   - optional judge and feedback clients
//!
//! Problems are immutable once loaded. Sessions are single-writer: the owning
//! editing session is the only thing updating its source text.

use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::compose;
use crate::config::{load_arena_config_from_env, Prompts};
use crate::domain::{Language, StoredProblem};
use crate::error::CoreError;
use crate::feedback::FeedbackClient;
use crate::judge::JudgeClient;
use crate::progress::ProgressStore;
use crate::seeds::seed_problems;

/// One editing session: the current source document for a (user, problem)
/// pair in one language. Switching language rebuilds the source from that
/// language's boilerplate and drops the old text; that is documented
/// behavior, not a defect.
#[derive(Clone, Debug)]
pub struct EditorSession {
    pub id: String,
    pub user_id: String,
    pub problem_id: String,
    pub language: Language,
    pub source: String,
}

pub struct AppState {
    problems: HashMap<String, StoredProblem>,
    sessions: RwLock<HashMap<String, EditorSession>>,
    pub progress: ProgressStore,
    pub judge: Option<JudgeClient>,
    pub feedback: Option<FeedbackClient>,
    pub prompts: Prompts,
}

impl AppState {
    /// Build state from env: load config, merge the problem bank over seeds,
    /// init remote clients.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg_opt = load_arena_config_from_env();
        let prompts = cfg_opt
            .as_ref()
            .map(|c| c.prompts.clone())
            .unwrap_or_default();

        let mut problems = HashMap::<String, StoredProblem>::new();

        // Insert config-bank problems (if any). Entries must carry all four
        // per-language fields; incomplete ones are skipped.
        if let Some(cfg) = &cfg_opt {
            for pc in &cfg.problems {
                let (bp_py, dr_py, bp_cpp, dr_cpp) = match (
                    &pc.boilerplate_py,
                    &pc.driver_py,
                    &pc.boilerplate_cpp,
                    &pc.driver_cpp,
                ) {
                    (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
                    _ => {
                        error!(target: "codearena_backend", id = %pc.id, "Skipping bank problem: missing boilerplate/driver fields.");
                        continue;
                    }
                };
                problems.insert(
                    pc.id.clone(),
                    StoredProblem {
                        id: pc.id.clone(),
                        title: pc.title.clone(),
                        difficulty: pc.difficulty.clone(),
                        testcases: pc.testcases.clone(),
                        boilerplate_py: bp_py.clone(),
                        driver_py: dr_py.clone(),
                        boilerplate_cpp: bp_cpp.clone(),
                        driver_cpp: dr_cpp.clone(),
                    },
                );
            }
        }

        // Always insert built-in seeds, but don't overwrite bank ids.
        for p in seed_problems() {
            problems.entry(p.id.clone()).or_insert(p);
        }
        info!(target: "codearena_backend", count = problems.len(), "Startup problem inventory");

        let judge = JudgeClient::from_env();
        match &judge {
            Some(j) => info!(target: "codearena_backend", base_url = %j.base_url, "Judge client enabled."),
            None => info!(target: "codearena_backend", "Judge client disabled (no JUDGE_API_KEY). Runs will fail."),
        }
        let feedback = FeedbackClient::from_env();
        match &feedback {
            Some(f) => info!(target: "codearena_backend", base_url = %f.base_url, model = %f.model, "Feedback client enabled."),
            None => info!(target: "codearena_backend", "Feedback client disabled (no FEEDBACK_API_KEY). Submits will fail."),
        }

        Self {
            problems,
            sessions: RwLock::new(HashMap::new()),
            progress: ProgressStore::new(),
            judge,
            feedback,
            prompts,
        }
    }

    /// Read-only access to a problem by id.
    pub fn get_problem(&self, id: &str) -> Result<&StoredProblem, CoreError> {
        self.problems
            .get(id)
            .ok_or_else(|| CoreError::UnknownId { kind: "problem", id: id.to_string() })
    }

    pub fn list_problems(&self) -> Vec<&StoredProblem> {
        let mut all: Vec<_> = self.problems.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Open an editing session seeded with the decoded boilerplate for the
    /// chosen language.
    #[instrument(level = "info", skip(self))]
    pub async fn create_session(
        &self,
        user_id: &str,
        problem_id: &str,
        language: Language,
    ) -> Result<EditorSession, CoreError> {
        let problem = self.get_problem(problem_id)?;
        let source = compose::boilerplate(problem, language)?;
        let session = EditorSession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            problem_id: problem_id.to_string(),
            language,
            source,
        };
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        info!(target: "codearena_backend", session = %session.id, %problem_id, "Editor session opened");
        Ok(session)
    }

    pub async fn get_session(&self, id: &str) -> Result<EditorSession, CoreError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::UnknownId { kind: "session", id: id.to_string() })
    }

    /// Switch the session's language. The source document is rebuilt from the
    /// new language's boilerplate; unsaved edits in the old language are lost.
    #[instrument(level = "info", skip(self))]
    pub async fn switch_language(
        &self,
        session_id: &str,
        language: Language,
    ) -> Result<EditorSession, CoreError> {
        let problem_id = self.get_session(session_id).await?.problem_id;
        let problem = self.get_problem(&problem_id)?;
        let source = compose::boilerplate(problem, language)?;

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| CoreError::UnknownId { kind: "session", id: session_id.to_string() })?;
        session.language = language;
        session.source = source;
        Ok(session.clone())
    }

    /// Replace the session's source text (the editor is the single writer).
    pub async fn update_source(&self, session_id: &str, source: String) -> Result<(), CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| CoreError::UnknownId { kind: "session", id: session_id.to_string() })?;
        session.source = source;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn session_opens_with_decoded_boilerplate() {
        let state = AppState::new();
        let s = state
            .create_session("u1", "two-sum", Language::Python)
            .await
            .unwrap();
        assert!(s.source.contains("def two_sum"));
    }

    #[tokio::test]
    async fn language_switch_discards_unsaved_edits() {
        let state = AppState::new();
        let s = state
            .create_session("u1", "two-sum", Language::Python)
            .await
            .unwrap();
        state
            .update_source(&s.id, "def two_sum(nums, target): return []\n".into())
            .await
            .unwrap();

        let switched = state.switch_language(&s.id, Language::Cpp).await.unwrap();
        assert_eq!(switched.language, Language::Cpp);
        assert!(switched.source.contains("twoSum"));
        assert!(!switched.source.contains("return []"));

        // Switching back yields fresh boilerplate, not the edited text.
        let back = state.switch_language(&s.id, Language::Python).await.unwrap();
        assert!(back.source.contains("# Write your code here"));
    }

    #[tokio::test]
    async fn unknown_ids_are_reported() {
        let state = AppState::new();
        assert!(matches!(
            state.create_session("u1", "no-such-problem", Language::Python).await,
            Err(CoreError::UnknownId { kind: "problem", .. })
        ));
        assert!(matches!(
            state.get_session("no-such-session").await,
            Err(CoreError::UnknownId { kind: "session", .. })
        ));
    }
}
