//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Language, StoredProblem, TestCase, TestOutcome};
use crate::state::EditorSession;

/// DTO for problem delivery. Boilerplate/driver stay server-side; the UI gets
/// the first two test cases for its case tabs.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    pub id: String,
    pub title: String,
    pub difficulty: String,
    #[serde(rename = "displayTestcases")]
    pub display_testcases: Vec<TestCase>,
}

/// Convert a full `StoredProblem` (internal) to the public DTO.
pub fn problem_out(p: &StoredProblem) -> ProblemOut {
    ProblemOut {
        id: p.id.clone(),
        title: p.title.clone(),
        difficulty: p.difficulty.clone(),
        display_testcases: p.testcases.iter().take(2).cloned().collect(),
    }
}

#[derive(Debug, Serialize)]
pub struct SessionOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub language: Language,
    pub source: String,
}

pub fn session_out(s: &EditorSession) -> SessionOut {
    SessionOut {
        session_id: s.id.clone(),
        language: s.language,
        source: s.source.clone(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct ProblemQuery {
    #[serde(rename = "problemId")]
    pub problem_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionCreateIn {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "problemId")]
    pub problem_id: String,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct LanguageSwitchIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct SourceUpdateIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub source: String,
}
#[derive(Serialize)]
pub struct OkOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct RunIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
#[derive(Serialize)]
pub struct RunOut {
    pub outcomes: Vec<TestOutcome>,
    pub lines: Vec<String>,
    #[serde(rename = "statusId")]
    pub status_id: Option<i64>,
    pub stderr: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOut {
    AlreadySolved,
    Recorded { feedback: String, score: u8 },
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}
#[derive(Serialize)]
pub struct ProgressOut {
    pub solved: Vec<String>,
    pub scores: HashMap<String, u8>,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
