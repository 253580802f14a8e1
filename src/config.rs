//! Loading arena configuration (prompts + optional problem bank) from TOML.
//!
//! See `ArenaConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::TestCase;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ArenaConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub problems: Vec<ProblemCfg>,
}

/// Problem entry accepted in TOML configuration. Boilerplate/driver fields
/// carry the transport encoding, exactly as the external problem store does.
/// Entries missing a per-language field are skipped at startup.
#[derive(Clone, Debug, Deserialize)]
pub struct ProblemCfg {
  pub id: String,
  pub title: String,
  #[serde(default)] pub difficulty: String,
  #[serde(default)] pub testcases: Vec<TestCase>,
  #[serde(default)] pub boilerplate_py: Option<String>,
  #[serde(default)] pub driver_py: Option<String>,
  #[serde(default)] pub boilerplate_cpp: Option<String>,
  #[serde(default)] pub driver_cpp: Option<String>,
}

/// Prompts used by the feedback client. The default rubric prompt also pins
/// the score-reporting format the score extractor parses; override with care,
/// the two must stay in sync.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub feedback_system: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      feedback_system: "Evaluate this code and provide tips to improve the code considering this \
        is a competitive coding environment where comments, try-catch and good variable names are \
        not important. No need to provide a better code, just providing the tips would be enough. \
        Provide the feedback in a professional manner without referencing yourself as I. Evaluate \
        this code and at the end of your feedback in the next line give a score out of 10 in the \
        format 'Score is 6/10' and there should not be anything after the score."
        .into(),
    }
  }
}

/// Attempt to load `ArenaConfig` from ARENA_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_arena_config_from_env() -> Option<ArenaConfig> {
  let path = std::env::var("ARENA_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<ArenaConfig>(&s) {
      Ok(cfg) => {
        info!(target: "codearena_backend", %path, "Loaded arena config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "codearena_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "codearena_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_prompt_pins_score_format() {
    let p = Prompts::default();
    assert!(p.feedback_system.contains("Score is 6/10"));
  }

  #[test]
  fn bank_entries_parse_from_toml() {
    let cfg: ArenaConfig = toml::from_str(
      r#"
      [[problems]]
      id = "two-sum"
      title = "Two Sum"
      difficulty = "easy"
      boilerplate_py = "ZGVmIHNvbHZlKCk6IHBhc3M="
      driver_py = "cHJpbnQoIjEiKQ=="
      [[problems.testcases]]
      input = "1 2"
      output = "3"
      "#,
    )
    .expect("toml");
    assert_eq!(cfg.problems.len(), 1);
    assert_eq!(cfg.problems[0].testcases[0].output, "3");
    assert!(cfg.problems[0].boilerplate_cpp.is_none());
  }
}
