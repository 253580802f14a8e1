//! Domain models: languages, problems, test outcomes, and user progress.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Languages a problem can be attempted in. Closed set; adding a language
/// means adding a variant here plus its arms in the dispatch methods below,
/// nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
  Python,
  Cpp,
}

impl Language {
  /// Exact name the judge service lists this language under.
  pub fn judge_name(&self) -> &'static str {
    match self {
      Language::Python => "Python (3.8.1)",
      Language::Cpp => "C++ (GCC 8.3.0)",
    }
  }

  /// Compiled languages need the fixed preamble prefixed before user code.
  pub fn is_compiled(&self) -> bool {
    matches!(self, Language::Cpp)
  }
}

/// One hidden test case (input and expected output, as shown to the UI).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCase {
  pub input: String,
  pub output: String,
}

/// Problem record as held by the problem store. Boilerplate and driver text
/// are transport-encoded per language; they stay encoded until the composer
/// needs them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredProblem {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub difficulty: String,
  pub testcases: Vec<TestCase>,

  pub boilerplate_py: String,
  pub driver_py: String,
  pub boilerplate_cpp: String,
  pub driver_cpp: String,
}

impl StoredProblem {
  /// Encoded boilerplate for the given language.
  pub fn boilerplate_for(&self, lang: Language) -> &str {
    match lang {
      Language::Python => &self.boilerplate_py,
      Language::Cpp => &self.boilerplate_cpp,
    }
  }

  /// Encoded driver/harness for the given language.
  pub fn driver_for(&self, lang: Language) -> &str {
    match lang {
      Language::Python => &self.driver_py,
      Language::Cpp => &self.driver_cpp,
    }
  }
}

/// Per-test verdict decoded from the driver's marker output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TestOutcome {
  Passed,
  Failed,
}

/// What one submit action produced. Transient; only the score is persisted,
/// and only when the solved guard lets it through.
#[derive(Clone, Debug, Serialize)]
pub struct FeedbackRecord {
  pub source_snapshot: String,
  pub feedback_text: String,
  pub score: u8,
}

/// A user's standing: which problems they solved and the score recorded at
/// solve time. Write-once per problem; nothing here is ever deleted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserProgress {
  pub solved: HashSet<String>,
  pub scores: HashMap<String, u8>,
}
