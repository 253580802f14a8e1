//! Code composer: turns stored problem text plus the user's edit buffer into
//! the final program the judge runs.
//!
//! Flow:
//! 1) Boilerplate/driver come out of the problem store transport-encoded and
//!    are decoded per language.
//! 2) Compose = preamble (compiled languages only) + user source + driver.
//!
//! Pure functions, no I/O. The only failure mode is a malformed stored
//! encoding.

use crate::domain::{Language, StoredProblem};
use crate::error::CoreError;
use crate::util::decode_text;

/// Fixed include set + convenience declaration prefixed to every C++ program.
/// Drivers are written against this, so the list is part of the problem-store
/// contract, not a style choice.
pub const CPP_PREAMBLE: &str = r#"
#include <iostream>
#include <vector>
#include <string>
#include <algorithm>
#include <cmath>
#include <unordered_map>
#include <unordered_set>
#include <queue>
#include <stack>
#include <utility>
using namespace std;
"#;

/// Preamble for the given language, if it needs one.
pub fn preamble(lang: Language) -> Option<&'static str> {
  if lang.is_compiled() { Some(CPP_PREAMBLE) } else { None }
}

/// Decoded boilerplate shown in a fresh edit buffer for this language.
pub fn boilerplate(problem: &StoredProblem, lang: Language) -> Result<String, CoreError> {
  decode_text(problem.boilerplate_for(lang))
}

/// Decoded driver/harness appended after user code at run time.
pub fn driver(problem: &StoredProblem, lang: Language) -> Result<String, CoreError> {
  decode_text(problem.driver_for(lang))
}

/// Final program text: preamble (if any) + user source + driver.
pub fn compose(source: &str, driver: &str, lang: Language) -> String {
  match preamble(lang) {
    Some(head) => format!("{}{}{}", head, source, driver),
    None => format!("{}{}", source, driver),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::TestCase;
  use crate::util::encode_text;

  fn problem() -> StoredProblem {
    StoredProblem {
      id: "p1".into(),
      title: "Sample".into(),
      difficulty: "easy".into(),
      testcases: vec![TestCase { input: "1".into(), output: "2".into() }],
      boilerplate_py: encode_text("def solve(n):\n    pass\n"),
      driver_py: encode_text("\nprint(solve(1))\n"),
      boilerplate_cpp: encode_text("int solve(int n) { return 0; }\n"),
      driver_cpp: encode_text("\nint main() { cout << solve(1); }\n"),
    }
  }

  #[test]
  fn python_compose_has_no_preamble_and_driver_suffix() {
    let p = problem();
    let drv = driver(&p, Language::Python).unwrap();
    let composed = compose("def solve(n):\n    return n\n", &drv, Language::Python);
    assert!(composed.starts_with("def solve"));
    assert!(composed.ends_with(&drv));
  }

  #[test]
  fn cpp_compose_is_preamble_then_source_then_driver() {
    let p = problem();
    let drv = driver(&p, Language::Cpp).unwrap();
    let composed = compose("int solve(int n) { return n; }\n", &drv, Language::Cpp);
    assert!(composed.starts_with(CPP_PREAMBLE));
    assert!(composed.ends_with(&drv));
    assert!(composed.contains("int solve(int n) { return n; }"));
  }

  #[test]
  fn boilerplate_decodes_per_language() {
    let p = problem();
    assert!(boilerplate(&p, Language::Python).unwrap().starts_with("def solve"));
    assert!(boilerplate(&p, Language::Cpp).unwrap().starts_with("int solve"));
  }

  #[test]
  fn malformed_stored_encoding_is_a_decode_error() {
    let mut p = problem();
    p.driver_py = "%%% not transport encoded %%%".into();
    assert!(matches!(driver(&p, Language::Python), Err(CoreError::Decode(_))));
  }
}
