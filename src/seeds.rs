//! Seed data: built-in problems so the app is usable without external config.

use crate::domain::{StoredProblem, TestCase};
use crate::util::encode_text;

/// Minimal set of built-in problems. Fields are stored transport-encoded,
/// exactly as the external problem store delivers them.
pub fn seed_problems() -> Vec<StoredProblem> {
  vec![
    StoredProblem {
      id: "two-sum".into(),
      title: "Two Sum".into(),
      difficulty: "easy".into(),
      testcases: vec![
        TestCase { input: "[2,7,11,15], 9".into(), output: "[0,1]".into() },
        TestCase { input: "[3,2,4], 6".into(), output: "[1,2]".into() },
      ],
      boilerplate_py: encode_text(
        "def two_sum(nums, target):\n    # Write your code here\n    pass\n",
      ),
      driver_py: encode_text(
        "\n\
         def _check(got, want):\n\
         \x20   print('1' if got == want else '0', end='-')\n\
         _check(two_sum([2,7,11,15], 9), [0,1])\n\
         _check(two_sum([3,2,4], 6), [1,2])\n",
      ),
      boilerplate_cpp: encode_text(
        "vector<int> twoSum(vector<int>& nums, int target) {\n    // Write your code here\n    return {};\n}\n",
      ),
      driver_cpp: encode_text(
        "\n\
         int main() {\n\
         \x20   vector<int> a{2,7,11,15};\n\
         \x20   cout << (twoSum(a, 9) == vector<int>{0,1} ? \"1\" : \"0\") << \"-\";\n\
         \x20   vector<int> b{3,2,4};\n\
         \x20   cout << (twoSum(b, 6) == vector<int>{1,2} ? \"1\" : \"0\") << \"-\";\n\
         \x20   return 0;\n\
         }\n",
      ),
    },
    StoredProblem {
      id: "reverse-string".into(),
      title: "Reverse String".into(),
      difficulty: "easy".into(),
      testcases: vec![
        TestCase { input: "hello".into(), output: "olleh".into() },
        TestCase { input: "ab".into(), output: "ba".into() },
      ],
      boilerplate_py: encode_text(
        "def reverse_string(s):\n    # Write your code here\n    pass\n",
      ),
      driver_py: encode_text(
        "\n\
         print('1' if reverse_string('hello') == 'olleh' else '0', end='-')\n\
         print('1' if reverse_string('ab') == 'ba' else '0', end='-')\n",
      ),
      boilerplate_cpp: encode_text(
        "string reverseString(string s) {\n    // Write your code here\n    return s;\n}\n",
      ),
      driver_cpp: encode_text(
        "\n\
         int main() {\n\
         \x20   cout << (reverseString(\"hello\") == \"olleh\" ? \"1\" : \"0\") << \"-\";\n\
         \x20   cout << (reverseString(\"ab\") == \"ba\" ? \"1\" : \"0\") << \"-\";\n\
         \x20   return 0;\n\
         }\n",
      ),
    },
  ]
}
