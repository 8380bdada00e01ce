// src/lang/keywords.rs
// =============================================================================
// Scores a whole snippet against keyword rules for the languages the
// guess-name table knows about.
//
// Each rule is a multi-line regex with a weight. A language's score is the
// sum of weight x matches over its rules; the best score wins when it reaches
// MIN_SCORE. Ties go to the language listed first.
//
// This runs after syntect's first-line check, so it only sees snippets
// without a shebang or mode line.
// =============================================================================

use std::sync::LazyLock;

use regex::Regex;

/// Lowest score that counts as a guess.
const MIN_SCORE: usize = 2;

struct Rule {
    pattern: Regex,
    weight: usize,
}

struct Language {
    name: &'static str,
    rules: Vec<Rule>,
}

fn language(name: &'static str, rules: &[(&str, usize)]) -> Language {
    Language {
        name,
        rules: rules
            .iter()
            .map(|(pattern, weight)| Rule {
                pattern: Regex::new(&format!("(?m){pattern}")).expect("static regex is valid"),
                weight: *weight,
            })
            .collect(),
    }
}

static LANGUAGES: LazyLock<Vec<Language>> = LazyLock::new(|| {
    vec![
        language(
            "go",
            &[
                (r"^package \w+\s*$", 3),
                (r"\bfunc (\(\w+ \*?\w+\) )?\w*\(", 2),
                (r"\w+ := ", 1),
                (r"\bfmt\.\w+\(", 2),
            ],
        ),
        language(
            "rust",
            &[
                (r"\bfn \w+\s*[(<]", 3),
                (r"\blet mut\b", 2),
                (r"\b\w+!\(", 2),
                (r"^\s*use \w+(::\w+)+", 2),
                (r"^\s*impl\b", 1),
            ],
        ),
        language(
            "python",
            &[
                (r"^\s*def \w+\(.*\)( -> .+)?:\s*$", 3),
                (r"^\s*(import \w+|from [\w.]+ import)", 1),
                (r"^\s*(if|elif|else|for|while|try|except|with|class)\b.*:\s*$", 1),
                (r"\bself\.\w+", 1),
            ],
        ),
        language(
            "ruby",
            &[
                (r"^\s*def \w+[^:]*$", 2),
                (r"^\s*end\s*$", 2),
                (r"\bputs\b", 2),
                (r"\bdo\s*\|", 2),
            ],
        ),
        language(
            "typescript",
            &[
                (r":\s*(string|number|boolean|any|void)\b", 3),
                (r"^\s*(export )?interface \w+", 2),
                (r"\b(const|let) \w+\s*:", 2),
            ],
        ),
        language(
            "javascript",
            &[
                (r"\bconsole\.log\(", 3),
                (r"\bfunction\b", 2),
                (r"\brequire\(", 2),
                (r"\b(const|let|var) \w+\s*=", 1),
                (r"=>", 1),
            ],
        ),
        language(
            "php",
            &[(r"<\?php", 5), (r"\$\w+\s*=", 1), (r"^\s*echo\b", 1)],
        ),
        language(
            "bash",
            &[
                (r"^\s*echo\b", 2),
                (r"^\s*export \w+=", 2),
                (r"^\s*(fi|done|esac)\s*$", 2),
                (r"^\s*if \[", 2),
            ],
        ),
    ]
});

/// Best-scoring language name, if any scored high enough.
pub fn best_match(content: &str) -> Option<&'static str> {
    let mut best: Option<(&'static str, usize)> = None;

    for language in LANGUAGES.iter() {
        let score: usize = language
            .rules
            .iter()
            .map(|rule| rule.weight * rule.pattern.find_iter(content).count())
            .sum();

        if score >= MIN_SCORE && best.map_or(true, |(_, top)| score > top) {
            best = Some((language.name, score));
        }
    }

    best.map(|(name, _)| name)
}
