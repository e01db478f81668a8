//! Secret-path denylist.
//!
//! Paths matching any entry are classified CREDENTIALS before any text
//! analysis runs. These locations cannot be made safe by redaction.

use std::sync::LazyLock;

use regex::Regex;

/// Built-in path rules, matched against a lower-cased, `/`-normalized path.
const BUILTIN_PATH_RULES: &[(&str, &str)] = &[
    ("ci_workflows", r"(?:^|/)\.github/workflows/"),
    ("gitlab_ci", r"(?:^|/)\.gitlab-ci\.ya?ml$"),
    ("circleci", r"(?:^|/)\.circleci/"),
    ("buildkite", r"(?:^|/)\.buildkite/"),
    ("jenkinsfile", r"(?:^|/)jenkinsfile$"),
    ("secret_dir", r"(?:^|/)\.?secrets?/"),
    ("env_file", r"(?:^|/)\.env(?:\.[^/]*)?$"),
    ("secrets_name", r"secrets"),
    ("credentials_name", r"credentials"),
    ("private_key_name", r"private[-_]?key"),
    ("ssh_key", r"(?:^|/)id_(?:rsa|dsa|ecdsa|ed25519)$"),
    ("key_extension", r"\.(?:pem|key|p12|pfx|jks|keystore|ppk|asc|gpg)$"),
];

struct PathRule {
    name: String,
    regex: Regex,
}

static BUILTIN_RULES: LazyLock<Vec<PathRule>> = LazyLock::new(|| {
    BUILTIN_PATH_RULES
        .iter()
        .filter_map(|(name, pattern)| {
            Regex::new(pattern).ok().map(|regex| PathRule {
                name: (*name).to_string(),
                regex,
            })
        })
        .collect()
});

/// Secret-location matcher: built-in rules plus configured extras.
pub struct PathDenylist {
    extra: Vec<PathRule>,
}

impl PathDenylist {
    /// Built-in rules only.
    pub fn new() -> Self {
        Self { extra: Vec::new() }
    }

    /// Built-in rules plus `extra` literal fragments, matched case-insensitively.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = extra
            .into_iter()
            .filter(|fragment| !fragment.as_ref().trim().is_empty())
            .filter_map(|fragment| {
                let normalized = normalize(fragment.as_ref());
                Regex::new(&regex::escape(&normalized))
                    .ok()
                    .map(|regex| PathRule {
                        name: format!("configured:{normalized}"),
                        regex,
                    })
            })
            .collect();
        Self { extra }
    }

    /// Name of the first rule matching `path`, if any.
    pub fn matching_rule(&self, path: &str) -> Option<&str> {
        let normalized = normalize(path);
        if normalized.is_empty() {
            return None;
        }
        BUILTIN_RULES
            .iter()
            .chain(self.extra.iter())
            .find(|rule| rule.regex.is_match(&normalized))
            .map(|rule| rule.name.as_str())
    }

    pub fn is_denied(&self, path: &str) -> bool {
        self.matching_rule(path).is_some()
    }
}

impl Default for PathDenylist {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &str) -> String {
    path.trim().replace('\\', "/").to_lowercase()
}
