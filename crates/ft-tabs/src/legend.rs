//! Legend inference from tab names.

/// Content types and the tab names that identify them, in priority order.
const PATTERNS: &[(&str, &[&str])] = &[
    (
        "programming language",
        &[
            "python",
            "javascript",
            "java",
            "c++",
            "rust",
            "go",
            "ruby",
            "php",
        ],
    ),
    (
        "operating system",
        &["windows", "mac", "macos", "linux", "ubuntu", "debian", "fedora"],
    ),
    (
        "package manager",
        &["pip", "conda", "npm", "yarn", "cargo", "gem", "composer"],
    ),
    (
        "interface",
        &["cli", "gui", "terminal", "command", "console", "graphical"],
    ),
    (
        "environment",
        &["development", "staging", "production", "test", "local"],
    ),
    (
        "installation method",
        &["source", "binary", "docker", "manual", "automatic"],
    ),
];

/// Content type used when no pattern matches.
pub const FALLBACK_CONTENT_TYPE: &str = "option";

/// Infer what kind of choice a set of tab names represents.
///
/// Exact name matches are tried against every pattern before any substring
/// match, so `["Java"]` is a programming language even though `"java"` is
/// also a substring of `"javascript"`.
///
/// # Example
///
/// ```
/// use ft_tabs::infer_content_type;
///
/// assert_eq!(infer_content_type(&["Python", "JavaScript"]), "programming language");
/// assert_eq!(infer_content_type(&["Foo", "Bar"]), "option");
/// ```
pub fn infer_content_type(names: &[&str]) -> &'static str {
    let lowered: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();

    for (content_type, keywords) in PATTERNS {
        if lowered.iter().any(|name| keywords.contains(&name.as_str())) {
            return *content_type;
        }
    }

    for (content_type, keywords) in PATTERNS {
        if lowered
            .iter()
            .any(|name| keywords.iter().any(|keyword| name.contains(*keyword)))
        {
            return *content_type;
        }
    }

    FALLBACK_CONTENT_TYPE
}

/// Build legend text for a group without an explicit legend.
#[must_use]
pub fn infer_legend(names: &[&str]) -> String {
    format!(
        "Choose {}: {}",
        infer_content_type(names),
        names.join(", ")
    )
}
