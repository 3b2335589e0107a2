use crate::shared::Result;

/// Maximum number of exclude patterns to prevent DoS attacks
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern to prevent DoS attacks
const MAX_PATTERN_LENGTH: usize = 255;

/// PackageFilter - excludes packages whose name matches a wildcard pattern
///
/// `*` matches zero or more characters; everything else is literal. Matching is
/// case-sensitive and anchored at both ends, so `rx*` matches `rxjs` but not `ngrx`.
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    patterns: Vec<ExcludePattern>,
}

impl PackageFilter {
    /// Validates and compiles the raw patterns
    ///
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Empty, overlong, wildcard-only patterns or patterns with invalid characters
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Checks if a package name matches any exclusion pattern
    pub fn matches(&self, package_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(package_name))
    }

    /// Patterns that match none of `names`
    pub fn unmatched_patterns<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let names: Vec<&str> = names.into_iter().collect();
        self.patterns
            .iter()
            .filter(|p| !names.iter().any(|name| p.matches(name)))
            .map(|p| p.original.clone())
            .collect()
    }
}

#[derive(Debug, Clone)]
struct ExcludePattern {
    original: String,
    /// Literal pieces between the `*`s
    parts: Vec<String>,
    anchored_start: bool,
    anchored_end: bool,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;

        let parts = pattern
            .split('*')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            anchored_start: !pattern.starts_with('*'),
            anchored_end: !pattern.ends_with('*'),
            parts,
            original: pattern,
        })
    }

    fn matches(&self, name: &str) -> bool {
        if !self.original.contains('*') {
            return name == self.original;
        }

        let mut rest = name;
        let last = self.parts.len().saturating_sub(1);

        for (i, part) in self.parts.iter().enumerate() {
            if i == 0 && self.anchored_start {
                match rest.strip_prefix(part.as_str()) {
                    Some(r) => rest = r,
                    None => return false,
                }
                continue;
            }

            if i == last && self.anchored_end {
                return rest.ends_with(part.as_str());
            }

            match rest.find(part.as_str()) {
                Some(pos) => rest = &rest[pos + part.len()..],
                None => return false,
            }
        }

        // Ends with '*' (or the only part was consumed as the anchored prefix)
        !self.anchored_end || rest.is_empty()
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only alphanumeric, hyphens, underscores, dots, slashes, '@' and asterisks (*) are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '@' | '*')
}
