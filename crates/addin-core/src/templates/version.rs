//! CLI and template compatibility checking

use semver::Version;

/// Compare the CLI version against a template's declared version.
/// Returns an advisory warning when the CLI is older than the template
/// expects; unparseable versions produce no warning.
pub fn check_compatibility(cli_version: &str, template_version: &str) -> Option<String> {
    let cli = parse_version(cli_version)?;
    let template = parse_version(template_version)?;

    if cli < template {
        Some(format!(
            "This template targets CLI version {} or newer; you are running {}. \
             Consider updating: cargo install create-addin --force",
            template_version, cli_version
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading 'v'
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_template_warns() {
        let warning = check_compatibility("0.1.0", "0.2.0");
        assert!(warning.is_some());
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer_is_silent() {
        assert!(check_compatibility("0.2.0", "0.2.0").is_none());
        assert!(check_compatibility("0.3.0", "0.2.0").is_none());
    }

    #[test]
    fn test_leading_v_tolerated() {
        assert!(check_compatibility("v0.1.0", "v0.2.0").is_some());
    }

    #[test]
    fn test_invalid_versions_are_silent() {
        assert!(check_compatibility("invalid", "0.1.0").is_none());
        assert!(check_compatibility("0.1.0", "not-a-version").is_none());
    }
}
