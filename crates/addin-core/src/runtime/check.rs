//! Runtime detection for Node.js and npm

use std::fmt;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl fmt::Display for RuntimeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.available {
            write!(
                f,
                "{} ({})",
                self.name,
                self.version.as_deref().unwrap_or("unknown")
            )
        } else {
            write!(f, "{} (not installed)", self.name)
        }
    }
}

fn probe(name: &'static str, command: &str) -> RuntimeInfo {
    let output = Command::new(command).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", "npm")
}

/// Probe the runtimes package installation depends on. Always advisory:
/// a missing runtime means installation gets skipped, not that
/// scaffolding fails.
pub fn check_runtimes() -> Vec<RuntimeInfo> {
    vec![check_node(), check_npm()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_missing_binary_is_unavailable() {
        let info = probe("Ghost", "definitely-not-a-real-binary-name");
        assert!(!info.available);
        assert!(info.version.is_none());
    }

    #[test]
    fn test_display_formats_missing_runtime() {
        let info = RuntimeInfo {
            name: "Node.js",
            version: None,
            available: false,
        };
        assert_eq!(info.to_string(), "Node.js (not installed)");
    }

    #[test]
    fn test_display_formats_available_runtime() {
        let info = RuntimeInfo {
            name: "npm",
            version: Some("10.2.0".to_string()),
            available: true,
        };
        assert_eq!(info.to_string(), "npm (10.2.0)");
    }
}
