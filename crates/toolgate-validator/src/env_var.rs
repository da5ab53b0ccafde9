//! Dangerous-environment-variable-name predicate.

use once_cell::sync::Lazy;
use toolgate_types::DenialReason;

const DEFAULT_DANGEROUS_PATTERNS: &[&str] = &[
    "LD_*",
    "DYLD_*",
    "PYTHONPATH",
    "PATH",
    "NODE_OPTIONS",
    "PERL5LIB",
    "RUBYOPT",
    "GEM_PATH",
];

static DEFAULT_DENYLIST: Lazy<globset::GlobSet> =
    Lazy::new(|| build_denylist(DEFAULT_DANGEROUS_PATTERNS).expect("default patterns are valid"));

fn build_denylist(patterns: &[&str]) -> Result<globset::GlobSet, globset::Error> {
    let mut builder = globset::GlobSetBuilder::new();
    for pat in patterns {
        let glob = globset::GlobBuilder::new(pat)
            .case_insensitive(true)
            .build()?;
        builder.add(glob);
    }
    builder.build()
}

/// Reject a parameter or env-var name matching the dangerous-env-var
/// denylist (case-insensitive glob match against `LD_*`, `DYLD_*`,
/// `PYTHONPATH`, `PATH`, `NODE_OPTIONS`, and related loader/interpreter
/// variables).
pub fn check_dangerous_env_var(name: &str) -> Result<(), DenialReason> {
    if DEFAULT_DENYLIST.is_match(name) {
        return Err(DenialReason::DangerousEnvVar {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Filter an environment list down to entries whose name does not match the
/// dangerous-env-var denylist (used when building the child process env).
#[must_use]
pub fn filter_dangerous_env(env: &[(String, String)]) -> Vec<(String, String)> {
    env.iter()
        .filter(|(k, _)| !DEFAULT_DENYLIST.is_match(k))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ld_preload_rejected() {
        assert!(check_dangerous_env_var("LD_PRELOAD").is_err());
        assert!(check_dangerous_env_var("ld_library_path").is_err());
    }

    #[test]
    fn path_and_node_options_rejected() {
        assert!(check_dangerous_env_var("PATH").is_err());
        assert!(check_dangerous_env_var("NODE_OPTIONS").is_err());
    }

    #[test]
    fn ordinary_param_name_admitted() {
        assert!(check_dangerous_env_var("api_key").is_ok());
    }

    #[test]
    fn filter_removes_only_dangerous_entries() {
        let env = vec![
            ("PATH".to_string(), "/bin".to_string()),
            ("API_KEY".to_string(), "secret".to_string()),
        ];
        let filtered = filter_dangerous_env(&env);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].0, "API_KEY");
    }
}
