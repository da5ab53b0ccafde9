//! Path-traversal and absolute-path predicates.

use toolgate_types::DenialReason;

/// Execution mode governing absolute-path handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    HostLocal,
    Docker,
}

/// Reject `value` if, after normalization, it escapes the working root via
/// `..` segments, or if it is an absolute path not permitted by `mode` and
/// `allowed_host_paths`.
pub fn check_path_traversal(
    value: &str,
    mode: PathMode,
    allowed_host_paths: &[String],
) -> Result<(), DenialReason> {
    if escapes_root(value) {
        return Err(DenialReason::PathTraversal {
            path: value.to_string(),
        });
    }

    if is_absolute(value) {
        match mode {
            PathMode::HostLocal => {
                return Err(DenialReason::AbsolutePathDetected {
                    path: value.to_string(),
                });
            }
            PathMode::Docker => {
                if !is_within_allowed(value, allowed_host_paths) {
                    return Err(DenialReason::AbsolutePathNotAllowed {
                        path: value.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

fn is_absolute(value: &str) -> bool {
    value.starts_with('/')
}

/// Walk normalized path segments; a `..` that would pop past the start of
/// the (relative) root counts as escaping it.
fn escapes_root(value: &str) -> bool {
    let mut depth: i64 = 0;
    for segment in value.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                depth -= 1;
                if depth < 0 {
                    return true;
                }
            }
            _ => depth += 1,
        }
    }
    false
}

fn is_within_allowed(value: &str, allowed_host_paths: &[String]) -> bool {
    allowed_host_paths
        .iter()
        .any(|base| value == base || value.starts_with(&format!("{base}/")))
}
