use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.yml";
pub const DEFAULT_LOG_FILE: &str = "router.log";

/// Per-target log path: `router.log` + `192.168.1.1` → `router_192_168_1_1.log`.
///
/// The directory of `log_fname` is kept. Characters of the address that would
/// read as an extension or a path (`.`, `:`, `/`, `\`) become `_`.
pub fn log_path(log_fname: &Path, address: &str) -> PathBuf {
    let target: String = address
        .chars()
        .map(|c| if matches!(c, '.' | ':' | '/' | '\\') { '_' } else { c })
        .collect();

    let stem = log_fname
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "router".to_string());
    let file_name = match log_fname.extension() {
        Some(ext) => format!("{stem}_{target}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{target}"),
    };

    match log_fname.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_address_suffix() {
        assert_eq!(
            log_path(Path::new("router.log"), "192.168.1.1"),
            PathBuf::from("router_192_168_1_1.log")
        );
    }

    #[test]
    fn keeps_directory_and_handles_ports() {
        assert_eq!(
            log_path(Path::new("/var/log/ping/router.log"), "10.0.0.1:8080"),
            PathBuf::from("/var/log/ping/router_10_0_0_1_8080.log")
        );
    }

    #[test]
    fn hostname_without_extension() {
        assert_eq!(
            log_path(Path::new("logs/router"), "home.example.net"),
            PathBuf::from("logs/router_home_example_net")
        );
    }

    #[test]
    fn url_like_address_cannot_escape_directory() {
        assert_eq!(
            log_path(Path::new("logs/router.log"), "http://host/a\\b"),
            PathBuf::from("logs/router_http___host_a_b.log")
        );
    }
}
