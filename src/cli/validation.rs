//! Value parsers for command-line arguments.

use std::fs;
use std::path::PathBuf;

pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str.parse().map_err(|_| {
        format!(
            "Port must be a number between 1 and 65535, got: '{}'",
            port_str
        )
    })?;

    if port == 0 {
        return Err("Port 0 is not allowed".to_string());
    }

    Ok(port)
}

/// The file must exist and be readable.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.is_file() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!(
            "Rollback steps must be a positive number, got: '{}'",
            steps_str
        )
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        s if s > 100 => Err("Rollback steps cannot exceed 100".to_string()),
        s => Ok(s),
    }
}

/// Accepts hostnames and dotted IPv4 addresses; rejects malformed dotted quads.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(char::is_whitespace) {
        return Err("Host address cannot contain spaces".to_string());
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() != 4 || parts.iter().any(|p| p.parse::<u8>().is_err()) {
            return Err(format!("Invalid IPv4 address format: '{}'", host_str));
        }
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        for port in ["1", "80", "3000", "65535"] {
            assert!(validate_port(port).is_ok(), "port {} should be valid", port);
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(port).is_err(), "port {} should be invalid", port);
        }
    }

    #[test]
    fn test_host_validation() {
        for host in ["localhost", "127.0.0.1", "0.0.0.0", "10.0.0.1", "db.example.com"] {
            assert!(validate_host_address(host).is_ok(), "host {} should be valid", host);
        }

        let long = "x".repeat(300);
        for host in ["", "   ", "host with spaces", "999.1.1.1", "1.2.3", long.as_str()] {
            assert!(validate_host_address(host).is_err(), "host '{}' should be invalid", host);
        }
    }

    #[test]
    fn test_rollback_steps_validation() {
        assert_eq!(validate_rollback_steps("3"), Ok(3));
        assert_eq!(validate_rollback_steps("100"), Ok(100));
        for steps in ["0", "101", "-1", "abc"] {
            assert!(validate_rollback_steps(steps).is_err());
        }
    }

    #[test]
    fn test_config_file_path_validation() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path).unwrap(), file.path());

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }
}
