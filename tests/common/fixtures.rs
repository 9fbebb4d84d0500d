//! Reusable test content

use std::path::Path;

/// Archive bytes; the adapters never look inside
pub const WAR_V1: &[u8] = b"PK\x03\x04 app v1";

pub const WAR_V2: &[u8] = b"PK\x03\x04 app v2";

/// Job definition deploying `target/*.war` to a local Tomcat home
pub fn tomcat_home_job(home: &Path) -> String {
    format!(
        r#"war = "target/*.war"

[[adapters]]
kind = "tomcat-home"
home = "{}"
"#,
        toml_escape(&home.to_string_lossy())
    )
}

/// Escape a value for a TOML basic string
pub fn toml_escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
