//! Shared test utilities for CLI end-to-end tests.
//!
//! Add `mod common;` to a test file, then:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_policy(policies::LEASE);
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{fields, policies, states};
    pub use super::TestFixture;
}

/// A temporary directory holding the documents a command reads.
pub struct TestFixture {
    pub temp: assert_fs::TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write `content` to `name` inside the fixture directory.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.temp
            .child(name)
            .write_str(content)
            .expect("Failed to write fixture file");
        self
    }

    #[allow(dead_code)]
    pub fn with_policy(self, content: &str) -> Self {
        self.with_file("policy.yaml", content)
    }

    #[allow(dead_code)]
    pub fn with_state(self, content: &str) -> Self {
        self.with_file("state.yaml", content)
    }

    #[allow(dead_code)]
    pub fn with_fields(self, content: &str) -> Self {
        self.with_file("fields.yaml", content)
    }

    pub fn path(&self, name: &str) -> std::path::PathBuf {
        self.temp.path().join(name)
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        self.temp.path()
    }
}

/// Conflict policy documents.
#[allow(dead_code)]
pub mod policies {
    pub const LEASE: &str = r#"
conflicts:
  token_ttl: [lease_duration]
"#;

    pub const SERVICE_DEFAULT: &str = r#"
token_type_default: service
"#;

    pub const MISSPELLED: &str = r#"
conflicts:
  token_tll: [lease_duration]
"#;
}

/// Resource field definition documents.
#[allow(dead_code)]
pub mod fields {
    pub const LEASE: &str = r#"
lease_duration:
  type: int
  description: Lease duration in seconds
role_name:
  type: string
  optional: false
  description: Name of the role
"#;
}

/// Resource state documents.
#[allow(dead_code)]
pub mod states {
    pub const LEASE_AND_TTL: &str = r#"
desired:
  role_name: app
  lease_duration: 600
  token_ttl: 60
  token_max_ttl: 120
"#;

    pub const ONLY_POLICIES: &str = r#"
desired:
  token_policies: [admin]
"#;

    pub const SYNCED_TTL_CHANGED: &str = r#"
desired:
  token_ttl: 90
  token_max_ttl: 600
  token_type: default
  token_no_default_policy: false
synced:
  token_ttl: 60
  token_max_ttl: 600
  token_type: default
  token_no_default_policy: false
"#;
}
