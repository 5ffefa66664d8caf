//! Names of the demo resources

use platdemo_core::CoreError;
use std::fmt;
use std::str::FromStr;

/// Suffix scoping every resource the demo creates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(s: &str) -> Result<Self, CoreError> {
        if s.is_empty() {
            return Err(CoreError::invalid("namespace must not be empty"));
        }
        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CoreError::invalid(format!(
                "namespace {:?} must not contain whitespace",
                s
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn user_name(&self) -> String {
        format!("demo-user-{}", self.0)
    }

    pub fn org_name(&self) -> String {
        format!("demo-org-{}", self.0)
    }

    pub fn bucket_in_name(&self) -> String {
        format!("demo-bucket-in-{}", self.0)
    }

    pub fn bucket_out_name(&self) -> String {
        format!("demo-bucket-out-{}", self.0)
    }
}

impl FromStr for Namespace {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
