use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("unsupported osfamily: '{0}' (supported: Debian, RedHat)")]
    UnsupportedOsFamily(String),
    #[error("{0}")]
    Config(String),
    #[error("rendering {0}")]
    Template(String),
}
