use serde::{Serialize, Serializer};

use super::service::Service;
use crate::logging::redact_value;

pub const BIND_ADDRESS: &str = "0.0.0.0";
pub const GRANT_HOST: &str = "127.0.0.1";

/// Desired configuration of the MySQL server itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerDeclaration {
    pub root_password: String,
    pub bind_address: String,
}

/// Extra hosts a service user may connect from, besides `host`.
///
/// Serializes as `false` when no extra hosts are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AllowedHosts {
    #[default]
    None,
    Hosts(Vec<String>),
}

impl AllowedHosts {
    pub fn hosts(&self) -> &[String] {
        match self {
            AllowedHosts::None => &[],
            AllowedHosts::Hosts(h) => h,
        }
    }
}

impl Serialize for AllowedHosts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AllowedHosts::None => serializer.serialize_bool(false),
            AllowedHosts::Hosts(h) => h.serialize(serializer),
        }
    }
}

/// One service's database, user and privileges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantDeclaration {
    #[serde(skip)]
    pub service: Service,
    pub user: String,
    pub password: String,
    pub host: String,
    #[serde(rename = "dbname")]
    pub database_name: String,
    pub allowed_hosts: AllowedHosts,
}

/// Everything the provisioner declares for one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Provisioned {
    pub server: ServerDeclaration,
    pub grants: Vec<GrantDeclaration>,
}

impl Provisioned {
    #[cfg(test)]
    pub fn grant(&self, service: Service) -> Option<&GrantDeclaration> {
        self.grants.iter().find(|g| g.service == service)
    }

    /// Copy with every password replaced, for display.
    pub fn redacted(&self) -> Self {
        Self {
            server: ServerDeclaration {
                root_password: redact_value("password", &self.server.root_password),
                bind_address: self.server.bind_address.clone(),
            },
            grants: self
                .grants
                .iter()
                .map(|g| GrantDeclaration {
                    password: redact_value("password", &g.password),
                    ..g.clone()
                })
                .collect(),
        }
    }
}
