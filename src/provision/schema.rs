use serde::Deserialize;

use super::service::Service;
use crate::error::ProvisionError;

pub const ROOT_PASSWORD_FIELD: &str = "mysql_root_password";

/// Parameters for provisioning the OpenStack databases.
///
/// Password fields are optional at parse time so that a missing key and an
/// empty value are both reported by `provision` as `MissingParameter`.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationInput {
    #[serde(default)]
    pub mysql_root_password: Option<String>,
    #[serde(default)]
    pub keystone_db_password: Option<String>,
    #[serde(default)]
    pub glance_db_password: Option<String>,
    #[serde(default)]
    pub nova_db_password: Option<String>,
    #[serde(default)]
    pub cinder_db_password: Option<String>,
    #[serde(default)]
    pub quantum_db_password: Option<String>,
    #[serde(default)]
    pub allowed_hosts: Option<Vec<String>>,
    #[serde(default)]
    pub facts: Facts,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Facts {
    #[serde(default = "default_osfamily")]
    pub osfamily: String,
}

impl Default for Facts {
    fn default() -> Self {
        Self {
            osfamily: default_osfamily(),
        }
    }
}

fn default_osfamily() -> String {
    "Debian".into()
}

impl ConfigurationInput {
    pub fn from_yaml(content: &str) -> Result<Self, ProvisionError> {
        serde_yaml::from_str(content)
            .map_err(|e| ProvisionError::Config(format!("parsing config YAML: {}", e)))
    }

    pub fn from_json(content: &str) -> Result<Self, ProvisionError> {
        serde_json::from_str(content)
            .map_err(|e| ProvisionError::Config(format!("parsing config JSON: {}", e)))
    }

    pub fn root_password(&self) -> &str {
        self.mysql_root_password.as_deref().unwrap_or("")
    }

    pub fn service_password(&self, service: Service) -> &str {
        let field = match service {
            Service::Keystone => &self.keystone_db_password,
            Service::Glance => &self.glance_db_password,
            Service::Nova => &self.nova_db_password,
            Service::Cinder => &self.cinder_db_password,
            Service::Quantum => &self.quantum_db_password,
        };
        field.as_deref().unwrap_or("")
    }

    #[cfg(test)]
    pub fn set_service_password(&mut self, service: Service, password: &str) {
        let field = match service {
            Service::Keystone => &mut self.keystone_db_password,
            Service::Glance => &mut self.glance_db_password,
            Service::Nova => &mut self.nova_db_password,
            Service::Cinder => &mut self.cinder_db_password,
            Service::Quantum => &mut self.quantum_db_password,
        };
        *field = Some(password.to_string());
    }
}
