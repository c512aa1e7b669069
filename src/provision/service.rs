use serde::Serialize;

/// OpenStack services that get a dedicated database and user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Keystone,
    Glance,
    Nova,
    Cinder,
    Quantum,
}

impl Service {
    /// Every service, in the order grants are declared.
    pub const ALL: [Service; 5] = [
        Service::Keystone,
        Service::Glance,
        Service::Nova,
        Service::Cinder,
        Service::Quantum,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Service::Keystone => "keystone",
            Service::Glance => "glance",
            Service::Nova => "nova",
            Service::Cinder => "cinder",
            Service::Quantum => "quantum",
        }
    }

    /// Configuration key holding this service's database password.
    pub fn password_field(self) -> &'static str {
        match self {
            Service::Keystone => "keystone_db_password",
            Service::Glance => "glance_db_password",
            Service::Nova => "nova_db_password",
            Service::Cinder => "cinder_db_password",
            Service::Quantum => "quantum_db_password",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
