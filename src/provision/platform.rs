//! OS-family strategies for installing and configuring the MySQL server.

use serde::Serialize;

use super::declaration::ServerDeclaration;
use crate::error::ProvisionError;

const BIND_ADDRESS_CNF: &str = "\
[mysqld]
bind-address = {{ bind_address }}
";

const ROOT_CLIENT_CNF: &str = "\
[client]
user = root
host = localhost
password = {{ root_password | option_value }}
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallStep {
    pub package: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFile {
    pub path: String,
    pub content: String,
    pub mode: u32,
}

pub trait Platform: Send + Sync {
    fn family(&self) -> &'static str;
    fn install(&self) -> InstallStep;
    fn configure(&self, server: &ServerDeclaration) -> Result<Vec<ConfigFile>, ProvisionError>;
}

pub struct Debian;
pub struct RedHat;

impl Platform for Debian {
    fn family(&self) -> &'static str {
        "Debian"
    }

    fn install(&self) -> InstallStep {
        InstallStep {
            package: "mysql-server".into(),
            service: "mysql".into(),
        }
    }

    fn configure(&self, server: &ServerDeclaration) -> Result<Vec<ConfigFile>, ProvisionError> {
        server_config_files("/etc/mysql/conf.d/bind-address.cnf", server)
    }
}

impl Platform for RedHat {
    fn family(&self) -> &'static str {
        "RedHat"
    }

    fn install(&self) -> InstallStep {
        InstallStep {
            package: "mysql-server".into(),
            service: "mysqld".into(),
        }
    }

    fn configure(&self, server: &ServerDeclaration) -> Result<Vec<ConfigFile>, ProvisionError> {
        server_config_files("/etc/my.cnf.d/bind-address.cnf", server)
    }
}

static PLATFORMS: &[&dyn Platform] = &[&Debian, &RedHat];

/// Finds the strategy for an `osfamily` fact, ignoring case.
pub fn lookup(osfamily: &str) -> Result<&'static dyn Platform, ProvisionError> {
    PLATFORMS
        .iter()
        .copied()
        .find(|p| p.family().eq_ignore_ascii_case(osfamily))
        .ok_or_else(|| ProvisionError::UnsupportedOsFamily(osfamily.to_string()))
}

fn server_config_files(
    bind_cnf_path: &str,
    server: &ServerDeclaration,
) -> Result<Vec<ConfigFile>, ProvisionError> {
    Ok(vec![
        ConfigFile {
            path: bind_cnf_path.into(),
            content: render(BIND_ADDRESS_CNF, bind_cnf_path, server)?,
            mode: 0o644,
        },
        ConfigFile {
            path: "/root/.my.cnf".into(),
            content: render(ROOT_CLIENT_CNF, "/root/.my.cnf", server)?,
            mode: 0o600,
        },
    ])
}

fn render(source: &str, name: &str, server: &ServerDeclaration) -> Result<String, ProvisionError> {
    let mut env = minijinja::Environment::new();
    env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.add_filter("option_value", option_value);
    env.add_template(name, source)
        .map_err(|e| ProvisionError::Template(format!("{}: {}", name, e)))?;
    let tmpl = env
        .get_template(name)
        .map_err(|e| ProvisionError::Template(format!("{}: {}", name, e)))?;
    tmpl.render(minijinja::context!(
        bind_address => &server.bind_address,
        root_password => &server.root_password,
    ))
    .map_err(|e| ProvisionError::Template(format!("{}: {}", name, e)))
}

/// Double-quotes a MySQL option-file value so `#`, `;` and spaces survive.
fn option_value(value: String) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
