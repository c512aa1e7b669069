pub mod declaration;
pub mod platform;
pub mod schema;
pub mod service;

use crate::error::ProvisionError;
use declaration::{
    AllowedHosts, GrantDeclaration, Provisioned, ServerDeclaration, BIND_ADDRESS, GRANT_HOST,
};
use schema::{ConfigurationInput, ROOT_PASSWORD_FIELD};
use service::Service;

/// Maps a configuration to the server declaration and one grant per service.
///
/// Fails with `MissingParameter` on the first absent or empty password, root
/// password first, then services in declaration order.
pub fn provision(config: &ConfigurationInput) -> Result<Provisioned, ProvisionError> {
    let root_password = require(config.root_password(), ROOT_PASSWORD_FIELD)?;
    for service in Service::ALL {
        require(config.service_password(service), service.password_field())?;
    }

    let allowed_hosts = match &config.allowed_hosts {
        Some(hosts) if !hosts.is_empty() => AllowedHosts::Hosts(hosts.clone()),
        _ => AllowedHosts::None,
    };

    let grants = Service::ALL
        .iter()
        .map(|&service| GrantDeclaration {
            service,
            user: service.name().into(),
            password: config.service_password(service).into(),
            host: GRANT_HOST.into(),
            database_name: service.name().into(),
            allowed_hosts: allowed_hosts.clone(),
        })
        .collect();

    Ok(Provisioned {
        server: ServerDeclaration {
            root_password: root_password.into(),
            bind_address: BIND_ADDRESS.into(),
        },
        grants,
    })
}

fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ProvisionError> {
    if value.is_empty() {
        return Err(ProvisionError::MissingParameter(field));
    }
    Ok(value)
}

fn render_template(content: &str) -> Result<String, ProvisionError> {
    let env_map: std::collections::HashMap<String, String> = std::env::vars().collect();
    let mut jinja_env = minijinja::Environment::new();
    jinja_env.set_undefined_behavior(minijinja::UndefinedBehavior::Lenient);
    // Values render as JSON literals, which YAML also parses verbatim.
    jinja_env.set_auto_escape_callback(|_| minijinja::AutoEscape::Json);
    jinja_env
        .add_template("config", content)
        .map_err(|e| ProvisionError::Config(format!("parsing config template: {}", e)))?;
    let tmpl = jinja_env
        .get_template("config")
        .map_err(|e| ProvisionError::Config(format!("getting config template: {}", e)))?;
    tmpl.render(minijinja::context!(env => env_map))
        .map_err(|e| ProvisionError::Config(format!("rendering config template: {}", e)))
}

/// Reads a YAML or JSON config file, expanding `{{ env.NAME }}` references.
///
/// References expand to quoted JSON strings, so they are written unquoted:
/// `nova_db_password: {{ env.NOVA_DB_PASSWORD }}`.
pub fn load_config(path: &str) -> Result<ConfigurationInput, ProvisionError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ProvisionError::Config(format!("reading config '{}': {}", path, e)))?;

    let rendered = render_template(&content)?;

    if path.ends_with(".json") {
        ConfigurationInput::from_json(&rendered)
    } else {
        ConfigurationInput::from_yaml(&rendered)
    }
}
