use serde::Serialize;

use crate::error::ProvisionError;
use crate::logging::Logger;
use crate::provision::declaration::{GrantDeclaration, Provisioned, ServerDeclaration};
use crate::provision::platform::{ConfigFile, InstallStep, Platform};

#[derive(Debug, Serialize)]
pub struct Manifest {
    pub osfamily: String,
    pub install: InstallStep,
    pub config_files: Vec<ConfigFile>,
    pub server: ServerDeclaration,
    pub grants: Vec<GrantDeclaration>,
}

pub fn build_manifest(
    platform: &dyn Platform,
    provisioned: Provisioned,
) -> Result<Manifest, ProvisionError> {
    Ok(Manifest {
        osfamily: platform.family().into(),
        install: platform.install(),
        config_files: platform.configure(&provisioned.server)?,
        server: provisioned.server,
        grants: provisioned.grants,
    })
}

pub fn render_manifest(manifest: &Manifest, format: &str) -> Result<String, String> {
    match format {
        "json" => serde_json::to_string_pretty(manifest)
            .map_err(|e| format!("encoding manifest as JSON: {}", e)),
        "yaml" => serde_yaml::to_string(manifest)
            .map_err(|e| format!("encoding manifest as YAML: {}", e)),
        _ => Err(format!("--format must be json or yaml, got {:?}", format)),
    }
}

pub fn run(
    log: &Logger,
    config: &str,
    osfamily: &str,
    format: &str,
    show_secrets: bool,
) -> Result<(), String> {
    let (provisioned, platform) = super::load(log, config, osfamily)?;
    let provisioned = if show_secrets {
        log.warn("printing plan with secrets", &[]);
        provisioned
    } else {
        provisioned.redacted()
    };
    let manifest = build_manifest(platform, provisioned).map_err(|e| e.to_string())?;
    println!("{}", render_manifest(&manifest, format)?);
    Ok(())
}
