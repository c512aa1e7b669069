pub mod apply;
pub mod plan;

use crate::logging::Logger;
use crate::provision::{self, declaration::Provisioned, platform, platform::Platform};

/// Loads the config file and provisions declarations for its platform.
///
/// A non-empty `osfamily` overrides the `facts.osfamily` value from the file.
pub fn load(
    log: &Logger,
    config_path: &str,
    osfamily: &str,
) -> Result<(Provisioned, &'static dyn Platform), String> {
    let mut config = provision::load_config(config_path).map_err(|e| e.to_string())?;
    if !osfamily.is_empty() {
        config.facts.osfamily = osfamily.to_string();
    }

    let platform = platform::lookup(&config.facts.osfamily).map_err(|e| e.to_string())?;
    log.info(
        "provisioning databases",
        &[("config", config_path), ("osfamily", platform.family())],
    );

    let provisioned = provision::provision(&config).map_err(|e| e.to_string())?;
    log.debug(
        "declarations provisioned",
        &[("grants", &provisioned.grants.len().to_string())],
    );
    Ok((provisioned, platform))
}
