use crate::apply::{self, db, executor::GrantApplier};
use crate::logging::Logger;

pub struct Config {
    pub config: String,
    pub osfamily: String,
    pub host: String,
    pub port: u16,
    pub config_root: String,
    pub dry_run: bool,
}

pub fn run(log: &Logger, cfg: &Config) -> Result<(), String> {
    let (provisioned, platform) = super::load(log, &cfg.config, &cfg.osfamily)?;

    let install = platform.install();
    log.info(
        "server install step",
        &[
            ("package", install.package.as_str()),
            ("service", install.service.as_str()),
        ],
    );

    if !cfg.config_root.is_empty() {
        let files = platform
            .configure(&provisioned.server)
            .map_err(|e| e.to_string())?;
        if cfg.dry_run {
            for file in &files {
                log.info("dry run: would write config file", &[("path", file.path.as_str())]);
            }
        } else {
            apply::write_config_files(log, &files, &cfg.config_root)?;
        }
    }

    let database: Box<dyn db::Database> = if cfg.dry_run {
        Box::new(db::DryRun)
    } else {
        log.info(
            "connecting to mysql",
            &[("host", cfg.host.as_str()), ("port", &cfg.port.to_string())],
        );
        db::connect(&cfg.host, cfg.port, &provisioned.server.root_password)?
    };

    GrantApplier::new(log, database, cfg.dry_run).apply(&provisioned.grants)
}
