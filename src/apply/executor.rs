use crate::apply::db::Database;
use crate::apply::sql::{self, Statement};
use crate::logging::Logger;
use crate::provision::declaration::GrantDeclaration;

pub struct GrantApplier<'a> {
    log: &'a Logger,
    db: Box<dyn Database>,
    dry_run: bool,
}

impl<'a> GrantApplier<'a> {
    pub fn new(log: &'a Logger, db: Box<dyn Database>, dry_run: bool) -> Self {
        Self { log, db, dry_run }
    }

    /// Applies grants in order, stopping at the first failing statement.
    pub fn apply(&mut self, grants: &[GrantDeclaration]) -> Result<(), String> {
        self.log.info(
            "applying grants",
            &[("count", &grants.len().to_string())],
        );

        for grant in grants {
            self.apply_grant(grant)
                .map_err(|e| format!("grant for '{}' failed: {}", grant.service, e))?;
        }

        self.run(&sql::flush_privileges())?;
        self.log.info("grants applied", &[]);
        Ok(())
    }

    fn apply_grant(&mut self, grant: &GrantDeclaration) -> Result<(), String> {
        let hosts = grant.allowed_hosts.hosts().len() + 1;
        self.log.info(
            "applying grant",
            &[
                ("service", grant.service.name()),
                ("user", grant.user.as_str()),
                ("dbname", grant.database_name.as_str()),
                ("hosts", &hosts.to_string()),
            ],
        );
        for stmt in sql::grant_statements(grant) {
            self.run(&stmt)?;
        }
        Ok(())
    }

    fn run(&mut self, stmt: &Statement) -> Result<(), String> {
        if self.dry_run {
            self.log.info("dry run", &[("sql", stmt.summary.as_str())]);
        } else {
            self.log.debug("executing", &[("sql", stmt.summary.as_str())]);
        }
        self.db
            .execute(&stmt.sql)
            .map_err(|e| format!("{}: {}", stmt.summary, e))
    }
}
