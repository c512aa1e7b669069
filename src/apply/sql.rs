use crate::provision::declaration::GrantDeclaration;

/// A SQL statement and a password-free rendering of it for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub summary: String,
}

impl Statement {
    fn plain(sql: String) -> Self {
        Self {
            summary: sql.clone(),
            sql,
        }
    }
}

pub fn sanitize_identifier(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

fn account(user: &str, host: &str) -> String {
    format!("{}@{}", quote_literal(user), quote_literal(host))
}

/// Statements that bring one grant into place; safe to re-run.
///
/// The user is created (and its password reset) for `host` and for each
/// allowed host, then granted all privileges on its database.
pub fn grant_statements(grant: &GrantDeclaration) -> Vec<Statement> {
    let db = sanitize_identifier(&grant.database_name);
    let mut stmts = vec![Statement::plain(format!(
        "CREATE DATABASE IF NOT EXISTS `{}` CHARACTER SET utf8",
        db
    ))];

    let hosts = std::iter::once(&grant.host).chain(grant.allowed_hosts.hosts());
    for host in hosts {
        let acct = account(&grant.user, host);
        let secret = quote_literal(&grant.password);
        stmts.push(Statement {
            sql: format!("CREATE USER IF NOT EXISTS {} IDENTIFIED BY {}", acct, secret),
            summary: format!("CREATE USER IF NOT EXISTS {} IDENTIFIED BY '***'", acct),
        });
        stmts.push(Statement {
            sql: format!("ALTER USER {} IDENTIFIED BY {}", acct, secret),
            summary: format!("ALTER USER {} IDENTIFIED BY '***'", acct),
        });
        stmts.push(Statement::plain(format!(
            "GRANT ALL PRIVILEGES ON `{}`.* TO {}",
            db, acct
        )));
    }
    stmts
}

pub fn flush_privileges() -> Statement {
    Statement::plain("FLUSH PRIVILEGES".into())
}
