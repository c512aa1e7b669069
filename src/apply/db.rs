pub trait Database: Send {
    fn execute(&mut self, sql: &str) -> Result<(), String>;
}

/// Accepts every statement without running it.
pub struct DryRun;

impl Database for DryRun {
    fn execute(&mut self, _sql: &str) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(feature = "mysql")]
pub struct MysqlDb {
    conn: mysql::PooledConn,
}

#[cfg(feature = "mysql")]
impl MysqlDb {
    pub fn connect(opts: mysql::OptsBuilder) -> Result<Self, String> {
        let pool = mysql::Pool::new(opts).map_err(|e| format!("connecting to mysql: {}", e))?;
        let conn = pool
            .get_conn()
            .map_err(|e| format!("getting mysql connection: {}", e))?;
        Ok(Self { conn })
    }
}

#[cfg(feature = "mysql")]
impl Database for MysqlDb {
    fn execute(&mut self, sql: &str) -> Result<(), String> {
        use mysql::prelude::Queryable;
        self.conn.query_drop(sql).map_err(|e| e.to_string())
    }
}

/// Connection options for the server's root account.
#[cfg(feature = "mysql")]
pub fn root_opts(host: &str, port: u16, root_password: &str) -> mysql::OptsBuilder {
    mysql::OptsBuilder::new()
        .ip_or_hostname(Some(host))
        .tcp_port(port)
        .user(Some("root"))
        .pass(Some(root_password))
}

#[cfg(feature = "mysql")]
pub fn connect(host: &str, port: u16, root_password: &str) -> Result<Box<dyn Database>, String> {
    Ok(Box::new(MysqlDb::connect(root_opts(host, port, root_password))?))
}

#[cfg(not(feature = "mysql"))]
pub fn connect(_host: &str, _port: u16, _root_password: &str) -> Result<Box<dyn Database>, String> {
    Err("stackdb was built without the 'mysql' feature".into())
}
