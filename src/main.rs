mod apply;
mod cmd;
mod error;
mod logging;
mod provision;
mod safety;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stackdb",
    version,
    about = "Declare the MySQL server and service databases of an OpenStack control plane"
)]
#[command(
    long_about = "stackdb turns a root password and one password per OpenStack service\n(keystone, glance, nova, cinder, quantum) into declarations: the MySQL\nserver configuration and one database, user and grant per service.\nIt can print them as a plan or apply the grants to a running server."
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "STACKDB_JSON",
        help = "Enable JSON log output"
    )]
    json: bool,

    #[arg(
        long,
        global = true,
        env = "STACKDB_DEBUG",
        help = "Enable debug logging"
    )]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the server and grant declarations for a configuration
    Plan {
        #[arg(
            long,
            required = true,
            env = "STACKDB_CONFIG",
            help = "Path to configuration file (YAML or JSON)"
        )]
        config: String,
        #[arg(
            long,
            default_value = "",
            env = "STACKDB_OSFAMILY",
            help = "Override the osfamily fact (Debian or RedHat)"
        )]
        osfamily: String,
        #[arg(
            long,
            default_value = "json",
            env = "STACKDB_FORMAT",
            help = "Output format: json or yaml"
        )]
        format: String,
        #[arg(
            long,
            env = "STACKDB_SHOW_SECRETS",
            help = "Print passwords instead of redacting them"
        )]
        show_secrets: bool,
    },

    /// Write server config files and apply service grants to MySQL
    Apply {
        #[arg(
            long,
            required = true,
            env = "STACKDB_CONFIG",
            help = "Path to configuration file (YAML or JSON)"
        )]
        config: String,
        #[arg(
            long,
            default_value = "",
            env = "STACKDB_OSFAMILY",
            help = "Override the osfamily fact (Debian or RedHat)"
        )]
        osfamily: String,
        #[arg(
            long,
            default_value = "127.0.0.1",
            env = "STACKDB_MYSQL_HOST",
            help = "MySQL server host"
        )]
        host: String,
        #[arg(
            long,
            default_value = "3306",
            env = "STACKDB_MYSQL_PORT",
            help = "MySQL server port"
        )]
        port: u16,
        #[arg(
            long,
            default_value = "",
            env = "STACKDB_CONFIG_ROOT",
            help = "Directory to write server config files under"
        )]
        config_root: String,
        #[arg(
            long,
            env = "STACKDB_DRY_RUN",
            help = "Log statements without connecting to MySQL"
        )]
        dry_run: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let log = logging::Logger::stderr(cli.json, cli.debug);

    let result = match cli.command {
        Commands::Plan {
            config,
            osfamily,
            format,
            show_secrets,
        } => cmd::plan::run(&log, &config, &osfamily, &format, show_secrets),
        Commands::Apply {
            config,
            osfamily,
            host,
            port,
            config_root,
            dry_run,
        } => cmd::apply::run(
            &log,
            &cmd::apply::Config {
                config,
                osfamily,
                host,
                port,
                config_root,
                dry_run,
            },
        ),
    };

    if let Err(e) = result {
        log.error(&e, &[]);
        std::process::exit(1);
    }
}
