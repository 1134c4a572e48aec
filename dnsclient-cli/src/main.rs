use anyhow::Context;
use clap::{ArgGroup, Parser};
use dnsclient::dns::resolver::resolve;
use dnsclient::reporter::{
    JsonFormatter, ReplyFormatter, TextFormatter, error_line, request_preamble,
};
use dnsclient::utils::{ClientConfig, ServerAddress, query_type_from_flags};
use std::process::ExitCode;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dnsclient")]
#[command(version)]
#[command(about = "Send one DNS query over UDP and print the A, NS or MX records of the reply")]
#[command(group(ArgGroup::new("query_type").args(["mx", "ns"])))]
struct Cli {
    /// How long to wait, in seconds, before retransmitting an unanswered query
    #[arg(short = 't', long = "timeout", value_name = "SECONDS", default_value_t = 5,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Maximum number of times to send the query before giving up
    #[arg(short = 'r', long = "max-retries", value_name = "COUNT", default_value_t = 3)]
    max_retries: u32,

    /// UDP port of the DNS server
    #[arg(short = 'p', long, default_value_t = 53,
          value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Send a mail server query
    #[arg(long)]
    mx: bool,

    /// Send a name server query
    #[arg(long)]
    ns: bool,

    /// Reject replies whose transaction ID differs from the query's
    #[arg(long)]
    strict_id: bool,

    /// Print the reply as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG is used when absent
    #[arg(long)]
    log_level: Option<String>,

    /// IPv4 address of the DNS server, as @a.b.c.d
    #[arg(value_name = "@SERVER")]
    server: ServerAddress,

    /// Domain name to query for
    name: String,
}

fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
    Ok(())
}

fn config_from(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let query_type = query_type_from_flags(cli.mx, cli.ns)?;
    let config = ClientConfig::new(cli.server, cli.name.as_str())
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_max_retries(cli.max_retries)
        .with_port(cli.port)
        .with_query_type(query_type)
        .with_strict_id(cli.strict_id);
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = config_from(cli)?;
    debug!(?config, "configuration loaded");

    if !cli.json {
        println!("{}", request_preamble(&config));
    }

    let resolution = resolve(&config)?;

    if cli.json {
        let json = JsonFormatter { pretty: true }
            .format(&resolution)
            .context("failed to serialize the reply")?;
        println!("{json}");
    } else {
        print!("{}", TextFormatter.format(&resolution));
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level.as_deref()) {
        println!("{}", error_line(&format!("{e:#}")));
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", error_line(&format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}
