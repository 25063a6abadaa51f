use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use docusign_connect::config::Config;
use docusign_connect::connect::marshal::drop_empty;
use docusign_connect::docusign::http::format_api_error;
use docusign_connect::{ApiConfig, ConnectError, Credentials, DocuSignClient, Params};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage DocuSign Connect webhook configurations
#[derive(Parser, Debug)]
#[command(name = "docusign-connect", version, about, long_about = None)]
struct Args {
    /// DocuSign environment subdomain (demo, www, na2, ...)
    #[arg(short, long, global = true)]
    environment: Option<String>,

    /// REST API version
    #[arg(long, global = true)]
    api_version: Option<String>,

    /// Account to operate on
    #[arg(short, long, global = true)]
    account_id: Option<String>,

    /// Send requests to this base URL instead of the environment's
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Save the account id as the default
    #[arg(long, global = true)]
    remember: bool,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all Connect configurations
    List,
    /// Show one Connect configuration
    Get { connect_id: String },
    /// Create a Connect configuration
    Create(ConfigurationArgs),
    /// Update a Connect configuration
    Update {
        connect_id: String,
        #[command(flatten)]
        fields: ConfigurationArgs,
    },
    /// Delete a Connect configuration
    Delete { connect_id: String },
}

#[derive(ClapArgs, Debug, Default)]
struct ConfigurationArgs {
    /// Webhook URL events are published to
    #[arg(long)]
    url: Option<String>,

    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Envelope events, comma separated (Sent,Delivered,Signed,Completed,Declined,Voided)
    #[arg(long, value_delimiter = ',')]
    envelope_events: Option<Vec<String>>,

    /// Recipient events, comma separated
    #[arg(long, value_delimiter = ',')]
    recipient_events: Option<Vec<String>>,

    /// User ids to track, comma separated. Required unless --all-users true
    #[arg(long, value_delimiter = ',')]
    user_ids: Option<Vec<String>>,

    /// SOAP method namespace, required with --use-soap-interface true
    #[arg(long)]
    soap_namespace: Option<String>,

    #[arg(long)]
    all_users: Option<bool>,
    #[arg(long)]
    allow_envelope_publish: Option<bool>,
    #[arg(long)]
    enable_log: Option<bool>,
    #[arg(long)]
    include_documents: Option<bool>,
    #[arg(long)]
    include_sender_account_as_custom_field: Option<bool>,
    #[arg(long)]
    include_time_zone_information: Option<bool>,
    #[arg(long)]
    requires_acknowledgement: Option<bool>,
    #[arg(long)]
    sign_message_with_x509_certificate: Option<bool>,
    #[arg(long)]
    use_soap_interface: Option<bool>,
}

impl ConfigurationArgs {
    /// Wire-named parameters with unset options removed
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("urlToPublishTo".into(), json!(self.url));
        params.insert("name".into(), json!(self.name));
        params.insert("envelopeEvents".into(), json!(self.envelope_events));
        params.insert("recipientEvents".into(), json!(self.recipient_events));
        params.insert("userIds".into(), json!(self.user_ids));
        params.insert("soapNamespace".into(), json!(self.soap_namespace));
        params.insert("allUsers".into(), json!(self.all_users));
        params.insert("allowEnvelopePublish".into(), json!(self.allow_envelope_publish));
        params.insert("enableLog".into(), json!(self.enable_log));
        params.insert("includeDocuments".into(), json!(self.include_documents));
        params.insert(
            "includeSenderAccountasCustomField".into(),
            json!(self.include_sender_account_as_custom_field),
        );
        params.insert(
            "includeTimeZoneInformation".into(),
            json!(self.include_time_zone_information),
        );
        params.insert(
            "requiresAcknowledgement".into(),
            json!(self.requires_acknowledgement),
        );
        params.insert(
            "signMessagewithX509Certificate".into(),
            json!(self.sign_message_with_x509_certificate),
        );
        params.insert("useSoapInterface".into(), json!(self.use_soap_interface));
        drop_empty(&params)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("docusign-connect started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = Config::config_dir() {
        return config_dir.join("docusign-connect.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".docusign-connect").join("docusign-connect.log");
    }
    PathBuf::from("docusign-connect.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{}", output),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Command failed: {}", err);
            eprintln!("Error: {}", describe_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn describe_error(err: &ConnectError) -> String {
    match err {
        ConnectError::Transport(inner) => format_api_error(inner),
        other => other.to_string(),
    }
}

async fn run(args: Args) -> docusign_connect::Result<Value> {
    let mut config = Config::load();

    let environment = config.effective_environment(args.environment.as_deref());
    let version = config.effective_version(args.api_version.as_deref());
    let account_id = config
        .effective_account_id(args.account_id.as_deref())
        .ok_or_else(|| {
            ConnectError::Config(
                "no account id. Pass --account-id or set DOCUSIGN_ACCOUNT_ID".to_string(),
            )
        })?;

    if args.remember {
        if let Err(e) = config.set_account_id(&account_id) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    tracing::info!("Using environment: {}, version: {}", environment, version);

    let mut api = ApiConfig::new(Credentials::from_env()?)
        .with_environment(environment)
        .with_version(version);
    if let Some(base_url) = args.base_url.as_deref().or(config.base_url.as_deref()) {
        api = api.with_base_url(base_url)?;
    }

    let client = DocuSignClient::new(api)?;
    let connect = client.connect();

    match args.command {
        Command::List => {
            let list = connect.list(&account_id).await?;
            if !list.is_consistent() {
                tracing::warn!(
                    "totalRecords {} does not match {} configurations",
                    list.total_records,
                    list.configurations.len()
                );
            }
            to_output(&list)
        }
        Command::Get { connect_id } => to_output(&connect.get(&account_id, &connect_id).await?),
        Command::Create(fields) => {
            let params = fields.to_params();
            if !params.contains_key("urlToPublishTo") {
                return Err(ConnectError::Config("create requires --url".to_string()));
            }
            to_output(&connect.create(&account_id, &params).await?)
        }
        Command::Update { connect_id, fields } => {
            connect
                .update(&account_id, &connect_id, &fields.to_params())
                .await
        }
        Command::Delete { connect_id } => connect.delete(&account_id, &connect_id).await,
    }
}

fn to_output<S: serde::Serialize>(value: &S) -> docusign_connect::Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| ConnectError::Config(format!("cannot render output: {}", e)))
}
