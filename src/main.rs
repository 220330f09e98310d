use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use serde_json::Value;
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use droplets::api::{set_silent, ApiClient};
use droplets::config::{self, Config, API_URL_ENV_VAR, TOKEN_ENV_VARS};
use droplets::datasource::{droplets_data_source_schema, read_droplets};
use droplets::resource_data::ResourceData;
use droplets::utils::{value_to_cell, value_to_short_string};

/// Columns shown by `list --output table`
const TABLE_COLUMNS: [&str; 8] = [
    "name",
    "region",
    "image",
    "size",
    "status",
    "ipv4_address",
    "ipv4_address_private",
    "tags",
];

#[derive(Parser)]
#[command(
    name = "droplets",
    author,
    version,
    about = "Look up DigitalOcean droplets by tag",
    long_about = r#"Look up every DigitalOcean droplet carrying a tag and print it as a flat record.

Credentials come from DIGITALOCEAN_TOKEN (or DIGITALOCEAN_ACCESS_TOKEN), either in the environment or in a `.env` file. Set DIGITALOCEAN_API_URL to talk to a different endpoint.

Examples:
  droplets list --tag web
  droplets list --tag web --output json
  droplets schema
"#,
    after_help = "Use `droplets <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Load environment variables from this file instead of `.env`
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Do not echo API requests
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List droplets carrying a tag", long_about = "Page through every droplet carrying `--tag` and print the flattened records.")]
    List {
        #[arg(long)]
        tag: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    #[command(about = "Print the data source schema as JSON")]
    Schema,
    #[command(about = "Validate configuration and ensure API connectivity.", long_about = "Check that an API token is configured, then validate it by fetching the account from the API.")]
    CheckConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn print_records_table(records: &[Value]) {
    if records.is_empty() {
        println!("(no droplets)");
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table.set_header(TABLE_COLUMNS.to_vec());
    for record in records {
        let row: Vec<String> = TABLE_COLUMNS
            .iter()
            .map(|k| value_to_cell(record.get(*k)))
            .collect();
        table.add_row(row);
    }
    println!("\n{table}\n");
}

fn client_or_exit(cfg: &Config) -> ApiClient {
    if cfg.api_token.is_empty() {
        eprintln!(
            "{}",
            yansi::Paint::new(format!("{} is not configured", TOKEN_ENV_VARS.join(" / "))).red()
        );
        process::exit(1);
    }
    match cfg.client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}: {}", yansi::Paint::new("Failed to build API client").red(), e);
            process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        set_silent(true);
    }

    config::load_env_file(cli.env_file.as_deref());
    let cfg = Config::from_env();

    match cli.command {
        Commands::List { tag, output } => {
            let client = client_or_exit(&cfg);
            let mut data = ResourceData::new(droplets_data_source_schema());
            data.set_config("tag", Value::String(tag));

            if let Err(e) = read_droplets(&client, &mut data).await {
                eprintln!("{}", yansi::Paint::new(e.to_string()).red());
                process::exit(1);
            }

            let records = data
                .get("droplets")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            match output {
                OutputFormat::Json => {
                    let out = serde_json::json!({
                        "id": data.id(),
                        "tag": data.config_str("tag"),
                        "droplets": records,
                    });
                    println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
                }
                OutputFormat::Table => {
                    print_records_table(&records);
                    println!(
                        "{}",
                        yansi::Paint::new(format!("{} droplet(s), snapshot {}", records.len(), data.id().unwrap_or("-"))).dim()
                    );
                }
            }
        }
        Commands::Schema => {
            let schema = droplets_data_source_schema();
            match serde_json::to_string_pretty(&schema) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Failed to render schema").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::CheckConfig => {
            println!("{} = {}", API_URL_ENV_VAR, cfg.api_base_url);
            let client = client_or_exit(&cfg);
            match client.get::<Value>("/v2/account", &[]).await {
                Ok(account) => {
                    let email = account
                        .get("account")
                        .and_then(|a| a.get("email"))
                        .map(value_to_short_string)
                        .unwrap_or_default();
                    println!("{} {}", yansi::Paint::new("API token is valid for").green(), email);
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("API check failed").red(), e);
                    process::exit(1);
                }
            }
        }
    }
}
