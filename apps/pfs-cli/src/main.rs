use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use odata_core::{FilterTriple, OrderBy, QueryIntent};
use pfs_client::PfsSession;
use runtime::{AppConfig, CliArgs};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Query the Platform for Science OData API and export specimen manifests
#[derive(Parser)]
#[command(name = "pfs-cli")]
#[command(about = "Platform for Science OData client and specimen manifest exporter")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
struct QueryArgs {
    /// Filter condition "FIELD OP VALUE" (OP is one of = >= <= & ||); repeatable
    #[arg(short, long = "filter", value_name = "CONDITION")]
    filters: Vec<String>,

    /// Attribute to return; repeatable
    #[arg(short, long = "select", value_name = "FIELD")]
    select: Vec<String>,

    /// Sort by this attribute
    #[arg(long, value_name = "FIELD")]
    order_by: Option<String>,

    /// Sort descending
    #[arg(long, requires = "order_by")]
    desc: bool,

    /// Raw $expand expression
    #[arg(long, value_name = "EXPR")]
    expand: Option<String>,
}

impl QueryArgs {
    fn intent(&self) -> Result<QueryIntent> {
        let filters = self
            .filters
            .iter()
            .map(|raw| FilterTriple::parse(raw).with_context(|| format!("bad --filter '{raw}'")))
            .collect::<Result<Vec<_>>>()?;

        let mut intent = QueryIntent::new().filters(filters).select(&self.select);
        if let Some(field) = &self.order_by {
            intent = intent.order_by(if self.desc {
                OrderBy::desc(field)
            } else {
                OrderBy::asc(field)
            });
        }
        if let Some(expr) = &self.expand {
            intent = intent.expand(expr);
        }
        Ok(intent)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Verify credentials against the service metadata
    Check,
    /// Print experiment rows as JSON
    Experiment {
        experiment: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Print assay data rows as JSON
    Assay {
        experiment: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Print the mouse samples measured in an experiment
    Samples {
        experiment: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Print the sample lots measured in an experiment
    Lots {
        experiment: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Print mouse strains
    Strains {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Print mouse samples selected by strain attributes
    StrainSamples {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Write the specimen manifest XML for an experiment's samples
    Export {
        experiment: String,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        query: QueryArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliArgs {
        verbose: cli.verbose,
    });

    runtime::init_logging_from_config(&config.logging_or_default(), Path::new(&config.home_dir));
    tracing::info!(home_dir = %config.home_dir, "pfs-cli starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("no command given, see --help");
    };
    run(command, &config)
}

fn run(command: Commands, config: &AppConfig) -> Result<()> {
    let session =
        PfsSession::connect(config.session.clone()).context("failed to set up HTTP client")?;

    match command {
        Commands::Check => {
            let result = session
                .authenticate()
                .context("authentication failed, check session.username and session.password")?;
            println!("{}, {}", result.status_code, result.message);
        }
        Commands::Experiment { experiment, query } => {
            let result = session.fetch_experiment_data(&experiment, &query.intent()?)?;
            print_json(&result.data)?;
        }
        Commands::Assay { experiment, query } => {
            let result = session.fetch_assay_data(&experiment, &query.intent()?)?;
            print_json(&result.data)?;
        }
        Commands::Samples { experiment, query } => {
            let samples = session.get_samples(&experiment, &query.intent()?)?;
            print_json(&serde_json::to_value(samples)?)?;
        }
        Commands::Lots { experiment, query } => {
            let lots = session.get_sample_lots(&experiment, &query.intent()?)?;
            print_json(&serde_json::to_value(lots)?)?;
        }
        Commands::Strains { query } => {
            let strains = session.get_strains(&query.intent()?)?;
            print_json(&serde_json::to_value(strains)?)?;
        }
        Commands::StrainSamples { query } => {
            let samples = session.get_samples_by_strain(&query.intent()?)?;
            print_json(&serde_json::to_value(samples)?)?;
        }
        Commands::Export {
            experiment,
            output,
            query,
        } => {
            let samples = session.get_samples(&experiment, &query.intent()?)?;
            dcc_export::write_specimen_file(&output, &samples, &config.export)?;
            println!("Wrote {} specimens to {}", samples.len(), output.display());
        }
    }
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
