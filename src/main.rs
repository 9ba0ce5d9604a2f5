use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use distconv::config::Config;
use distconv::form::{ConversionForm, InputPolicy, Session};
use distconv::logging::{init_logging, LogConfig, LogFormat};
use distconv::units::{self, Unit};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "distconv")]
#[command(version, about = "Convert distances between m, km, ft, yd and mi", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with default units, input policy and precision
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Reject unparseable input and out-of-range selectors instead of falling back
    #[arg(long, global = true)]
    strict: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q to silence)
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// Log output format
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value from one unit to another
    Convert {
        /// Value to convert (unparseable text counts as 0 unless --strict)
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Source unit (label or name, e.g. "km" or "kilometers")
        #[arg(short, long)]
        from: Option<Unit>,

        /// Target unit
        #[arg(short, long)]
        to: Option<Unit>,

        /// Digits after the decimal point (0-12)
        #[arg(short, long, value_parser = clap::value_parser!(u16).range(0..=units::MAX_PRECISION as i64))]
        precision: Option<u16>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the form by picker selectors (0=m, 1=km, 2=ft, 3=yd, 4=mi)
    Form {
        /// Input unit selector (out of range means meters)
        #[arg(allow_negative_numbers = true)]
        input_unit: i64,

        /// Output unit selector (out of range means meters)
        #[arg(allow_negative_numbers = true)]
        output_unit: i64,

        /// Raw input text
        #[arg(default_value = "", allow_hyphen_values = true)]
        text: String,
    },

    /// Convert a quantity written as "<number> <unit>", e.g. "3.5 km"
    Quantity {
        /// Quantity text
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Target unit
        #[arg(short, long)]
        to: Unit,
    },

    /// Show a value expressed in every unit
    Table {
        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Source unit
        #[arg(short, long)]
        from: Option<Unit>,

        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the supported units in selector order
    Units {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read values and unit changes from stdin, printing the output after each line
    Interactive,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        with_ansi: io::stderr().is_terminal(),
        use_env_filter: !cli.verbosity.is_present(),
        ..LogConfig::default()
    }
    .with_level(cli.verbosity.tracing_level_filter())
    .with_format(cli.log_format)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if cli.strict {
        config.form.policy = InputPolicy::Strict;
    }
    debug!(?config, "configuration loaded");
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Convert {
            value,
            from,
            to,
            precision,
            json,
        } => convert_value(&config, &value, from, to, precision, json),
        Commands::Form {
            input_unit,
            output_unit,
            text,
        } => evaluate_form(&config, input_unit, output_unit, &text),
        Commands::Quantity { text, to } => convert_quantity(&config, &text, to),
        Commands::Table { value, from, json } => print_table(&config, &value, from, json),
        Commands::Units { json } => list_units(json),
        Commands::Interactive => run_interactive(&config),
    }
}

fn evaluate(form: &ConversionForm) -> Result<units::Quantity> {
    let conversion = form
        .evaluate()
        .map_err(|validation| anyhow!("invalid input\n{}", validation.to_string().trim_end()))?;
    info!(
        input = conversion.input,
        from = %conversion.from,
        to = %conversion.to,
        output = conversion.output,
        "converted"
    );
    Ok(units::Quantity::new(conversion.output, conversion.to))
}

fn convert_value(
    config: &Config,
    value: &str,
    from: Option<Unit>,
    to: Option<Unit>,
    precision: Option<u16>,
    json: bool,
) -> Result<()> {
    let mut form = config.new_form().with_units(
        from.unwrap_or(config.form.input_unit),
        to.unwrap_or(config.form.output_unit),
    );
    if let Some(precision) = precision {
        form = form.with_precision(usize::from(precision));
    }
    form.set_input_text(value);

    let result = evaluate(&form)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&form.conversion())?);
    } else {
        println!(
            "{}",
            units::format_quantity(result.value, result.unit, form.precision)
        );
    }
    Ok(())
}

fn evaluate_form(config: &Config, input_unit: i64, output_unit: i64, text: &str) -> Result<()> {
    let mut form = config.new_form();
    form.set_input_unit(input_unit);
    form.set_output_unit(output_unit);
    form.set_input_text(text);

    evaluate(&form)?;
    println!("{}", form.formatted_output());
    Ok(())
}

fn convert_quantity(config: &Config, text: &str, to: Unit) -> Result<()> {
    let quantity = units::parse_quantity(text)?;
    let value = units::convert(quantity.value, quantity.unit, to);
    println!(
        "{}",
        units::format_quantity(value, to, config.display.precision)
    );
    Ok(())
}

fn print_table(config: &Config, value: &str, from: Option<Unit>, json: bool) -> Result<()> {
    let number = match config.form.policy {
        InputPolicy::Strict => units::parse_number(value)?,
        InputPolicy::Lenient => units::parse_number_or_zero(value),
    };
    let from = from.unwrap_or(config.form.input_unit);

    let rows = units::conversion_table(number, from, config.display.precision);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let width = rows.iter().map(|r| r.formatted.len()).max().unwrap_or(0);
    for row in &rows {
        println!("{:>width$} {}", row.formatted, row.unit, width = width);
    }
    Ok(())
}

fn list_units(json: bool) -> Result<()> {
    let entries = units::catalog();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Units ({}):", entries.len());
    for entry in &entries {
        println!(
            "  {} {:<2} {:<10} 1 {} = {} m",
            entry.index, entry.label, entry.name, entry.label, entry.factor
        );
    }
    Ok(())
}

fn run_interactive(config: &Config) -> Result<()> {
    let form = config.new_form();
    eprintln!(
        "Enter a value, 'in <unit>', 'out <unit>', 'swap', 'show' or 'quit'. Units: {}",
        Unit::labels().join(", ")
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(form, stdin.lock(), stdout.lock())
        .run()
        .context("interactive session failed")?;
    Ok(())
}
