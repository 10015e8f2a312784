use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use tl_controls::{ControlMode, TuningGains};
use tl_core::Real;
use tl_sim::{LoopOptions, LoopRecord, Scenario, SimError, SimResult};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tl-cli")]
#[command(about = "thermoloop CLI - PID control of a layered diffusion body", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the closed loop and print (tick, measured value) pairs
    Run {
        /// Critical (ultimate) gain
        #[arg(long, default_value_t = 14.0)]
        kp_critical: Real,
        /// Critical oscillation period in ticks
        #[arg(long, default_value_t = 230.0)]
        t_critical: Real,
        /// Controller mode: P, PI, PD, PID or P_max
        #[arg(long, default_value = "PID")]
        mode: String,
        /// Set-point for the far-end temperature
        #[arg(long, default_value_t = 1.0)]
        setpoint: Real,
        /// Number of ticks to run
        #[arg(long, default_value_t = 1000)]
        ticks: usize,
        /// Number of diffusion layers
        #[arg(long, default_value_t = 10)]
        layers: usize,
        /// Fraction of the temperature difference exchanged per tick
        #[arg(long, default_value_t = 0.1)]
        diffusion_rate: Real,
        /// Emit the scenario and record as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the gains every mode derives from the critical parameters
    Gains {
        /// Critical (ultimate) gain
        #[arg(long, default_value_t = 14.0)]
        kp_critical: Real,
        /// Critical oscillation period in ticks
        #[arg(long, default_value_t = 230.0)]
        t_critical: Real,
    },
}

#[derive(Serialize)]
struct RunReport<'a> {
    scenario: &'a Scenario,
    record: &'a LoopRecord,
}

fn main() -> SimResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            kp_critical,
            t_critical,
            mode,
            setpoint,
            ticks,
            layers,
            diffusion_rate,
            json,
        } => {
            let scenario = Scenario {
                kp_critical,
                t_critical,
                mode: mode.parse()?,
                layer_count: layers,
                diffusion_rate,
                options: LoopOptions { ticks, setpoint },
            };
            cmd_run(&scenario, json)
        }
        Commands::Gains {
            kp_critical,
            t_critical,
        } => cmd_gains(kp_critical, t_critical),
    }
}

fn cmd_run(scenario: &Scenario, json: bool) -> SimResult<()> {
    tracing::info!(mode = %scenario.mode, ticks = scenario.options.ticks, "running closed loop");
    let record = scenario.run()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let report = RunReport {
            scenario,
            record: &record,
        };
        serde_json::to_writer_pretty(&mut out, &report).map_err(|e| SimError::Output {
            message: e.to_string(),
        })?;
        writeln!(out)?;
    } else {
        for (tick, value) in record.iter() {
            writeln!(out, "{} {}", tick, value)?;
        }
    }
    Ok(())
}

fn cmd_gains(kp_critical: Real, t_critical: Real) -> SimResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{:<6} {:>12} {:>12} {:>12}", "mode", "K_p", "T_i", "T_d")?;
    for mode in ControlMode::ALL {
        let TuningGains { kp, ti, td } = mode.gains(kp_critical, t_critical);
        writeln!(
            out,
            "{:<6} {:>12.4} {:>12} {:>12}",
            mode.as_str(),
            kp,
            format_time(ti),
            format_time(td)
        )?;
    }
    Ok(())
}

fn format_time(value: Option<Real>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}
