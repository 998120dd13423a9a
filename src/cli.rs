use crate::config::Config;
use crate::integrations::{ReportMailer, ReportRequest};
use crate::logic::rules::email_suggestions;
use crate::logic::{estimate, report, RulesEngine, SustainabilityAssistant};
use crate::models::{
    DietType, ElectricitySource, EmissionBreakdown, HouseholdProfile, Suggestion, VehicleType,
};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "carbonwise",
    version,
    about = "Household carbon footprint calculator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate monthly emissions and print suggestions
    Estimate {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the personalised report, or mail it with --send
    Report {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Name used in the greeting
        #[arg(long)]
        name: Option<String>,

        /// Recipient address; the report is printed when omitted
        #[arg(long, value_name = "EMAIL")]
        send: Option<String>,
    },
    /// Ask the sustainability chatbot one question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
}

/// Per-field overrides on top of the configured defaults.
#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    /// Electricity consumption (kWh/month)
    #[arg(long)]
    pub electricity: Option<f64>,

    /// Electricity source: coal, renewable, mixed
    #[arg(long, value_parser = parse_source)]
    pub source: Option<ElectricitySource>,

    /// LPG / gas used (kg/month)
    #[arg(long)]
    pub lpg: Option<f64>,

    /// Vehicle type: car, bike, bus, train, none
    #[arg(long, value_parser = parse_vehicle)]
    pub vehicle: Option<VehicleType>,

    /// Distance travelled (km/month)
    #[arg(long)]
    pub travel: Option<f64>,

    /// Vehicle efficiency (km/l or km/kWh)
    #[arg(long)]
    pub efficiency: Option<f64>,

    /// Diet: veg, nonveg, vegan, mixed
    #[arg(long, value_parser = parse_diet)]
    pub diet: Option<DietType>,

    /// Household waste (kg/month)
    #[arg(long)]
    pub waste: Option<f64>,

    /// People in the household
    #[arg(long)]
    pub household: Option<i64>,

    /// Share of electricity from renewables (%)
    #[arg(long)]
    pub renewable: Option<f64>,
}

impl ProfileArgs {
    /// Overlay the flags on `base` and clamp the result to valid ranges.
    pub fn apply(&self, base: &HouseholdProfile) -> HouseholdProfile {
        let mut p = base.clone();
        if let Some(v) = self.electricity {
            p.electricity_kwh = v;
        }
        if let Some(v) = self.source {
            p.electricity_source = v;
        }
        if let Some(v) = self.lpg {
            p.lpg_kg = v;
        }
        if let Some(v) = self.vehicle {
            p.vehicle_type = v;
        }
        if let Some(v) = self.travel {
            p.travel_km = v;
        }
        if let Some(v) = self.efficiency {
            p.vehicle_efficiency = v;
        }
        if let Some(v) = self.diet {
            p.diet = v;
        }
        if let Some(v) = self.waste {
            p.waste_kg = v;
        }
        if let Some(v) = self.household {
            p.household_size = v;
        }
        if let Some(v) = self.renewable {
            p.renewable_percent = v;
        }

        for field in p.out_of_range_fields() {
            tracing::warn!(field, "value out of range, clamping");
        }
        p.clamped()
    }
}

fn parse_source(s: &str) -> Result<ElectricitySource, String> {
    ElectricitySource::from_str(s).ok_or_else(|| format!("unknown electricity source '{}'", s))
}

fn parse_vehicle(s: &str) -> Result<VehicleType, String> {
    VehicleType::from_str(s).ok_or_else(|| format!("unknown vehicle type '{}'", s))
}

fn parse_diet(s: &str) -> Result<DietType, String> {
    DietType::from_str(s).ok_or_else(|| format!("unknown diet '{}'", s))
}

#[derive(Debug, Serialize)]
struct EstimateOutput<'a> {
    profile: &'a HouseholdProfile,
    emissions: EmissionBreakdown,
    total: f64,
    per_capita: f64,
    suggestions: &'a [Suggestion],
}

/// Run a non-interactive subcommand.
pub async fn run(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Estimate { profile, json } => run_estimate(&config, &profile, json),
        Commands::Report {
            profile,
            name,
            send,
        } => run_report(&config, &profile, name, send).await,
        Commands::Ask { question } => run_ask(&config, &question.join(" ")).await,
        Commands::Check => run_check(&config).await,
        // Handled before the config is loaded.
        Commands::Init => Ok(()),
    }
}

fn assess(
    config: &Config,
    args: &ProfileArgs,
) -> (HouseholdProfile, EmissionBreakdown, Vec<Suggestion>) {
    let profile = args.apply(&config.defaults);
    let emissions = estimate(&profile);
    let suggestions = RulesEngine::new().evaluate(&profile, &emissions);
    (profile, emissions, suggestions)
}

fn run_estimate(config: &Config, args: &ProfileArgs, json: bool) -> anyhow::Result<()> {
    let (profile, emissions, suggestions) = assess(config, args);

    if json {
        let output = EstimateOutput {
            profile: &profile,
            emissions,
            total: emissions.total(),
            per_capita: emissions.per_capita(profile.household_size),
            suggestions: &suggestions,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize estimate")?
        );
        return Ok(());
    }

    println!(
        "Estimated monthly emissions: {:.2} kg CO₂e",
        emissions.total()
    );
    println!(
        "Per person ({} in household): {:.2} kg CO₂e",
        profile.household_size,
        emissions.per_capita(profile.household_size)
    );
    println!();
    println!("Breakdown:");
    for (label, value) in emissions.components() {
        println!("  {:<11} {:>8.2} kg", label, value);
    }
    println!();

    let key = email_suggestions(&suggestions);
    if let Some(top) = key.first() {
        println!("Top suggestion: {}", top);
    }
    if key.len() > 1 {
        println!("Other key suggestions:");
        for s in &key[1..] {
            println!("  - {}", s);
        }
    }
    if suggestions.len() > key.len() {
        println!("More ideas:");
        for s in &suggestions[key.len()..] {
            println!("  - {}", s);
        }
    }

    Ok(())
}

async fn run_report(
    config: &Config,
    args: &ProfileArgs,
    name: Option<String>,
    send: Option<String>,
) -> anyhow::Result<()> {
    let (profile, emissions, suggestions) = assess(config, args);
    let name = name.unwrap_or_else(|| config.user.name.clone());

    let Some(to) = send else {
        let report = report::compose(
            &name,
            &emissions,
            Some(&profile),
            email_suggestions(&suggestions),
        );
        println!("Subject: {}", report.subject);
        println!();
        println!("{}", report.body);
        return Ok(());
    };

    let mailer = ReportMailer::new(config.mail.clone());
    let request = ReportRequest {
        to: &to,
        name: &name,
        emissions,
        profile: Some(&profile),
        suggestions: email_suggestions(&suggestions),
    };

    let outcome = mailer.send(&request).await;
    if !outcome.success {
        bail!(outcome.message);
    }
    println!("{}", outcome.message);
    Ok(())
}

async fn run_ask(config: &Config, question: &str) -> anyhow::Result<()> {
    let assistant = SustainabilityAssistant::new(&config.gemini);
    let reply = assistant.ask(question).await?;
    println!("{}", reply);
    Ok(())
}

async fn run_check(config: &Config) -> anyhow::Result<()> {
    println!("Configuration");
    println!("  Name:          {}", config.user.name);
    println!(
        "  Report email:  {}",
        config.user.email.as_deref().unwrap_or("(not set)")
    );

    let invalid = config.defaults.out_of_range_fields();
    if invalid.is_empty() {
        println!("  Defaults:      OK");
    } else {
        println!("  Defaults:      out of range ({}), will be clamped", invalid.join(", "));
    }
    let rules: Vec<&str> = RulesEngine::new()
        .list_rules()
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    println!("  Rules:         {}", rules.join(", "));
    println!();

    print!("  Gemini:        ");
    let assistant = SustainabilityAssistant::new(&config.gemini);
    match assistant.client() {
        None => println!("not configured"),
        Some(client) => match client.test_connection().await {
            Ok(true) => println!("OK ({})", config.gemini.model),
            Ok(false) => println!("rejected - check the API key and model name"),
            Err(e) => println!("FAILED - {}", e),
        },
    }

    print!("  Mail:          ");
    let mailer = ReportMailer::new(config.mail.clone());
    match &config.mail {
        Some(mail) if mailer.is_configured() => {
            println!("configured ({}:{})", mail.smtp_host, mail.smtp_port)
        }
        _ => println!("not configured"),
    }

    Ok(())
}
