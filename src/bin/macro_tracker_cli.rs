// ABOUTME: Developer CLI for computing goals, scaling servings, and signing nutrition API requests
// ABOUTME: Prints JSON results so the calculators can be exercised from a shell
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use anyhow::{anyhow, Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};
use macro_tracker::clock::{Clock, ManualClock, SystemClock};
use macro_tracker::config::ServerConfig;
use macro_tracker::external::NutritionApiClient;
use macro_tracker::intelligence::{adjust, parse_grams_input, GoalCalculator, ServingInput};
use macro_tracker::logging;
use macro_tracker::models::{ActivityLevel, Gender, NutritionRecord, UserBiometrics, WeightGoal};
use macro_tracker::oauth1::{FixedNonce, NonceSource, RandomNonce, RequestSigner};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "macro-tracker-cli")]
#[command(about = "Nutrition goal, serving, and request signing utilities")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

#[derive(Clone, Copy, ValueEnum)]
enum ActivityArg {
    Sedentary,
    LowActive,
    Moderate,
    Active,
    VeryActive,
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    Lose,
    Maintain,
    Gain,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute daily calorie and macro goals
    Goals {
        /// Body weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in cm
        #[arg(long, default_value_t = 175.0)]
        height: f64,

        /// Age in years
        #[arg(long, default_value_t = 30)]
        age: u32,

        #[arg(long, value_enum, default_value = "male")]
        gender: GenderArg,

        #[arg(long, value_enum, default_value = "moderate")]
        activity: ActivityArg,

        #[arg(long, value_enum, default_value = "maintain")]
        goal: GoalArg,

        /// Include BMR, TDEE and factors in the output
        #[arg(long)]
        breakdown: bool,
    },

    /// Scale a nutrition record (JSON) by servings or grams
    Adjust {
        /// Nutrition record as JSON
        #[arg(long)]
        record: String,

        /// Whole servings (branded foods)
        #[arg(long, conflicts_with = "grams")]
        servings: Option<u32>,

        /// Grams as typed (generic foods)
        #[arg(long)]
        grams: Option<String>,
    },

    /// Sign a request with OAuth 1.0a HMAC-SHA1
    Sign {
        #[arg(long, default_value = "GET")]
        method: String,

        #[arg(long)]
        url: String,

        /// Request parameter as key=value, repeatable
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        #[arg(long, env = "NUTRITION_API_CONSUMER_KEY")]
        consumer_key: String,

        #[arg(long, env = "NUTRITION_API_CONSUMER_SECRET", hide_env_values = true)]
        consumer_secret: String,

        /// Fixed nonce instead of a random one
        #[arg(long)]
        nonce: Option<String>,

        /// Fixed Unix timestamp instead of now
        #[arg(long)]
        timestamp: Option<i64>,
    },

    /// Search the nutrition API (credentials from the environment)
    Search {
        query: String,

        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        max_results: u32,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    Ok((key.to_owned(), value.to_owned()))
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Self::Male,
            GenderArg::Female => Self::Female,
        }
    }
}

impl From<ActivityArg> for ActivityLevel {
    fn from(arg: ActivityArg) -> Self {
        match arg {
            ActivityArg::Sedentary => Self::Sedentary,
            ActivityArg::LowActive => Self::LowActive,
            ActivityArg::Moderate => Self::Moderate,
            ActivityArg::Active => Self::Active,
            ActivityArg::VeryActive => Self::VeryActive,
        }
    }
}

impl From<GoalArg> for WeightGoal {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::Lose => Self::LoseWeight,
            GoalArg::Maintain => Self::Maintain,
            GoalArg::Gain => Self::GainWeight,
        }
    }
}

/// Environment configuration, loaded only by the commands that read it
fn server_config() -> Result<ServerConfig> {
    ServerConfig::from_env().context("invalid configuration")
}

async fn run(cli: Cli) -> Result<serde_json::Value> {
    let output = match cli.command {
        Commands::Goals {
            weight,
            height,
            age,
            gender,
            activity,
            goal,
            breakdown,
        } => {
            let biometrics = UserBiometrics {
                age,
                weight_kg: weight,
                height_cm: height,
                gender: gender.into(),
                activity_level: activity.into(),
                goal: goal.into(),
            };
            let calculator = GoalCalculator::new(server_config()?.goals);
            if breakdown {
                serde_json::to_value(calculator.compute_breakdown(&biometrics))?
            } else {
                serde_json::to_value(calculator.compute_goals(&biometrics))?
            }
        }
        Commands::Adjust {
            record,
            servings,
            grams,
        } => {
            let record: NutritionRecord =
                serde_json::from_str(&record).context("record is not a valid nutrition record")?;
            let input = match (servings, grams) {
                (Some(count), _) => ServingInput::Servings(count),
                (None, Some(text)) => ServingInput::Grams(parse_grams_input(&text)),
                (None, None) => ServingInput::initial_for(&record),
            };
            serde_json::to_value(adjust(&record, input))?
        }
        Commands::Sign {
            method,
            url,
            params,
            consumer_key,
            consumer_secret,
            nonce,
            timestamp,
        } => {
            let nonces: Arc<dyn NonceSource> = match nonce {
                Some(fixed) => Arc::new(FixedNonce(fixed)),
                None => Arc::new(RandomNonce::default()),
            };
            let clock: Arc<dyn Clock> = match timestamp {
                Some(secs) => Arc::new(ManualClock::new(
                    DateTime::from_timestamp(secs, 0)
                        .ok_or_else(|| anyhow!("timestamp out of range: {secs}"))?,
                )),
                None => Arc::new(SystemClock),
            };
            let signer = RequestSigner::with_sources(consumer_key, consumer_secret, nonces, clock);
            serde_json::to_value(signer.sign(&method, &url, &params))?
        }
        Commands::Search {
            query,
            page,
            max_results,
        } => {
            let client = NutritionApiClient::new(&server_config()?.nutrition_api)?;
            info!(query = %query, "Searching nutrition API");
            client.search_foods(&query, page, max_results).await?
        }
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_from_env()?;

    let output = run(cli).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const BAD_VAR: &str = "LLM_MAX_REQUESTS_PER_MINUTE";

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["macro-tracker-cli"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(e) => panic!("arguments rejected: {e}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_offline_commands_ignore_broken_environment() {
        env::set_var(BAD_VAR, "five");

        let adjusted = run(parse(&[
            "adjust",
            "--record",
            r#"{"name":"Oats","calories":379,"protein":13.2,"fat":6.5,"carbs":67.7,"serving":{"kind":"grams","base_grams":100}}"#,
            "--grams",
            "50",
        ]))
        .await;
        let signed = run(parse(&[
            "sign",
            "--url",
            "https://platform.fatsecret.com/rest/server.api",
            "--consumer-key",
            "key",
            "--consumer-secret",
            "secret",
            "--nonce",
            "abc123nonce",
            "--timestamp",
            "1700000000",
        ]))
        .await;
        let goals = run(parse(&["goals", "--weight", "70"])).await;
        env::remove_var(BAD_VAR);

        assert!(adjusted.is_ok(), "{adjusted:?}");
        assert!(signed.is_ok(), "{signed:?}");
        assert!(goals.is_err());
    }

    #[tokio::test]
    #[serial]
    async fn test_goals_use_environment_configuration() {
        env::remove_var(BAD_VAR);
        let output = run(parse(&["goals", "--weight", "70", "--goal", "lose"])).await;
        assert!(matches!(output, Ok(value) if value["calorieGoal"] == 2044_i64));
    }
}
