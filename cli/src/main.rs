//! `loot-sim`: batch comparison harness
//!
//! ```text
//! loot-sim [--config PATH] [--trials N] [--seed S] [--week-limit W]
//!          [--policy NAME]... [--head-to-head A B] [--buy] [--json]
//! ```
//!
//! Without `--head-to-head`, every selected policy (default: all presets) is
//! run for `--trials` independent trials and summarized.

use std::error::Error;
use std::process;
use std::sync::Arc;

use loot_simulator_core_rs::stats::{compare, run_all, BatchConfig, HeadToHeadReport, PolicyStats, StatsReport};
use loot_simulator_core_rs::{Catalog, DropTable, PolicyConfig, Roster, TrialConfig};

const USAGE: &str = "Usage: loot-sim [--config PATH] [--trials N] [--seed S] [--week-limit W] \
                     [--policy NAME]... [--head-to-head A B] [--buy] [--json]";

struct Args {
    config: String,
    trials: usize,
    seed: u64,
    week_limit: usize,
    policies: Vec<String>,
    head_to_head: Option<(String, String)>,
    buy: bool,
    json: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: "configs/party.json".to_string(),
            trials: 1000,
            seed: 42,
            week_limit: 100,
            policies: Vec::new(),
            head_to_head: None,
            buy: false,
            json: false,
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => fail(&format!("Missing value for {}", flag)),
    }
}

fn number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = value(args, i, flag);
    raw.parse()
        .unwrap_or_else(|_| fail(&format!("Invalid {} value: {}", flag, raw)))
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                parsed.config = value(&args, i, "--config").to_string();
            }
            "--trials" => {
                i += 1;
                parsed.trials = number(&args, i, "--trials");
            }
            "--seed" => {
                i += 1;
                parsed.seed = number(&args, i, "--seed");
            }
            "--week-limit" => {
                i += 1;
                parsed.week_limit = number(&args, i, "--week-limit");
            }
            "--policy" => {
                i += 1;
                parsed.policies.push(value(&args, i, "--policy").to_string());
            }
            "--head-to-head" => {
                let a = value(&args, i + 1, "--head-to-head").to_string();
                let b = value(&args, i + 2, "--head-to-head").to_string();
                parsed.head_to_head = Some((a, b));
                i += 2;
            }
            "--buy" => parsed.buy = true,
            "--json" => parsed.json = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!("  --config PATH       Party roster JSON (default: configs/party.json)");
                println!("  --trials N          Trials per policy (default: 1000)");
                println!("  --seed S            Base RNG seed (default: 42)");
                println!("  --week-limit W      Give up on a trial after W weeks (default: 100)");
                println!("  --policy NAME       Policy to run, repeatable (default: all presets)");
                println!("  --head-to-head A B  Compare two policies on matched seeds");
                println!("  --buy               Spend banked currency automatically");
                println!("  --json              Emit JSON instead of tables");
                println!();
                println!("Policies:");
                for config in PolicyConfig::all() {
                    println!("  {}", config.name());
                }
                process::exit(0);
            }
            other => fail(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    parsed
}

fn print_stats(report: &StatsReport) {
    println!("{}", report.policy);
    println!(" Weeks   mean={:1.2} pstdev={:1.2}", report.weeks_mean, report.weeks_pstdev);
    println!(" Dropped mean={:1.2} pstdev={:1.2}", report.wasted_mean, report.wasted_pstdev);
    let curve: Vec<String> = report.mean_bis_by_week.iter().map(|x| format!("{:1.2}", x)).collect();
    println!(" {}", curve.join(", "));
    println!(
        " Weeks max: {}, over {} total: {}",
        report.weeks_max, report.slow_threshold, report.weeks_over_threshold
    );
    if report.party_bis_rate < 1.0 {
        println!(" Party BIS in {:.1}% of trials", report.party_bis_rate * 100.0);
    }
}

fn print_head_to_head(report: &HeadToHeadReport) {
    println!("{} (-) vs {} (+)\n", report.policy_a, report.policy_b);
    let header: String = (0..report.week_means.len()).map(|w| format!("{:>6}", w)).collect();
    println!("{:10} {}", "Week", header);

    let row = |values: &[f64]| -> String {
        values
            .iter()
            .take(report.week_means.len())
            .map(|d| format!("{: >5.2}", d))
            .collect::<Vec<_>>()
            .join(" ")
    };
    for delta in &report.characters {
        println!("{:10}: {}", delta.name, row(&delta.by_week));
    }
    println!("\n{:10}: {}", "total", row(&report.week_means));
    println!("aggregate over {} rounds", report.rounds);
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let roster = Roster::from_path(&args.config, Arc::new(Catalog::standard()))?;
    let party = roster.party();
    let drop_table = DropTable::standard();
    let batch = BatchConfig {
        trials: args.trials,
        seed: args.seed,
        trial: TrialConfig {
            week_limit: args.week_limit,
            auto_purchase: args.buy,
            record_events: false,
        },
    };

    if let Some((a, b)) = &args.head_to_head {
        let a: PolicyConfig = a.parse()?;
        let b: PolicyConfig = b.parse()?;
        let report = compare(&party, &drop_table, &a, &b, &batch)?.report();
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_head_to_head(&report);
        }
        return Ok(());
    }

    let policies = if args.policies.is_empty() {
        PolicyConfig::presets()
    } else {
        args.policies
            .iter()
            .map(|name| name.parse())
            .collect::<Result<Vec<PolicyConfig>, _>>()?
    };

    let reports: Vec<StatsReport> = run_all(&party, &drop_table, &policies, &batch)?
        .iter()
        .map(|stats| stats.report(PolicyStats::DEFAULT_SLOW_THRESHOLD))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_stats(report);
            println!();
        }
        println!("Done with {} per policy", args.trials);
    }
    Ok(())
}

fn main() {
    let args = parse_args();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
