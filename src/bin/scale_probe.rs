use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use run_array::RunArray;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const RUN_COUNTS: &[usize] = &[1_024, 4_096, 16_384, 65_536, 262_144];
const MEAN_RUN_LEN: usize = 8;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("RunArray Scaling Probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Each scenario runs at growing run counts and, up to a domain of");
    eprintln!("{} elements, is replayed on a dense Vec and compared.", options.verify_limit);
    eprintln!("  • wall_s: wall-clock time in seconds");
    eprintln!("  • rss_delta_kib: resident memory delta in KiB");
    eprintln!("  • status: 'passed' = matches dense replay, 'not_checked' = too large");
    eprintln!("{}", "=".repeat(80));
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    let scenarios: [(&'static str, Scenario); 4] = [
        ("assign", run_assign),
        ("insert_erase", run_insert_erase),
        ("reorder", run_reorder),
        ("range_queries", run_queries),
    ];
    for (idx, &(name, scenario)) in scenarios.iter().enumerate() {
        eprintln!("[{}/{}] {name}", idx + 1, scenarios.len());
        for (step, &runs) in RUN_COUNTS.iter().enumerate() {
            eprint!("      [{}/{}] runs={runs}... ", step + 1, RUN_COUNTS.len());
            let m = measure(name, runs, &mut sys, || scenario(runs, &options));
            eprintln!(
                "{} breakpoints={}, time={:.3}s, status={}",
                m.status.icon(),
                m.breakpoints,
                m.wall_s,
                m.status.label()
            );
            measurements.push(m);
        }
        eprintln!();
    }

    print_summary(&measurements);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("scale_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 1usize << 20;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };
            let mut value = |name: &str| -> Result<String, String> {
                match inline.clone() {
                    Some(v) => Ok(v),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {name}")),
                }
            };
            match flag.as_str() {
                "--help" | "-h" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--format" => format = OutputFormat::from_str(&value("--format")?)?,
                "--verify-limit" => {
                    verify_limit = value("--verify-limit")?
                        .parse::<usize>()
                        .map_err(|_| "verify limit must be a positive integer".to_string())?;
                }
                other => return Err(format!("unrecognized argument '{other}'")),
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin scale_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest domain replayed on a dense Vec (default: 1048576)
  -h, --help                    Print this help message
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

type Scenario = fn(usize, &Options) -> Outcome;

struct Outcome {
    breakpoints: usize,
    status: Status,
    detail: Option<String>,
}

struct Measurement {
    scenario: &'static str,
    runs: usize,
    breakpoints: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    status: Status,
    detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Status {
    NotChecked,
    Passed,
    Failed,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::NotChecked => "not_checked",
            Status::Passed => "passed",
            Status::Failed => "failed",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Status::Passed => "✓",
            Status::Failed => "✗",
            Status::NotChecked => "○",
        }
    }
}

/// xorshift64* generator for reproducible inputs.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound.max(1) as u64) as usize
    }
}

fn seed_runs(rng: &mut XorShift, runs: usize) -> Vec<(u32, usize)> {
    (0..runs)
        .map(|_| (rng.below(16) as u32, 1 + rng.below(2 * MEAN_RUN_LEN - 1)))
        .collect()
}

fn seed(runs: usize, salt: u64) -> (RunArray<u64, u32>, XorShift) {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15 ^ (runs as u64).wrapping_mul(salt));
    let list = seed_runs(&mut rng, runs);
    match RunArray::from_runs(0, 0, &list) {
        Ok(array) => (array, rng),
        Err(_) => (RunArray::uniform(0), rng),
    }
}

fn verdict(array: &RunArray<u64, u32>, dense: Option<Vec<u32>>) -> Outcome {
    let breakpoints = array.breakpoint_count();
    let (status, detail) = match dense {
        None => (Status::NotChecked, None),
        Some(_) if !array.is_canonical() => {
            (Status::Failed, Some("breakpoints not canonical".to_string()))
        }
        Some(expected) => {
            let actual = array.to_vec();
            match actual.iter().zip(&expected).position(|(a, b)| a != b) {
                None if actual.len() == expected.len() => (Status::Passed, None),
                None => (
                    Status::Failed,
                    Some(format!("expected {} elements, got {}", expected.len(), actual.len())),
                ),
                Some(i) => (
                    Status::Failed,
                    Some(format!("first mismatch at offset {i}: {} vs {}", expected[i], actual[i])),
                ),
            }
        }
    };
    Outcome {
        breakpoints,
        status,
        detail,
    }
}

fn run_assign(runs: usize, options: &Options) -> Outcome {
    let (mut array, mut rng) = seed(runs, 1);
    let len = array.len();
    let mut dense = (len <= options.verify_limit).then(|| array.to_vec());
    for _ in 0..runs {
        let from = rng.below(len);
        let to = (from + 1 + rng.below(4 * MEAN_RUN_LEN)).min(len);
        let value = rng.below(16) as u32;
        array.assign_value(from as u64, to as u64, value);
        if let Some(d) = dense.as_mut() {
            d[from..to].fill(value);
        }
    }
    verdict(&array, dense)
}

fn run_insert_erase(runs: usize, options: &Options) -> Outcome {
    let (mut array, mut rng) = seed(runs, 2);
    let mut dense = (array.len() <= options.verify_limit).then(|| array.to_vec());
    for step in 0..runs / 2 {
        let len = array.len();
        let position = rng.below(len);
        if step % 2 == 0 {
            let value = rng.below(16) as u32;
            let n = 1 + rng.below(MEAN_RUN_LEN);
            array.insert_after(position as u64, &[(value, n)], false);
            if let Some(d) = dense.as_mut() {
                d.splice(position + 1..position + 1, std::iter::repeat(value).take(n));
            }
        } else {
            let to = (position + 1 + rng.below(MEAN_RUN_LEN)).min(len);
            if to - position == len {
                continue;
            }
            array.erase(position as u64, to as u64, false);
            if let Some(d) = dense.as_mut() {
                d.drain(position..to);
            }
        }
    }
    verdict(&array, dense)
}

fn run_reorder(runs: usize, options: &Options) -> Outcome {
    let (mut array, _) = seed(runs, 3);
    let mut dense = (array.len() <= options.verify_limit).then(|| array.to_vec());
    let (min, max) = array.bounds();
    let mid = min + (max - min) / 2;

    array.reverse_values(min, mid);
    array.sort_values(mid, max, true);
    array.replace_value(min, max, &3, 4);
    if let Some(d) = dense.as_mut() {
        let mid = (mid - min) as usize;
        d[..mid].reverse();
        d[mid..].sort_unstable_by(|a, b| b.cmp(a));
        d.iter_mut().filter(|v| **v == 3).for_each(|v| *v = 4);
    }
    verdict(&array, dense)
}

fn run_queries(runs: usize, options: &Options) -> Outcome {
    let (array, mut rng) = seed(runs, 4);
    let len = array.len();
    let dense = (len <= options.verify_limit).then(|| array.to_vec());
    let mut mismatches: BTreeMap<&'static str, usize> = BTreeMap::new();
    for _ in 0..runs.min(4_096) {
        let from = rng.below(len);
        let to = from + 1 + rng.below(len - from);
        let sum = array.sum(from as u64, to as u64, 0);
        let max = array.max_value(from as u64, to as u64).copied();
        if let Some(d) = dense.as_ref() {
            let slice = &d[from..to];
            if sum != slice.iter().fold(0u32, |acc, v| acc.wrapping_add(*v)) {
                *mismatches.entry("sum").or_default() += 1;
            }
            if max != slice.iter().max().copied() {
                *mismatches.entry("max").or_default() += 1;
            }
        }
    }
    let mut outcome = verdict(&array, dense);
    if !mismatches.is_empty() {
        outcome.status = Status::Failed;
        outcome.detail = Some(format!("query mismatches: {mismatches:?}"));
    }
    outcome
}

fn measure<F>(scenario: &'static str, runs: usize, sys: &mut System, compute: F) -> Measurement
where
    F: FnOnce() -> Outcome,
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let outcome = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        runs,
        breakpoints: outcome.breakpoints,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        status: outcome.status,
        detail: outcome.detail,
    }
}

fn print_summary(measurements: &[Measurement]) {
    eprintln!("{}", "=".repeat(80));
    eprintln!("Summary");
    eprintln!("{}", "=".repeat(80));

    let count = |status| measurements.iter().filter(|m| m.status == status).count();
    let failed = count(Status::Failed);
    eprintln!("  ✓ Passed: {}", count(Status::Passed));
    eprintln!("  ✗ Failed: {failed}");
    eprintln!("  ○ Not checked: {}", count(Status::NotChecked));
    for m in measurements.iter().filter(|m| m.status == Status::Failed) {
        eprintln!("  ✗ {} (runs={}): {}", m.scenario, m.runs, m.detail.as_deref().unwrap_or(""));
    }
    eprintln!();

    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    for (scenario, ms) in &by_scenario {
        if let (Some(first), Some(last)) = (ms.first(), ms.last()) {
            let growth = if first.wall_s > 0.0 {
                last.wall_s / first.wall_s
            } else {
                0.0
            };
            eprintln!(
                "  {scenario}: {:.3}s at {} runs -> {:.3}s at {} runs ({growth:.1}x for {}x runs)",
                first.wall_s,
                first.runs,
                last.wall_s,
                last.runs,
                last.runs / first.runs.max(1)
            );
        }
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,runs,breakpoints,wall_s,rss_delta_kib,status,detail");
    for m in measurements {
        println!(
            "{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.runs,
            m.breakpoints,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.detail.as_deref().unwrap_or("").replace('"', "'")
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let width = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(0)
        .max("scenario".len());
    println!(
        "{:<width$}  {:>8}  {:>11}  {:>10}  {:>13}  {:>11}  detail",
        "scenario", "runs", "breakpoints", "wall_s", "rss_delta_kib", "status"
    );
    for m in measurements {
        println!(
            "{:<width$}  {:>8}  {:>11}  {:>10.3}  {:>13}  {:>11}  {}",
            m.scenario,
            m.runs,
            m.breakpoints,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = match m.detail.as_ref() {
            Some(d) => format!("\"{}\"", d.replace('"', "'")),
            None => "null".to_string(),
        };
        println!(
            "  {{\"scenario\":\"{}\",\"runs\":{},\"breakpoints\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"status\":\"{}\",\"detail\":{}}}{}",
            m.scenario,
            m.runs,
            m.breakpoints,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail,
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    get_current_pid()
        .ok()
        .and_then(|pid| sys.process(pid))
        .map_or(0, |process| process.memory() / 1024)
}
