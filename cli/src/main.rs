//! Command-line front end for the teller simulator.
//!
//! Collects the server count and input file (from arguments, or by prompting
//! the way the original program did), runs the simulation, and renders the
//! statistics block. `--json` emits the report as JSON instead; `--trace`
//! prints every state transition after the run.
//!
//! Usage:
//!
//! ```text
//! teller-sim [--json] [--trace] [--strict] [<num-tellers> <input-file>]
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::process::ExitCode;

use teller_sim_core::{
    RecordReader, Simulation, SimulationConfig, SimulationReport, TraceLog,
};

struct Options {
    json: bool,
    trace: bool,
    strict: bool,
    num_servers: Option<usize>,
    input_path: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        json: false,
        trace: false,
        strict: false,
        num_servers: None,
        input_path: None,
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => options.json = true,
            "--trace" => options.trace = true,
            "--strict" => options.strict = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag: {}", flag));
            }
            value if options.num_servers.is_none() => {
                let count = value
                    .parse()
                    .map_err(|_| format!("invalid teller count: {:?}", value))?;
                options.num_servers = Some(count);
            }
            value if options.input_path.is_none() => {
                options.input_path = Some(value.to_string());
            }
            value => return Err(format!("unexpected argument: {:?}", value)),
        }
    }

    Ok(options)
}

/// Prompt on stderr and read one trimmed line from stdin.
fn prompt(message: &str) -> io::Result<String> {
    eprint!("{}", message);
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn render_report(report: &SimulationReport) {
    println!();
    println!("Simulation Statistics");
    println!("Customers Served by Each Teller");
    for (i, server) in report.servers.iter().enumerate() {
        println!("Teller [{}]: {}", i, server.served);
    }
    println!("Total Time of Simulation: {}", report.total_time);
    println!("Average Service Time per Customer: {}", report.avg_service_time());
    println!("Average Waiting Time per Customer: {}", report.avg_wait_time());
    println!("Maximum Length of the Queue: {}", report.max_queue_length);
    println!("Average Length of the Queue: {}", report.avg_queue_length());
    println!("Average Idle Rate of Each Teller");
    for i in 0..report.servers.len() {
        println!("Teller [{}]: {}", i, report.idle_rate(i).unwrap_or(0.0));
    }
}

fn render_trace(trace: &TraceLog) {
    println!();
    println!("Execution Trace");
    for event in trace.events() {
        println!("[{}] {:?}", event.time(), event);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args()?;

    let num_servers = match options.num_servers {
        Some(count) => count,
        None => prompt("Please enter the number of tellers: ")
            .map_err(|e| e.to_string())?
            .parse()
            .map_err(|_| "invalid teller count".to_string())?,
    };

    let input_path = match options.input_path {
        Some(path) => path,
        None => prompt("Please enter the name of the input file: ").map_err(|e| e.to_string())?,
    };

    let file = File::open(&input_path)
        .map_err(|e| format!("error opening file {}: {}", input_path, e))?;
    let mut source = RecordReader::new(BufReader::new(file));

    if !options.json {
        println!();
        println!("Simulation Inputs");
        println!("Number of tellers: {}", num_servers);
        println!("Name of input file: {}", input_path);
    }

    let config = SimulationConfig {
        num_servers,
        trace: options.trace,
        strict_input: options.strict,
        ..Default::default()
    };
    let mut sim = Simulation::new(config).map_err(|e| e.to_string())?;
    let report = sim.run(&mut source).map_err(|e| e.to_string())?;

    if options.json {
        let rendered =
            serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{}", rendered);
    } else {
        render_report(&report);
    }

    if options.trace {
        render_trace(sim.trace());
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("teller-sim: {}", message);
            ExitCode::FAILURE
        }
    }
}
