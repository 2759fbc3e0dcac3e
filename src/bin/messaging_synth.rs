//! Prints the messaging stack's CloudFormation template.
//!
//! ```text
//! messaging-synth -c environmentName=staging -c applicationName=todo-app \
//!     -c accountId=123456789012 -c region=eu-central-1
//! ```

use std::collections::HashMap;
use std::process::ExitCode;

use stomp_relay::domain::infra::{MessagingContext, MessagingStack};

fn main() -> ExitCode {
    match run(std::env::args().skip(1)) {
        Ok(template) => {
            println!("{template}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("messaging-synth: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: impl Iterator<Item = String>) -> Result<String, String> {
    let values = parse_context(args)?;
    let context = MessagingContext::from_values(&values).map_err(|e| e.to_string())?;
    let stack = MessagingStack::new(&context).map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&stack.synth()).map_err(|e| e.to_string())
}

/// Collects `key=value` pairs, each optionally preceded by `-c`.
fn parse_context(args: impl Iterator<Item = String>) -> Result<HashMap<String, String>, String> {
    let mut values = HashMap::new();
    for arg in args {
        if arg == "-c" || arg == "--context" {
            continue;
        }
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, got '{arg}'"))?;
        values.insert(key.trim().to_string(), value.to_string());
    }
    Ok(values)
}
