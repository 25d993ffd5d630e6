//! hpcheck CLI - check a token address against the honeypot service
//!
//! Usage:
//!   hpcheck <token_address> [model]
//!
//! model: primary (default) or secondary (aliases: grok, claude)
//!
//! Environment:
//!   HPCHECK_ENDPOINT - service URL (default: http://127.0.0.1:8000/check-honeypot)

use std::process;

use hpcheck::api::types::{CheckRequest, CheckResponse, ErrorDetail};
use hpcheck::models::types::{reason_description, validate_address, Model};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/check-honeypot";

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <token_address> [model]", args[0]);
        eprintln!("model: primary (default) or secondary");
        process::exit(1);
    }

    let token_address = match validate_address(&args[1]) {
        Ok(addr) => addr,
        Err(_) => {
            eprintln!("Error: Invalid token address format");
            eprintln!("Token address should start with '0x' and be 42 characters long");
            process::exit(1);
        }
    };

    let model: Model = match args.get(2) {
        Some(raw) => match raw.parse() {
            Ok(model) => model,
            Err(_) => {
                eprintln!("Error: model must be either 'primary' or 'secondary'");
                process::exit(1);
            }
        },
        None => Model::default(),
    };

    println!("Checking token: {}", token_address);
    println!("Using model: {}", model);

    let endpoint =
        std::env::var("HPCHECK_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

    let client = reqwest::Client::new();
    let response = match client
        .post(&endpoint)
        .json(&CheckRequest {
            token_address,
            source_code: None,
            model,
        })
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            eprintln!("Error connecting to server: {}", e);
            process::exit(1);
        }
    };

    if !response.status().is_success() {
        let detail = response
            .json::<ErrorDetail>()
            .await
            .map(|e| e.detail)
            .unwrap_or_else(|_| "Unknown error".to_string());
        eprintln!("Error: {}", detail);
        process::exit(1);
    }

    let verdict: CheckResponse = match response.json().await {
        Ok(verdict) => verdict,
        Err(e) => {
            eprintln!("Error: malformed server response: {}", e);
            process::exit(1);
        }
    };

    print_verdict(&verdict);
}

fn print_verdict(verdict: &CheckResponse) {
    if verdict.cached {
        println!("(served from cache)");
    }

    if verdict.is_honeypot {
        println!("⚠️ Warning: This token is a honeypot!");
        println!("\nDetection reasons:");
        for &code in &verdict.reasons {
            match reason_description(code) {
                Some(description) => println!("- [{}] {}", code, description),
                None => println!("- [{}]", code),
            }
        }
    } else {
        println!("✅ This token is not a honeypot");
    }
}
