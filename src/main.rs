// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! fetchkit CLI - one-shot requests through the fetchkit pipeline

use std::env;
use std::process::ExitCode;

use fetchkit::http::{params, FormValue, ReqwestTransport};
use fetchkit::{http_get, http_post_json, Payload, RequestConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "fetchkit=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "get" => {
            if args.len() < 3 {
                eprintln!("Usage: fetchkit get <url> [key=value ...]");
                return ExitCode::from(1);
            }
            get(&args[2], &args[3..]).await
        }
        "post-json" => {
            if args.len() < 4 {
                eprintln!("Usage: fetchkit post-json <url> <json>");
                return ExitCode::from(1);
            }
            post_json(&args[2], &args[3]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("fetchkit {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"fetchkit - Declarative HTTP client pipeline

USAGE:
    fetchkit <COMMAND> [OPTIONS]

COMMANDS:
    get <url> [key=value ...]   GET a URL; pairs fill {{placeholders}} or the query
    post-json <url> <json>      POST a JSON body
    help                        Show this help message
    version                     Show version information

EXAMPLES:
    fetchkit get "https://api.example.com/users/{{id}}" id=42 expand=teams
    fetchkit post-json https://api.example.com/users '{{"name":"ann"}}'

Set RUST_LOG=fetchkit=debug for request logging.
"#
    );
}

fn transport() -> Option<ReqwestTransport> {
    match ReqwestTransport::new() {
        Ok(t) => Some(t),
        Err(e) => {
            eprintln!("Failed to create transport: {}", e);
            None
        }
    }
}

async fn get(url: &str, pairs: &[String]) -> ExitCode {
    let mut parsed = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match pair.split_once('=') {
            Some((k, v)) => parsed.push((k.to_string(), v.to_string())),
            None => {
                eprintln!("Expected key=value, got: {}", pair);
                return ExitCode::from(1);
            }
        }
    }

    let Some(transport) = transport() else {
        return ExitCode::from(1);
    };

    report(http_get(&transport, url, Some(params(parsed)), None).await)
}

async fn post_json(url: &str, body: &str) -> ExitCode {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid JSON body: {}", e);
            return ExitCode::from(1);
        }
    };

    let config = match RequestConfig::new().json(&value) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to encode body: {}", e);
            return ExitCode::from(1);
        }
    };

    let Some(transport) = transport() else {
        return ExitCode::from(1);
    };

    report(http_post_json(&transport, url, None, Some(config)).await)
}

fn report(result: fetchkit::Result<Payload>) -> ExitCode {
    match result {
        Ok(Payload::Text(text)) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Ok(Payload::Json(value)) => {
            match serde_json::to_string_pretty(&value) {
                Ok(pretty) => println!("{}", pretty),
                Err(_) => println!("{}", value),
            }
            ExitCode::SUCCESS
        }
        Ok(Payload::Form(form)) => {
            println!("=== Form ({} entries) ===", form.len());
            for entry in form.iter() {
                match entry.value {
                    FormValue::Text(ref text) => println!("  {} = {}", entry.name, text),
                    FormValue::File(ref file) => println!(
                        "  {} = <file {} ({} bytes)>",
                        entry.name,
                        file.file_name.as_deref().unwrap_or("unnamed"),
                        file.data.len()
                    ),
                }
            }
            ExitCode::SUCCESS
        }
        Ok(Payload::Blob(blob)) => {
            println!(
                "<binary {} ({} bytes)>",
                blob.mime_type(),
                blob.len().unwrap_or(0)
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_redirect() => {
            eprintln!("{}", e);
            ExitCode::from(3)
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}
