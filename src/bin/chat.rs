//! Terminal chat against the gateway endpoint.
//!
//! Lines are sent as prompts. `/temp <0.0-1.0>`, `/max <100-4000>`,
//! `/history` and `/quit` are handled locally.

use anyhow::Result;
use nova_relay::{
    client::{ChatSession, GatewayClient, Outcome},
    config,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load().await?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut session = ChatSession::new(GatewayClient::new(&config.client)?);

    println!("Chatting with {}", session.endpoint());
    print_params(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();

        match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit", _) => break,
            ("/history", _) => print_history(&session),
            ("/temp", value) => match value.trim().parse::<f64>() {
                Ok(t) => {
                    session.params_mut().set_temperature(t);
                    print_params(&session);
                }
                Err(_) => println!("Usage: /temp <0.0-1.0>"),
            },
            ("/max", value) => match value.trim().parse::<u32>() {
                Ok(n) => {
                    session.params_mut().set_max_tokens(n);
                    print_params(&session);
                }
                Err(_) => println!("Usage: /max <100-4000>"),
            },
            _ => match session.submit(line).await {
                Outcome::EmptyPrompt => {
                    println!("Please enter a prompt before sending the request.")
                }
                Outcome::Response(text) => println!("\nAI: {}\n", text),
                Outcome::Failed(message) => println!("Error: {}", message),
            },
        }
    }

    Ok(())
}

fn print_params(session: &ChatSession) {
    let params = session.params();
    println!(
        "temperature={:.1} max_tokens={}",
        params.temperature(),
        params.max_tokens()
    );
}

fn print_history(session: &ChatSession) {
    if session.history().is_empty() {
        println!("No conversations yet.");
        return;
    }

    for (number, entry) in session.history().recent() {
        println!("--- Conversation {} ({})", number, entry.created_at.format("%H:%M:%S"));
        println!("You: {}", entry.prompt);
        println!("AI: {}", entry.response);
    }
}
