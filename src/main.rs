use agent_ledger::{ClientConfig, ProtocolClient};
use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let project_id = std::env::args()
        .nth(1)
        .map(|arg| arg.parse::<u64>().context("project id must be a number"))
        .transpose()?;

    let config = ClientConfig::from_env()?;
    let client = ProtocolClient::new(&config)?;
    let network = client.network().config();

    println!("Agent Ledger Status");
    println!("===================");
    println!("Network: {} (chain {})", network.name, network.chain_id);
    println!("Signer:  {}", network.address_url(client.address()));
    println!();

    let balance = client.balance(None).await?;
    let allowance = client.allowance().await?;
    println!("Token balance:    {}", balance);
    println!("Ledger allowance: {}", allowance);
    println!();

    let stats = client.stats().await?;
    println!("Ledger stats:");
    println!("{}", serde_json::to_string_pretty(&stats)?);
    println!();

    match client.agent(client.address()).await? {
        Some(agent) => {
            println!("Registered agent:");
            println!("{}", serde_json::to_string_pretty(&agent)?);
        }
        None => println!("Signer has not joined the ledger"),
    }

    if let Some(id) = project_id {
        let project = client.project(id).await?;
        let contribution = client.contribution(id, None).await?;
        println!();
        println!("Project {}:", id);
        println!("{}", serde_json::to_string_pretty(&project)?);
        println!(
            "Your share: {}% (claimed: {})",
            contribution.percentage, contribution.claimed
        );
    }

    Ok(())
}
