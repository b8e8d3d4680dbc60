use clap::{Parser, Subcommand};
use serde_json::Value;
use taskboard_client::{Response, TaskClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Taskboard task list CLI")]
struct Cli {
    /// Base URL of the API (normally the dev proxy)
    #[arg(
        long,
        env = "TASKBOARD_API_URL",
        default_value = "http://127.0.0.1:3000",
        global = true
    )]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tasks
    List,
    /// Add a task
    Add {
        /// Task fields as a JSON object, e.g. '{"title":"buy milk"}'
        task: String,
    },
    /// Replace the fields of a task
    Update {
        /// Task id
        id: String,
        /// Replacement fields as a JSON object
        task: String,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },
}

fn parse_task(raw: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("task must be valid JSON: {e}"))
}

/// Print the status line, then the body (pretty-printed when it is JSON).
async fn print_response(response: Response) -> anyhow::Result<()> {
    println!("{}", response.status());
    let text = response.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{text}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("taskboard_client=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("Use 'taskboard --help' for commands");
        return Ok(());
    };

    let client = TaskClient::new(&cli.api_url)?;
    let response = match command {
        Commands::List => client.get_tasks().await?,
        Commands::Add { task } => client.add_task(&parse_task(&task)?).await?,
        Commands::Update { id, task } => client.update_task(&id, &parse_task(&task)?).await?,
        Commands::Delete { id } => client.delete_task(&id).await?,
    };
    print_response(response).await
}
