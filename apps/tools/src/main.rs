use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use shared::domain::{Item, ItemChanges, ItemId};
use storage::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://items.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List {
        #[arg(long)]
        json: bool,
    },
    Add {
        name: String,
        description: String,
    },
    Show {
        item_id: i64,
    },
    Update {
        item_id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        item_id: i64,
    },
    Count,
    Ping,
}

fn describe(item: &Item) -> String {
    format!("{}\t{}\t{}", item.id, item.name, item.description)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::List { json } => {
            let items = storage.list_items().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for item in &items {
                    println!("{}", describe(item));
                }
            }
        }
        Command::Add { name, description } => {
            if name.is_empty() || description.is_empty() {
                bail!("both name and description are required");
            }
            let item = storage.create_item(&name, &description).await?;
            tracing::info!(item_id = item.id.0, "item added");
            println!("created item_id={}", item.id);
        }
        Command::Show { item_id } => match storage.get_item(ItemId(item_id)).await? {
            Some(item) => println!("{}", describe(&item)),
            None => bail!("item {item_id} not found"),
        },
        Command::Update {
            item_id,
            name,
            description,
        } => {
            let changes = ItemChanges::new(name.as_deref(), description.as_deref());
            match storage.update_item(ItemId(item_id), &changes).await? {
                Some(item) => {
                    tracing::info!(item_id, "item updated");
                    println!("updated {}", describe(&item));
                }
                None => bail!("item {item_id} not found"),
            }
        }
        Command::Delete { item_id } => {
            if !storage.delete_item(ItemId(item_id)).await? {
                bail!("item {item_id} not found");
            }
            tracing::info!(item_id, "item deleted");
            println!("deleted item_id={item_id}");
        }
        Command::Count => {
            println!("{}", storage.count_items().await?);
        }
        Command::Ping => {
            storage.health_check().await?;
            println!("ok {}", storage.schema().table());
        }
    }

    Ok(())
}
