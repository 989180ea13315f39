//! Verdant admin CLI

use std::process;

use clap::{Args, Parser, Subcommand};

use verdant_app::{
    database::{self, Db},
    domain::catalog::{PgProductCatalog, models::NewProduct},
};

#[derive(Debug, Parser)]
#[command(name = "verdant-app", about = "Verdant storefront admin CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database administration
    Db(DbCommand),
    /// Catalog provisioning
    Product(ProductCommand),
}

#[derive(Debug, Args)]
struct DbCommand {
    #[command(subcommand)]
    command: DbSubcommand,
}

#[derive(Debug, Subcommand)]
enum DbSubcommand {
    /// Apply pending schema migrations
    Migrate(MigrateArgs),
}

#[derive(Debug, Args)]
struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Add a product to the catalog
    Create(CreateProductArgs),
}

#[derive(Debug, Args)]
struct CreateProductArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Public catalog key, matched by add-to-cart requests
    #[arg(long)]
    key: String,

    /// Display title
    #[arg(long)]
    title: String,

    /// Price in minor currency units
    #[arg(long)]
    price: u64,

    /// Discounted price in minor currency units
    #[arg(long)]
    discounted_price: Option<u64>,

    /// Primary image URL
    #[arg(long)]
    primary_image_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Db(DbCommand {
            command: DbSubcommand::Migrate(args),
        }) => migrate(&args).await,
        Commands::Product(ProductCommand {
            command: ProductSubcommand::Create(args),
        }) => create_product(args).await,
    }
}

async fn migrate(args: &MigrateArgs) {
    let pool = match database::connect(&args.database_url).await {
        Ok(pool) => pool,
        Err(error) => {
            eprintln!("Failed to connect to database: {error}");
            process::exit(1);
        }
    };

    if let Err(error) = database::run_migrations(&pool).await {
        eprintln!("Migration failed: {error}");
        process::exit(1);
    }

    println!("Migrations applied");
}

async fn create_product(args: CreateProductArgs) {
    let pool = match database::connect(&args.database_url).await {
        Ok(pool) => pool,
        Err(error) => {
            eprintln!("Failed to connect to database: {error}");
            process::exit(1);
        }
    };

    let catalog = PgProductCatalog::new(Db::new(pool));

    let product = NewProduct {
        key: args.key,
        title: args.title,
        price: args.price,
        discounted_price: args.discounted_price,
        primary_image_url: args.primary_image_url,
    };

    match catalog.create_product(product).await {
        Ok(created) => println!("Created product {} ({})", created.key, created.id),
        Err(error) => {
            eprintln!("Failed to create product: {error}");
            process::exit(1);
        }
    }
}
