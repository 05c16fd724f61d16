use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;
use jobify_cli::seeder;
use jobify_config::DatabaseConfig;
use jobify_db::{PgPool, PgUserStore, UserStore, init_db_pool, run_migrations};
use jobify_models::users::normalize_email;
use jobify_models::User;

#[derive(Parser)]
#[command(name = "jobify-cli")]
#[command(about = "Jobify CLI - migrations and development data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Insert fake jobs owned by an existing user
    Seed {
        /// Email of the owning user
        #[arg(short = 'e', long)]
        email: String,

        /// Number of jobs to create
        #[arg(short = 'c', long, default_value = "50")]
        count: usize,
    },
    /// Delete every job owned by a user
    ClearJobs {
        /// Email of the owning user
        #[arg(short = 'e', long)]
        email: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("\n❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DatabaseConfig::from_env().context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => handle_migrate(&pool).await,
        Commands::Seed { email, count } => handle_seed(&pool, &email, count).await,
        Commands::ClearJobs { email, yes } => handle_clear_jobs(&pool, &email, yes).await,
    }
}

async fn handle_migrate(pool: &PgPool) -> anyhow::Result<()> {
    run_migrations(pool)
        .await
        .context("Failed to run migrations")?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn find_owner(pool: &PgPool, email: &str) -> anyhow::Result<User> {
    let store = PgUserStore::new(pool.clone());
    let email = normalize_email(email);

    match store.find_by_email(&email).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => bail!("No user found with email {}", email),
        Err(e) => bail!("Failed to look up user: {}", e),
    }
}

async fn handle_seed(pool: &PgPool, email: &str, count: usize) -> anyhow::Result<()> {
    let owner = find_owner(pool, email).await?;
    let ids = seeder::seed_jobs(pool, owner.id, count).await?;
    println!("✅ Created {} jobs for {}", ids.len(), owner.email);
    Ok(())
}

async fn handle_clear_jobs(pool: &PgPool, email: &str, yes: bool) -> anyhow::Result<()> {
    let owner = find_owner(pool, email).await?;

    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("Delete all jobs owned by {}?", owner.email))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

    if !confirmed {
        println!("Aborted, nothing deleted");
        return Ok(());
    }

    let deleted = seeder::clear_jobs_for(pool, owner.id).await?;
    println!("✅ Deleted {} jobs for {}", deleted, owner.email);
    Ok(())
}
