//! setup-db / seed commands

use colored::Colorize;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;
use crate::services::{SeedUser, seeder};
use crate::storage::backend::{self, SeaOrmUserRepository};

/// 创建/校验 users 表
pub async fn setup_database(config: &StaticConfig) -> Result<(), CliError> {
    println!("{}", "Setting up database...".yellow());
    let db = backend::connect(&config.database).await?;
    seeder::setup_database(&db).await?;

    println!("{} Users table created/verified", "✓".bold().green());
    println!("{} Database setup completed!", "✓".bold().green());
    Ok(())
}

/// 写入测试用户，邮箱已存在时保持原样
pub async fn seed_database(config: &StaticConfig) -> Result<(), CliError> {
    println!("{}", "Seeding users...".yellow());
    let db = backend::connect(&config.database).await?;
    // 表不存在时先建表
    seeder::setup_database(&db).await?;
    let repo = SeaOrmUserRepository::new(db);

    let seed = SeedUser::default();
    let report = seeder::seed_users(&repo, std::slice::from_ref(&seed)).await?;

    if report.created.is_empty() {
        println!(
            "{} Test user already exists: {}",
            "ℹ".bold().blue(),
            seed.email.cyan()
        );
    } else {
        println!("{} Test user created:", "✓".bold().green());
        println!("  Email: {}", seed.email.cyan());
        println!("  Password: {}", seed.password.cyan());
    }
    println!("{} User seeding completed!", "✓".bold().green());
    Ok(())
}
