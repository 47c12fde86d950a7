//! Utility to print a plan's shopping list as plain text
//!
//! Usage: print_shopping_list <plan-ref> [day] [--optionals] [--portions N]

use mealplan::catalog::Catalogs;
use mealplan::config::AppConfig;
use mealplan::models::{PlanRef, PortionMultiplier};
use mealplan::tools::shopping::{generate_shopping_list, ShoppingScope};

const USAGE: &str = "Usage: print_shopping_list <predefined-N|custom-N|planner> [day] [--optionals] [--portions N]";

struct Args {
    plan: PlanRef,
    scope: ShoppingScope,
    include_optionals: bool,
    portions: PortionMultiplier,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, Box<dyn std::error::Error>> {
    let plan: PlanRef = args.next().ok_or(USAGE)?.parse()?;
    let mut scope = ShoppingScope::Week;
    let mut include_optionals = false;
    let mut portions = PortionMultiplier::ONE;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--optionals" => include_optionals = true,
            "--portions" => {
                let value: i64 = args.next().ok_or(USAGE)?.parse()?;
                portions = PortionMultiplier::new(value)?;
            }
            other => scope = other.parse()?,
        }
    }

    Ok(Args {
        plan,
        scope,
        include_optionals,
        portions,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = AppConfig::from_env();

    let catalogs = Catalogs::load_from_dir(&config.data_dir)?;
    let database = mealplan::db::Database::new(&config.database_path)?;
    database.with_conn(mealplan::db::migrations::run_migrations)?;

    let response = generate_shopping_list(
        &database,
        &catalogs,
        args.plan,
        args.scope,
        args.include_optionals,
        args.portions,
    )?;

    print!("{}", response.plain_text);
    Ok(())
}
