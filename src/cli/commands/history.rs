use crate::config::Config;
use crate::db::Store;

pub async fn cmd_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let searches = store.search_history(limit).await?;

    if searches.is_empty() {
        println!("No search history.");
        return Ok(());
    }

    println!("Recent Searches (last {}):", searches.len());
    println!("{:-<70}", "");

    for search in searches {
        let budget = search.budget.as_deref().unwrap_or("-");
        println!("• #{} {}", search.id, search.search_params);
        println!("  Budget: {} | {}", budget, search.timestamp);
    }

    Ok(())
}
