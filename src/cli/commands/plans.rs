use crate::config::Config;
use crate::db::Store;

pub async fn cmd_plans(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let plans = store.list_travel_plans().await?;

    if plans.is_empty() {
        println!("No travel plans.");
        return Ok(());
    }

    println!("Travel Plans ({}):", plans.len());
    println!("{:-<70}", "");

    for plan in plans {
        let start = plan.start_date.as_deref().unwrap_or("?");
        let end = plan.end_date.as_deref().unwrap_or("?");
        let budget = plan
            .budget
            .map_or_else(|| "-".to_string(), |b| format!("{b:.2}"));

        println!("• [{}] {} ({})", plan.id, plan.country_name, plan.status);
        println!("  {start} → {end} | Budget: {budget}");
        if !plan.activities.is_empty() {
            println!("  {}", plan.activities);
        }
    }

    Ok(())
}
