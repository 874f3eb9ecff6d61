use super::table::{render, GroupRow};
use super::{CommandContext, CommandHandler};
use crate::catalog::aggregate::{self, GroupKey, GroupSummary};
use crate::catalog::types::Product;
use crate::Result;
use serde::Serialize;

/// Handler for the `stats` command
pub struct StatsCommand {
    pub ctx: CommandContext,
    pub key: GroupKey,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    key: GroupKey,
    groups: Vec<GroupSummary>,
    most_expensive: Option<&'a Product>,
    cheapest: Option<&'a Product>,
}

impl CommandHandler for StatsCommand {
    fn execute(&self) -> Result<()> {
        let catalog = self.ctx.store().load()?;

        let report = StatsReport {
            key: self.key,
            groups: sorted_groups(aggregate::group_by(&catalog, self.key), self.key),
            most_expensive: aggregate::max_by_price(&catalog),
            cheapest: aggregate::min_by_price(&catalog),
        };

        if self.ctx.is_json() {
            return self.ctx.print_json(&report);
        }

        if report.groups.is_empty() {
            println!("The catalog is empty.");
            return Ok(());
        }

        let rows: Vec<GroupRow> = report.groups.iter().map(GroupRow::from).collect();
        println!("Statistics by {}\n{}", self.key, render(&rows));

        if let Some(product) = report.most_expensive {
            println!("\nMost expensive: {}", describe(product));
        }
        if let Some(product) = report.cheapest {
            println!("Cheapest: {}", describe(product));
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "stats"
    }
}

impl StatsCommand {
    /// Create new stats command
    pub fn new(ctx: CommandContext, key: GroupKey) -> Self {
        Self { ctx, key }
    }
}

/// Categories alphabetically; suppliers by product count, largest first
fn sorted_groups(mut groups: Vec<GroupSummary>, key: GroupKey) -> Vec<GroupSummary> {
    match key {
        GroupKey::Category => groups.sort_by(|a, b| a.key.cmp(&b.key)),
        GroupKey::Supplier => groups.sort_by(|a, b| b.count.cmp(&a.count)),
    }
    groups
}

fn describe(product: &Product) -> String {
    format!(
        "{} ({} coins, {}, {} units, {})",
        product.name, product.price, product.category, product.stock, product.supplier
    )
}
