use super::{CommandContext, CommandHandler};
use crate::catalog::mutation::MutationService;
use crate::catalog::types::{NewProduct, Product, ProductId};
use crate::Result;
use serde::Serialize;

/// Handler for the `add` command
pub struct AddCommand {
    pub ctx: CommandContext,
    pub fields: NewProduct,
}

#[derive(Serialize)]
struct AddReport<'a> {
    id: ProductId,
    product: Option<&'a Product>,
}

impl CommandHandler for AddCommand {
    fn execute(&self) -> Result<()> {
        let mut store = self.ctx.store();
        let catalog = store.load()?;

        let (updated, id) =
            MutationService::new(&mut store).add_product(&catalog, self.fields.clone())?;

        if self.ctx.is_json() {
            return self.ctx.print_json(&AddReport {
                id,
                product: updated.get(id),
            });
        }

        println!("Product '{}' added with id {}", self.fields.name, id);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "add"
    }
}

impl AddCommand {
    /// Create new add command
    pub fn new(ctx: CommandContext, fields: NewProduct) -> Self {
        Self { ctx, fields }
    }
}
