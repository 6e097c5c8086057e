//! `branchline product` - product use cases and the top-stock report.

use tracing::{info, instrument};

use branchline_core::{
    application::Catalog,
    domain::{DomainValidator, FranchiseId, Product, ProductId, ProductInput},
    error::BranchlineError,
};

use super::{parse_payload, tag};
use crate::{
    cli::{ProductCommands, ProductPayload},
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(
    cmd: ProductCommands,
    catalog: Catalog,
    output: OutputManager,
) -> CliResult<()> {
    let service = &catalog.products;

    match cmd {
        ProductCommands::Get { id } => {
            let product = service.get(ProductId::new(id)).await?;
            output.record(&product, |out| out.print(&describe(&product)))?;
        }

        ProductCommands::Create(payload) => {
            let saved = service.create(build(payload, None)?).await?;
            output.record(&saved, |out| {
                out.success(&format!("Created product {}", describe(&saved)))
            })?;
        }

        ProductCommands::Update { id, payload } => {
            let saved = service
                .update(ProductId::new(id), build(payload, Some(id))?)
                .await?;
            output.record(&saved, |out| {
                out.success(&format!("Updated product {}", describe(&saved)))
            })?;
        }

        ProductCommands::Delete { id, yes } => {
            let product_id = ProductId::new(id);

            if !yes {
                let product = service.get(product_id).await?;
                if !confirm(&format!("Delete product {}?", describe(&product)))? {
                    info!("deletion declined");
                    return Err(CliError::Cancelled);
                }
            }

            let removed = service.delete(product_id).await?;
            output.record(&removed, |out| {
                out.success(&format!("Deleted product {}", describe(&removed)))
            })?;
        }

        ProductCommands::TopStock { franchise_id } => {
            let top = service
                .top_stock_by_franchise(FranchiseId::new(franchise_id))
                .await?;

            output.record(&top, |out| {
                if top.is_empty() {
                    return out.info(&format!(
                        "No stocked offices under franchise #{franchise_id}"
                    ));
                }
                out.header(&format!("Top stock per office (franchise #{franchise_id})"))?;
                for product in &top {
                    out.print(&format!(
                        "  office #{}  {} {}  {}",
                        product.office_id(),
                        tag(product.id()),
                        product.name(),
                        out.dim(&format!("stock {}", product.stock()))
                    ))?;
                }
                Ok(())
            })?;
        }
    }

    Ok(())
}

fn build(payload: ProductPayload, path_id: Option<i64>) -> CliResult<Product> {
    let input = match payload.json {
        Some(raw) => parse_payload::<ProductInput>("product", &raw)?,
        None => ProductInput {
            id: path_id,
            name: payload.name,
            stock: payload.stock,
            office_id: payload.office_id,
        },
    };

    Ok(DomainValidator::product(input).map_err(BranchlineError::from)?)
}

fn describe(product: &Product) -> String {
    format!(
        "{} {} (stock {}, office #{})",
        tag(product.id()),
        product.name(),
        product.stock(),
        product.office_id()
    )
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "confirmation needs an interactive terminal; pass --yes to delete".into(),
            source: None,
        });
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: format!("Confirmation prompt failed: {e}"),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
