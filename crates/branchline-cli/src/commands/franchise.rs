//! `branchline franchise` - franchise use cases.

use tracing::instrument;

use branchline_core::{
    application::Catalog,
    domain::{DomainValidator, Franchise, FranchiseDetail, FranchiseId, FranchiseInput, Office},
    error::BranchlineError,
};

use super::{parse_payload, tag};
use crate::{
    cli::{FranchiseCommands, FranchisePayload},
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(
    cmd: FranchiseCommands,
    catalog: Catalog,
    output: OutputManager,
) -> CliResult<()> {
    let service = &catalog.franchises;

    match cmd {
        FranchiseCommands::Get { id } => {
            let detail = service.get(FranchiseId::new(id)).await?;
            output.record(&detail, |out| render_detail(out, &detail))?;
        }

        FranchiseCommands::Create(payload) => {
            let franchise = build(payload, None)?;
            let saved = service.create(franchise).await?;
            output.record(&saved, |out| {
                out.success(&format!("Created franchise {}", describe(&saved)))
            })?;
        }

        FranchiseCommands::Update { id, payload } => {
            let franchise = build(payload, Some(id))?;
            let saved = service.update(FranchiseId::new(id), franchise).await?;
            output.record(&saved, |out| {
                out.success(&format!("Updated franchise {}", describe(&saved)))
            })?;
        }

        FranchiseCommands::Offices { id } => {
            let offices = service.list_offices_of(FranchiseId::new(id)).await?;
            output.record(&offices, |out| {
                if offices.is_empty() {
                    return out.info(&format!("Franchise #{id} has no offices"));
                }
                render_offices(out, &offices)
            })?;
        }
    }

    Ok(())
}

/// Build a franchise from flags or a JSON payload.
///
/// With flags, an update payload carries the addressed id.
fn build(payload: FranchisePayload, path_id: Option<i64>) -> CliResult<Franchise> {
    let input = match payload.json {
        Some(raw) => parse_payload::<FranchiseInput>("franchise", &raw)?,
        None => FranchiseInput {
            id: path_id,
            name: payload.name,
        },
    };

    Ok(DomainValidator::franchise(input).map_err(BranchlineError::from)?)
}

fn describe(franchise: &Franchise) -> String {
    format!("{} {}", tag(franchise.id()), franchise.name())
}

fn render_detail(out: &OutputManager, detail: &FranchiseDetail) -> std::io::Result<()> {
    out.header(&format!("Franchise {}", describe(&detail.franchise)))?;
    if detail.offices.is_empty() {
        return out.print(&out.dim("  (no offices)"));
    }
    render_offices(out, &detail.offices)
}

fn render_offices(out: &OutputManager, offices: &[Office]) -> std::io::Result<()> {
    for office in offices {
        out.print(&format!("  {} {}", tag(office.id()), office.name()))?;
    }
    Ok(())
}
