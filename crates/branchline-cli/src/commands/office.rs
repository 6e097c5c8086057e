//! `branchline office` - office use cases.

use tracing::instrument;

use branchline_core::{
    application::Catalog,
    domain::{DomainValidator, Office, OfficeId, OfficeInput},
    error::BranchlineError,
};

use super::{parse_payload, tag};
use crate::{
    cli::{OfficeCommands, OfficePayload},
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub async fn execute(cmd: OfficeCommands, catalog: Catalog, output: OutputManager) -> CliResult<()> {
    let service = &catalog.offices;

    match cmd {
        OfficeCommands::Get { id } => {
            let office = service.get(OfficeId::new(id)).await?;
            output.record(&office, |out| out.print(&describe(&office)))?;
        }

        OfficeCommands::Create(payload) => {
            let saved = service.create(build(payload, None)?).await?;
            output.record(&saved, |out| {
                out.success(&format!("Created office {}", describe(&saved)))
            })?;
        }

        OfficeCommands::Update { id, payload } => {
            let saved = service
                .update(OfficeId::new(id), build(payload, Some(id))?)
                .await?;
            output.record(&saved, |out| {
                out.success(&format!("Updated office {}", describe(&saved)))
            })?;
        }
    }

    Ok(())
}

fn build(payload: OfficePayload, path_id: Option<i64>) -> CliResult<Office> {
    let input = match payload.json {
        Some(raw) => parse_payload::<OfficeInput>("office", &raw)?,
        None => OfficeInput {
            id: path_id,
            name: payload.name,
            franchise_id: payload.franchise_id,
        },
    };

    Ok(DomainValidator::office(input).map_err(BranchlineError::from)?)
}

fn describe(office: &Office) -> String {
    format!(
        "{} {} (franchise #{})",
        tag(office.id()),
        office.name(),
        office.franchise_id()
    )
}
