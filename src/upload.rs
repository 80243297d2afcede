//! Punto de entrada del pipeline de subida:
//! ZIP → extracción → localización → agregación → informe de texto.

use std::path::PathBuf;

use tracing::{error, info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::{
    aggregate::aggregate_phrases,
    archive::{materialize, ExtractionSlot},
    config::AppConfig,
    error::{Result, UploadError},
    locate::locate_intent_files,
    models::IntentFile,
    report::format_report,
};

/// Procesa un ZIP subido y devuelve siempre un texto: el informe (posiblemente
/// vacío o parcial) o el mensaje del error fatal que detuvo el pipeline.
pub async fn handle_upload(config: &AppConfig, archive: Vec<u8>) -> String {
    let span = info_span!("upload", upload_id = %Uuid::new_v4(), bytes = archive.len());

    async move {
        let pipeline = run_pipeline(config, archive);
        let result = match config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, pipeline)
                .await
                .unwrap_or(Err(UploadError::Timeout(limit))),
            None => pipeline.await,
        };

        match result {
            Ok(text) => text,
            Err(err) => {
                error!("Subida abortada: {err}");
                err.to_string()
            }
        }
    }
    .instrument(span)
    .await
}

async fn run_pipeline(config: &AppConfig, archive: Vec<u8>) -> Result<String> {
    // La ranura vive hasta el final de esta función; al soltarse se borra.
    let (_slot, files) = prepare(config.work_dir.clone(), archive).await?;

    let report = aggregate_phrases(&files, config.max_concurrent_reads).await;
    info!(
        "Informe generado: {} ficheros, {} con errores",
        report.entries.len(),
        report.failures().count()
    );

    Ok(format_report(&report, config.report_failures))
}

/// Crea la ranura, descomprime y localiza los ficheros en un hilo bloqueante.
async fn prepare(work_dir: PathBuf, archive: Vec<u8>) -> Result<(ExtractionSlot, Vec<IntentFile>)> {
    let span = Span::current();
    tokio::task::spawn_blocking(move || -> Result<(ExtractionSlot, Vec<IntentFile>)> {
        let _entered = span.enter();
        let slot = ExtractionSlot::scoped_in(&work_dir)?;
        let root = materialize(&slot, &archive)?;
        let files = locate_intent_files(&root)?;
        Ok((slot, files))
    })
    .await?
}
