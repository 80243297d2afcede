//! Agregación concurrente de frases sobre todos los ficheros localizados.

use futures::{stream, StreamExt};
use tracing::{debug, warn};

use crate::{
    error::{Result, UploadError},
    extract::extract_phrases,
    models::{FileOutcome, IntentFile, PhraseReport, ReportEntry},
};

/// Lee y procesa todos los ficheros con, como mucho, `max_concurrent`
/// lecturas en vuelo. Espera a que terminen todos; el fallo de un fichero
/// queda registrado en su entrada y no detiene al resto. Las entradas
/// conservan el orden de `files` sea cual sea el orden de finalización.
pub async fn aggregate_phrases(files: &[IntentFile], max_concurrent: usize) -> PhraseReport {
    let entries = stream::iter(files.to_vec())
        .map(|file| async move {
            let outcome = match read_and_extract(&file).await {
                Ok(phrases) => {
                    debug!("{}: {} frases", file.name, phrases.len());
                    FileOutcome::Phrases(phrases)
                }
                Err(e) => {
                    warn!("Omitiendo {}: {e}", file.path.display());
                    FileOutcome::Failed(e.to_string())
                }
            };
            ReportEntry {
                filename: file.name,
                outcome,
            }
        })
        .buffered(max_concurrent.max(1))
        .collect::<Vec<_>>()
        .await;

    PhraseReport { entries }
}

async fn read_and_extract(file: &IntentFile) -> Result<Vec<String>> {
    let bytes = tokio::fs::read(&file.path).await.map_err(|e| {
        UploadError::Filesystem(format!("no se pudo leer {}: {e}", file.path.display()))
    })?;
    extract_phrases(&bytes)
}
