//! Materialización del ZIP subido en un árbol de directorios.
//!
//! Cada subida recibe su propia ranura (`ExtractionSlot`): un directorio
//! temporal con el fichero `upload.zip` y el destino `unzip/`. La ranura se
//! borra al soltarse, en cualquier camino de salida.

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tracing::{debug, info};

use crate::error::{Result, UploadError};

const STAGING_FILE: &str = "upload.zip";
const TARGET_DIR: &str = "unzip";

/// Máximo de bytes descomprimidos por entrada (protección frente a zip-bombs).
const MAX_ENTRY_BYTES: u64 = 64 * 1024 * 1024;

/// Ranura de extracción propiedad de una única petición.
#[derive(Debug)]
pub struct ExtractionSlot {
    dir: TempDir,
}

impl ExtractionSlot {
    /// Crea una ranura nueva bajo `base` (que se crea si no existe).
    pub fn scoped_in(base: &Path) -> Result<Self> {
        fs::create_dir_all(base).map_err(|e| {
            UploadError::Storage(format!("no se pudo crear {}: {e}", base.display()))
        })?;
        let dir = tempfile::Builder::new()
            .prefix("upload-")
            .tempdir_in(base)
            .map_err(|e| {
                UploadError::Storage(format!(
                    "no se pudo crear un directorio temporal en {}: {e}",
                    base.display()
                ))
            })?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn staging_path(&self) -> PathBuf {
        self.dir.path().join(STAGING_FILE)
    }

    pub fn target_dir(&self) -> PathBuf {
        self.dir.path().join(TARGET_DIR)
    }
}

/// Escribe `bytes` en el fichero de staging de la ranura y lo descomprime en
/// su directorio destino, sustituyendo cualquier extracción previa.
/// Devuelve la raíz de la extracción.
pub fn materialize(slot: &ExtractionSlot, bytes: &[u8]) -> Result<PathBuf> {
    let staging = slot.staging_path();
    let target = slot.target_dir();

    fs::write(&staging, bytes).map_err(|e| {
        UploadError::Storage(format!("no se pudo escribir {}: {e}", staging.display()))
    })?;
    debug!("ZIP de {} bytes guardado en {}", bytes.len(), staging.display());

    match fs::remove_dir_all(&target) {
        Ok(()) => debug!("Extracción previa eliminada: {}", target.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(UploadError::Storage(format!(
                "no se pudo limpiar {}: {e}",
                target.display()
            )))
        }
    }

    let file = fs::File::open(&staging).map_err(|e| {
        UploadError::Storage(format!("no se pudo abrir {}: {e}", staging.display()))
    })?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| UploadError::ArchiveCorrupt(e.to_string()))?;

    fs::create_dir_all(&target).map_err(|e| {
        UploadError::Storage(format!("no se pudo crear {}: {e}", target.display()))
    })?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| UploadError::ArchiveCorrupt(e.to_string()))?;
        let name = entry.name().to_string();
        let relative = entry.enclosed_name().ok_or_else(|| {
            UploadError::ArchiveCorrupt(format!(
                "la entrada '{name}' apunta fuera del directorio de extracción"
            ))
        })?;
        let out_path = target.join(relative);

        if entry.is_dir() {
            create_dir(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            create_dir(parent)?;
        }

        let mut content = Vec::new();
        entry
            .by_ref()
            .take(MAX_ENTRY_BYTES + 1)
            .read_to_end(&mut content)
            .map_err(|e| UploadError::ArchiveCorrupt(format!("entrada '{name}': {e}")))?;
        if content.len() as u64 > MAX_ENTRY_BYTES {
            return Err(UploadError::ArchiveCorrupt(format!(
                "la entrada '{name}' supera el límite de {MAX_ENTRY_BYTES} bytes"
            )));
        }
        fs::write(&out_path, &content).map_err(|e| {
            UploadError::Storage(format!("no se pudo escribir {}: {e}", out_path.display()))
        })?;
    }

    info!(
        "ZIP descomprimido en {} ({} entradas)",
        target.display(),
        archive.len()
    );
    Ok(target)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| UploadError::Storage(format!("no se pudo crear {}: {e}", path.display())))
}
