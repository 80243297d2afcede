//! Taxonomía de errores del pipeline de subida.
//!
//! `ArchiveCorrupt`, `Storage`, `Timeout` y `Task` son fatales para la petición.
//! `Filesystem` es fatal durante la localización de ficheros pero queda acotado
//! a un único fichero cuando ocurre al leerlo; `Parse` siempre queda acotado a
//! su fichero.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// Los bytes recibidos no forman un ZIP válido (o contienen entradas inválidas).
    #[error("Archivo comprimido corrupto: {0}")]
    ArchiveCorrupt(String),

    /// Fallo al escribir el fichero temporal o al limpiar el directorio de extracción.
    #[error("Error de almacenamiento: {0}")]
    Storage(String),

    /// Fallo de lectura en el sistema de ficheros distinto de "no existe".
    #[error("Error del sistema de ficheros: {0}")]
    Filesystem(String),

    /// El contenido de un fichero de intent no tiene la forma esperada.
    #[error("Error de formato: {0}")]
    Parse(String),

    #[error("La subida superó el tiempo máximo de {0:?}")]
    Timeout(Duration),

    /// Una tarea bloqueante terminó con pánico o fue cancelada.
    #[error("Tarea interrumpida: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, UploadError>;

impl From<tokio::task::JoinError> for UploadError {
    fn from(err: tokio::task::JoinError) -> Self {
        UploadError::Task(err.to_string())
    }
}
