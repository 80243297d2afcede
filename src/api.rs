use std::{any::Any, io};

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::post,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info, warn};

use crate::{app_state::AppState, upload};

/// Nombre del campo del formulario que envía la página de subida.
pub const UPLOAD_FIELD: &str = "myFile";

const NO_FILE_MESSAGE: &str = "No se recibió ningún fichero en el campo 'myFile'";

// --- Errores HTTP ---

/// Errores que sí se traducen a un código HTTP distinto de 200.
#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "Bad Request"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
        .into_response()
    }
}

// --- Router ---

pub fn create_router(app_state: AppState) -> Router {
    let body_limit = app_state.config.max_upload_bytes;
    Router::new()
        .route(
            "/api/uploadFile",
            post(upload_file_handler).fallback(index_handler),
        )
        .fallback(index_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(app_state)
}

// --- Handlers ---

/// Cualquier ruta o método no reconocido devuelve la página de subida.
#[axum::debug_handler]
async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let path = state.config.frontend_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("Página de subida no encontrada en {}", path.display());
            Err(ApiError::NotFound)
        }
        Err(e) => {
            error!("Error leyendo {}: {e}", path.display());
            Err(ApiError::Internal)
        }
    }
}

/// Recibe el ZIP y responde siempre 200 con el informe o el mensaje de error.
/// Sólo un cuerpo que no es multipart (o que no se puede leer) da 400.
#[axum::debug_handler]
async fn upload_file_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<String, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Petición de subida rechazada: {e}");
        ApiError::BadRequest
    })?;

    let Some(archive) = read_upload_field(&mut multipart).await? else {
        warn!("{NO_FILE_MESSAGE}");
        return Ok(NO_FILE_MESSAGE.to_string());
    };

    info!("Fichero recibido ({} bytes)", archive.len());
    Ok(upload::handle_upload(&state.config, archive).await)
}

// --- Utilidades ---

/// Devuelve el contenido del campo `myFile` o, si no existe, el del primer
/// campo que traiga nombre de fichero.
async fn read_upload_field(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, ApiError> {
    let mut fallback = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let is_upload_field = field.name() == Some(UPLOAD_FIELD);
        let is_first_file = field.file_name().is_some() && fallback.is_none();
        if !is_upload_field && !is_first_file {
            continue;
        }

        let bytes = field.bytes().await.map_err(bad_multipart)?.to_vec();
        if is_upload_field {
            return Ok(Some(bytes));
        }
        fallback = Some(bytes);
    }

    Ok(fallback)
}

fn bad_multipart(err: MultipartError) -> ApiError {
    warn!("Cuerpo multipart inválido: {err}");
    ApiError::BadRequest
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("pánico sin mensaje");
    error!("Pánico atendiendo una petición: {detail}");
    ApiError::Internal.into_response()
}
