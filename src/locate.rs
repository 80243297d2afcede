//! Localización de los ficheros `intents/*_usersays_en.json` dentro de una extracción.

use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::{
    error::{Result, UploadError},
    models::{IntentFile, INTENTS_DIR, USERSAYS_SUFFIX},
};

/// Recorre los hijos inmediatos de `root` buscando el directorio `intents` y,
/// dentro de él (sin descender más), los ficheros regulares con el sufijo
/// `_usersays_en.json`. El orden es el del listado del sistema de ficheros.
///
/// Que no exista `intents`, que esté vacío o que sea un fichero no es un error:
/// el resultado es simplemente una lista vacía.
pub fn locate_intent_files(root: &Path) -> Result<Vec<IntentFile>> {
    let mut files = Vec::new();

    for entry in immediate_children(root) {
        let entry = entry?;
        if !(entry.file_type().is_dir() && entry.file_name() == INTENTS_DIR) {
            continue;
        }
        for child in immediate_children(entry.path()) {
            let child = child?;
            if !child.file_type().is_file() {
                continue;
            }
            let name = child.file_name().to_string_lossy();
            if name.ends_with(USERSAYS_SUFFIX) {
                files.push(IntentFile {
                    name: name.into_owned(),
                    path: child.path().to_path_buf(),
                });
            }
        }
    }

    debug!(
        "{} ficheros de frases localizados en {}",
        files.len(),
        root.display()
    );
    Ok(files)
}

fn immediate_children(dir: &Path) -> impl Iterator<Item = Result<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .map(|entry| entry.map_err(|e| UploadError::Filesystem(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(files: &[IntentFile]) -> Vec<String> {
        let mut names: Vec<_> = files.iter().map(|f| f.name.clone()).collect();
        names.sort();
        names
    }

    #[test]
    fn selects_only_usersays_files() {
        let tmp = TempDir::new().unwrap();
        let intents = tmp.path().join("intents");
        fs::create_dir_all(intents.join("nested")).unwrap();
        fs::write(intents.join("greet_usersays_en.json"), "[]").unwrap();
        fs::write(intents.join("bye_usersays_en.json"), "[]").unwrap();
        fs::write(intents.join("greet.json"), "{}").unwrap();
        fs::write(intents.join("greet_usersays_es.json"), "[]").unwrap();
        fs::write(intents.join("nested/deep_usersays_en.json"), "[]").unwrap();
        fs::create_dir(intents.join("dir_usersays_en.json")).unwrap();
        fs::write(tmp.path().join("root_usersays_en.json"), "[]").unwrap();

        let files = locate_intent_files(tmp.path()).unwrap();

        assert_eq!(
            names(&files),
            vec!["bye_usersays_en.json", "greet_usersays_en.json"]
        );
        for file in &files {
            assert_eq!(file.path, intents.join(&file.name));
        }
    }

    #[test]
    fn missing_intents_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("entities")).unwrap();

        assert!(locate_intent_files(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn intents_as_regular_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("intents"), "no soy un directorio").unwrap();

        assert!(locate_intent_files(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn empty_intents_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("intents")).unwrap();

        assert!(locate_intent_files(tmp.path()).unwrap().is_empty());
    }

    /// La raíz de extracción siempre existe tras descomprimir; si falta, es un
    /// fallo de lectura y no un `intents` ausente.
    #[test]
    fn missing_extraction_root_is_a_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("no-existe");

        let err = locate_intent_files(&missing).unwrap_err();
        assert!(matches!(err, UploadError::Filesystem(_)), "{err:?}");
    }
}
