use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write specimen XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error writing {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
