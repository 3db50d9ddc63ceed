use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn BufRead + Send>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionMode {
    #[default]
    Plain,
    Zstd,
}

impl CompressionMode {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(
                "Invalid compression value ''. Supported values: 'zstd' or omitted.".to_string(),
            );
        }

        if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else {
            Err(format!(
                "Invalid compression value '{}'. Supported values: 'zstd' or omitted.",
                normalized
            ))
        }
    }

    /// Mode to use for `path`: `.zst` files are always decompressed.
    pub fn for_path(self, path: &Path) -> Self {
        let zst = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zst"));
        if zst {
            Self::Zstd
        } else {
            self
        }
    }
}

/// Expands `pattern` into input paths: a glob when it contains `*` or `?`,
/// otherwise the single path itself.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    if pattern.contains('*') || pattern.contains('?') {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)?
            .filter_map(|entry| entry.ok())
            .collect();
        paths.sort();
        Ok(paths)
    } else {
        Ok(vec![PathBuf::from(pattern)])
    }
}

pub fn wrap_input<R: Read + Send + 'static>(
    reader: R,
    compression: CompressionMode,
) -> io::Result<PgnInput> {
    match compression {
        CompressionMode::Plain => Ok(Box::new(BufReader::new(reader))),
        CompressionMode::Zstd => {
            let decoder = ZstdDecoder::new(reader)?;
            Ok(Box::new(BufReader::new(decoder)))
        }
    }
}

pub fn open_input_stream(path: &Path, compression: CompressionMode) -> Result<PgnInput, String> {
    let file =
        File::open(path).map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

    wrap_input(file, compression.for_path(path)).map_err(|e| {
        format!(
            "Failed to initialize zstd decoder for '{}': {}",
            path.display(),
            e
        )
    })
}
