// crates/choromap-core/src/loader/common_io.rs
use crate::error::{MapError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a local dataset, transparently gunzipping `*.gz` files.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read + Send>> {
    let file = File::open(path).map_err(|e| {
        MapError::InvalidSource(format!("dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(MapError::InvalidSource(format!(
                "{} is gzipped but the 'compact' feature is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

/// GETs `url` and returns the body, failing on non-2xx statuses.
#[cfg(feature = "fetch")]
pub fn fetch_bytes(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(MapError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.bytes()?.to_vec())
}
