//! Random LoRaWAN device credentials for simulation fixtures.

use rand::RngCore;
use simstat_core::Result;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Identity and root key of one simulated end device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceCredentials {
    pub dev_eui:  [u8; 8],
    pub join_eui: [u8; 8],
    pub app_key:  [u8; 16],
}

impl DeviceCredentials {
    /// Draw a fresh credential set from `rng`.
    pub fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut creds = Self { dev_eui: [0; 8], join_eui: [0; 8], app_key: [0; 16] };
        rng.fill_bytes(&mut creds.dev_eui);
        rng.fill_bytes(&mut creds.join_eui);
        rng.fill_bytes(&mut creds.app_key);
        creds
    }

    /// `dev_eui,join_eui,app_key` in lowercase hex, without a newline.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{}",
            hex::encode(self.dev_eui),
            hex::encode(self.join_eui),
            hex::encode(self.app_key)
        )
    }
}

/// Append `count` random credential lines to `path`, creating the file if
/// needed.  Returns the number of lines written.
pub fn append_devices<R: RngCore + ?Sized>(
    path: impl AsRef<Path>,
    count: usize,
    rng: &mut R,
) -> Result<usize> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let mut out = BufWriter::new(file);
    for _ in 0..count {
        writeln!(out, "{}", DeviceCredentials::random(rng).to_csv_line())?;
    }
    out.flush()?;

    info!("Appended {count} devices to {}", path.display());
    Ok(count)
}
