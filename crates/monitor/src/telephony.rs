//! Telefonia do desktop: cada SMS ou chamada vira um arquivo na outbox.

use homeguard_core::report::{Telephony, TelephonyError, validate_number};
use homeguard_core::store::unix_millis;
use std::path::{Path, PathBuf};
use tracing::info;

pub struct OutboxTelephony {
    dir: PathBuf,
    written: u64,
}

impl OutboxTelephony {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_entry(&mut self, kind: &str, contents: &str) -> Result<PathBuf, TelephonyError> {
        std::fs::create_dir_all(&self.dir)?;
        self.written += 1;
        let path = self
            .dir
            .join(format!("{kind}-{:.0}-{}.txt", unix_millis(), self.written));
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Telephony for OutboxTelephony {
    fn place_call(&mut self, number: &str) -> Result<(), TelephonyError> {
        validate_number(number)?;
        let path = self.write_entry("call", &format!("CALL\nTo: {number}\n"))?;
        info!("📞 Chamada para {number} registrada em {}", path.display());
        Ok(())
    }

    fn send_sms(&mut self, number: &str, body: &str) -> Result<(), TelephonyError> {
        validate_number(number)?;
        let path = self.write_entry("sms", &format!("SMS\nTo: {number}\n\n{body}\n"))?;
        info!("✉ SMS para {number} registrado em {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("homeguard-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut files: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| std::fs::read_to_string(e.unwrap().path()).unwrap())
            .collect();
        files.sort();
        files
    }

    #[test]
    fn sms_and_call_are_written_to_outbox() {
        let dir = scratch_dir("outbox");
        let mut phone = OutboxTelephony::new(&dir);
        assert_eq!(phone.dir(), dir.as_path());

        phone.send_sms("+447700900123", "HomeGuard Status:\nFire: Safe").unwrap();
        phone.place_call("999").unwrap();

        let files = entries(&dir);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], "CALL\nTo: 999\n");
        assert_eq!(files[1], "SMS\nTo: +447700900123\n\nHomeGuard Status:\nFire: Safe\n");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn invalid_number_writes_nothing() {
        let dir = scratch_dir("invalid");
        let mut phone = OutboxTelephony::new(&dir);

        assert!(matches!(
            phone.place_call("not a number"),
            Err(TelephonyError::InvalidNumber(_))
        ));
        assert!(!dir.exists());
    }
}
