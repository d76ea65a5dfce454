use std::io::Write;
use std::path::PathBuf;

pub fn sessions_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".hatch").join("sessions")
}

/// Appends one JSON object per line to ~/.hatch/sessions/<timestamp>.jsonl.
/// Purely observational; the in-memory transcript is the source of truth.
pub struct SessionLogger {
    file: std::io::BufWriter<std::fs::File>,
}

impl SessionLogger {
    pub fn new(model: &str) -> anyhow::Result<Self> {
        let dir = sessions_dir();
        std::fs::create_dir_all(&dir)?;

        let now = chrono::Local::now();
        let filename = format!("{}.jsonl", now.format("%Y%m%d_%H%M%S"));
        let file = std::io::BufWriter::new(std::fs::File::create(dir.join(&filename))?);

        let mut logger = Self { file };
        logger.write_json(&serde_json::json!({
            "type": "session_start",
            "session_id": uuid::Uuid::new_v4().to_string(),
            "ts": now.to_rfc3339(),
            "model": model,
        }))?;

        Ok(logger)
    }

    fn write_json(&mut self, value: &serde_json::Value) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.file, value)?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }

    pub fn log_input(&mut self, line: &str) {
        let _ = self.write_json(&serde_json::json!({
            "type": "input",
            "ts": chrono::Local::now().to_rfc3339(),
            "content": line,
        }));
    }

    pub fn log_output(&mut self, line: &str) {
        let _ = self.write_json(&serde_json::json!({
            "type": "output",
            "ts": chrono::Local::now().to_rfc3339(),
            "content": line,
        }));
    }

    pub fn log_unlock(&mut self, quote: &str) {
        let _ = self.write_json(&serde_json::json!({
            "type": "unlock",
            "ts": chrono::Local::now().to_rfc3339(),
            "quote": quote,
        }));
    }
}
