//! JSONL audit log of submitted answers, one record per line.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub game_id: String,
    pub participant_id: String,
    pub question_id: String,
    pub submitted: String,
    pub correct: bool,
    pub score: u32,
    #[serde(default)]
    pub ts: Option<String>,
}

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};

#[derive(Debug)]
pub struct MatchLogger {
    writer: BufWriter<File>,
}

impl MatchLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self { writer: BufWriter::new(f) })
    }

    pub fn write(&mut self, record: &AnswerRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AnswerRecord {
        AnswerRecord {
            game_id: "g1".into(),
            participant_id: "p1".into(),
            question_id: "q1".into(),
            submitted: "4".into(),
            correct: true,
            score: 1,
            ts: None,
        }
    }

    #[test]
    fn writes_one_json_line_per_record() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("answers.jsonl");

        let mut logger = MatchLogger::create(&path).expect("create logger");
        logger.write(&record()).expect("write record");
        logger.write(&record()).expect("write record");

        let raw = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: AnswerRecord = serde_json::from_str(lines[0]).expect("parse line");
        assert_eq!(parsed.question_id, "q1");
        assert!(parsed.correct);
        assert!(parsed.ts.is_some(), "timestamp injected on write");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("logs").join("answers.jsonl");

        let mut logger = MatchLogger::create(&path).expect("create logger");
        logger.write(&record()).expect("write record");
        assert!(path.exists());
    }
}
