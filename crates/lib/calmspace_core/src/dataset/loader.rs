//! CSV loading for the conversation corpora.

use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::DatasetError;

/// One row of the empathetic-dialogue corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionRow {
    #[serde(rename = "Situation", default)]
    pub situation: String,
    #[serde(default)]
    pub emotion: String,
    #[serde(default)]
    pub empathetic_dialogues: String,
}

impl EmotionRow {
    pub const COLUMNS: &'static [&'static str] = &["Situation", "emotion", "empathetic_dialogues"];

    /// Text the index is fitted on.
    pub fn document(&self) -> String {
        format!("{} {}", self.situation, self.emotion)
    }

    /// First agent turn of the dialogue, or the whole dialogue.
    pub fn agent_reply(&self) -> String {
        match self.empathetic_dialogues.split("Agent :").nth(1) {
            Some(reply) => reply.trim().to_string(),
            None => self.empathetic_dialogues.clone(),
        }
    }
}

/// One question/answer row of the counselling corpus.
#[derive(Debug, Clone, Deserialize)]
pub struct MentalRow {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
}

impl MentalRow {
    pub const COLUMNS: &'static [&'static str] = &["input", "output"];
}

/// Read a CSV file with headers, checking the required columns exist.
///
/// Returns the header names alongside the rows.
pub fn read_csv<T: DeserializeOwned>(
    path: &Path,
    required: &[&str],
) -> Result<(Vec<String>, Vec<T>), DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| DatasetError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| DatasetError::Csv {
            path: path.display().to_string(),
            source: e,
        })?
        .iter()
        .map(str::to_string)
        .collect();

    if let Some(missing) = required.iter().find(|c| !columns.iter().any(|h| h == *c)) {
        return Err(DatasetError::MissingColumn {
            path: path.display().to_string(),
            column: missing.to_string(),
        });
    }

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| DatasetError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok((columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn agent_reply_takes_first_agent_turn() {
        let row = EmotionRow {
            situation: String::new(),
            emotion: "sad".into(),
            empathetic_dialogues: "Customer :I lost my dog\nAgent :I'm so sorry to hear that.\nCustomer :Thanks\nAgent :Anytime".into(),
        };
        assert_eq!(row.agent_reply(), "I'm so sorry to hear that.\nCustomer :Thanks");
    }

    #[test]
    fn agent_reply_falls_back_to_dialogue() {
        let row = EmotionRow {
            situation: String::new(),
            emotion: String::new(),
            empathetic_dialogues: "no markers here".into(),
        };
        assert_eq!(row.agent_reply(), "no markers here");
    }

    #[test]
    fn missing_column_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "input,answer").unwrap();
        writeln!(file, "hello,world").unwrap();

        let err = read_csv::<MentalRow>(file.path(), MentalRow::COLUMNS).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { ref column, .. } if column == "output"));
    }

    #[test]
    fn reads_rows_and_headers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ",input,output").unwrap();
        writeln!(file, "0,\"I feel low, really\",Talk to someone").unwrap();
        writeln!(file, "1,,Empty input").unwrap();

        let (columns, rows) = read_csv::<MentalRow>(file.path(), MentalRow::COLUMNS).unwrap();
        assert_eq!(columns, vec!["", "input", "output"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].input, "I feel low, really");
        assert_eq!(rows[1].input, "");
    }
}
