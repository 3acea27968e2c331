//! Downloadable CSV templates

use serde::Deserialize;

/// A fixed-header CSV offered for download
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvTemplate {
    pub name: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    pub headers: Vec<String>,
}

fn default_file_name() -> String {
    "template.csv".to_string()
}

impl Default for CsvTemplate {
    /// The group upload template
    fn default() -> Self {
        Self {
            name: "group_upload".to_string(),
            file_name: "group_upload_template.csv".to_string(),
            headers: ["group_code", "field1", "field2", "field3"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl CsvTemplate {
    /// Header line terminated by a newline
    pub fn render(&self) -> String {
        let cells: Vec<String> = self.headers.iter().map(|h| csv_cell(h)).collect();
        format!("{}\n", cells.join(","))
    }
}

fn csv_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
