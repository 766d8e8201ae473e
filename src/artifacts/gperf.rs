//! Perfect-hash source artifact
//!
//! gperf keyword-file format:
//! ```text
//! %language=C++
//! %readonly-tables
//! %struct-type
//! %define hash-function-name symbol_hash
//! %define lookup-function-name lookup_symbol
//!
//! struct SymbolEntry {
//!     const char* name;
//!     int32_t id;
//! };
//!
//! %%
//! btcusdt, 0
//! ethusdt, 1
//! %%
//! ```
//! The same text is what `HashTableCompiler`s consume, so the in-crate
//! compiler and an external gperf run see identical keys.

use super::ArtifactError;
use crate::core::{SymbolId, SymbolTable, TableError};

const STRUCT_LAYOUT: [&str; 4] = [
    "struct SymbolEntry {",
    "    const char* name;",
    "    int32_t id;",
    "};",
];

/// Header directives of the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDirectives {
    pub language: String,
    pub readonly_tables: bool,
    pub struct_type: bool,
    pub hash_function_name: String,
    pub lookup_function_name: String,
}

impl Default for SourceDirectives {
    fn default() -> Self {
        Self {
            language: "C++".to_string(),
            readonly_tables: true,
            struct_type: true,
            hash_function_name: "symbol_hash".to_string(),
            lookup_function_name: "lookup_symbol".to_string(),
        }
    }
}

/// Declarative perfect-hash table description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerfectHashSource {
    pub directives: SourceDirectives,
    /// `(symbol, id)` in canonical (sorted) order
    pub entries: Vec<(String, SymbolId)>,
}

impl PerfectHashSource {
    pub fn from_table(table: &SymbolTable) -> Self {
        Self {
            directives: SourceDirectives::default(),
            entries: table.entries().map(|(name, id)| (name.to_string(), id)).collect(),
        }
    }

    /// Render the source text; deterministic for a given table
    pub fn render(&self) -> String {
        let d = &self.directives;
        let mut lines: Vec<String> = Vec::with_capacity(self.entries.len() + 16);
        lines.push(format!("%language={}", d.language));
        if d.readonly_tables {
            lines.push("%readonly-tables".to_string());
        }
        if d.struct_type {
            lines.push("%struct-type".to_string());
        }
        lines.push(format!("%define hash-function-name {}", d.hash_function_name));
        lines.push(format!("%define lookup-function-name {}", d.lookup_function_name));
        lines.push(String::new());
        lines.extend(STRUCT_LAYOUT.iter().map(|l| l.to_string()));
        lines.push(String::new());
        lines.push("%%".to_string());
        lines.extend(self.entries.iter().map(|(name, id)| format!("{}, {}", name, id)));
        lines.push("%%".to_string());

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Parse source text produced by `render` (or a hand-edited equivalent)
    pub fn parse(text: &str) -> Result<Self, ArtifactError> {
        #[derive(PartialEq)]
        enum Section {
            Declarations,
            Keywords,
            Trailer,
        }

        let mut directives = SourceDirectives {
            readonly_tables: false,
            struct_type: false,
            ..SourceDirectives::default()
        };
        let mut entries = Vec::new();
        let mut section = Section::Declarations;

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            match section {
                Section::Declarations => {
                    if line == "%%" {
                        section = Section::Keywords;
                    } else if let Some(lang) = line.strip_prefix("%language=") {
                        directives.language = lang.trim().to_string();
                    } else if line == "%readonly-tables" {
                        directives.readonly_tables = true;
                    } else if line == "%struct-type" {
                        directives.struct_type = true;
                    } else if let Some(rest) = line.strip_prefix("%define ") {
                        let mut parts = rest.split_whitespace();
                        match (parts.next(), parts.next()) {
                            (Some("hash-function-name"), Some(name)) => {
                                directives.hash_function_name = name.to_string()
                            }
                            (Some("lookup-function-name"), Some(name)) => {
                                directives.lookup_function_name = name.to_string()
                            }
                            _ => {}
                        }
                    }
                }
                Section::Keywords => {
                    if line == "%%" {
                        section = Section::Trailer;
                    } else if !line.is_empty() {
                        entries.push(parse_keyword_line(line, line_no)?);
                    }
                }
                Section::Trailer => {}
            }
        }

        match section {
            Section::Declarations => Err(ArtifactError::Syntax {
                line: 0,
                message: "missing %% delimiter".to_string(),
            }),
            Section::Keywords => Err(ArtifactError::Syntax {
                line: text.lines().count(),
                message: "unterminated keyword section".to_string(),
            }),
            Section::Trailer => Ok(Self { directives, entries }),
        }
    }

    /// Validate the entries as a symbol table
    pub fn to_table(&self) -> Result<SymbolTable, TableError> {
        SymbolTable::from_pairs(self.entries.iter().map(|(name, id)| (name.clone(), *id)))
    }
}

fn parse_keyword_line(line: &str, line_no: usize) -> Result<(String, SymbolId), ArtifactError> {
    let syntax = |message: &str| ArtifactError::Syntax {
        line: line_no,
        message: message.to_string(),
    };
    let (name, id) = line.split_once(',').ok_or_else(|| syntax("expected `name, id`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(syntax("empty keyword"));
    }
    let id: u32 = id.trim().parse().map_err(|_| syntax("id is not a non-negative integer"))?;
    Ok((name.to_string(), SymbolId::from_raw(id)))
}
