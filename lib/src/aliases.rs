//! Cross-references from ModelSEED reaction ids into other databases.
use crate::parse::Diagnostic;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AliasError {
    #[error("could not read table: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected at least {expected} columns but found {found}")]
    Columns {
        line: u64,
        expected: usize,
        found: usize,
    },
}

fn tsv_reader<R: Read>(reader: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(reader)
}

fn check_columns(record: &csv::StringRecord, expected: usize) -> Result<(), AliasError> {
    if record.len() < expected {
        return Err(AliasError::Columns {
            line: record.position().map(|p| p.line()).unwrap_or(0),
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

/// The ModelSEED `Reactions_Aliases.tsv` table: for each reaction, the aliases it
/// has in each database.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasTable {
    aliases: HashMap<String, BTreeMap<String, BTreeSet<String>>>,
}

impl AliasTable {
    /// Read the four-column alias table (ModelSEED ids, old ids, alias, database),
    /// skipping its header line.
    ///
    /// The ModelSEED column may join several reactions with `|`; every one of them
    /// gets the alias. All `KEGG*` databases are merged into `KEGG`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AliasError> {
        let mut table = AliasTable::default();
        for result in tsv_reader(reader, true).records() {
            let record = result?;
            check_columns(&record, 4)?;

            let modelseed = record[0].trim();
            if modelseed.is_empty() {
                continue;
            }
            let alias = record[2].trim();
            let database = match record[3].trim() {
                db if db.starts_with("KEGG") => "KEGG",
                db => db,
            };

            for id in modelseed.split('|') {
                table
                    .aliases
                    .entry(id.to_string())
                    .or_default()
                    .entry(database.to_string())
                    .or_default()
                    .insert(alias.to_string());
            }
        }
        debug!("loaded aliases for {} reactions", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Databases with aliases for `reaction`, sorted by name.
    pub fn databases(&self, reaction: &str) -> Option<&BTreeMap<String, BTreeSet<String>>> {
        self.aliases.get(reaction)
    }

    /// KEGG ids to query for `reaction`, in sorted order. Reactions without a table
    /// entry, and databases that aren't queried, are reported as diagnostics.
    pub fn kegg_ids(&self, reaction: &str) -> (Vec<String>, Vec<Diagnostic>) {
        let mut ids = Vec::new();
        let mut diagnostics = Vec::new();
        match self.databases(reaction) {
            None => diagnostics.push(Diagnostic::new(reaction, "", "not in alias file")),
            Some(databases) => {
                for (database, aliases) in databases {
                    match database.as_str() {
                        "KEGG" => ids.extend(aliases.iter().cloned()),
                        "MetaCyc" | "PlantCyc" => diagnostics.push(Diagnostic::new(
                            reaction,
                            "",
                            format!("has {} info, skipping", database),
                        )),
                        _ => {}
                    }
                }
            }
        }
        (ids, diagnostics)
    }
}

/// A two-column ModelSEED to KEGG reaction mapping.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Mapper {
    map: HashMap<String, String>,
}

impl Mapper {
    /// Read the mapper table, skipping its header line. A ModelSEED id listed twice
    /// keeps its first mapping and is reported.
    pub fn from_reader<R: Read>(reader: R) -> Result<(Self, Vec<Diagnostic>), AliasError> {
        let mut mapper = Mapper::default();
        let mut diagnostics = Vec::new();
        for result in tsv_reader(reader, true).records() {
            let record = result?;
            check_columns(&record, 2)?;
            let (modelseed, kegg) = (record[0].trim(), record[1].trim());

            if mapper.map.contains_key(modelseed) {
                let diagnostic =
                    Diagnostic::new(modelseed, kegg, "already encountered in mapper file");
                warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
            } else {
                mapper.map.insert(modelseed.to_string(), kegg.to_string());
            }
        }
        debug!("{} reaction ids found in mapper file", mapper.map.len());
        Ok((mapper, diagnostics))
    }

    pub fn get(&self, reaction: &str) -> Option<&str> {
        self.map.get(reaction).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// One reaction of a metabolic model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: String,
    pub equation: Option<String>,
}

/// Read a model's reactions, one `id<TAB>equation` per line with the equation
/// optional. Blank lines and `#` comments are ignored and input order is kept.
pub fn read_reactions<R: Read>(reader: R) -> Result<Vec<Reaction>, AliasError> {
    let mut reactions = Vec::new();
    for result in tsv_reader(reader, false).records() {
        let record = result?;
        let id = record.get(0).map(str::trim).unwrap_or_default();
        if id.is_empty() {
            continue;
        }
        reactions.push(Reaction {
            id: id.to_string(),
            equation: record
                .get(1)
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from),
        });
    }
    Ok(reactions)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const ALIASES: &str = "\
ModelSEED ID\tOld ModelSEED ID\tExternal ID\tSource
rxn00001\trxn00001\tR00004\tKEGG
rxn00001|rxn00002\t\tR00005\tKEGG_old
rxn00002\t\tPPA-RXN\tMetaCyc
\t\tR99999\tKEGG
rxn00003\t\tINORGPYROPHOSPHAT-RXN\tPlantCyc
rxn00003\t\tPPA\tBiGG
";

    #[test]
    fn alias_table() {
        let table = AliasTable::from_reader(ALIASES.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);

        let (ids, diagnostics) = table.kegg_ids("rxn00001");
        assert_eq!(ids, vec!["R00004", "R00005"]);
        assert!(diagnostics.is_empty());

        let (ids, diagnostics) = table.kegg_ids("rxn00002");
        assert_eq!(ids, vec!["R00005"]);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "has MetaCyc info, skipping");

        let (ids, diagnostics) = table.kegg_ids("rxn00003");
        assert!(ids.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(table.databases("rxn00003").unwrap().contains_key("BiGG"));

        let (ids, diagnostics) = table.kegg_ids("rxn99999");
        assert!(ids.is_empty());
        assert_eq!(diagnostics[0].message, "not in alias file");
    }

    #[test]
    fn alias_table_too_few_columns() {
        let result = AliasTable::from_reader("header\nrxn00001\tR00004\n".as_bytes());
        assert!(matches!(
            result,
            Err(AliasError::Columns {
                expected: 4,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn mapper_keeps_first_mapping() {
        let text = "mseed\tkegg\nrxn00001\tR00004\nrxn00002\tR00005\nrxn00001\tR00006\n";
        let (mapper, diagnostics) = Mapper::from_reader(text.as_bytes()).unwrap();
        assert_eq!(mapper.len(), 2);
        assert_eq!(mapper.get("rxn00001"), Some("R00004"));
        assert_eq!(mapper.get("rxn00003"), None);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].query_id, "R00006");
    }

    #[test]
    fn reactions_keep_order() {
        let text = "# model reactions\nrxn00002\tA + B <=> C\n\nrxn00001\nrxn00003\t \n";
        let reactions = read_reactions(text.as_bytes()).unwrap();
        assert_eq!(
            reactions,
            vec![
                Reaction {
                    id: "rxn00002".to_string(),
                    equation: Some("A + B <=> C".to_string()),
                },
                Reaction {
                    id: "rxn00001".to_string(),
                    equation: None,
                },
                Reaction {
                    id: "rxn00003".to_string(),
                    equation: None,
                },
            ]
        );
    }
}
