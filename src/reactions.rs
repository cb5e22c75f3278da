use anyhow::bail;
use keggkit::{
    aliases::{read_reactions, AliasTable, Mapper, Reaction},
    parse::Diagnostic,
};
use log::{info, warn};
use std::io::Write;

use crate::{
    commands::Command,
    fetch::{fetch_all, Query},
    utils::{kegg_client, output_to_writer, path_to_reader, write_log},
};

/// Where the KEGG ids of a reaction come from.
enum Lookup {
    Aliases(AliasTable),
    Mapper(Mapper),
}

impl Lookup {
    fn kegg_ids(&self, reaction: &str) -> (Vec<String>, Vec<Diagnostic>) {
        match self {
            Lookup::Aliases(table) => table.kegg_ids(reaction),
            Lookup::Mapper(mapper) => match mapper.get(reaction) {
                Some(id) => (vec![id.to_string()], vec![]),
                None => (
                    vec![],
                    vec![Diagnostic::new(reaction, "", "not found in mapper, skipping")],
                ),
            },
        }
    }
}

pub fn reactions(cmd: &Command) -> anyhow::Result<()> {
    match cmd {
        Command::Reactions {
            reactions,
            aliases,
            mapper,
            with_equation,
            output,
            log,
            kegg,
        } => {
            let mut diagnostics = Vec::new();

            let lookup = match (aliases, mapper) {
                (Some(path), None) => {
                    Lookup::Aliases(AliasTable::from_reader(path_to_reader(path)?)?)
                }
                (None, Some(path)) => {
                    let (mapper, mapper_diagnostics) = Mapper::from_reader(path_to_reader(path)?)?;
                    info!("{} reaction ids found in mapper file", mapper.len());
                    diagnostics.extend(mapper_diagnostics);
                    Lookup::Mapper(mapper)
                }
                _ => bail!("exactly one of --aliases or --mapper is required"),
            };

            let model: Vec<Reaction> = read_reactions(path_to_reader(reactions)?)?;
            info!("model contains {} reactions", model.len());

            // one query per (reaction, KEGG id) pair, in model order
            let mut queries = Vec::new();
            let mut equations = Vec::new();
            for reaction in &model {
                let (ids, reaction_diagnostics) = lookup.kegg_ids(&reaction.id);
                for diagnostic in reaction_diagnostics {
                    warn!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
                for id in ids {
                    queries.push(Query {
                        source_id: reaction.id.clone(),
                        query_id: id,
                    });
                    equations.push(reaction.equation.as_deref().unwrap_or_default());
                }
            }

            let client = kegg_client(kegg)?;
            let (fetched, fetch_diagnostics) =
                fetch_all(&client, &queries, kegg.threads as usize)?;
            diagnostics.extend(fetch_diagnostics);

            let mut writer = output_to_writer(output)?;
            write!(writer, "mseed_id\tkegg_id\tname\tenzyme\torthology")?;
            if *with_equation {
                write!(writer, "\tequation")?;
            }
            writeln!(writer)?;

            for ((query, record), equation) in queries.iter().zip(&fetched).zip(&equations) {
                write!(
                    writer,
                    "{}\t{}{}",
                    query.source_id,
                    query.query_id,
                    record.to_fragment()
                )?;
                if *with_equation {
                    write!(writer, "\t{}", equation)?;
                }
                writeln!(writer)?;
            }

            // Clean up before exiting
            writer.flush()?;
            write_log(log, &diagnostics)?;
        }
        _ => panic!("input command is not for reactions"),
    }
    Ok(())
}
