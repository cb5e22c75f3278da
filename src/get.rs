use crate::{
    commands::Command,
    fetch::{fetch_all, Query},
    utils::{kegg_client, output_to_writer, read_ids, write_log},
};
use std::io::Write;

pub fn get(cmd: &Command) -> anyhow::Result<()> {
    match cmd {
        Command::Get {
            input,
            output,
            log,
            kegg,
        } => {
            let ids = read_ids(input)?;
            let client = kegg_client(kegg)?;
            let mut writer = output_to_writer(output)?;

            let queries = ids
                .iter()
                .map(|id| Query {
                    source_id: id.clone(),
                    query_id: id.clone(),
                })
                .collect::<Vec<_>>();
            let (fetched, diagnostics) = fetch_all(&client, &queries, kegg.threads as usize)?;

            writeln!(writer, "query_id\tname\tenzyme\torthology")?;
            for (id, record) in ids.iter().zip(&fetched) {
                writeln!(writer, "{}{}", id, record.to_fragment())?;
            }

            // Clean up before exiting
            writer.flush()?;
            write_log(log, &diagnostics)?;
        }
        _ => panic!("input command is not for get"),
    }
    Ok(())
}
