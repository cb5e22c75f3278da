use crate::{
    commands::Command,
    utils::{output_to_writer, read_to_string, write_log},
};
use keggkit::parse::{entry_id, parse_response, split_records};
use log::{info, warn};
use std::io::Write;

pub fn parse(cmd: &Command) -> anyhow::Result<()> {
    match cmd {
        Command::Parse { input, output, log } => {
            let text = read_to_string(input)?;
            let mut writer = output_to_writer(output)?;
            let mut diagnostics = Vec::new();

            writeln!(writer, "entry\tname\tenzyme\torthology")?;
            let records = split_records(&text);
            for (i, record) in records.iter().enumerate() {
                let id = match entry_id(record) {
                    Some(id) => id.to_string(),
                    None => {
                        warn!("record {} has no ENTRY line", i + 1);
                        format!("record{}", i + 1)
                    }
                };
                let parsed = parse_response(record, "", &id);
                writeln!(writer, "{}{}", id, parsed.record.to_fragment())?;
                diagnostics.extend(parsed.diagnostics);
            }
            info!("parsed {} record(s)", records.len());

            // Clean up before exiting
            writer.flush()?;
            write_log(log, &diagnostics)?;
        }
        _ => panic!("input command is not for parse"),
    }
    Ok(())
}
